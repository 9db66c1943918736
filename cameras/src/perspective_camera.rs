//! Perspective Camera

use base::camera::*;
use base::film::*;
use base::geometry::*;
use base::pbrt::*;
use base::sampling::*;
use std::mem::swap;

/// Orthonormal camera frame in world space.
#[derive(Copy, Clone, Debug)]
pub struct CameraFrame {
    /// Camera position.
    pub eye: Point3f,

    /// Unit vector pointing right on the image plane.
    pub right: Vector3f,

    /// Unit vector pointing up on the image plane.
    pub up: Vector3f,

    /// Unit viewing direction.
    pub forward: Vector3f,
}

impl CameraFrame {
    /// Build a camera frame looking from `eye` towards `look`.
    ///
    /// * `eye`  - Camera position.
    /// * `look` - Point the camera looks at.
    /// * `up`   - Approximate up vector.
    pub fn look_at(eye: Point3f, look: Point3f, up: Vector3f) -> Self {
        let forward = (look - eye).normalize();
        let mut right = up.cross(&forward);
        if right.length() < 1e-6 {
            warn!(
                "Up vector ({}, {}, {}) and viewing direction are parallel; picking an arbitrary frame.",
                up.x, up.y, up.z
            );
            let (r, _) = coordinate_system(&forward);
            right = r;
        }
        let right = right.normalize();
        let up = forward.cross(&right);
        Self { eye, right, up, forward }
    }

    /// Transform a camera space direction to world space.
    ///
    /// * `v` - The direction.
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        v.x * self.right + v.y * self.up + v.z * self.forward
    }

    /// Transform a camera space point to world space.
    ///
    /// * `p` - The point.
    pub fn point_to_world(&self, p: &Point3f) -> Point3f {
        self.eye + self.to_world(&Vector3f::new(p.x, p.y, p.z))
    }
}

/// Perspective camera.
pub struct PerspectiveCamera {
    /// Common camera parameters.
    pub data: CameraData,

    /// Camera to world frame.
    pub frame: CameraFrame,

    /// Bounds of screen space.
    pub screen_window: Bounds2f,

    /// Tangent of half the field of view.
    pub tan_half_fov: Float,

    /// Radius of camera lens.
    pub lens_radius: Float,

    /// Distance to the plane of focus.
    pub focal_distance: Float,
}

impl PerspectiveCamera {
    /// Create a new perspective camera.
    ///
    /// * `frame`          - Camera to world frame.
    /// * `shutter_open`   - Time when shutter is open.
    /// * `shutter_close`  - Time when shutter is closed.
    /// * `lens_radius`    - Radius of camera lens.
    /// * `focal_distance` - Focal distance.
    /// * `fov`            - The field-of-view angle in degrees, spanning the
    ///                      shorter image axis.
    /// * `film`           - The film to capture the rendered image.
    pub fn new(
        frame: CameraFrame,
        shutter_open: Float,
        shutter_close: Float,
        lens_radius: Float,
        focal_distance: Float,
        fov: Float,
        film: Film,
    ) -> Self {
        let (mut shutter_open, mut shutter_close) = (shutter_open, shutter_close);
        if shutter_close < shutter_open {
            warn!(
                "Shutter close time [{}] < shutter open [{}]. Swapping them.",
                shutter_close, shutter_open
            );
            swap(&mut shutter_close, &mut shutter_open);
        }

        let res = film.full_resolution;
        let frame_aspect = res.x as Float / max(res.y, 1) as Float;
        let screen_window = if frame_aspect > 1.0 {
            Bounds2f::new(
                Point2f::new(-frame_aspect, -1.0),
                Point2f::new(frame_aspect, 1.0),
            )
        } else {
            Bounds2f::new(
                Point2f::new(-1.0, -1.0 / frame_aspect),
                Point2f::new(1.0, 1.0 / frame_aspect),
            )
        };

        let fov = clamp(fov, 1e-2, 179.99);
        Self {
            data: CameraData::new(shutter_open, shutter_close, film),
            frame,
            screen_window,
            tan_half_fov: (radians(fov) / 2.0).tan(),
            lens_radius,
            focal_distance,
        }
    }

    /// Map a raster space position to a point on the camera space plane z=1.
    ///
    /// * `p_film` - Raster position.
    fn raster_to_camera(&self, p_film: &Point2f) -> Point3f {
        let res = self.data.film.full_resolution;
        let sw = &self.screen_window;
        let sx = sw.p_min.x + (p_film.x / res.x as Float) * (sw.p_max.x - sw.p_min.x);
        let sy = sw.p_max.y - (p_film.y / res.y as Float) * (sw.p_max.y - sw.p_min.y);
        Point3f::new(sx * self.tan_half_fov, sy * self.tan_half_fov, 1.0)
    }
}

impl Camera for PerspectiveCamera {
    /// Returns the camera data.
    fn get_data(&self) -> &CameraData {
        &self.data
    }

    /// Returns a ray corresponding to a given sample and its weight.
    ///
    /// * `sample` - The sample.
    fn generate_ray(&self, sample: &CameraSample) -> (Ray, Float) {
        let p_camera = self.raster_to_camera(&sample.p_film);
        let mut o = Point3f::ZERO;
        let mut d = Vector3f::from(p_camera).normalize();

        // Modify ray for depth of field.
        if self.lens_radius > 0.0 {
            let p_lens = concentric_sample_disk(&sample.p_lens) * self.lens_radius;
            let ft = self.focal_distance / d.z;
            let p_focus = o + ft * d;
            o = Point3f::new(p_lens.x, p_lens.y, 0.0);
            d = (p_focus - o).normalize();
        }

        let ray = Ray::new(
            self.frame.point_to_world(&o),
            self.frame.to_world(&d).normalize(),
            INFINITY,
            lerp(sample.time, self.data.shutter_open, self.data.shutter_close),
        );
        (ray, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::filter::*;
    use float_cmp::*;
    use proptest::prelude::*;
    use std::sync::Arc;

    struct UnitBox {
        data: FilterData,
    }

    impl Filter for UnitBox {
        fn get_data(&self) -> &FilterData {
            &self.data
        }

        fn evaluate(&self, _p: &Point2f) -> Float {
            1.0
        }
    }

    fn camera(res: Point2i, lens_radius: Float) -> PerspectiveCamera {
        let filter = Arc::new(UnitBox {
            data: FilterData::new(Vector2f::new(0.5, 0.5)),
        });
        let film = Film::new(
            &res,
            &Bounds2f::new(Point2f::ZERO, Point2f::new(1.0, 1.0)),
            filter,
            35.0,
            "test.png",
            None,
            None,
        );
        let frame = CameraFrame::look_at(
            Point3f::new(0.0, 0.0, -5.0),
            Point3f::ZERO,
            Vector3f::new(0.0, 1.0, 0.0),
        );
        PerspectiveCamera::new(frame, 0.0, 1.0, lens_radius, 5.0, 90.0, film)
    }

    #[test]
    fn center_pixel_looks_down_view_axis() {
        let cam = camera(Point2i::new(64, 64), 0.0);
        let sample = CameraSample::new(Point2f::new(32.0, 32.0), Point2f::new(0.5, 0.5), 0.5);
        let (ray, weight) = cam.generate_ray(&sample);
        assert_eq!(weight, 1.0);
        assert_eq!(ray.o, Point3f::new(0.0, 0.0, -5.0));
        assert!(approx_eq!(f32, ray.d.z, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, ray.time, 0.5, epsilon = 1e-6));
    }

    #[test]
    fn raster_y_grows_downward() {
        let cam = camera(Point2i::new(64, 64), 0.0);
        let top = cam.generate_ray(&CameraSample::new(Point2f::new(32.0, 0.0), Point2f::ZERO, 0.0)).0;
        let right = cam.generate_ray(&CameraSample::new(Point2f::new(64.0, 32.0), Point2f::ZERO, 0.0)).0;
        assert!(top.d.y > 0.0);
        assert!(right.d.x > 0.0);
        // 90 degree field of view reaches 45 degrees at the image edge.
        assert!(approx_eq!(f32, top.d.y, top.d.z, epsilon = 1e-5));
    }

    #[test]
    fn lens_sample_offsets_ray_origin() {
        let cam = camera(Point2i::new(64, 64), 0.25);
        // (1, 0.5) maps to the rim of the unit disk along +x.
        let sample = CameraSample::new(Point2f::new(32.0, 32.0), Point2f::new(1.0, 0.5), 0.0);
        let (ray, _) = cam.generate_ray(&sample);
        let offset = ray.o - Point3f::new(0.0, 0.0, -5.0);
        assert!(approx_eq!(f32, offset.length(), 0.25, epsilon = 1e-5));
        assert!(approx_eq!(f32, offset.z, 0.0, epsilon = 1e-6));

        // The center ray still meets the view axis on the focal plane.
        let p = ray.at(5.0 / ray.d.z);
        assert!(approx_eq!(f32, p.x, 0.0, epsilon = 1e-4));
        assert!(approx_eq!(f32, p.y, 0.0, epsilon = 1e-4));
    }

    #[test]
    fn reversed_shutter_is_swapped() {
        let PerspectiveCamera { frame, data, .. } = camera(Point2i::new(8, 8), 0.0);
        let cam = PerspectiveCamera::new(frame, 1.0, 0.0, 0.0, 1.0, 60.0, data.film);
        assert_eq!(cam.data.shutter_open, 0.0);
        assert_eq!(cam.data.shutter_close, 1.0);
    }

    proptest! {
        #[test]
        fn lens_rays_converge_on_focal_plane(
            px in 0.0..64.0f32, py in 0.0..64.0f32,
            lx in 0.0..1.0f32, ly in 0.0..1.0f32,
        ) {
            let pinhole = camera(Point2i::new(64, 64), 0.0);
            let lens = camera(Point2i::new(64, 64), 0.25);
            let a = pinhole.generate_ray(&CameraSample::new(Point2f::new(px, py), Point2f::new(0.5, 0.5), 0.0)).0;
            let b = lens.generate_ray(&CameraSample::new(Point2f::new(px, py), Point2f::new(lx, ly), 0.0)).0;

            // Both rays reach the plane z = 0, five units in front of the eye.
            let pa = a.at(-a.o.z / a.d.z);
            let pb = b.at(-b.o.z / b.d.z);
            prop_assert!(pa.distance(&pb) < 1e-3);
        }
    }
}
