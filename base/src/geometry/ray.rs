//! Rays

use super::common::*;
use super::normal::*;
use super::point3::*;
use super::vector3::*;
use crate::pbrt::*;

/// A semi-infinite line with origin `o` and direction `d`.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,

    /// Time value.
    pub time: Float,
}

impl Ray {
    /// Returns a new ray.
    ///
    /// * `o`     - Origin.
    /// * `d`     - Direction.
    /// * `t_max` - Maximum extent of the ray.
    /// * `time`  - Time value.
    pub fn new(o: Point3f, d: Vector3f, t_max: Float, time: Float) -> Self {
        Self { o, d, t_max, time }
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.o.has_nans() || self.d.has_nans() || self.t_max.is_nan()
    }

    /// Get position along the ray at given parameter.
    ///
    /// * `t` - Parameter to evaluate.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }

    /// Offset ray origin along the surface normal so spawned rays do not
    /// re-intersect the surface they leave.
    ///
    /// `p`       - Intersection point.
    /// `p_error` - Floating point error for intersection points.
    /// `n`       - Surface normal at the point `p`.
    /// `w`       - The direction.
    pub fn offset_origin(p: &Point3f, p_error: &Vector3f, n: &Normal3f, w: &Vector3f) -> Point3f {
        let d = n.abs().dot(p_error);

        let mut offset = Vector3::from(*n) * d;
        if w.dot(n) < 0.0 {
            offset = -offset;
        }

        let mut po = *p + offset;

        // Round offset point po away from p.
        for axis in 0..3 {
            if offset[axis] > 0.0 {
                po[axis] = next_float_up(po[axis]);
            } else if offset[axis] < 0.0 {
                po[axis] = next_float_down(po[axis]);
            }
        }

        po
    }
}

impl Default for Ray {
    /// Returns a default value for `Ray`.
    fn default() -> Self {
        Self {
            o: Point3f::default(),
            d: Vector3f::default(),
            t_max: INFINITY,
            time: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn has_nans() {
        let point = Point3::new(0.0, 0.0, 0.0);
        let vector = Vector3::new(1.0, 0.0, 0.0);
        assert!(Ray::new(Point3::new(f32::NAN, 0.0, 0.0), vector, 0.0, 0.0).has_nans());
        assert!(Ray::new(point, vector, f32::NAN, 0.0).has_nans());
        assert!(!Ray::new(point, vector, INFINITY, 0.0).has_nans());
    }

    #[test]
    fn offset_origin_moves_along_normal() {
        let p = Point3f::new(0.0, 0.0, 0.0);
        let err = Vector3f::new(1e-3, 1e-3, 1e-3);
        let n = Normal3f::new(0.0, 0.0, 1.0);
        let up = Ray::offset_origin(&p, &err, &n, &Vector3f::new(0.0, 0.0, 1.0));
        let down = Ray::offset_origin(&p, &err, &n, &Vector3f::new(0.0, 0.0, -1.0));
        assert!(up.z > 0.0);
        assert!(down.z < 0.0);
        assert_eq!(up.x, 0.0);
    }

    prop_range!(range_f32, f32, -100.0..100.0f32);

    prop_point3!(
        point3_f32,
        f32,
        -100.0..100.0f32,
        -100.0..100.0f32,
        -100.0..100.0f32
    );

    prop_vector3!(
        vector3_f32,
        f32,
        -100.0..100.0f32,
        -100.0..100.0f32,
        -100.0..100.0f32
    );

    proptest! {
        #[test]
        fn at_f32(o in point3_f32(), d in vector3_f32(), t in range_f32()) {
            let r = Ray::new(o, d, INFINITY, 0.0);
            prop_assert_eq!(r.at(t), o + d * t);
        }
    }
}
