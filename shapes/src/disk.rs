//! Disks

use base::geometry::*;
use base::interaction::*;
use base::pbrt::*;
use base::sampling::concentric_sample_disk;
use base::shape::*;

/// A disk lying in the plane `z = center.z` with its default normal along
/// +z.
#[derive(Clone, Debug)]
pub struct Disk {
    /// Centre of the disk.
    pub center: Point3f,

    /// Radius of disk.
    pub radius: Float,

    /// Inner radius of disk to truncate center.
    pub inner_radius: Float,

    /// Maximum angle Φ to truncate disk.
    pub phi_max: Float,

    /// Whether the normal points along -z.
    pub reverse_orientation: bool,
}

impl Disk {
    /// Create a new disk.
    ///
    /// * `center`              - Centre of the disk.
    /// * `radius`              - Radius of disk.
    /// * `inner_radius`        - Inner radius of disk to truncate center.
    /// * `phi_max`             - Maximum angle Φ in degrees to truncate disk.
    /// * `reverse_orientation` - Indicates whether their surface normal directions
    ///                           should be reversed from the default
    pub fn new(center: Point3f, radius: Float, inner_radius: Float, phi_max: Float, reverse_orientation: bool) -> Self {
        Self {
            center,
            radius,
            inner_radius: clamp(inner_radius, 0.0, radius),
            phi_max: clamp(phi_max, 0.0, 360.0).to_radians(),
            reverse_orientation,
        }
    }

    /// Returns the hit distance and the hit point relative to the centre.
    fn hit_local(&self, r: &Ray) -> Option<(Float, Vector3f, Float)> {
        // Reject disk intersections for rays parallel to the disk's plane.
        if r.d.z == 0.0 {
            return None;
        }
        let t_shape_hit = (self.center.z - r.o.z) / r.d.z;
        if t_shape_hit <= 0.0 || t_shape_hit >= r.t_max {
            return None;
        }

        // See if hit point is inside disk radii and phimax.
        let mut p_local = r.at(t_shape_hit) - self.center;
        p_local.z = 0.0;
        let dist2 = p_local.x * p_local.x + p_local.y * p_local.y;
        if dist2 > self.radius * self.radius || dist2 < self.inner_radius * self.inner_radius {
            return None;
        }

        // Test disk phi value against phimax.
        let mut phi = p_local.y.atan2(p_local.x);
        if phi < 0.0 {
            phi += TWO_PI;
        }
        if phi > self.phi_max {
            return None;
        }

        Some((t_shape_hit, p_local, phi))
    }
}

impl Shape for Disk {
    fn get_type(&self) -> &'static str {
        "disk"
    }

    fn world_bound(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, 0.0);
        Bounds3f::new(self.center - r, self.center + r)
    }

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect<'scene>(&self, r: &Ray) -> Option<Intersection<'scene>> {
        let (t_shape_hit, p_local, phi) = self.hit_local(r)?;

        // Find parametric representation of disk hit.
        let u = phi / self.phi_max;
        let r_hit = max(p_local.length(), 1e-6 * self.radius);
        let v = (self.radius - r_hit) / (self.radius - self.inner_radius);
        let (px, py) = if p_local.x == 0.0 && p_local.y == 0.0 {
            (r_hit, 0.0)
        } else {
            (p_local.x, p_local.y)
        };
        let dpdu = Vector3f::new(-self.phi_max * py, self.phi_max * px, 0.0);
        let dpdv = Vector3f::new(px, py, 0.0) * (self.inner_radius - self.radius) / r_hit;

        let si = SurfaceInteraction::new(
            self.center + p_local,
            Vector3f::ZERO,
            Point2f::new(u, v),
            -r.d,
            dpdu,
            dpdv,
            r.time,
            self.reverse_orientation,
        );

        Some(Intersection::new(t_shape_hit, si))
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.hit_local(r).is_some()
    }

    fn area(&self) -> Float {
        self.phi_max * 0.5 * (self.radius * self.radius - self.inner_radius * self.inner_radius)
    }

    /// Sample a point on the surface and return the PDF with respect to area on
    /// the surface. The whole disk is sampled, ignoring `inner_radius` and
    /// `phi_max`.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float) {
        let pd = concentric_sample_disk(u);
        let p = self.center + Vector3f::new(pd.x * self.radius, pd.y * self.radius, 0.0);
        let n = if self.reverse_orientation {
            Normal3f::new(0.0, 0.0, -1.0)
        } else {
            Normal3f::new(0.0, 0.0, 1.0)
        };
        let hit = Hit::new(p, 0.0, Vector3f::ZERO, Vector3f::ZERO, n);
        (hit, 1.0 / self.area())
    }
}
