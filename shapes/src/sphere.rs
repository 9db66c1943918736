//! Spheres

use base::geometry::*;
use base::interaction::*;
use base::pbrt::*;
use base::sampling::*;
use base::shape::*;

/// Below this squared sine of the cone half angle the cone sampling uses a
/// Taylor expansion to avoid catastrophic cancellation.
const SMALL_SIN2_THETA_MAX: Float = 0.00068523;

/// A full sphere defined in world space.
#[derive(Clone, Debug)]
pub struct Sphere {
    /// Centre of the sphere.
    pub center: Point3f,

    /// Radius of sphere.
    pub radius: Float,

    /// Whether surface normals point inwards.
    pub reverse_orientation: bool,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// * `center`              - Centre of the sphere.
    /// * `radius`              - Radius of sphere.
    /// * `reverse_orientation` - Indicates whether their surface normal directions
    ///                           should be reversed from the default
    pub fn new(center: Point3f, radius: Float, reverse_orientation: bool) -> Self {
        Self {
            center,
            radius,
            reverse_orientation,
        }
    }

    /// Returns the parametric distance of the nearest hit in `(0, t_max]`.
    fn hit_distance(&self, r: &Ray) -> Option<Float> {
        // Compute quadratic sphere coefficients in double precision.
        let oc = r.o - self.center;
        let (ox, oy, oz) = (oc.x as f64, oc.y as f64, oc.z as f64);
        let (dx, dy, dz) = (r.d.x as f64, r.d.y as f64, r.d.z as f64);
        let radius = self.radius as f64;

        let a = dx * dx + dy * dy + dz * dz;
        let b = 2.0 * (dx * ox + dy * oy + dz * oz);
        let c = ox * ox + oy * oy + oz * oz - radius * radius;

        let (t0, t1) = solve_quadratic(a, b, c)?;
        let (t0, t1) = (t0 as Float, t1 as Float);

        // Check quadric shape t0 and t1 for nearest intersection.
        if t0 > r.t_max || t1 <= 0.0 {
            return None;
        }

        if t0 > 0.0 {
            Some(t0)
        } else if t1 <= r.t_max {
            Some(t1)
        } else {
            None
        }
    }

    /// Returns the surface normal at a point on the sphere.
    fn normal_at(&self, p: &Point3f) -> Normal3f {
        let n = Normal3f::from((*p - self.center).normalize());
        if self.reverse_orientation {
            -n
        } else {
            n
        }
    }
}

impl Shape for Sphere {
    fn get_type(&self) -> &'static str {
        "sphere"
    }

    fn world_bound(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        Bounds3f::new(self.center - r, self.center + r)
    }

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect<'scene>(&self, r: &Ray) -> Option<Intersection<'scene>> {
        let t_shape_hit = self.hit_distance(r)?;

        // Compute sphere hit position relative to the centre and refine it.
        let mut p_local = r.at(t_shape_hit) - self.center;
        p_local *= self.radius / p_local.length();
        if p_local.x == 0.0 && p_local.y == 0.0 {
            p_local.x = 1e-5 * self.radius;
        }

        let mut phi = p_local.y.atan2(p_local.x);
        if phi < 0.0 {
            phi += TWO_PI;
        }

        // Find parametric representation of sphere hit.
        let u = phi / TWO_PI;
        let theta = clamp(p_local.z / self.radius, -1.0, 1.0).acos();
        let v = (theta - PI) / -PI;

        // Compute sphere dpdu and dpdv.
        let z_radius = (p_local.x * p_local.x + p_local.y * p_local.y).sqrt();
        let inv_z_radius = 1.0 / z_radius;
        let cos_phi = p_local.x * inv_z_radius;
        let sin_phi = p_local.y * inv_z_radius;
        let dpdu = Vector3f::new(-TWO_PI * p_local.y, TWO_PI * p_local.x, 0.0);
        let dpdv = -PI * Vector3f::new(p_local.z * cos_phi, p_local.z * sin_phi, -self.radius * theta.sin());

        // Compute error bounds for sphere intersection.
        let p_error = gamma(5) * p_local.abs();

        let si = SurfaceInteraction::new(
            self.center + p_local,
            p_error,
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
        self.hit_distance(r).is_some()
    }

    fn area(&self) -> Float {
        FOUR_PI * self.radius * self.radius
    }

    /// Sample a point on the surface and return the PDF with respect to area on
    /// the surface. The returned `Hit` has a zero `wo`.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float) {
        let p_local = self.radius * uniform_sample_sphere(u);
        let p = self.center + p_local;
        let p_error = gamma(5) * p_local.abs();
        let hit = Hit::new(p, 0.0, p_error, Vector3f::ZERO, self.normal_at(&p));
        (hit, 1.0 / self.area())
    }

    /// Samples the cone of directions subtended by the sphere when the
    /// reference point is outside it.
    ///
    /// * `hit` - Reference point.
    /// * `u`   - Sample value to use.
    fn sample_solid_angle(&self, hit: &Hit, u: &Point2f) -> (Hit, Float) {
        // Sample uniformly on sphere if the reference point is inside it.
        let dc2 = hit.p.distance_squared(&self.center);
        if dc2 <= self.radius * self.radius {
            return sample_solid_angle_by_area(self, hit, u);
        }

        // Compute coordinate system for sphere sampling.
        let dc = dc2.sqrt();
        let inv_dc = 1.0 / dc;
        let wc = (self.center - hit.p) * inv_dc;
        let (wc_x, wc_y) = coordinate_system(&wc);

        // Compute theta and phi values for sample in cone.
        let sin_theta_max = self.radius * inv_dc;
        let sin2_theta_max = sin_theta_max * sin_theta_max;
        let inv_sin_theta_max = 1.0 / sin_theta_max;
        let cos_theta_max = max(0.0, 1.0 - sin2_theta_max).sqrt();

        let mut cos_theta = (cos_theta_max - 1.0) * u[0] + 1.0;
        let mut sin2_theta = 1.0 - cos_theta * cos_theta;
        if sin2_theta_max < SMALL_SIN2_THETA_MAX {
            sin2_theta = sin2_theta_max * u[0];
            cos_theta = (1.0 - sin2_theta).sqrt();
        }

        // Compute angle alpha from center of sphere to sampled point on surface.
        let cos_alpha = sin2_theta * inv_sin_theta_max
            + cos_theta * max(0.0, 1.0 - sin2_theta * inv_sin_theta_max * inv_sin_theta_max).sqrt();
        let sin_alpha = max(0.0, 1.0 - cos_alpha * cos_alpha).sqrt();
        let phi = u[1] * TWO_PI;

        // Compute surface normal and sampled point on sphere.
        let n_world = spherical_direction(sin_alpha, cos_alpha, phi, &(-wc_x), &(-wc_y), &(-wc));
        let p_local = self.radius * n_world;
        let p = self.center + p_local;
        let n = if self.reverse_orientation {
            -Normal3f::from(n_world)
        } else {
            Normal3f::from(n_world)
        };

        let intr = Hit::new(p, hit.time, gamma(5) * p_local.abs(), Vector3f::ZERO, n);
        (intr, uniform_cone_pdf(cos_theta_max))
    }

    fn pdf_solid_angle(&self, hit: &Hit, wi: &Vector3f) -> Float {
        // Return uniform PDF if point is inside sphere.
        let dc2 = hit.p.distance_squared(&self.center);
        if dc2 <= self.radius * self.radius {
            return pdf_solid_angle_by_area(self, hit, wi);
        }

        // Compute general sphere PDF.
        let sin2_theta_max = self.radius * self.radius / dc2;
        let cos_theta_max = max(0.0, 1.0 - sin2_theta_max).sqrt();
        uniform_cone_pdf(cos_theta_max)
    }
}

/// Returns the real roots of `a t² + b t + c` in ascending order.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discrim = b * b - 4.0 * a * c;
    if discrim < 0.0 {
        return None;
    }
    let root_discrim = discrim.sqrt();

    let q = if b < 0.0 {
        -0.5 * (b - root_discrim)
    } else {
        -0.5 * (b + root_discrim)
    };
    let t0 = q / a;
    let t1 = c / q;
    if t0.is_nan() || t1.is_nan() {
        trace!("degenerate quadratic a={a} b={b} c={c}");
        return None;
    }
    Some(if t0 > t1 { (t1, t0) } else { (t0, t1) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Point3f::new(0.0, 0.0, 5.0), 1.0, false)
    }

    #[test]
    fn ray_hits_near_side() {
        let s = unit_sphere();
        let r = Ray::new(Point3f::ZERO, Vector3f::new(0.0, 0.0, 1.0), INFINITY, 0.0);
        let Intersection { t, isect } = s.intersect(&r).unwrap();
        assert!(approx_eq!(f32, t, 4.0, epsilon = 1e-4));
        assert!(approx_eq!(f32, isect.hit.n.z, -1.0, epsilon = 1e-4));
        assert!(s.intersect_p(&r));
    }

    #[test]
    fn ray_from_inside_hits_far_side() {
        let s = unit_sphere();
        let r = Ray::new(Point3f::new(0.0, 0.0, 5.0), Vector3f::new(1.0, 0.0, 0.0), INFINITY, 0.0);
        let Intersection { t, isect } = s.intersect(&r).unwrap();
        assert!(approx_eq!(f32, t, 1.0, epsilon = 1e-4));
        assert!(approx_eq!(f32, isect.hit.n.x, 1.0, epsilon = 1e-4));
    }

    #[test]
    fn reversed_sphere_normals_point_inwards() {
        let s = Sphere::new(Point3f::ZERO, 2.0, true);
        let r = Ray::new(Point3f::new(0.0, 0.0, -5.0), Vector3f::new(0.0, 0.0, 1.0), INFINITY, 0.0);
        let isect = s.intersect(&r).unwrap().isect;
        assert!(approx_eq!(f32, isect.hit.n.z, 1.0, epsilon = 1e-4));
    }

    #[test]
    fn ray_misses_or_stops_short() {
        let s = unit_sphere();
        let r = Ray::new(Point3f::ZERO, Vector3f::new(0.0, 1.0, 0.0), INFINITY, 0.0);
        assert!(s.intersect(&r).is_none());
        let r = Ray::new(Point3f::ZERO, Vector3f::new(0.0, 0.0, 1.0), 3.0, 0.0);
        assert!(!s.intersect_p(&r));
    }

    #[test]
    fn cone_pdf_matches_sampled_pdf() {
        let s = unit_sphere();
        let reference = Hit::new_minimal(Point3f::ZERO, 0.0);
        let (intr, pdf) = s.sample_solid_angle(&reference, &Point2f::new(0.3, 0.8));
        let wi = (intr.p - reference.p).normalize();
        assert!(approx_eq!(f32, s.pdf_solid_angle(&reference, &wi), pdf, epsilon = 1e-4));
    }

    proptest! {
        #[test]
        fn area_samples_lie_on_surface(u0 in 0.0..1.0f32, u1 in 0.0..1.0f32) {
            let s = unit_sphere();
            let (hit, pdf) = s.sample_area(&Point2f::new(u0, u1));
            prop_assert!((hit.p.distance(&s.center) - 1.0).abs() < 1e-4);
            prop_assert!(approx_eq!(f32, pdf, 1.0 / FOUR_PI, epsilon = 1e-6));
        }

        #[test]
        fn cone_samples_face_the_reference_point(u0 in 0.0..1.0f32, u1 in 0.0..1.0f32) {
            let s = unit_sphere();
            let reference = Hit::new_minimal(Point3f::ZERO, 0.0);
            let (intr, _) = s.sample_solid_angle(&reference, &Point2f::new(u0, u1));
            prop_assert!((intr.p.distance(&s.center) - 1.0).abs() < 1e-3);
            prop_assert!(intr.n.dot(&(reference.p - intr.p)) >= -1e-3);
        }
    }
}
