//! Shading coordinate system helpers.
//!
//! Directions passed to BxDFs are in the local shading frame where the
//! normal is +z.

use crate::geometry::*;
use crate::pbrt::*;

/// Returns cos(θ) of a direction in the shading frame.
#[inline]
pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

/// Returns cos²(θ).
#[inline]
pub fn cos2_theta(w: &Vector3f) -> Float {
    w.z * w.z
}

/// Returns |cos(θ)|.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    abs(w.z)
}

/// Returns sin²(θ).
#[inline]
pub fn sin2_theta(w: &Vector3f) -> Float {
    max(0.0, 1.0 - cos2_theta(w))
}

/// Returns true if both directions lie on the same side of the surface.
///
/// * `w`  - First direction.
/// * `wp` - Second direction.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}

/// Reflects a direction about a normal.
///
/// * `wo` - The direction.
/// * `n`  - The normal.
#[inline]
pub fn reflect(wo: &Vector3f, n: &Vector3f) -> Vector3f {
    -(*wo) + *n * (2.0 * wo.dot(n))
}

/// Refracts a direction through an interface and returns `None` on total
/// internal reflection.
///
/// * `wi`  - Incident direction, pointing away from the surface.
/// * `n`   - Normal on the same side as `wi`.
/// * `eta` - Ratio of the indices of refraction, incident over transmitted.
pub fn refract(wi: &Vector3f, n: &Normal3f, eta: Float) -> Option<Vector3f> {
    let cos_theta_i = n.dot(wi);
    let sin2_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i);
    let sin2_theta_t = eta * eta * sin2_theta_i;

    if sin2_theta_t >= 1.0 {
        return None;
    }

    let cos_theta_t = (1.0 - sin2_theta_t).sqrt();
    Some(-(*wi) * eta + Vector3f::from(*n) * (eta * cos_theta_i - cos_theta_t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn reflect_mirrors_about_normal() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        assert_eq!(reflect(&wo, &n), Vector3f::new(-0.6, 0.0, 0.8));
    }

    #[test]
    fn refract_total_internal_reflection() {
        let n = Normal3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.9, 0.0, 0.1).normalize();
        assert!(refract(&wi, &n, 1.5).is_none());
    }

    #[test]
    fn refract_straight_through() {
        let n = Normal3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.0, 0.0, 1.0);
        let wt = refract(&wi, &n, 1.0 / 1.5).unwrap();
        assert!(approx_eq!(f32, wt.z, -1.0, epsilon = 1e-6));
    }
}
