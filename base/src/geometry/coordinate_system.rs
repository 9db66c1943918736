//! 3-D Coordinate System

use super::common::*;
use super::vector3::Vector3;
use crate::pbrt::abs;
use num_traits::Float;

/// Builds two vectors that together with the given unit vector form an
/// orthonormal basis and returns them.
///
/// * `v1` - The first unit vector to form part of the coordinate system.
pub fn coordinate_system<T: Float>(v1: &Vector3<T>) -> (Vector3<T>, Vector3<T>) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3::new(-v1.z, T::zero(), v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3::new(T::zero(), v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };

    let v3 = v1.cross(&v2);

    (v2, v3)
}

/// Returns the direction with the given spherical coordinates in the frame
/// formed by `x`, `y` and `z`.
///
/// * `sin_theta` - Sine of the polar angle.
/// * `cos_theta` - Cosine of the polar angle.
/// * `phi`       - Azimuthal angle.
/// * `x`         - Frame x axis.
/// * `y`         - Frame y axis.
/// * `z`         - Frame z axis.
pub fn spherical_direction<T: Float>(
    sin_theta: T,
    cos_theta: T,
    phi: T,
    x: &Vector3<T>,
    y: &Vector3<T>,
    z: &Vector3<T>,
) -> Vector3<T> {
    *x * (sin_theta * phi.cos()) + *y * (sin_theta * phi.sin()) + *z * cos_theta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_unit_x_axis() {
        let v1 = Vector3::new(1.0, 0.0, 0.0);
        let (v2, v3) = coordinate_system(&v1);
        assert!(v2 == Vector3::new(0.0, 0.0, 1.0));
        assert!(v3 == Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn from_vector_x_less_than_y() {
        let v1 = Vector3::new(0.2, 0.5, 0.5_f32).normalize();
        let (v2, v3) = coordinate_system(&v1);
        assert!(v1.dot(&v2).abs() < 1e-6);
        assert!(v1.dot(&v3).abs() < 1e-6);
        assert!(v2.dot(&v3).abs() < 1e-6);
    }

    #[test]
    fn spherical_direction_on_z_axis() {
        let x = Vector3::new(1.0, 0.0, 0.0_f32);
        let y = Vector3::new(0.0, 1.0, 0.0);
        let z = Vector3::new(0.0, 0.0, 1.0);
        assert_eq!(spherical_direction(0.0, 1.0, 0.3, &x, &y, &z), z);
        let w = spherical_direction(1.0, 0.0, 0.0, &x, &y, &z);
        assert!((w.x - 1.0).abs() < 1e-6 && w.z.abs() < 1e-6);
    }
}
