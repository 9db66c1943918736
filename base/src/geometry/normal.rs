//! 3-D normals

use super::common::*;
use super::vector3::Vector3;
use crate::pbrt::*;
use num_traits::Num;
use std::ops::{Add, Mul, MulAssign, Neg, Sub};

/// A 3-D normal containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Normal3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D normal containing `Float` values.
pub type Normal3f = Normal3<Float>;

impl Normal3f {
    /// Zero normal.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
}

impl<T: Num + Copy> Normal3<T> {
    /// Creates a new 3-D normal.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the square of the normal's length.
    pub fn length_squared(&self) -> T {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the normal's length.
    pub fn length(&self) -> T
    where
        T: num_traits::Float,
    {
        self.length_squared().sqrt()
    }

    /// Returns the unit normal.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        *self * (T::one() / self.length())
    }

    /// Returns a new normal containing absolute values of the components.
    pub fn abs(&self) -> Self
    where
        T: Neg<Output = T> + PartialOrd,
    {
        Self::new(abs(self.x), abs(self.y), abs(self.z))
    }

    /// Returns `true` if this is the zero normal; interactions inside a
    /// medium carry one.
    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero() && self.z.is_zero()
    }

    /// Flips the normal so it lies in the same hemisphere as the given vector.
    ///
    /// * `v` - The vector.
    pub fn face_forward(&self, v: &Vector3<T>) -> Self
    where
        T: Neg<Output = T> + PartialOrd,
    {
        if self.dot(v) < T::zero() {
            -*self
        } else {
            *self
        }
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Normal3<T>> for Normal3<T> {
    type Output = T;

    /// Returns the dot product with another normal.
    ///
    /// * `other` - The other normal.
    fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Vector3<T>> for Normal3<T> {
    type Output = T;

    /// Returns the dot product with a vector.
    ///
    /// * `other` - The vector.
    fn dot(&self, other: &Vector3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Copy> Cross<Vector3<T>> for Normal3<T> {
    type Output = Vector3<T>;

    /// Returns the cross product with a vector.
    ///
    /// * `other` - The vector.
    fn cross(&self, other: &Vector3<T>) -> Vector3<T> {
        Vector3::new(
            (self.y * other.z) - (self.z * other.y),
            (self.z * other.x) - (self.x * other.z),
            (self.x * other.y) - (self.y * other.x),
        )
    }
}

impl<T: Num> Add for Normal3<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T: Num> Sub for Normal3<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl<T: Num + Copy> Mul<T> for Normal3<T> {
    type Output = Self;

    fn mul(self, f: T) -> Self {
        Self {
            x: self.x * f,
            y: self.y * f,
            z: self.z * f,
        }
    }
}

impl<T: Num + Copy> MulAssign<T> for Normal3<T> {
    fn mul_assign(&mut self, f: T) {
        *self = *self * f;
    }
}

impl Mul<Normal3f> for Float {
    type Output = Normal3f;

    fn mul(self, n: Normal3f) -> Normal3f {
        n * self
    }
}

impl<T: Num + Neg<Output = T>> Neg for Normal3<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl<T> From<Vector3<T>> for Normal3<T> {
    /// Convert a 3-D vector to a 3-D normal.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3<T>) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_forward_flips_into_hemisphere() {
        let n = Normal3f::new(0.0, 0.0, 1.0);
        let v = Vector3::new(0.3, 0.1, -0.5);
        assert_eq!(n.face_forward(&v), Normal3f::new(-0.0, -0.0, -1.0));
        assert_eq!(n.face_forward(&-v), n);
    }

    #[test]
    fn zero_normal() {
        assert!(Normal3f::ZERO.is_zero());
        assert!(!Normal3f::new(0.0, 1.0, 0.0).is_zero());
    }
}
