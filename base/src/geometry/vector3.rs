//! 3-D Vectors

use super::common::*;
use super::normal::Normal3;
use super::point3::Point3;
use crate::pbrt::*;
use num_traits::Num;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3-D vector containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D vector containing `Float` values.
pub type Vector3f = Vector3<Float>;

impl Vector3f {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
}

/// Creates a new 3-D vector.
///
/// * `x` - X-coordinate.
/// * `y` - Y-coordinate.
/// * `z` - Z-coordinate.
pub fn vector3<T>(x: T, y: T, z: T) -> Vector3<T> {
    Vector3 { x, y, z }
}

impl<T: Num + Copy> Vector3<T> {
    /// Creates a new 3-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> T {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the vector's length.
    pub fn length(&self) -> T
    where
        T: num_traits::Float,
    {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        *self / self.length()
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool
    where
        T: num_traits::Float,
    {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns a new vector containing absolute values of the components.
    pub fn abs(&self) -> Self
    where
        T: Neg<Output = T> + PartialOrd,
    {
        Self::new(abs(self.x), abs(self.y), abs(self.z))
    }

    /// Returns the largest coordinate value.
    pub fn max_component(&self) -> T
    where
        T: PartialOrd,
    {
        max(self.x, max(self.y, self.z))
    }

    /// Returns the index of the coordinate with the largest value.
    pub fn max_dimension(&self) -> usize
    where
        T: PartialOrd,
    {
        if self.x > self.y {
            if self.x > self.z {
                0
            } else {
                2
            }
        } else if self.y > self.z {
            1
        } else {
            2
        }
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Vector3<T>> for Vector3<T> {
    type Output = T;

    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    fn dot(&self, other: &Vector3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<Normal3<T>> for Vector3<T> {
    type Output = T;

    /// Returns the dot product with a normal.
    ///
    /// * `other` - The normal.
    fn dot(&self, other: &Normal3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Num + Copy> Cross<Vector3<T>> for Vector3<T> {
    type Output = Vector3<T>;

    /// Returns the cross product with another vector.
    ///
    /// * `other` - The other vector.
    fn cross(&self, other: &Vector3<T>) -> Vector3<T> {
        Vector3::new(
            (self.y * other.z) - (self.z * other.y),
            (self.z * other.x) - (self.x * other.z),
            (self.x * other.y) - (self.y * other.x),
        )
    }
}

impl<T: Num + Copy> Cross<Normal3<T>> for Vector3<T> {
    type Output = Vector3<T>;

    /// Returns the cross product with a normal.
    ///
    /// * `other` - The normal.
    fn cross(&self, other: &Normal3<T>) -> Vector3<T> {
        Vector3::new(
            (self.y * other.z) - (self.z * other.y),
            (self.z * other.x) - (self.x * other.z),
            (self.x * other.y) - (self.y * other.x),
        )
    }
}

impl<T: Num> Add for Vector3<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T: Num + Copy> AddAssign for Vector3<T> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl<T: Num> Sub for Vector3<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl<T: Num + Copy> SubAssign for Vector3<T> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl<T: Num + Copy> Mul<T> for Vector3<T> {
    type Output = Self;

    fn mul(self, f: T) -> Self {
        Self {
            x: self.x * f,
            y: self.y * f,
            z: self.z * f,
        }
    }
}

impl<T: Num + Copy> MulAssign<T> for Vector3<T> {
    fn mul_assign(&mut self, f: T) {
        *self = *self * f;
    }
}

impl Mul<Vector3f> for Float {
    type Output = Vector3f;

    fn mul(self, v: Vector3f) -> Vector3f {
        v * self
    }
}

impl<T: Num + Copy> Div<T> for Vector3<T> {
    type Output = Self;

    fn div(self, f: T) -> Self {
        debug_assert!(!f.is_zero());
        let inv = T::one() / f;
        Self {
            x: self.x * inv,
            y: self.y * inv,
            z: self.z * inv,
        }
    }
}

impl<T: Num + Copy> DivAssign<T> for Vector3<T> {
    fn div_assign(&mut self, f: T) {
        *self = *self / f;
    }
}

impl<T: Num + Neg<Output = T>> Neg for Vector3<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl<T> Index<usize> for Vector3<T> {
    type Output = T;

    /// Index the vector by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis (0, 1 or 2).
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis {} for Vector3", axis),
        }
    }
}

impl<T> IndexMut<usize> for Vector3<T> {
    /// Index the vector by an axis to get a mutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis (0, 1 or 2).
    fn index_mut(&mut self, axis: usize) -> &mut Self::Output {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Invalid axis {} for Vector3", axis),
        }
    }
}

impl<T> From<Normal3<T>> for Vector3<T> {
    /// Convert a 3-D normal to a 3-D vector.
    ///
    /// * `n` - 3-D normal.
    fn from(n: Normal3<T>) -> Self {
        Self { x: n.x, y: n.y, z: n.z }
    }
}

impl<T> From<Point3<T>> for Vector3<T> {
    /// Convert a 3-D point to a 3-D vector.
    ///
    /// * `p` - 3-D point.
    fn from(p: Point3<T>) -> Self {
        Self { x: p.x, y: p.y, z: p.z }
    }
}
