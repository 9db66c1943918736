//! 3-D Points

use super::vector3::Vector3;
use crate::pbrt::*;
use num_traits::Num;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Sub, SubAssign};

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

impl Point3f {
    /// Origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
}

impl<T: Num + Copy> Point3<T> {
    /// Creates a new 3-D point.
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

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> T
    where
        T: num_traits::Float,
    {
        (*self - *other).length()
    }

    /// Returns the square of the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance_squared(&self, other: &Self) -> T {
        (*self - *other).length_squared()
    }

    /// Returns a new point containing absolute values of the components.
    pub fn abs(&self) -> Self
    where
        T: std::ops::Neg<Output = T> + PartialOrd,
    {
        Self::new(abs(self.x), abs(self.y), abs(self.z))
    }

    /// Returns the component-wise minimum with another point.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self
    where
        T: PartialOrd,
    {
        Self::new(min(self.x, other.x), min(self.y, other.y), min(self.z, other.z))
    }

    /// Returns the component-wise maximum with another point.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self
    where
        T: PartialOrd,
    {
        Self::new(max(self.x, other.x), max(self.y, other.y), max(self.z, other.z))
    }
}

impl<T: Num> Add<Vector3<T>> for Point3<T> {
    type Output = Self;

    fn add(self, v: Vector3<T>) -> Self {
        Self {
            x: self.x + v.x,
            y: self.y + v.y,
            z: self.z + v.z,
        }
    }
}

impl<T: Num + Copy> AddAssign<Vector3<T>> for Point3<T> {
    fn add_assign(&mut self, v: Vector3<T>) {
        *self = *self + v;
    }
}

impl<T: Num> Add for Point3<T> {
    type Output = Self;

    /// Adds two points. Only meaningful for weighted sums of points.
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T: Num> Sub for Point3<T> {
    type Output = Vector3<T>;

    fn sub(self, other: Self) -> Vector3<T> {
        Vector3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl<T: Num> Sub<Vector3<T>> for Point3<T> {
    type Output = Self;

    fn sub(self, v: Vector3<T>) -> Self {
        Self {
            x: self.x - v.x,
            y: self.y - v.y,
            z: self.z - v.z,
        }
    }
}

impl<T: Num + Copy> SubAssign<Vector3<T>> for Point3<T> {
    fn sub_assign(&mut self, v: Vector3<T>) {
        *self = *self - v;
    }
}

impl<T: Num + Copy> Mul<T> for Point3<T> {
    type Output = Self;

    fn mul(self, f: T) -> Self {
        Self {
            x: self.x * f,
            y: self.y * f,
            z: self.z * f,
        }
    }
}

impl Mul<Point3f> for Float {
    type Output = Point3f;

    fn mul(self, p: Point3f) -> Point3f {
        p * self
    }
}

impl<T> Index<usize> for Point3<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis (0, 1 or 2).
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis {} for Point3", axis),
        }
    }
}

impl<T> IndexMut<usize> for Point3<T> {
    /// Index the point by an axis to get a mutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis (0, 1 or 2).
    fn index_mut(&mut self, axis: usize) -> &mut Self::Output {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Invalid axis {} for Point3", axis),
        }
    }
}

impl<T> From<Vector3<T>> for Point3<T> {
    /// Convert a 3-D vector to a 3-D point.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3<T>) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    prop_point3!(
        point3_f32,
        f32,
        -100.0..100.0f32,
        -100.0..100.0f32,
        -100.0..100.0f32
    );

    proptest! {
        #[test]
        fn sub_then_add_returns_point(a in point3_f32(), b in point3_f32()) {
            let d = a - b;
            let c = b + d;
            prop_assert!((c.x - a.x).abs() < 1e-3);
            prop_assert!((c.y - a.y).abs() < 1e-3);
            prop_assert!((c.z - a.z).abs() < 1e-3);
        }

        #[test]
        fn distance_is_symmetric(a in point3_f32(), b in point3_f32()) {
            prop_assert_eq!(a.distance_squared(&b), b.distance_squared(&a));
        }
    }
}
