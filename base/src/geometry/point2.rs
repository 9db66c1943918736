//! 2-D Points

use super::vector2::Vector2;
use crate::pbrt::*;
use num_traits::Num;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// A 2-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D point containing `Float` values.
pub type Point2f = Point2<Float>;

/// 2-D point containing `Int` values.
pub type Point2i = Point2<Int>;

impl Point2f {
    /// Origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Returns a point with the largest integer coordinates less than or
    /// equal to this point's.
    pub fn floor(&self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Returns a point with the smallest integer coordinates greater than or
    /// equal to this point's.
    pub fn ceil(&self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }
}

impl<T: Num + Copy> Point2<T> {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Returns the component-wise minimum with another point.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self
    where
        T: PartialOrd,
    {
        Self::new(min(self.x, other.x), min(self.y, other.y))
    }

    /// Returns the component-wise maximum with another point.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self
    where
        T: PartialOrd,
    {
        Self::new(max(self.x, other.x), max(self.y, other.y))
    }
}

impl<T: Num> Add<Vector2<T>> for Point2<T> {
    type Output = Self;

    fn add(self, v: Vector2<T>) -> Self {
        Self {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

impl<T: Num> Add for Point2<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T: Num> Sub for Point2<T> {
    type Output = Vector2<T>;

    fn sub(self, other: Self) -> Vector2<T> {
        Vector2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T: Num> Sub<Vector2<T>> for Point2<T> {
    type Output = Self;

    fn sub(self, v: Vector2<T>) -> Self {
        Self {
            x: self.x - v.x,
            y: self.y - v.y,
        }
    }
}

impl<T: Num + Copy> Mul<T> for Point2<T> {
    type Output = Self;

    fn mul(self, f: T) -> Self {
        Self {
            x: self.x * f,
            y: self.y * f,
        }
    }
}

impl<T> Index<usize> for Point2<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 2-D coordinate axis (0 or 1).
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid axis {} for Point2", axis),
        }
    }
}

impl<T> IndexMut<usize> for Point2<T> {
    /// Index the point by an axis to get a mutable coordinate axis value.
    ///
    /// * `axis` - A 2-D coordinate axis (0 or 1).
    fn index_mut(&mut self, axis: usize) -> &mut Self::Output {
        match axis {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Invalid axis {} for Point2", axis),
        }
    }
}

impl From<Point2i> for Point2f {
    /// Convert an integer point to a floating point one.
    ///
    /// * `p` - The integer point.
    fn from(p: Point2i) -> Self {
        Self::new(p.x as Float, p.y as Float)
    }
}

impl From<Point2f> for Point2i {
    /// Convert a floating point point to an integer one by truncation.
    ///
    /// * `p` - The floating point point.
    fn from(p: Point2f) -> Self {
        Self::new(p.x as Int, p.y as Int)
    }
}

impl From<Vector2<Float>> for Point2f {
    /// Convert a 2-D vector to a 2-D point.
    ///
    /// * `v` - The vector.
    fn from(v: Vector2<Float>) -> Self {
        Self::new(v.x, v.y)
    }
}
