//! 2-D Vectors

use crate::pbrt::*;
use num_traits::Num;
use std::ops::{Add, Index, Mul, Neg, Sub};

/// A 2-D vector containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D vector containing `Float` values.
pub type Vector2f = Vector2<Float>;

/// 2-D vector containing `Int` values.
pub type Vector2i = Vector2<Int>;

impl<T: Num + Copy> Vector2<T> {
    /// Creates a new 2-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> T {
        self.x * self.x + self.y * self.y
    }
}

impl<T: Num> Add for Vector2<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T: Num> Sub for Vector2<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T: Num + Copy> Mul<T> for Vector2<T> {
    type Output = Self;

    fn mul(self, f: T) -> Self {
        Self {
            x: self.x * f,
            y: self.y * f,
        }
    }
}

impl<T: Num + Neg<Output = T>> Neg for Vector2<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<T> Index<usize> for Vector2<T> {
    type Output = T;

    /// Index the vector by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 2-D coordinate axis (0 or 1).
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid axis {} for Vector2", axis),
        }
    }
}
