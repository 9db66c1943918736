//! Common

use crate::pbrt::abs;
use num_traits::Num;
use std::ops::Neg;

/// Dot product trait.
pub trait Dot<V> {
    type Output: Num + Neg<Output = Self::Output> + PartialOrd + Copy;

    /// Returns the dot product.
    ///
    /// * `other` - The other vector/normal.
    fn dot(&self, other: &V) -> Self::Output;

    /// Returns the absolute value of dot product.
    ///
    /// * `other` - The other vector/normal.
    fn abs_dot(&self, other: &V) -> Self::Output {
        abs(self.dot(other))
    }
}

/// Cross product trait.
pub trait Cross<V> {
    type Output;

    /// Returns the cross product.
    ///
    /// * `other` - The other vector/normal.
    fn cross(&self, other: &V) -> Self::Output;
}
