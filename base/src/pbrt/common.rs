//! Common

use super::clamp::*;
use num_traits::Num;
use std::ops::{Add, Mul, Neg};

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;

/// Default signed integer to 32-bit.
pub type Int = i32;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f32::consts::PI;

/// 1/PI (1/π)
pub const INV_PI: Float = 1.0 / PI;

/// PI/2 (π/2)
pub const PI_OVER_TWO: Float = PI * 0.5;

/// PI/4 (π/4)
pub const PI_OVER_FOUR: Float = PI * 0.25;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 1/2*PI (1/2π)
pub const INV_TWO_PI: Float = 1.0 / TWO_PI;

/// 4*PI (4π)
pub const FOUR_PI: Float = PI * 4.0;

/// 1/4*PI (1/4π)
pub const INV_FOUR_PI: Float = 1.0 / FOUR_PI;

/// Machine Epsilon
pub const MACHINE_EPSILON: Float = std::f32::EPSILON * 0.5;

/// Shadow Epsilon
pub const SHADOW_EPSILON: Float = 0.0001;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Returns the error bound for adding n terms.
///
/// * `n` - Number of terms
#[inline(always)]
pub fn gamma(n: Int) -> Float {
    (n as Float * MACHINE_EPSILON) / (1.0 - n as Float * MACHINE_EPSILON)
}

/// Returns gamma corrected values for use in 8-bit images.
///
/// * `value` - Value to correct.
#[inline(always)]
pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.0031308 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t`  - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Converts degrees to radians.
///
/// * `deg` - Angle in degrees.
#[inline(always)]
pub fn radians(deg: Float) -> Float {
    (PI / 180.0) * deg
}

/// Bump a floating point value up to the next greater representable floating
/// point value.
///
/// * `v` - Floating point value.
pub fn next_float_up(v: Float) -> Float {
    if v.is_infinite() && v > 0.0 {
        return v;
    }

    let nv = if v == -0.0 { 0.0 } else { v };
    let ui = nv.to_bits();
    Float::from_bits(if nv >= 0.0 { ui + 1 } else { ui - 1 })
}

/// Bump a floating point value down to the next lower representable floating
/// point value.
///
/// * `v` - Floating point value.
pub fn next_float_down(v: Float) -> Float {
    if v.is_infinite() && v < 0.0 {
        return v;
    }

    let nv = if v == 0.0 { -0.0 } else { v };
    let ui = nv.to_bits();
    Float::from_bits(if nv > 0.0 { ui - 1 } else { ui + 1 })
}

/// Bisects a procedurally defined monotonic array and returns the index `i`
/// such that `pred(i)` is true and `pred(i + 1)` is false, clamped to
/// `[0, size - 2]`.
///
/// * `size` - Size of array.
/// * `pred` - Function that returns a value at a given index.
pub fn find_interval<Predicate>(size: usize, pred: Predicate) -> usize
where
    Predicate: Fn(usize) -> bool,
{
    let (mut first, mut len) = (0, size);

    while len > 0 {
        let half = len >> 1;
        let middle = first + half;

        // Bisect range based on value of `pred` at `middle`.
        if pred(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }

    clamp(first as isize - 1, 0, size as isize - 2) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn next_float_around_zero() {
        assert!(next_float_up(0.0) > 0.0);
        assert!(next_float_up(-0.0) > 0.0);
        assert!(next_float_down(0.0) < 0.0);
        assert_eq!(next_float_up(INFINITY), INFINITY);
        assert_eq!(next_float_down(-INFINITY), -INFINITY);
    }

    #[test]
    fn find_interval_clamps_to_last_segment() {
        let cdf = [0.0, 0.25, 0.5, 1.0];
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 0.3), 1);
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 1.0), 2);
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= -1.0), 0);
    }

    proptest! {
        #[test]
        fn next_float_brackets_value(v in -1.0e6..1.0e6f32) {
            prop_assert!(next_float_up(v) > v);
            prop_assert!(next_float_down(v) < v);
        }

        #[test]
        fn lerp_endpoints(a in -100.0..100.0f32, b in -100.0..100.0f32) {
            prop_assert_eq!(lerp(0.0, a, b), a);
            prop_assert_eq!(lerp(1.0, a, b), b);
        }
    }
}
