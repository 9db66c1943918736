//! Clamp

use num_traits::Num;

/// Clamps a value x to [min, max].
///
/// * `x`   - The number to clamp.
/// * `min` - Minimum value.
/// * `max` - Maximum value.
#[inline(always)]
pub fn clamp<T>(x: T, min: T, max: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamp_int() {
        assert_eq!(clamp(-3, 0, 10), 0);
        assert_eq!(clamp(13, 0, 10), 10);
        assert_eq!(clamp(7, 0, 10), 7);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_range(x in -1000.0..1000.0f32, lo in -10.0..0.0f32, hi in 0.0..10.0f32) {
            let c = clamp(x, lo, hi);
            prop_assert!(c >= lo && c <= hi);
        }
    }
}
