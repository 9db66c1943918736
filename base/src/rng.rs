//! Random Number Generator.

use crate::pbrt::*;

/// 32-bit precision value for 1 - epsilon.
pub const FLOAT_ONE_MINUS_EPSILON: f32 = hexf32!("0x1.fffffep-1"); // 0.99999994

/// 1 - epsilon in the precision we've selected for `Float`.
pub const ONE_MINUS_EPSILON: Float = FLOAT_ONE_MINUS_EPSILON;

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// PCG32 pseudo-random number generator. Each sequence index selects an
/// independent stream.
#[derive(Clone)]
pub struct RNG {
    state: u64,
    inc: u64,
}

impl Default for RNG {
    /// Return a new instance of `RNG` with default state and stream.
    fn default() -> Self {
        Self {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
}

impl RNG {
    /// Create a new `RNG` by seeding it with the given starting sequence.
    ///
    /// * `sequence_index` - The starting sequence to seed with.
    pub fn new(sequence_index: u64) -> Self {
        let mut ret = Self { state: 0, inc: 0 };
        ret.set_sequence(sequence_index);
        ret
    }

    /// Initialize the random number generator sequence.
    ///
    /// * `init_seq` - The starting sequence to seed with.
    pub fn set_sequence(&mut self, init_seq: u64) {
        self.state = 0;
        self.inc = init_seq.wrapping_shl(1) | 1;
        let _ = self.uniform_u32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        let _ = self.uniform_u32();
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);

        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xor_shifted.rotate_right(rot)
    }

    /// Returns a uniformly distributed value in `[0, bound)`.
    ///
    /// * `bound` - The exclusive upper bound; must be non-zero.
    pub fn bounded_uniform_u32(&mut self, bound: u32) -> u32 {
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let r = self.uniform_u32();
            if r >= threshold {
                return r % bound;
            }
        }
    }

    /// Returns a uniformly distributed value over the half open interval [0.0, 1.0).
    pub fn uniform_float(&mut self) -> Float {
        min(
            self.uniform_u32() as Float * hexf32!("0x1.0p-32"),
            ONE_MINUS_EPSILON,
        )
    }

    /// Randomly permute a slice.
    ///
    /// * `v` - The slice to shuffle.
    pub fn shuffle<T>(&mut self, v: &mut [T]) {
        let count = v.len();
        for i in 0..count {
            let other = i + self.bounded_uniform_u32((count - i) as u32) as usize;
            v.swap(i, other);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_sequence_is_reproducible() {
        let mut a = RNG::new(42);
        let mut b = RNG::new(42);
        for _ in 0..100 {
            assert_eq!(a.uniform_u32(), b.uniform_u32());
        }
    }

    #[test]
    fn different_sequences_diverge() {
        let mut a = RNG::new(1);
        let mut b = RNG::new(2);
        let same = (0..32).filter(|_| a.uniform_u32() == b.uniform_u32()).count();
        assert!(same < 4);
    }

    #[test]
    fn uniform_float_mean_is_one_half() {
        let mut rng = RNG::new(7);
        let n = 100_000;
        let mean = (0..n).map(|_| rng.uniform_float() as f64).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.01);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = RNG::new(3);
        let mut v: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<u32>>());
    }

    proptest! {
        #[test]
        fn uniform_float_in_unit_interval(seq in 0..10_000u64) {
            let mut rng = RNG::new(seq);
            for _ in 0..16 {
                let f = rng.uniform_float();
                prop_assert!((0.0..1.0).contains(&f));
            }
        }

        #[test]
        fn bounded_stays_below_bound(seq in 0..1000u64, bound in 1..1000u32) {
            let mut rng = RNG::new(seq);
            prop_assert!(rng.bounded_uniform_u32(bound) < bound);
        }
    }
}
