//! Random Sampler.

use base::geometry::*;
use base::pbrt::*;
use base::rng::*;
use base::sampler::*;

/// Implements a sampler that uses a PRNG to generate uniformly random samples.
pub struct RandomSampler {
    /// The common sampler data.
    pub data: SamplerData,

    /// The random number generator.
    pub rng: RNG,
}

impl RandomSampler {
    /// Create a new `RandomSampler`.
    ///
    /// * `samples_per_pixel` - Number of samples to generate for each pixel.
    /// * `seed`              - Optional seed for the random number generator.
    pub fn new(samples_per_pixel: usize, seed: Option<u64>) -> Self {
        Self {
            data: SamplerData::new(samples_per_pixel),
            rng: match seed {
                Some(s) => RNG::new(s),
                None => RNG::default(),
            },
        }
    }
}

impl Sampler for RandomSampler {
    fn get_data(&self) -> &SamplerData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.data
    }

    /// Generates a new instance of an initial `Sampler` for use by a rendering
    /// thread. Requested sample arrays carry over.
    ///
    /// * `seed` - The seed for the random number generator.
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler> {
        Box::new(Self {
            data: self.data.clone(),
            rng: RNG::new(seed),
        })
    }

    /// Fills the requested sample arrays with fresh values.
    ///
    /// * `p` - The pixel.
    fn start_pixel(&mut self, p: &Point2i) {
        for array in self.data.sample_array_1d.iter_mut() {
            for v in array.iter_mut() {
                *v = self.rng.uniform_float();
            }
        }

        for array in self.data.sample_array_2d.iter_mut() {
            for v in array.iter_mut() {
                *v = Point2f::new(self.rng.uniform_float(), self.rng.uniform_float());
            }
        }

        self.data.start_pixel(p);
    }

    fn get_1d(&mut self) -> Float {
        self.rng.uniform_float()
    }

    fn get_2d(&mut self) -> Point2f {
        Point2f::new(self.rng.uniform_float(), self.rng.uniform_float())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let proto = RandomSampler::new(4, None);
        let mut a = proto.clone_sampler(9);
        let mut b = proto.clone_sampler(9);
        a.start_pixel(&Point2i::new(3, 4));
        b.start_pixel(&Point2i::new(3, 4));
        for _ in 0..10 {
            assert_eq!(a.get_2d(), b.get_2d());
        }
    }

    #[test]
    fn pixel_loop_visits_every_sample() {
        let mut s = RandomSampler::new(3, Some(1));
        s.start_pixel(&Point2i::new(0, 0));
        let mut n = 1;
        while s.start_next_sample() {
            n += 1;
        }
        assert_eq!(n, 3);
    }

    #[test]
    fn requested_arrays_are_filled_in_unit_square() {
        let mut s = RandomSampler::new(2, Some(5));
        s.request_2d_array(4);
        let mut s = s.clone_sampler(6);
        s.start_pixel(&Point2i::new(1, 1));
        let array = s.get_2d_array(4);
        assert_eq!(array.len(), 4);
        assert!(array.iter().all(|p| (0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y)));
    }
}
