//! Pixel Sampler.

use super::*;

/// Storage for samplers that generate every sample vector of a pixel at once.
/// Dimensions beyond `n_sampled_dimensions` fall back to uniform random values.
#[derive(Clone)]
pub struct PixelSampler {
    /// The common sampler data.
    pub data: SamplerData,

    /// Vector of 1D sample values per dimension.
    pub samples_1d: Vec<Vec<Float>>,

    /// Vector of 2D sample values per dimension.
    pub samples_2d: Vec<Vec<Point2f>>,

    /// Offset into `samples_1d` for the current pixel sample.
    pub current_1d_dimension: usize,

    /// Offset into `samples_2d` for the current pixel sample.
    pub current_2d_dimension: usize,

    /// The random number generator.
    pub rng: RNG,
}

impl PixelSampler {
    /// Create a new `PixelSampler`.
    ///
    /// * `samples_per_pixel`    - Number of samples per pixel.
    /// * `n_sampled_dimensions` - Number of dimensions for sampling.
    /// * `seed`                 - Seed for the random number generator.
    pub fn new(samples_per_pixel: usize, n_sampled_dimensions: usize, seed: u64) -> Self {
        Self {
            data: SamplerData::new(samples_per_pixel),
            samples_1d: vec![vec![0.0; samples_per_pixel]; n_sampled_dimensions],
            samples_2d: vec![vec![Point2f::ZERO; samples_per_pixel]; n_sampled_dimensions],
            current_1d_dimension: 0,
            current_2d_dimension: 0,
            rng: RNG::new(seed),
        }
    }

    /// Returns a copy with the same sample layout and a reseeded generator.
    ///
    /// * `seed` - Seed for the random number generator.
    pub fn reseeded(&self, seed: u64) -> Self {
        let mut s = self.clone();
        s.rng.set_sequence(seed);
        s.current_1d_dimension = 0;
        s.current_2d_dimension = 0;
        s
    }

    /// Returns the sample value for the next dimension.
    pub fn get_1d(&mut self) -> Float {
        let i = self.data.current_pixel_sample_index;
        if self.current_1d_dimension < self.samples_1d.len() && i < self.data.samples_per_pixel {
            let r = self.samples_1d[self.current_1d_dimension][i];
            self.current_1d_dimension += 1;
            r
        } else {
            self.rng.uniform_float()
        }
    }

    /// Returns the sample value for the next two dimensions.
    pub fn get_2d(&mut self) -> Point2f {
        let i = self.data.current_pixel_sample_index;
        if self.current_2d_dimension < self.samples_2d.len() && i < self.data.samples_per_pixel {
            let r = self.samples_2d[self.current_2d_dimension][i];
            self.current_2d_dimension += 1;
            r
        } else {
            Point2f::new(self.rng.uniform_float(), self.rng.uniform_float())
        }
    }

    /// Resets the dimension counters and advances to the next pixel sample.
    pub fn start_next_sample(&mut self) -> bool {
        self.current_1d_dimension = 0;
        self.current_2d_dimension = 0;
        self.data.start_next_sample()
    }

    /// Resets the dimension counters for a new pixel.
    ///
    /// * `p` - The pixel.
    pub fn start_pixel(&mut self, p: &Point2i) {
        self.current_1d_dimension = 0;
        self.current_2d_dimension = 0;
        self.data.start_pixel(p);
    }
}
