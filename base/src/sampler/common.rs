//! Common

use super::*;

/// Stores the sampler data and implements common functionality for all samplers.
#[derive(Clone, Default)]
pub struct SamplerData {
    /// Number of samples generated for each pixel.
    pub samples_per_pixel: usize,

    /// Coordinates of current pixel being generated.
    pub current_pixel: Point2i,

    /// Sample number of the pixel currently being generated.
    pub current_pixel_sample_index: usize,

    /// Stores sizes of requested 1D sample arrays.
    pub samples_1d_array_sizes: Vec<usize>,

    /// Stores sizes of requested 2D sample arrays.
    pub samples_2d_array_sizes: Vec<usize>,

    /// Stores `n * samples_per_pixel` values for each requested 1D array.
    pub sample_array_1d: Vec<Vec<Float>>,

    /// Stores `n * samples_per_pixel` values for each requested 2D array.
    pub sample_array_2d: Vec<Vec<Point2f>>,

    /// Index of the next 1D array. Reset when a new pixel sample starts.
    pub array_1d_offset: usize,

    /// Index of the next 2D array. Reset when a new pixel sample starts.
    pub array_2d_offset: usize,
}

impl SamplerData {
    /// Create a new `SamplerData` instance.
    ///
    /// * `samples_per_pixel` - Number of samples to generate for each pixel.
    pub fn new(samples_per_pixel: usize) -> Self {
        Self {
            samples_per_pixel,
            ..Default::default()
        }
    }

    /// This should be called when the rendering algorithm is ready to start
    /// working on a given pixel.
    ///
    /// * `p` - The pixel.
    pub fn start_pixel(&mut self, p: &Point2i) {
        self.current_pixel = *p;
        self.current_pixel_sample_index = 0;
        self.array_1d_offset = 0;
        self.array_2d_offset = 0;
    }

    /// Reserves storage for an array of `n` 1D samples per pixel sample.
    ///
    /// * `n` - The number of samples.
    pub fn request_1d_array(&mut self, n: usize) {
        self.samples_1d_array_sizes.push(n);
        self.sample_array_1d.push(vec![0.0; n * self.samples_per_pixel]);
    }

    /// Reserves storage for an array of `n` 2D samples per pixel sample.
    ///
    /// * `n` - The number of samples.
    pub fn request_2d_array(&mut self, n: usize) {
        self.samples_2d_array_sizes.push(n);
        self.sample_array_2d
            .push(vec![Point2f::ZERO; n * self.samples_per_pixel]);
    }

    /// Get the next array of 1D samples for the current pixel sample. Returns
    /// an empty vector when no further arrays were requested or the size does
    /// not match.
    ///
    /// * `n` - The number of samples.
    pub fn get_1d_array(&mut self, n: usize) -> Vec<Float> {
        if self.array_1d_offset == self.sample_array_1d.len()
            || self.samples_1d_array_sizes[self.array_1d_offset] != n
            || self.current_pixel_sample_index >= self.samples_per_pixel
        {
            return vec![];
        }

        let array = &self.sample_array_1d[self.array_1d_offset];
        self.array_1d_offset += 1;

        let i = self.current_pixel_sample_index * n;
        array[i..i + n].to_vec()
    }

    /// Get the next array of 2D samples for the current pixel sample. Returns
    /// an empty vector when no further arrays were requested or the size does
    /// not match.
    ///
    /// * `n` - The number of samples.
    pub fn get_2d_array(&mut self, n: usize) -> Vec<Point2f> {
        if self.array_2d_offset == self.sample_array_2d.len()
            || self.samples_2d_array_sizes[self.array_2d_offset] != n
            || self.current_pixel_sample_index >= self.samples_per_pixel
        {
            return vec![];
        }

        let array = &self.sample_array_2d[self.array_2d_offset];
        self.array_2d_offset += 1;

        let i = self.current_pixel_sample_index * n;
        array[i..i + n].to_vec()
    }

    /// Advance to the next sample of the pixel. Returns `true` while
    /// `current_pixel_sample_index` < `samples_per_pixel`.
    pub fn start_next_sample(&mut self) -> bool {
        self.array_1d_offset = 0;
        self.array_2d_offset = 0;
        self.current_pixel_sample_index += 1;
        self.current_pixel_sample_index < self.samples_per_pixel
    }

    /// Set the index of the sample in the current pixel to generate next.
    ///
    /// * `sample_num` - The sample number.
    pub fn set_sample_number(&mut self, sample_num: usize) -> bool {
        self.array_1d_offset = 0;
        self.array_2d_offset = 0;
        self.current_pixel_sample_index = sample_num;
        self.current_pixel_sample_index < self.samples_per_pixel
    }

    /// Returns the index of the sample in the current pixel.
    pub fn current_sample_number(&self) -> usize {
        self.current_pixel_sample_index
    }
}
