//! Sampler

mod common;
mod pixel_sampler;

use crate::camera::*;
use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::*;

// Re-export
pub use common::*;
pub use pixel_sampler::*;

/// Sampler interface. Implementations generate sample vectors for each
/// pixel sample; every call to `get_1d` or `get_2d` consumes the next
/// dimension of the current vector.
pub trait Sampler: Send + Sync {
    /// Returns a shared reference underlying `SamplerData`.
    fn get_data(&self) -> &SamplerData;

    /// Returns a mutable reference to underlying `SamplerData`.
    fn get_data_mut(&mut self) -> &mut SamplerData;

    /// Returns an independent copy for a rendering thread. Requested sample
    /// arrays are preserved.
    ///
    /// * `seed` - The seed for the random number generator.
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler>;

    /// This should be called when the rendering algorithm is ready to start
    /// working on a given pixel.
    ///
    /// * `p` - The pixel.
    fn start_pixel(&mut self, p: &Point2i) {
        self.get_data_mut().start_pixel(p);
    }

    /// Returns the sample value for the next dimension of the current sample
    /// vector.
    fn get_1d(&mut self) -> Float;

    /// Returns the sample value for the next two dimensions of the current
    /// sample vector.
    fn get_2d(&mut self) -> Point2f;

    /// Returns an initialized `CameraSample` for a given pixel.
    ///
    /// * `p_raster` - The pixel.
    fn get_camera_sample(&mut self, p_raster: &Point2i) -> CameraSample {
        let film_sample = self.get_2d();
        let p_film = Point2f::new(
            p_raster.x as Float + film_sample.x,
            p_raster.y as Float + film_sample.y,
        );

        let time = self.get_1d();
        let p_lens = self.get_2d();

        CameraSample::new(p_film, p_lens, time)
    }

    /// Requests an array of `n` 1D samples per pixel sample. Must be called
    /// before rendering begins.
    ///
    /// * `n` - The number of samples.
    fn request_1d_array(&mut self, n: usize) {
        let n = self.round_count(n);
        self.get_data_mut().request_1d_array(n);
    }

    /// Requests an array of `n` 2D samples per pixel sample. Must be called
    /// before rendering begins.
    ///
    /// * `n` - The number of samples.
    fn request_2d_array(&mut self, n: usize) {
        let n = self.round_count(n);
        self.get_data_mut().request_2d_array(n);
    }

    /// Returns the preferred array size for `n` samples. The default
    /// implementation returns `n`.
    ///
    /// * `n` - The requested count.
    fn round_count(&self, n: usize) -> usize {
        n
    }

    /// Get an array of 1D samples; empty if none is available.
    ///
    /// * `n` - The number of samples.
    fn get_1d_array(&mut self, n: usize) -> Vec<Float> {
        self.get_data_mut().get_1d_array(n)
    }

    /// Get an array of 2D samples; empty if none is available.
    ///
    /// * `n` - The number of samples.
    fn get_2d_array(&mut self, n: usize) -> Vec<Point2f> {
        self.get_data_mut().get_2d_array(n)
    }

    /// Advance to the next pixel sample. Returns `false` when the pixel is
    /// complete.
    fn start_next_sample(&mut self) -> bool {
        self.get_data_mut().start_next_sample()
    }

    /// Returns the number of samples per pixel.
    fn samples_per_pixel(&self) -> usize {
        self.get_data().samples_per_pixel
    }

    /// Returns the index of the current sample within the pixel.
    fn current_sample_number(&self) -> usize {
        self.get_data().current_sample_number()
    }
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    #[inline]
    fn get_data(&self) -> &SamplerData {
        (**self).get_data()
    }

    #[inline]
    fn get_data_mut(&mut self) -> &mut SamplerData {
        (**self).get_data_mut()
    }

    #[inline]
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler> {
        (**self).clone_sampler(seed)
    }

    #[inline]
    fn start_pixel(&mut self, p: &Point2i) {
        (**self).start_pixel(p)
    }

    #[inline]
    fn get_1d(&mut self) -> Float {
        (**self).get_1d()
    }

    #[inline]
    fn get_2d(&mut self) -> Point2f {
        (**self).get_2d()
    }

    #[inline]
    fn get_camera_sample(&mut self, p_raster: &Point2i) -> CameraSample {
        (**self).get_camera_sample(p_raster)
    }

    #[inline]
    fn request_1d_array(&mut self, n: usize) {
        (**self).request_1d_array(n)
    }

    #[inline]
    fn request_2d_array(&mut self, n: usize) {
        (**self).request_2d_array(n)
    }

    #[inline]
    fn round_count(&self, n: usize) -> usize {
        (**self).round_count(n)
    }

    #[inline]
    fn get_1d_array(&mut self, n: usize) -> Vec<Float> {
        (**self).get_1d_array(n)
    }

    #[inline]
    fn get_2d_array(&mut self, n: usize) -> Vec<Point2f> {
        (**self).get_2d_array(n)
    }

    #[inline]
    fn start_next_sample(&mut self) -> bool {
        (**self).start_next_sample()
    }
}
