//! Stratified Sampler.

use base::geometry::*;
use base::pbrt::Float;
use base::sampler::*;
use base::sampling::*;

/// Subdivides the pixel area into a grid of strata and places one sample,
/// optionally jittered, in each. Additional dimensions are stratified and
/// randomly paired across pixel samples.
pub struct StratifiedSampler {
    /// Per-pixel sample storage.
    pub pixel_sampler: PixelSampler,

    /// Number of strata in x.
    pub x_pixel_samples: usize,

    /// Number of strata in y.
    pub y_pixel_samples: usize,

    /// Jitter each sample inside its stratum.
    pub jitter_samples: bool,
}

impl StratifiedSampler {
    /// Create a new `StratifiedSampler`.
    ///
    /// * `x_pixel_samples`      - Number of strata in x.
    /// * `y_pixel_samples`      - Number of strata in y.
    /// * `jitter_samples`       - Jitter each sample inside its stratum.
    /// * `n_sampled_dimensions` - Number of stratified dimensions.
    /// * `seed`                 - Seed for the random number generator.
    pub fn new(
        x_pixel_samples: usize,
        y_pixel_samples: usize,
        jitter_samples: bool,
        n_sampled_dimensions: usize,
        seed: u64,
    ) -> Self {
        if x_pixel_samples == 0 || y_pixel_samples == 0 {
            warn!(
                "Invalid stratification {}x{}; using at least one stratum per axis.",
                x_pixel_samples, y_pixel_samples
            );
        }
        let x_pixel_samples = x_pixel_samples.max(1);
        let y_pixel_samples = y_pixel_samples.max(1);
        Self {
            pixel_sampler: PixelSampler::new(x_pixel_samples * y_pixel_samples, n_sampled_dimensions, seed),
            x_pixel_samples,
            y_pixel_samples,
            jitter_samples,
        }
    }
}

impl Sampler for StratifiedSampler {
    fn get_data(&self) -> &SamplerData {
        &self.pixel_sampler.data
    }

    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.pixel_sampler.data
    }

    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler> {
        Box::new(Self {
            pixel_sampler: self.pixel_sampler.reseeded(seed),
            x_pixel_samples: self.x_pixel_samples,
            y_pixel_samples: self.y_pixel_samples,
            jitter_samples: self.jitter_samples,
        })
    }

    /// Generates every sample vector for the pixel up front.
    ///
    /// * `p` - The pixel.
    fn start_pixel(&mut self, p: &Point2i) {
        let spp = self.x_pixel_samples * self.y_pixel_samples;
        let jitter = self.jitter_samples;
        let ps = &mut self.pixel_sampler;

        // Generate single stratified samples for the pixel.
        for samples in ps.samples_1d.iter_mut() {
            *samples = stratified_sample_1d(&mut ps.rng, spp, jitter);
            ps.rng.shuffle(samples);
        }
        for samples in ps.samples_2d.iter_mut() {
            *samples = stratified_sample_2d(&mut ps.rng, self.x_pixel_samples, self.y_pixel_samples, jitter);
            ps.rng.shuffle(samples);
        }

        // Generate arrays of stratified samples for the pixel.
        let data = &mut ps.data;
        for (array, &count) in data.sample_array_1d.iter_mut().zip(data.samples_1d_array_sizes.iter()) {
            for j in 0..spp {
                let mut samples = stratified_sample_1d(&mut ps.rng, count, jitter);
                ps.rng.shuffle(&mut samples);
                array[j * count..(j + 1) * count].copy_from_slice(&samples);
            }
        }
        for (array, &count) in data.sample_array_2d.iter_mut().zip(data.samples_2d_array_sizes.iter()) {
            for j in 0..spp {
                let samples = latin_hypercube_2d(&mut ps.rng, count);
                array[j * count..(j + 1) * count].copy_from_slice(&samples);
            }
        }

        ps.start_pixel(p);
    }

    fn get_1d(&mut self) -> Float {
        self.pixel_sampler.get_1d()
    }

    fn get_2d(&mut self) -> Point2f {
        self.pixel_sampler.get_2d()
    }

    fn start_next_sample(&mut self) -> bool {
        self.pixel_sampler.start_next_sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn film_samples_cover_every_stratum() {
        let mut s = StratifiedSampler::new(2, 2, true, 4, 0);
        let pixel = Point2i::new(5, 7);
        s.start_pixel(&pixel);

        let mut strata = vec![];
        loop {
            let cs = s.get_camera_sample(&pixel);
            let fx = cs.p_film.x - pixel.x as Float;
            let fy = cs.p_film.y - pixel.y as Float;
            strata.push(((fx * 2.0) as usize, (fy * 2.0) as usize));
            if !s.start_next_sample() {
                break;
            }
        }
        strata.sort();
        assert_eq!(strata, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn arrays_survive_cloning() {
        let mut s = StratifiedSampler::new(2, 1, false, 2, 0);
        s.request_1d_array(3);
        s.request_2d_array(5);
        let mut c = s.clone_sampler(42);
        c.start_pixel(&Point2i::new(0, 0));
        assert_eq!(c.get_1d_array(3).len(), 3);
        assert_eq!(c.get_2d_array(5).len(), 5);
        assert!(c.start_next_sample());
        assert_eq!(c.get_2d_array(5).len(), 5);
        assert!(!c.start_next_sample());
    }

    #[test]
    fn dimensions_beyond_stratified_fall_back_to_random() {
        let mut s = StratifiedSampler::new(1, 1, true, 1, 3);
        s.start_pixel(&Point2i::new(0, 0));
        let _ = s.get_2d();
        let extra = s.get_2d();
        assert!((0.0..1.0).contains(&extra.x));
        assert_eq!(s.current_sample_number(), 0);
    }
}
