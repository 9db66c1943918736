//! Direct Lighting Integrator

use base::camera::*;
use base::error::RenderError;
use base::geometry::*;
use base::integrator::*;
use base::interaction::*;
use base::material::*;
use base::sampler::*;
use base::scene::*;
use base::spectrum::*;

/// Direct light sampling strategy.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DirectLightStrategy {
    /// Loops over all of the lights and takes a number of samples based on
    /// `n_samples` from each of them, summing the result.
    UniformSampleAll,

    /// Takes a single sample from just one of the lights, chosen at random.
    UniformSampleOne,
}

impl DirectLightStrategy {
    /// Returns the strategy for a name; `"all"` or `"one"`. Unknown names
    /// fall back to `UniformSampleAll`.
    ///
    /// * `name` - The strategy name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "one" => Self::UniformSampleOne,
            "all" => Self::UniformSampleAll,
            _ => {
                warn!("Strategy '{}' for direct lighting unknown. Using 'all'.", name);
                Self::UniformSampleAll
            }
        }
    }
}

/// Implements the direct lighting integrator.
pub struct DirectLightingIntegrator {
    /// Common data for sampler integrators.
    pub data: SamplerIntegratorData,

    /// Direct light sampling strategy.
    strategy: DirectLightStrategy,

    /// Number of samples to use for each light source.
    n_light_samples: Vec<usize>,
}

impl DirectLightingIntegrator {
    /// Create a new `DirectLightingIntegrator`.
    ///
    /// * `strategy`     - Light sampling strategy.
    /// * `max_depth`    - Maximum recursion depth.
    /// * `camera`       - The camera.
    /// * `sampler`      - The sampler.
    /// * `pixel_bounds` - Pixel bounds for the image.
    pub fn new(
        strategy: DirectLightStrategy,
        max_depth: usize,
        camera: ArcCamera,
        sampler: Box<dyn Sampler>,
        pixel_bounds: Bounds2i,
    ) -> Self {
        Self {
            data: SamplerIntegratorData::new(max_depth, camera, sampler, pixel_bounds),
            strategy,
            n_light_samples: vec![],
        }
    }

    /// Returns the light sampling strategy.
    pub fn strategy(&self) -> DirectLightStrategy {
        self.strategy
    }
}

impl SamplerIntegrator for DirectLightingIntegrator {
    /// Returns the common data.
    fn get_data(&self) -> &SamplerIntegratorData {
        &self.data
    }
}

impl Integrator for DirectLightingIntegrator {
    /// Render the scene.
    ///
    /// * `scene`       - The scene.
    /// * `options`     - Thread count, tile size and progress settings.
    /// * `diagnostics` - Receives reports of invalid radiance values.
    fn render(
        &mut self,
        scene: &Scene,
        options: &RenderOptions,
        diagnostics: &dyn RadianceDiagnostics,
    ) -> Result<(), RenderError> {
        SamplerIntegrator::render(self, scene, options, diagnostics)
    }

    /// Preprocess the scene.
    ///
    /// * `scene` - The scene
    fn preprocess(&mut self, scene: &Scene) {
        if self.strategy != DirectLightStrategy::UniformSampleAll {
            return;
        }

        let sampler = &mut self.data.sampler;

        // Compute number of samples to use for each light.
        self.n_light_samples = scene
            .lights
            .iter()
            .map(|light| sampler.round_count(light.get_num_samples()))
            .collect();

        // Request samples for sampling all lights.
        for _ in 0..self.data.max_depth {
            for &n in self.n_light_samples.iter() {
                sampler.request_2d_array(n);
                sampler.request_2d_array(n);
            }
        }
        debug!(
            "Requested light sample arrays {:?} for {} bounces",
            self.n_light_samples, self.data.max_depth
        );
    }

    /// Returns the incident radiance at the origin of a given ray.
    ///
    /// * `ray`     - The ray.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    /// * `depth`   - The recursion depth.
    fn li(&self, ray: &mut Ray, scene: &Scene, sampler: &mut dyn Sampler, depth: usize) -> Spectrum {
        let mut l = Spectrum::ZERO;

        // Find closest ray intersection or return background radiance.
        let Some(mut isect) = scene.intersect(ray) else {
            for light in scene.lights.iter() {
                l += light.le(ray);
            }
            return l;
        };

        // Compute scattering functions for surface interaction.
        isect.compute_scattering_functions(TransportMode::Radiance, false);
        if isect.bsdf.is_none() {
            let mut new_ray = isect.spawn_ray(&ray.d);
            return self.li(&mut new_ray, scene, sampler, depth);
        }

        // Compute emitted light if ray hit an area light source.
        let wo = isect.hit.wo;
        l += isect.le(&wo);

        let it = Interaction::from(isect);
        if !scene.lights.is_empty() {
            // Compute direct lighting for `DirectLightingIntegrator`.
            l += match self.strategy {
                DirectLightStrategy::UniformSampleAll => {
                    uniform_sample_all_lights(&it, scene, sampler, &self.n_light_samples, false)
                }
                DirectLightStrategy::UniformSampleOne => uniform_sample_one_light(&it, scene, sampler, false, None),
            };
        }

        if depth + 1 < self.data.max_depth {
            if let Interaction::Surface { si } = &it {
                // Trace rays for specular reflection and refraction.
                l += self.specular_reflect(si, scene, sampler, depth);
                l += self.specular_transmit(si, scene, sampler, depth);
            }
        }

        l
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_scenes::*;
    use base::pbrt::{Float, INV_PI};
    use float_cmp::*;

    fn integrator(strategy: DirectLightStrategy, max_depth: usize) -> DirectLightingIntegrator {
        let camera = test_camera(8, 8, "direct.pfm");
        let bounds = camera.get_film().get_sample_bounds();
        DirectLightingIntegrator::new(strategy, max_depth, camera, test_sampler(4), bounds)
    }

    #[test]
    fn unknown_strategy_falls_back_to_all() {
        assert_eq!(DirectLightStrategy::from_name("one"), DirectLightStrategy::UniformSampleOne);
        assert_eq!(DirectLightStrategy::from_name("bogus"), DirectLightStrategy::UniformSampleAll);
    }

    #[test]
    fn preprocess_requests_arrays_per_light_and_bounce() {
        let scene = matte_floor_under_point_light();
        let mut integrator = integrator(DirectLightStrategy::UniformSampleAll, 3);
        integrator.preprocess(&scene);
        assert_eq!(integrator.n_light_samples, vec![1]);
        assert_eq!(integrator.data.sampler.get_data().samples_2d_array_sizes.len(), 6);
    }

    #[test]
    fn one_light_strategy_requests_nothing() {
        let scene = matte_floor_under_point_light();
        let mut integrator = integrator(DirectLightStrategy::UniformSampleOne, 3);
        integrator.preprocess(&scene);
        assert!(integrator.n_light_samples.is_empty());
        assert!(integrator.data.sampler.get_data().samples_2d_array_sizes.is_empty());
    }

    #[test]
    fn matte_floor_matches_closed_form() {
        let scene = matte_floor_under_point_light();
        for strategy in [DirectLightStrategy::UniformSampleAll, DirectLightStrategy::UniformSampleOne] {
            let mut integrator = integrator(strategy, 5);
            integrator.preprocess(&scene);
            let mut sampler = integrator.data.sampler.clone_sampler(1);
            sampler.start_pixel(&Point2i::new(0, 0));

            // Straight down onto the floor, light two units above the hit point.
            let mut ray = down_ray();
            let l = integrator.li(&mut ray, &scene, &mut *sampler, 0);
            let expected = FLOOR_REFLECTANCE * INV_PI * POINT_INTENSITY / 4.0;
            assert!(approx_eq!(f32, l[0], expected, epsilon = 1e-4), "{l} != {expected}");
        }
    }

    #[test]
    fn area_light_estimate_converges_to_disk_irradiance() {
        let radiance = 4.0;
        let scene = matte_floor_under_area_light(radiance);
        let integrator = integrator(DirectLightStrategy::UniformSampleOne, 1);
        let mut sampler = integrator.data.sampler.clone_sampler(7);

        let n = 4000;
        let mut sum = 0.0;
        for _ in 0..n {
            sum += integrator.li(&mut down_ray(), &scene, &mut *sampler, 0)[0];
        }

        // Disk of radius 0.5 two units above the shading point.
        let expected = FLOOR_REFLECTANCE * radiance * 0.25 / (4.0 + 0.25);
        let mean = sum / n as Float;
        assert!((mean - expected).abs() < 0.05 * expected, "{mean} != {expected}");
    }

    #[test]
    fn escaping_ray_sees_environment() {
        let scene = mirror_under_sky();
        let integrator = integrator(DirectLightStrategy::UniformSampleAll, 5);
        let mut sampler = integrator.data.sampler.clone_sampler(0);
        let mut ray = up_ray();
        assert_eq!(integrator.li(&mut ray, &scene, &mut *sampler, 0), Spectrum::new(SKY_RADIANCE));
    }

    #[test]
    fn specular_recursion_stops_at_max_depth() {
        let scene = mirror_under_sky();

        // A single bounce budget leaves the mirror black.
        let integrator = integrator(DirectLightStrategy::UniformSampleAll, 1);
        let mut sampler = integrator.data.sampler.clone_sampler(0);
        let mut ray = down_ray();
        assert!(integrator.li(&mut ray, &scene, &mut *sampler, 0).is_black());

        // One more level lets the mirror reflect the sky.
        let integrator = integrator_with_depth(2);
        let mut sampler = integrator.data.sampler.clone_sampler(0);
        let mut ray = down_ray();
        let l = integrator.li(&mut ray, &scene, &mut *sampler, 0);
        assert!(approx_eq!(f32, l[1], MIRROR_REFLECTANCE * SKY_RADIANCE, epsilon = 1e-5));

        // Entering at `depth == max_depth - 1` never recurses either.
        let mut ray = down_ray();
        assert!(integrator.li(&mut ray, &scene, &mut *sampler, 1).is_black());
    }

    fn integrator_with_depth(max_depth: usize) -> DirectLightingIntegrator {
        integrator(DirectLightStrategy::UniformSampleAll, max_depth)
    }

    #[test]
    fn render_writes_image() {
        let scene = matte_floor_under_point_light();
        let path = std::env::temp_dir().join(format!("direct-render-{}.pfm", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let camera = test_camera(8, 6, &path);
        let bounds = camera.get_film().get_sample_bounds();
        let mut integrator =
            DirectLightingIntegrator::new(DirectLightStrategy::UniformSampleAll, 5, camera, test_sampler(2), bounds);

        let diagnostics = CountingDiagnostics::new();
        let options = RenderOptions {
            threads: 2,
            tile_size: 4,
            quiet: true,
        };
        let result = Integrator::render(&mut integrator, &scene, &options, &diagnostics);
        assert!(result.is_ok(), "{result:?}");
        assert_eq!(diagnostics.total(), 0);
        assert!(std::path::Path::new(&path).exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn render_rejects_zero_threads() {
        let scene = matte_floor_under_point_light();
        let mut integrator = integrator(DirectLightStrategy::UniformSampleAll, 5);
        let options = RenderOptions {
            threads: 0,
            tile_size: 4,
            quiet: true,
        };
        let result = Integrator::render(&mut integrator, &scene, &options, &LogDiagnostics);
        assert!(matches!(result, Err(RenderError::InvalidOption { name: "threads", .. })));
    }
}
