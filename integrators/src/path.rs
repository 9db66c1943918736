//! Path Integrator

use base::camera::*;
use base::error::RenderError;
use base::geometry::*;
use base::integrator::*;
use base::interaction::*;
use base::material::*;
use base::pbrt::*;
use base::reflection::*;
use base::sampler::*;
use base::sampling::*;
use base::scene::*;
use base::spectrum::*;

/// Default Russian roulette threshold.
pub const DEFAULT_RR_THRESHOLD: Float = 1.0;

/// Implements path tracing with next event estimation at every non-specular
/// vertex.
pub struct PathIntegrator {
    /// Common data for sampler integrators.
    pub data: SamplerIntegratorData,

    /// Russian roulette threshold used to terminate path sampling.
    rr_threshold: Float,

    /// Distribution for choosing lights proportional to their power.
    light_distribution: Option<Distribution1D>,
}

impl PathIntegrator {
    /// Create a new `PathIntegrator`.
    ///
    /// * `max_depth`    - Maximum number of bounces.
    /// * `camera`       - The camera.
    /// * `sampler`      - The sampler.
    /// * `pixel_bounds` - Pixel bounds for the image.
    /// * `rr_threshold` - Russian roulette threshold used to terminate path
    ///                    sampling.
    pub fn new(
        max_depth: usize,
        camera: ArcCamera,
        sampler: Box<dyn Sampler>,
        pixel_bounds: Bounds2i,
        rr_threshold: Float,
    ) -> Self {
        Self {
            data: SamplerIntegratorData::new(max_depth, camera, sampler, pixel_bounds),
            rr_threshold,
            light_distribution: None,
        }
    }
}

impl SamplerIntegrator for PathIntegrator {
    /// Returns the common data.
    fn get_data(&self) -> &SamplerIntegratorData {
        &self.data
    }
}

impl Integrator for PathIntegrator {
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
        self.light_distribution = compute_light_power_distribution(scene);
    }

    /// Returns the incident radiance at the origin of a given ray.
    ///
    /// * `ray`     - The ray.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    /// * `_depth`  - The recursion depth.
    fn li(&self, ray: &mut Ray, scene: &Scene, sampler: &mut dyn Sampler, _depth: usize) -> Spectrum {
        let mut l = Spectrum::ZERO;
        let mut beta = Spectrum::ONE;
        let mut specular_bounce = false;

        // Radiance scaling due to refraction; factored out of `beta` for
        // Russian roulette.
        let mut eta_scale: Float = 1.0;

        let mut bounces = 0_usize;
        loop {
            trace!("Path tracer bounce {bounces}, current L = {l}, beta = {beta}");

            // Find closest ray intersection or return background radiance.
            let isect = scene.intersect(ray);

            // Possibly add emitted light at intersection.
            if bounces == 0 || specular_bounce {
                match isect.as_ref() {
                    Some(isect) => l += beta * isect.le(&-ray.d),
                    None => {
                        for light in scene.infinite_lights.iter() {
                            l += beta * light.le(ray);
                        }
                    }
                }
            }

            // Terminate path if ray escaped or `max_depth` was reached.
            let Some(mut isect) = isect else {
                break;
            };
            if bounces >= self.data.max_depth {
                break;
            }

            // Compute scattering functions and skip over medium boundaries.
            isect.compute_scattering_functions(TransportMode::Radiance, true);
            if isect.bsdf.is_none() {
                trace!("Skipping intersection due to null bsdf");
                *ray = isect.spawn_ray(&ray.d);
                continue;
            }

            let it = Interaction::from(isect);
            let Interaction::Surface { si: isect } = &it else {
                break;
            };
            let Some(bsdf) = isect.bsdf.as_ref() else {
                break;
            };

            // Sample illumination from lights to find path contribution, but
            // skip this for perfectly specular BSDFs.
            if bsdf.num_components(BxDFType::BSDF_ALL & !BxDFType::BSDF_SPECULAR) > 0 {
                let ld = beta * uniform_sample_one_light(&it, scene, sampler, false, self.light_distribution.as_ref());
                trace!("Sampled direct lighting Ld = {ld}");
                l += ld;
            }

            // Sample BSDF to get new path direction.
            let wo = -ray.d;
            let u = sampler.get_2d();
            let Some(BxDFSample { f, pdf, wi, bxdf_type }) = bsdf.sample_f(&wo, &u, BxDFType::BSDF_ALL) else {
                break;
            };
            if f.is_black() || pdf == 0.0 {
                break;
            }
            beta *= f * wi.abs_dot(&isect.shading.n) / pdf;
            specular_bounce = bxdf_type.is_specular();

            if specular_bounce && bxdf_type.contains(BxDFType::BSDF_TRANSMISSION) {
                // Track radiance scaling depending on whether the ray enters
                // or leaves the medium.
                let eta = bsdf.eta;
                eta_scale *= if wo.dot(&isect.hit.n) > 0.0 {
                    eta * eta
                } else {
                    1.0 / (eta * eta)
                };
            }
            *ray = isect.spawn_ray(&wi);

            // Possibly terminate the path with Russian roulette.
            let rr_beta = beta * eta_scale;
            if rr_beta.max_component_value() < self.rr_threshold && bounces > 3 {
                let q = max(0.05, 1.0 - rr_beta.max_component_value());
                if sampler.get_1d() < q {
                    break;
                }
                beta /= 1.0 - q;
            }

            bounces += 1;
        }

        l
    }
}
