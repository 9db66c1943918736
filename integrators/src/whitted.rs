//! Whitted Integrator

use base::camera::*;
use base::error::RenderError;
use base::geometry::*;
use base::integrator::*;
use base::light::*;
use base::material::*;
use base::reflection::*;
use base::sampler::*;
use base::scene::*;
use base::spectrum::*;

/// Implements Whitted's ray tracing algorithm: one light sample per light
/// without MIS, plus perfect specular reflection and transmission.
pub struct WhittedIntegrator {
    /// Common data for sampler integrators.
    pub data: SamplerIntegratorData,
}

impl WhittedIntegrator {
    /// Create a new `WhittedIntegrator`.
    ///
    /// * `max_depth`    - Maximum recursion depth.
    /// * `camera`       - The camera.
    /// * `sampler`      - The sampler.
    /// * `pixel_bounds` - Pixel bounds for the image.
    pub fn new(max_depth: usize, camera: ArcCamera, sampler: Box<dyn Sampler>, pixel_bounds: Bounds2i) -> Self {
        Self {
            data: SamplerIntegratorData::new(max_depth, camera, sampler, pixel_bounds),
        }
    }
}

impl SamplerIntegrator for WhittedIntegrator {
    /// Returns the common data.
    fn get_data(&self) -> &SamplerIntegratorData {
        &self.data
    }
}

impl Integrator for WhittedIntegrator {
    fn render(
        &mut self,
        scene: &Scene,
        options: &RenderOptions,
        diagnostics: &dyn RadianceDiagnostics,
    ) -> Result<(), RenderError> {
        SamplerIntegrator::render(self, scene, options, diagnostics)
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
        let Some(bsdf) = isect.bsdf.as_ref() else {
            let mut new_ray = isect.spawn_ray(&ray.d);
            return self.li(&mut new_ray, scene, sampler, depth);
        };

        // Compute emitted light if ray hit an area light source.
        let n = isect.shading.n;
        let wo = isect.hit.wo;
        l += isect.le(&wo);

        // Add contribution of each light source.
        for light in scene.lights.iter() {
            let u = sampler.get_2d();
            let Li { wi, pdf, visibility, value } = light.sample_li(&isect.hit, &u);
            if value.is_black() || pdf == 0.0 {
                continue;
            }

            let f = bsdf.f(&wo, &wi, BxDFType::BSDF_ALL);
            if !f.is_black() && visibility.map_or(true, |v| v.unoccluded(scene)) {
                l += f * value * wi.abs_dot(&n) / pdf;
            }
        }

        if depth + 1 < self.data.max_depth {
            // Trace rays for specular reflection and refraction.
            l += self.specular_reflect(&isect, scene, sampler, depth);
            l += self.specular_transmit(&isect, scene, sampler, depth);
        }

        l
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_scenes::*;
    use base::pbrt::*;
    use float_cmp::*;

    fn integrator(max_depth: usize) -> WhittedIntegrator {
        let camera = test_camera(8, 8, "whitted.pfm");
        let bounds = camera.get_film().get_sample_bounds();
        WhittedIntegrator::new(max_depth, camera, test_sampler(1), bounds)
    }

    #[test]
    fn matte_floor_matches_closed_form() {
        let scene = matte_floor_under_point_light();
        let integrator = integrator(5);
        let mut sampler = integrator.data.sampler.clone_sampler(0);
        let l = integrator.li(&mut down_ray(), &scene, &mut *sampler, 0);
        let expected = FLOOR_REFLECTANCE * INV_PI * POINT_INTENSITY / 4.0;
        assert!(approx_eq!(f32, l[1], expected, epsilon = 1e-4), "{l} != {expected}");
    }

    #[test]
    fn light_behind_surface_contributes_nothing() {
        // Seen from below, the light is on the far side of the floor.
        let scene = matte_floor_under_point_light();
        let integrator = integrator(5);
        let mut sampler = integrator.data.sampler.clone_sampler(0);
        let mut ray = Ray::new(Point3f::new(0.0, 0.0, -1.0), Vector3f::new(0.0, 0.0, 1.0), INFINITY, 0.0);
        assert!(integrator.li(&mut ray, &scene, &mut *sampler, 0).is_black());
    }

    #[test]
    fn mirror_reflects_sky_within_depth() {
        let scene = mirror_under_sky();
        let mut sampler = test_sampler(1).clone_sampler(0);

        let shallow = integrator(1);
        assert!(shallow.li(&mut down_ray(), &scene, &mut *sampler, 0).is_black());

        let deep = integrator(2);
        let l = deep.li(&mut down_ray(), &scene, &mut *sampler, 0);
        assert!(approx_eq!(f32, l[0], MIRROR_REFLECTANCE * SKY_RADIANCE, epsilon = 1e-5));
    }
}
