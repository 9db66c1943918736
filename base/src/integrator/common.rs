//! Common

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::pbrt::*;
use crate::reflection::*;
use crate::sampler::*;
use crate::sampling::*;
use crate::scene::*;
use crate::spectrum::*;

/// Estimate direct lighting by taking samples from every light and summing
/// their averaged contributions.
///
/// * `it`              - The interaction; surface interactions must carry a BSDF.
/// * `scene`           - The scene.
/// * `sampler`         - The sampler.
/// * `n_light_samples` - Number of samples to take for each light; lights
///                       without an entry take one.
/// * `handle_media`    - Account for transmittance along shadow rays.
pub fn uniform_sample_all_lights(
    it: &Interaction,
    scene: &Scene,
    sampler: &mut dyn Sampler,
    n_light_samples: &[usize],
    handle_media: bool,
) -> Spectrum {
    let mut l = Spectrum::ZERO;

    for (j, light) in scene.lights.iter().enumerate() {
        // Accumulate contribution of j^th light to `l`.
        let n_samples = n_light_samples.get(j).copied().unwrap_or(1).max(1);
        let u_light_array = sampler.get_2d_array(n_samples);
        let u_scattering_array = sampler.get_2d_array(n_samples);

        let mut ld = Spectrum::ZERO;
        if u_light_array.is_empty() || u_scattering_array.is_empty() {
            // No arrays were requested; draw each sample pair from the sampler.
            for _ in 0..n_samples {
                let u_light = sampler.get_2d();
                let u_scattering = sampler.get_2d();
                ld += estimate_direct(it, &u_scattering, light, &u_light, scene, sampler, handle_media, false);
            }
        } else {
            // Estimate direct lighting using sample arrays.
            for (u_light, u_scattering) in u_light_array.iter().zip(u_scattering_array.iter()) {
                ld += estimate_direct(it, u_scattering, light, u_light, scene, sampler, handle_media, false);
            }
        }
        l += ld / n_samples as Float;
    }

    l
}

/// Estimate direct lighting from a single randomly chosen light, scaled by
/// the probability of choosing it.
///
/// * `it`            - The interaction; surface interactions must carry a BSDF.
/// * `scene`         - The scene.
/// * `sampler`       - The sampler.
/// * `handle_media`  - Account for transmittance along shadow rays.
/// * `light_distrib` - Distribution for choosing the light; uniform if `None`.
pub fn uniform_sample_one_light(
    it: &Interaction,
    scene: &Scene,
    sampler: &mut dyn Sampler,
    handle_media: bool,
    light_distrib: Option<&Distribution1D>,
) -> Spectrum {
    // Randomly choose a single light to sample, `light`.
    let n_lights = scene.lights.len();
    if n_lights == 0 {
        return Spectrum::ZERO;
    }

    let (light_num, light_pdf) = match light_distrib {
        Some(distrib) => {
            let (light_num, pdf, _) = distrib.sample_discrete(sampler.get_1d());
            if pdf == 0.0 {
                return Spectrum::ZERO;
            }
            (light_num, pdf)
        }
        None => {
            let u = sampler.get_1d();
            let light_num = min(u * n_lights as Float, n_lights as Float - 1.0) as usize;
            (light_num, 1.0 / n_lights as Float)
        }
    };

    let light = &scene.lights[light_num];
    let u_light = sampler.get_2d();
    let u_scattering = sampler.get_2d();
    estimate_direct(it, &u_scattering, light, &u_light, scene, sampler, handle_media, false) / light_pdf
}

/// Compute the direct lighting contribution of one light at an interaction
/// with multiple importance sampling of the light and the BSDF (or phase
/// function).
///
/// * `it`           - The interaction; surface interactions must carry a BSDF.
/// * `u_scattering` - Sample for the BSDF or phase function.
/// * `light`        - The light.
/// * `u_light`      - Sample for the light.
/// * `scene`        - The scene.
/// * `sampler`      - The sampler.
/// * `handle_media` - Account for transmittance along shadow rays.
/// * `specular`     - Include specular BxDF lobes.
#[allow(clippy::too_many_arguments)]
pub fn estimate_direct(
    it: &Interaction,
    u_scattering: &Point2f,
    light: &ArcLight,
    u_light: &Point2f,
    scene: &Scene,
    sampler: &mut dyn Sampler,
    handle_media: bool,
    specular: bool,
) -> Spectrum {
    let bsdf_flags = BxDFType::sampling_flags(specular);
    let hit = it.get_hit();
    let mut ld = Spectrum::ZERO;

    // Sample light source with multiple importance sampling.
    let Li {
        wi,
        pdf: light_pdf,
        visibility,
        value: mut li,
    } = light.sample_li(hit, u_light);
    trace!("EstimateDirect u_light: ({}, {}) -> Li: {li}, wi: {wi:?}, pdf: {light_pdf}", u_light.x, u_light.y);

    if light_pdf > 0.0 && !li.is_black() {
        // Compute BSDF or phase function's value for light sample.
        let (f, scattering_pdf) = match it {
            Interaction::Surface { si } => match si.bsdf.as_ref() {
                Some(bsdf) => {
                    let f = bsdf.f(&hit.wo, &wi, bsdf_flags) * wi.abs_dot(&si.shading.n);
                    let scattering_pdf = bsdf.pdf(&hit.wo, &wi, bsdf_flags);
                    trace!("  surf f*dot: {f}, scatteringPdf: {scattering_pdf}");
                    (f, scattering_pdf)
                }
                None => (Spectrum::ZERO, 0.0),
            },
            Interaction::Medium { mi } => {
                let p = mi.phase.p(&mi.hit.wo, &wi);
                trace!("  medium p: {p}");
                (Spectrum::new(p), p)
            }
        };

        if !f.is_black() {
            // Compute effect of visibility for light source sample.
            match visibility {
                Some(vis) if handle_media => li *= vis.tr(scene, sampler),
                Some(vis) => {
                    if vis.unoccluded(scene) {
                        trace!("  shadow ray unoccluded");
                    } else {
                        trace!("  shadow ray blocked");
                        li = Spectrum::ZERO;
                    }
                }
                None => trace!("  no visibility tester"),
            }

            // Add light's contribution to reflected radiance.
            if !li.is_black() {
                if light.is_delta_light() {
                    ld += f * li / light_pdf;
                } else {
                    let weight = power_heuristic(1, light_pdf, 1, scattering_pdf);
                    ld += f * li * weight / light_pdf;
                }
            }
        }
    }

    // Sample BSDF with multiple importance sampling.
    if !light.is_delta_light() {
        let (f, scattering_pdf, wi, sampled_specular) = match it {
            Interaction::Surface { si } => match si.bsdf.as_ref().and_then(|bsdf| bsdf.sample_f(&hit.wo, u_scattering, bsdf_flags)) {
                Some(BxDFSample { f, pdf, wi, bxdf_type }) => {
                    (f * wi.abs_dot(&si.shading.n), pdf, wi, bxdf_type.is_specular())
                }
                None => (Spectrum::ZERO, 0.0, Vector3f::ZERO, false),
            },
            Interaction::Medium { mi } => {
                let (p, wi) = mi.phase.sample_p(&mi.hit.wo, u_scattering);
                (Spectrum::new(p), p, wi, false)
            }
        };
        trace!("  BSDF / phase sampling f: {f}, scatteringPdf: {scattering_pdf}");

        if !f.is_black() && scattering_pdf > 0.0 {
            // Account for light contributions along sampled direction `wi`.
            let weight = if sampled_specular {
                1.0
            } else {
                let light_pdf = light.pdf_li(hit, &wi);
                if light_pdf == 0.0 {
                    return ld;
                }
                power_heuristic(1, scattering_pdf, 1, light_pdf)
            };

            // Find intersection and compute transmittance.
            let mut ray = hit.spawn_ray(&wi);
            let (light_isect, tr) = if handle_media {
                scene.intersect_tr(&mut ray, sampler)
            } else {
                (scene.intersect(&mut ray), Spectrum::ONE)
            };

            // Add light contribution from material sampling.
            let li = match light_isect {
                Some(light_isect) => {
                    let hit_this_light = light_isect
                        .primitive
                        .and_then(|primitive| primitive.get_area_light())
                        .is_some_and(|area_light| is_same_light(area_light, light));
                    if hit_this_light {
                        light_isect.le(&(-wi))
                    } else {
                        Spectrum::ZERO
                    }
                }
                None => light.le(&ray),
            };

            if !li.is_black() {
                ld += f * li * tr * weight / scattering_pdf;
            }
        }
    }

    ld
}

/// Returns a distribution for choosing lights in proportion to their power,
/// or `None` if the scene has no lights.
///
/// * `scene` - The scene.
pub fn compute_light_power_distribution(scene: &Scene) -> Option<Distribution1D> {
    if scene.lights.is_empty() {
        None
    } else {
        let light_power: Vec<Float> = scene.lights.iter().map(|light| light.power().y()).collect();
        Some(Distribution1D::new(light_power))
    }
}

#[cfg(test)]
mod tests {
    use super::super::mocks::*;
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn surface(reflectance: Float) -> Interaction<'static> {
        Interaction::from(lambertian_surface(reflectance))
    }

    #[test]
    fn lambertian_point_light_closed_form() {
        // Light at distance 2 and 60 degrees off the normal.
        let d = 2.0;
        let theta = PI / 3.0;
        let p = Point3f::new(d * theta.sin(), 0.0, d * theta.cos());
        let intensity = 5.0;
        let light: ArcLight = Arc::new(TestPointLight::new(p, Spectrum::new(intensity)));
        let scene = empty_scene(vec![Arc::clone(&light)]);
        let mut sampler = ScriptedSampler::new(vec![], Point2f::new(0.5, 0.5));

        let r = 0.8;
        let ld = estimate_direct(
            &surface(r),
            &Point2f::new(0.3, 0.7),
            &light,
            &Point2f::new(0.5, 0.5),
            &scene,
            &mut sampler,
            false,
            false,
        );

        let expected = r * INV_PI * intensity * theta.cos() / (d * d);
        for c in 0..3 {
            assert!(approx_eq!(f32, ld[c], expected, epsilon = 1e-5), "{} != {}", ld[c], expected);
        }
    }

    #[test]
    fn delta_light_never_queries_pdf_li() {
        let point = Arc::new(TestPointLight::new(Point3f::new(0.0, 0.0, 1.0), Spectrum::ONE));
        let light: ArcLight = point.clone();
        let scene = empty_scene(vec![Arc::clone(&light)]);
        let mut sampler = ScriptedSampler::new(vec![], Point2f::new(0.25, 0.75));

        for _ in 0..8 {
            estimate_direct(
                &surface(0.5),
                &Point2f::new(0.1, 0.9),
                &light,
                &Point2f::new(0.5, 0.5),
                &scene,
                &mut sampler,
                false,
                true,
            );
        }
        assert_eq!(point.pdf_li_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn zero_light_pdf_in_bsdf_branch_keeps_light_branch_estimate() {
        let light: ArcLight = Arc::new(TestAreaLikeLight {
            wi: Vector3f::new(0.0, 0.0, 1.0),
            pdf: 0.5,
            value: Spectrum::new(2.0),
            pdf_li_value: 0.0,
        });
        let scene = empty_scene(vec![Arc::clone(&light)]);
        let mut sampler = ScriptedSampler::new(vec![], Point2f::new(0.5, 0.5));

        let ld = estimate_direct(
            &surface(1.0),
            &Point2f::new(0.5, 0.5),
            &light,
            &Point2f::new(0.5, 0.5),
            &scene,
            &mut sampler,
            false,
            false,
        );

        // Light branch only: f = 1/π, cos = 1, weight = 0.5² / (0.5² + (1/π)²).
        let scattering_pdf = INV_PI;
        let weight = power_heuristic(1, 0.5, 1, scattering_pdf);
        let expected = INV_PI * 2.0 * weight / 0.5;
        assert!(approx_eq!(f32, ld[0], expected, epsilon = 1e-5));
    }

    #[test]
    fn zero_light_scene_returns_zero_without_sampling() {
        let scene = empty_scene(vec![]);
        let mut sampler = ScriptedSampler::new(vec![0.3], Point2f::new(0.5, 0.5));
        let l = uniform_sample_one_light(&surface(0.5), &scene, &mut sampler, false, None);
        assert!(l.is_black());
        assert_eq!(sampler.calls, 0);

        assert!(compute_light_power_distribution(&scene).is_none());
        let l = uniform_sample_all_lights(&surface(0.5), &scene, &mut sampler, &[], false);
        assert!(l.is_black());
        assert_eq!(sampler.calls, 0);
    }

    #[test]
    fn all_lights_with_one_sample_matches_estimate_direct() {
        let light: ArcLight = Arc::new(TestPointLight::new(Point3f::new(1.0, 2.0, 3.0), Spectrum::new(4.0)));
        let scene = empty_scene(vec![Arc::clone(&light)]);
        let u = Point2f::new(0.2, 0.6);

        let mut sampler = ScriptedSampler::new(vec![], u);
        let all = uniform_sample_all_lights(&surface(0.7), &scene, &mut sampler, &[1], false);

        let mut sampler = ScriptedSampler::new(vec![], u);
        let direct = estimate_direct(&surface(0.7), &u, &light, &u, &scene, &mut sampler, false, false);

        assert_eq!(all, direct);
        assert!(!all.is_black());
    }

    #[test]
    fn one_light_is_unbiased_over_light_selection() {
        let k = 4;
        let lights: Vec<ArcLight> = (0..k)
            .map(|i| {
                let p = Point3f::new(i as Float - 1.5, 0.5, 2.0);
                Arc::new(TestPointLight::new(p, Spectrum::new(3.0))) as ArcLight
            })
            .collect();
        let scene = empty_scene(lights);
        let it = surface(0.9);

        let mut sampler = ScriptedSampler::new(vec![], Point2f::new(0.5, 0.5));
        let all = uniform_sample_all_lights(&it, &scene, &mut sampler, &vec![1; k], false);

        // Stratified selection values hit every light exactly once.
        let selections: Vec<Float> = (0..k).map(|i| (i as Float + 0.5) / k as Float).collect();
        let mut sampler = ScriptedSampler::new(selections, Point2f::new(0.5, 0.5));
        let mut mean = Spectrum::ZERO;
        for _ in 0..k {
            mean += uniform_sample_one_light(&it, &scene, &mut sampler, false, None);
        }
        mean /= k as Float;

        assert!(approx_eq!(f32, mean[0], all[0], epsilon = 1e-5));
    }

    #[test]
    fn all_lights_without_arrays_takes_every_configured_sample() {
        let point = Arc::new(TestPointLight::new(Point3f::new(0.0, 1.0, 2.0), Spectrum::new(4.0)));
        let light: ArcLight = point.clone();
        let scene = empty_scene(vec![Arc::clone(&light)]);
        let u = Point2f::new(0.4, 0.6);

        let mut sampler = ScriptedSampler::new(vec![], u);
        let all = uniform_sample_all_lights(&surface(0.6), &scene, &mut sampler, &[4], false);
        assert_eq!(point.sample_li_calls.load(Ordering::SeqCst), 4);

        // Identical samples average back to a single estimate.
        let mut sampler = ScriptedSampler::new(vec![], u);
        let direct = estimate_direct(&surface(0.6), &u, &light, &u, &scene, &mut sampler, false, false);
        for c in 0..3 {
            assert!(approx_eq!(f32, all[c], direct[c], epsilon = 1e-6));
        }
    }

    #[test]
    fn one_light_with_zero_power_distribution_returns_zero() {
        let lights: Vec<ArcLight> = vec![
            Arc::new(TestPointLight::new(Point3f::new(0.0, 0.0, 1.0), Spectrum::ZERO)),
            Arc::new(TestPointLight::new(Point3f::new(1.0, 0.0, 1.0), Spectrum::ZERO)),
        ];
        let scene = empty_scene(lights);
        let distrib = compute_light_power_distribution(&scene).unwrap();

        let mut sampler = ScriptedSampler::new(vec![0.3], Point2f::new(0.5, 0.5));
        let l = uniform_sample_one_light(&surface(0.5), &scene, &mut sampler, false, Some(&distrib));
        assert!(l.is_black());
        // Only the light selection value was drawn.
        assert_eq!(sampler.calls, 1);
    }

    #[test]
    fn one_light_with_power_distribution_is_unbiased() {
        let dark = Arc::new(TestPointLight::new(Point3f::new(0.0, 1.0, 1.0), Spectrum::ZERO));
        let lights: Vec<ArcLight> = vec![
            Arc::new(TestPointLight::new(Point3f::new(-1.0, 0.5, 2.0), Spectrum::new(1.0))),
            Arc::clone(&dark) as ArcLight,
            Arc::new(TestPointLight::new(Point3f::new(1.5, -0.5, 2.0), Spectrum::new(3.0))),
        ];
        let scene = empty_scene(lights);
        let it = surface(0.8);
        let distrib = compute_light_power_distribution(&scene).unwrap();
        assert_eq!(distrib.discrete_pdf(1), 0.0);

        let mut sampler = ScriptedSampler::new(vec![], Point2f::new(0.5, 0.5));
        let all = uniform_sample_all_lights(&it, &scene, &mut sampler, &[1; 3], false);
        let dark_calls = dark.sample_li_calls.load(Ordering::SeqCst);

        // Stratified selections pick the dim light 2 times and the bright one 6.
        let n = 8;
        let selections: Vec<Float> = (0..n).map(|i| (i as Float + 0.5) / n as Float).collect();
        let mut sampler = ScriptedSampler::new(selections, Point2f::new(0.5, 0.5));
        let mut mean = Spectrum::ZERO;
        for _ in 0..n {
            mean += uniform_sample_one_light(&it, &scene, &mut sampler, false, Some(&distrib));
        }
        mean /= n as Float;

        assert_eq!(dark.sample_li_calls.load(Ordering::SeqCst), dark_calls);
        assert!(!all.is_black());
        for c in 0..3 {
            assert!(approx_eq!(f32, mean[c], all[c], epsilon = 1e-5), "{} != {}", mean[c], all[c]);
        }
    }

    #[test]
    fn power_distribution_prefers_bright_lights() {
        let lights: Vec<ArcLight> = vec![
            Arc::new(TestPointLight::new(Point3f::ZERO, Spectrum::new(1.0))),
            Arc::new(TestPointLight::new(Point3f::ZERO, Spectrum::new(3.0))),
        ];
        let scene = empty_scene(lights);
        let distrib = compute_light_power_distribution(&scene).unwrap();
        assert!(approx_eq!(f32, distrib.discrete_pdf(0), 0.25, epsilon = 1e-5));
        assert!(approx_eq!(f32, distrib.discrete_pdf(1), 0.75, epsilon = 1e-5));
    }

    proptest! {
        #[test]
        fn direct_estimate_is_nonnegative(
            ux in 0.0..1.0f32, uy in 0.0..1.0f32,
            lx in -3.0..3.0f32, ly in -3.0..3.0f32, lz in -3.0..3.0f32,
            r in 0.0..1.0f32,
        ) {
            prop_assume!(Point3f::new(lx, ly, lz).distance_squared(&Point3f::ZERO) > 1e-2);
            let point: ArcLight = Arc::new(TestPointLight::new(Point3f::new(lx, ly, lz), Spectrum::new(2.0)));
            let area: ArcLight = Arc::new(TestAreaLikeLight {
                wi: Vector3f::new(lx, ly, lz).normalize(),
                pdf: 0.7,
                value: Spectrum::new(1.5),
                pdf_li_value: 0.3,
            });
            let scene = empty_scene(vec![Arc::clone(&point), Arc::clone(&area)]);
            let mut sampler = ScriptedSampler::new(vec![], Point2f::new(ux, uy));
            for light in [&point, &area] {
                let ld = estimate_direct(
                    &surface(r), &Point2f::new(ux, uy), light, &Point2f::new(uy, ux),
                    &scene, &mut sampler, false, false,
                );
                prop_assert!(ld[0] >= 0.0 && ld[1] >= 0.0 && ld[2] >= 0.0);
            }
        }
    }
}
