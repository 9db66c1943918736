//! Scene

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::primitive::*;
use crate::sampler::*;
use crate::spectrum::*;
use std::sync::Arc;

/// The geometry and lights to render.
#[derive(Clone)]
pub struct Scene {
    /// Aggregate of all primitives.
    pub aggregate: ArcPrimitive,

    /// All light sources in insertion order.
    pub lights: Vec<ArcLight>,

    /// Lights that contribute to rays escaping the scene.
    pub infinite_lights: Vec<ArcLight>,

    /// World space bounds of the geometry.
    pub world_bound: Bounds3f,
}

impl Scene {
    /// Create a new scene and preprocess its lights.
    ///
    /// * `aggregate` - Aggregate of all primitives.
    /// * `lights`    - All light sources.
    pub fn new(aggregate: ArcPrimitive, lights: Vec<ArcLight>) -> Self {
        let infinite_lights = lights
            .iter()
            .filter(|l| l.get_type().contains(LightType::INFINITE))
            .map(Arc::clone)
            .collect();

        let scene = Self {
            world_bound: aggregate.world_bound(),
            aggregate,
            lights,
            infinite_lights,
        };

        for light in scene.lights.iter() {
            light.preprocess(&scene);
        }

        info!(
            "Scene has {} lights ({} infinite)",
            scene.lights.len(),
            scene.infinite_lights.len()
        );
        scene
    }

    /// Returns the closest intersection along the ray and shortens the ray's
    /// `t_max` to it.
    ///
    /// * `ray` - The ray.
    pub fn intersect(&self, ray: &mut Ray) -> Option<SurfaceInteraction<'_>> {
        debug_assert!(!ray.d.has_nans());
        self.aggregate.intersect(ray)
    }

    /// Returns true if the ray intersects anything.
    ///
    /// * `ray` - The ray.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        debug_assert!(!ray.d.has_nans());
        self.aggregate.intersect_p(ray)
    }

    /// Returns the first intersection with a surface that has a material,
    /// skipping surfaces that only delimit space, and the beam transmittance
    /// up to it. The ray is advanced to the returned segment.
    ///
    /// * `ray`      - The ray.
    /// * `_sampler` - Sampler for stochastic transmittance estimates.
    pub fn intersect_tr(&self, ray: &mut Ray, _sampler: &mut dyn Sampler) -> (Option<SurfaceInteraction<'_>>, Spectrum) {
        let tr = Spectrum::ONE;

        loop {
            match self.intersect(ray) {
                Some(isect) if isect.primitive.is_some_and(|p| p.get_material().is_none()) => {
                    *ray = isect.hit.spawn_ray(&ray.d);
                }
                hit_surface => return (hit_surface, tr),
            }
        }
    }
}
