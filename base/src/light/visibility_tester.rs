//! Visibility Tester

use crate::interaction::*;
use crate::sampler::*;
use crate::scene::*;
use crate::spectrum::*;

/// Connects two points and answers whether light travels between them.
#[derive(Copy, Clone, Debug)]
pub struct VisibilityTester {
    /// First end point.
    pub p0: Hit,

    /// Second end point.
    pub p1: Hit,
}

impl VisibilityTester {
    /// Create a new visibility tester.
    ///
    /// * `p0` - First end point.
    /// * `p1` - Second end point.
    pub fn new(p0: Hit, p1: Hit) -> Self {
        Self { p0, p1 }
    }

    /// Returns true if no surface lies between the end points.
    ///
    /// * `scene` - The scene.
    pub fn unoccluded(&self, scene: &Scene) -> bool {
        !scene.intersect_p(&self.p0.spawn_ray_to_hit(&self.p1))
    }

    /// Returns the beam transmittance between the end points. Surfaces
    /// without a material are passed through; any other surface blocks the
    /// beam entirely. Space between surfaces is a vacuum.
    ///
    /// * `scene`    - The scene.
    /// * `_sampler` - Sampler for stochastic transmittance estimates.
    pub fn tr(&self, scene: &Scene, _sampler: &mut dyn Sampler) -> Spectrum {
        let mut ray = self.p0.spawn_ray_to_hit(&self.p1);

        while let Some(isect) = scene.intersect(&mut ray) {
            if isect.primitive.is_some_and(|p| p.get_material().is_some()) {
                return Spectrum::ZERO;
            }
            ray = isect.hit.spawn_ray_to_hit(&self.p1);
        }

        Spectrum::ONE
    }
}
