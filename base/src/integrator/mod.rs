//! Integrator

mod common;
mod diagnostics;
#[cfg(test)]
mod mocks;
mod sampler_integrator;

use crate::error::RenderError;
use crate::geometry::*;
use crate::sampler::*;
use crate::scene::Scene;
use crate::spectrum::*;

// Re-export.
pub use common::*;
pub use diagnostics::*;
pub use sampler_integrator::*;

/// Integrator interface.
pub trait Integrator {
    /// Render the scene and write the image.
    ///
    /// * `scene`       - The scene.
    /// * `options`     - Thread count, tile size and progress settings.
    /// * `diagnostics` - Receives reports of invalid radiance values.
    fn render(
        &mut self,
        scene: &Scene,
        options: &RenderOptions,
        diagnostics: &dyn RadianceDiagnostics,
    ) -> Result<(), RenderError>;

    /// Preprocess the scene before rendering.
    ///
    /// * `scene` - The scene.
    fn preprocess(&mut self, _scene: &Scene) {}

    /// Returns the incident radiance at the origin of a given ray.
    ///
    /// * `ray`     - The ray.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    /// * `depth`   - The recursion depth.
    fn li(&self, _ray: &mut Ray, _scene: &Scene, _sampler: &mut dyn Sampler, _depth: usize) -> Spectrum {
        Spectrum::ZERO
    }
}
