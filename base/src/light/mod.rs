//! Light

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::scene::*;
use crate::spectrum::*;
use std::sync::Arc;

mod light_type;
mod visibility_tester;

// Re-export
pub use light_type::*;
pub use visibility_tester::*;

/// Stores the incident radiance arriving at a point from a light.
#[derive(Copy, Clone, Debug)]
pub struct Li {
    /// Incident direction.
    pub wi: Vector3f,

    /// PDF with respect to solid angle of sampling `wi`.
    pub pdf: Float,

    /// Visibility tester for the light path; `None` when there's nothing to
    /// test.
    pub visibility: Option<VisibilityTester>,

    /// Radiance arriving from the light, assuming no occlusion.
    pub value: Spectrum,
}

impl Li {
    /// Create a new incident radiance sample.
    ///
    /// * `wi`         - Incident direction.
    /// * `pdf`        - PDF with respect to solid angle.
    /// * `visibility` - Visibility tester.
    /// * `value`      - Radiance arriving from the light.
    pub fn new(wi: Vector3f, pdf: Float, visibility: Option<VisibilityTester>, value: Spectrum) -> Self {
        Self {
            wi,
            pdf,
            visibility,
            value,
        }
    }

    /// Returns a sample that contributes nothing.
    pub fn zero() -> Self {
        Self::new(Vector3f::ZERO, 0.0, None, Spectrum::ZERO)
    }
}

/// Light interface.
pub trait Light {
    /// Called once the scene is assembled, before rendering.
    ///
    /// * `scene` - The scene.
    fn preprocess(&self, _scene: &Scene) {}

    /// Returns the type of light.
    fn get_type(&self) -> LightType;

    /// Returns the radiance arriving at a point from the light along with the
    /// sampled incident direction, its PDF and a visibility tester.
    ///
    /// * `hit` - The interaction point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li;

    /// Returns the total emitted power.
    fn power(&self) -> Spectrum;

    /// Returns the radiance contribution of the light to a ray that escapes
    /// the scene.
    ///
    /// * `ray` - The ray.
    fn le(&self, _ray: &Ray) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the PDF with respect to solid angle for the light sampling
    /// the direction `wi` from a point.
    ///
    /// * `hit` - The interaction point.
    /// * `wi`  - The incident direction.
    fn pdf_li(&self, hit: &Hit, wi: &Vector3f) -> Float;

    /// Returns true if the light is described by a delta distribution.
    fn is_delta_light(&self) -> bool {
        self.get_type().is_delta_light()
    }

    /// Returns the number of samples to take when estimating direct lighting
    /// from this light.
    fn get_num_samples(&self) -> usize {
        1
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light + Send + Sync>;

/// Area lights are lights attached to a shape that emits from its surface.
pub trait AreaLight: Light {
    /// Returns the emitted radiance from a point on the light's surface.
    ///
    /// * `hit` - Point on the surface.
    /// * `w`   - Outgoing direction.
    fn l(&self, hit: &Hit, w: &Vector3f) -> Spectrum;
}

/// Atomic reference counted `AreaLight`.
pub type ArcAreaLight = Arc<dyn AreaLight + Send + Sync>;

/// Returns true if an area light and a light refer to the same allocation.
///
/// * `area_light` - The area light.
/// * `light`      - The light.
pub fn is_same_light(area_light: &ArcAreaLight, light: &ArcLight) -> bool {
    Arc::as_ptr(area_light) as *const () == Arc::as_ptr(light) as *const ()
}
