//! Point Light Source

use base::geometry::*;
use base::interaction::*;
use base::light::*;
use base::pbrt::*;
use base::spectrum::*;

/// Implements an isotropic point light source that emits the same amount of
/// light in all directions.
#[derive(Clone, Debug)]
pub struct PointLight {
    /// Position.
    pub p_light: Point3f,

    /// Intensity.
    pub intensity: Spectrum,
}

impl PointLight {
    /// Returns a new `PointLight`.
    ///
    /// * `p_light`   - Position.
    /// * `intensity` - Intensity.
    pub fn new(p_light: Point3f, intensity: Spectrum) -> Self {
        Self { p_light, intensity }
    }
}

impl Light for PointLight {
    fn get_type(&self) -> LightType {
        LightType::DELTA_POSITION
    }

    /// Return the radiance arriving at an interaction point.
    ///
    /// * `hit` - The interaction hit point.
    /// * `_u`  - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, _u: &Point2f) -> Li {
        let wi = (self.p_light - hit.p).normalize();
        let vis = VisibilityTester::new(*hit, Hit::new_minimal(self.p_light, hit.time));
        let value = self.intensity / self.p_light.distance_squared(&hit.p);
        Li::new(wi, 1.0, Some(vis), value)
    }

    fn power(&self) -> Spectrum {
        FOUR_PI * self.intensity
    }

    /// A delta distribution can't be hit by sampled directions.
    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        0.0
    }
}
