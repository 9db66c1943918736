//! Translucent Material

use base::interaction::*;
use base::material::*;
use base::reflection::*;
use base::spectrum::*;

/// Thin diffuse material that both reflects and transmits light, such as
/// paper or leaves.
#[derive(Clone, Debug)]
pub struct TranslucentMaterial {
    /// Diffuse reflection.
    reflect: Spectrum,

    /// Diffuse transmission.
    transmit: Spectrum,
}

impl TranslucentMaterial {
    /// Create a new `TranslucentMaterial`. When the two coefficients sum to
    /// more than one they are scaled down to conserve energy.
    ///
    /// * `reflect`  - Diffuse reflection.
    /// * `transmit` - Diffuse transmission.
    pub fn new(reflect: Spectrum, transmit: Spectrum) -> Self {
        let reflect = reflect.clamp(0.0, 1.0);
        let transmit = transmit.clamp(0.0, 1.0);
        let total = (reflect + transmit).max_component_value();
        if total > 1.0 {
            debug!("Scaling translucent coefficients by 1/{total}");
            Self {
                reflect: reflect / total,
                transmit: transmit / total,
            }
        } else {
            Self { reflect, transmit }
        }
    }
}

impl Material for TranslucentMaterial {
    fn compute_scattering_functions(
        &self,
        si: &SurfaceInteraction,
        _mode: TransportMode,
        _allow_multiple_lobes: bool,
    ) -> BSDF {
        let mut bsdf = BSDF::new(si, None);
        if !self.reflect.is_black() {
            bsdf.add(LambertianReflection::new(self.reflect));
        }
        if !self.transmit.is_black() {
            bsdf.add(LambertianTransmission::new(self.transmit));
        }
        bsdf
    }
}
