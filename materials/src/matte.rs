//! Matte Material

use base::interaction::*;
use base::material::*;
use base::reflection::*;
use base::spectrum::*;

/// Describes a purely diffuse surface.
#[derive(Clone, Debug)]
pub struct MatteMaterial {
    /// Spectral diffuse reflection.
    kd: Spectrum,
}

impl MatteMaterial {
    /// Create a new `MatteMaterial`.
    ///
    /// * `kd` - Spectral diffuse reflection. Clamped to `[0, 1]`.
    pub fn new(kd: Spectrum) -> Self {
        Self { kd: kd.clamp(0.0, 1.0) }
    }
}

impl Material for MatteMaterial {
    /// Initializes representations of the light-scattering properties of the
    /// material at the intersection point on the surface.
    ///
    /// * `si`                    - The surface interaction at the intersection.
    /// * `_mode`                 - Transport mode (ignored).
    /// * `_allow_multiple_lobes` - Indicates whether the material should use
    ///                             BxDFs that aggregate multiple types of
    ///                             scattering into a single BxDF when such BxDFs
    ///                             are available (ignored).
    fn compute_scattering_functions(
        &self,
        si: &SurfaceInteraction,
        _mode: TransportMode,
        _allow_multiple_lobes: bool,
    ) -> BSDF {
        let mut bsdf = BSDF::new(si, None);
        if !self.kd.is_black() {
            bsdf.add(LambertianReflection::new(self.kd));
        }
        bsdf
    }
}
