//! Mirror Material

use base::interaction::*;
use base::material::*;
use base::reflection::*;
use base::spectrum::*;

/// Perfect specular reflector.
#[derive(Clone, Debug)]
pub struct MirrorMaterial {
    /// Reflectivity of the surface.
    kr: Spectrum,
}

impl MirrorMaterial {
    /// Create a new `MirrorMaterial`.
    ///
    /// * `kr` - Reflectivity of the surface. Clamped to `[0, 1]`.
    pub fn new(kr: Spectrum) -> Self {
        Self { kr: kr.clamp(0.0, 1.0) }
    }
}

impl Material for MirrorMaterial {
    fn compute_scattering_functions(
        &self,
        si: &SurfaceInteraction,
        _mode: TransportMode,
        _allow_multiple_lobes: bool,
    ) -> BSDF {
        let mut bsdf = BSDF::new(si, None);
        if !self.kr.is_black() {
            bsdf.add(SpecularReflection::new(self.kr, Fresnel::NoOp));
        }
        bsdf
    }
}
