//! Glass Material

use base::interaction::*;
use base::material::*;
use base::pbrt::*;
use base::reflection::*;
use base::spectrum::*;

/// Implements perfect specular reflection and transmission, weighted by
/// Fresnel terms for accurate angular-dependent variation.
#[derive(Clone, Debug)]
pub struct GlassMaterial {
    /// Reflectivity of the surface.
    kr: Spectrum,

    /// Transmissibity of the surface.
    kt: Spectrum,

    /// The index of refraction of the inside of the object. Implicitly assumes
    /// that the exterior of objects is a vacuum, with IOR of 1.
    eta: Float,
}

impl GlassMaterial {
    /// Create a new `GlassMaterial`.
    ///
    /// * `kr`  - Reflectivity of the surface.
    /// * `kt`  - Transmissibity of the surface.
    /// * `eta` - Index of refraction of the inside of the object.
    pub fn new(kr: Spectrum, kt: Spectrum, eta: Float) -> Self {
        if eta <= 0.0 {
            warn!("Glass index of refraction {eta} is not positive; using 1.5");
        }
        Self {
            kr: kr.clamp(0.0, 1.0),
            kt: kt.clamp(0.0, 1.0),
            eta: if eta > 0.0 { eta } else { 1.5 },
        }
    }
}

impl Material for GlassMaterial {
    /// Initializes representations of the light-scattering properties of the
    /// material at the intersection point on the surface.
    ///
    /// * `si`                    - The surface interaction at the intersection.
    /// * `mode`                  - Transport mode.
    /// * `_allow_multiple_lobes` - Ignored; reflection and transmission are
    ///                             always separate lobes.
    fn compute_scattering_functions(
        &self,
        si: &SurfaceInteraction,
        mode: TransportMode,
        _allow_multiple_lobes: bool,
    ) -> BSDF {
        let mut bsdf = BSDF::new(si, Some(self.eta));
        if !self.kr.is_black() {
            bsdf.add(SpecularReflection::new(self.kr, FresnelDielectric::new(1.0, self.eta)));
        }
        if !self.kt.is_black() {
            bsdf.add(SpecularTransmission::new(self.kt, 1.0, self.eta, mode));
        }
        bsdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use base::geometry::*;

    #[test]
    fn has_specular_reflection_and_transmission() {
        let si = surface_facing_z(Vector3f::new(0.0, 0.6, 0.8));
        let bsdf = GlassMaterial::new(Spectrum::ONE, Spectrum::ONE, 1.5).compute_scattering_functions(&si, TransportMode::Radiance, true);
        assert_eq!(bsdf.eta, 1.5);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR), 1);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_SPECULAR), 1);

        let flags = BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_SPECULAR;
        let sample = bsdf.sample_f(&si.hit.wo, &Point2f::new(0.5, 0.5), flags).unwrap();
        assert!(sample.wi.z < 0.0);
        assert!(sample.pdf > 0.0);
    }

    #[test]
    fn non_specular_flags_see_nothing() {
        let si = surface_facing_z(Vector3f::new(0.0, 0.0, 1.0));
        let bsdf = GlassMaterial::new(Spectrum::ONE, Spectrum::ONE, 1.5).compute_scattering_functions(&si, TransportMode::Radiance, true);
        let flags = BxDFType::sampling_flags(false);
        assert!(bsdf.sample_f(&si.hit.wo, &Point2f::new(0.5, 0.5), flags).is_none());
    }
}
