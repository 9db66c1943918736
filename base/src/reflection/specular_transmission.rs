//! Specular Transmission

use super::*;
use crate::material::TransportMode;

/// BTDF for specular transmission through a dielectric interface.
#[derive(Copy, Clone, Debug)]
pub struct SpecularTransmission {
    /// Transmission scale factor.
    t: Spectrum,

    /// Index of refraction above the surface (same side as surface normal).
    eta_a: Float,

    /// Index of refraction below the surface (opposite side of normal).
    eta_b: Float,

    /// Dielectric Fresnel interface.
    fresnel: FresnelDielectric,

    /// Light transport mode.
    mode: TransportMode,
}

impl SpecularTransmission {
    /// Returns a new `BxDF::SpecularTransmission`.
    ///
    /// * `t`     - Transmission scale factor.
    /// * `eta_a` - Index of refraction above the surface.
    /// * `eta_b` - Index of refraction below the surface.
    /// * `mode`  - Light transport mode.
    pub fn new(t: Spectrum, eta_a: Float, eta_b: Float, mode: TransportMode) -> BxDF {
        BxDF::SpecularTransmission(Self {
            t,
            eta_a,
            eta_b,
            fresnel: FresnelDielectric { eta_i: eta_a, eta_t: eta_b },
            mode,
        })
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_SPECULAR
    }

    /// Delta distributions are never hit by an arbitrary pair of directions.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the refracted direction, or a zero PDF sample on total
    /// internal reflection.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        let entering = cos_theta(wo) > 0.0;
        let (eta_i, eta_t) = if entering {
            (self.eta_a, self.eta_b)
        } else {
            (self.eta_b, self.eta_a)
        };

        let n = Normal3f::new(0.0, 0.0, 1.0).face_forward(wo);
        let wi = match refract(wo, &n, eta_i / eta_t) {
            Some(wi) => wi,
            None => return BxDFSample::from(self.get_type()),
        };

        let cos = abs_cos_theta(&wi);
        if cos == 0.0 {
            return BxDFSample::from(self.get_type());
        }

        let mut ft = self.t * (Spectrum::ONE - self.fresnel.evaluate(cos_theta(&wi)));

        // Account for non-symmetry with transmission to different medium.
        if self.mode == TransportMode::Radiance {
            ft *= (eta_i * eta_i) / (eta_t * eta_t);
        }

        BxDFSample::new(ft / cos, 1.0, wi, self.get_type())
    }

    /// Always 0 for a delta distribution.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}
