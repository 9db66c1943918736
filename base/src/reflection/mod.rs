//! Reflection and surface scattering models

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::spectrum::*;

mod bsdf;
mod bxdf_sample;
mod bxdf_type;
mod common;
mod fresnel;
mod lambertian_reflection;
mod lambertian_transmission;
mod specular_reflection;
mod specular_transmission;

// Re-export
pub use bsdf::*;
pub use bxdf_sample::*;
pub use bxdf_type::*;
pub use common::*;
pub use fresnel::*;
pub use lambertian_reflection::*;
pub use lambertian_transmission::*;
pub use specular_reflection::*;
pub use specular_transmission::*;

/// BxDF for BRDFs and BTDFs. Directions are expressed in the local shading
/// frame.
#[derive(Copy, Clone, Debug)]
pub enum BxDF {
    LambertianReflection(LambertianReflection),
    LambertianTransmission(LambertianTransmission),
    SpecularReflection(SpecularReflection),
    SpecularTransmission(SpecularTransmission),
}

impl BxDF {
    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.get_type(),
            BxDF::LambertianTransmission(bxdf) => bxdf.get_type(),
            BxDF::SpecularReflection(bxdf) => bxdf.get_type(),
            BxDF::SpecularTransmission(bxdf) => bxdf.get_type(),
        }
    }

    /// Returns true if every flag of this BxDF is in `t`.
    ///
    /// * `t` - The reflection model to compare.
    pub fn matches_flags(&self, t: BxDFType) -> bool {
        t.contains(self.get_type())
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::LambertianTransmission(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularTransmission(bxdf) => bxdf.f(wo, wi),
        }
    }

    /// Samples an incident direction for the outgoing direction.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::LambertianTransmission(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularTransmission(bxdf) => bxdf.sample_f(wo, u),
        }
    }

    /// Evaluates the PDF of `sample_f`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::LambertianTransmission(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularTransmission(bxdf) => bxdf.pdf(wo, wi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::TransportMode;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn lambertian_transmission_samples_other_side() {
        let bxdf = LambertianTransmission::new(Spectrum::ONE);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let s = bxdf.sample_f(&wo, &Point2f::new(0.3, 0.6));
        assert!(s.wi.z < 0.0);
        assert!(s.pdf > 0.0);
        assert_eq!(bxdf.pdf(&wo, &wo), 0.0);
    }

    #[test]
    fn mirror_reflects_with_unit_pdf() {
        let bxdf = SpecularReflection::new(Spectrum::ONE, Fresnel::NoOp);
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let s = bxdf.sample_f(&wo, &Point2f::new(0.5, 0.5));
        assert_eq!(s.pdf, 1.0);
        assert_eq!(s.wi, Vector3f::new(-0.6, 0.0, 0.8));
        assert!(approx_eq!(f32, s.f[0] * abs_cos_theta(&s.wi), 1.0, epsilon = 1e-5));
        assert!(s.bxdf_type.is_specular());
    }

    #[test]
    fn specular_transmission_total_internal_reflection_has_zero_pdf() {
        let bxdf = SpecularTransmission::new(Spectrum::ONE, 1.0, 1.5, TransportMode::Radiance);
        // Leaving glass at a grazing angle.
        let wo = Vector3f::new(0.95, 0.0, -0.3122499).normalize();
        let s = bxdf.sample_f(&wo, &Point2f::new(0.5, 0.5));
        assert_eq!(s.pdf, 0.0);
    }

    proptest! {
        #[test]
        fn lambertian_sample_matches_pdf(x in 0.01..0.99f32, y in 0.01..0.99f32) {
            let bxdf = LambertianReflection::new(Spectrum::new(0.5));
            let wo = Vector3f::new(0.0, 0.6, 0.8);
            let s = bxdf.sample_f(&wo, &Point2f::new(x, y));
            prop_assert!(approx_eq!(f32, s.pdf, bxdf.pdf(&wo, &s.wi), epsilon = 1e-6));
            prop_assert!(same_hemisphere(&wo, &s.wi) || s.pdf == 0.0);
        }
    }
}
