//! Specular Reflection

use super::*;

/// BRDF for physically plausible specular reflection using Fresnel interface.
#[derive(Copy, Clone, Debug)]
pub struct SpecularReflection {
    /// Fresnel interface.
    fresnel: Fresnel,

    /// Spectrum used to scale the reflected colour.
    r: Spectrum,
}

impl SpecularReflection {
    /// Returns a new `BxDF::SpecularReflection`.
    ///
    /// * `r`       - Spectrum used to scale the reflected colour.
    /// * `fresnel` - Fresnel interface.
    pub fn new(r: Spectrum, fresnel: Fresnel) -> BxDF {
        BxDF::SpecularReflection(Self { fresnel, r })
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR
    }

    /// Delta distributions are never hit by an arbitrary pair of directions.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the perfect mirror direction.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
        let cos = abs_cos_theta(&wi);
        if cos == 0.0 {
            return BxDFSample::from(self.get_type());
        }
        let f = self.fresnel.evaluate(cos_theta(&wi)) * self.r / cos;
        BxDFSample::new(f, 1.0, wi, self.get_type())
    }

    /// Always 0 for a delta distribution.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}
