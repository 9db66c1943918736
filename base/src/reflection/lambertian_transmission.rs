//! Lambertian Transmission

use super::*;

/// BTDF for the Lambertian model for perfect transmissive surfaces that
/// scatters incident illumination equally through a surface in all
/// directions.
#[derive(Copy, Clone, Debug)]
pub struct LambertianTransmission {
    /// Transmission spectrum which gives the fraction of incident light that
    /// is scattered through the surface.
    t: Spectrum,
}

impl LambertianTransmission {
    /// Returns a new `BxDF::LambertianTransmission`.
    ///
    /// * `t` - Transmission spectrum.
    pub fn new(t: Spectrum) -> BxDF {
        BxDF::LambertianTransmission(Self { t })
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_DIFFUSE
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        self.t * INV_PI
    }

    /// Cosine-samples the hemisphere opposite `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let mut wi = cosine_sample_hemisphere(u);
        if wo.z > 0.0 {
            wi.z *= -1.0;
        }
        BxDFSample::new(self.f(wo, &wi), self.pdf(wo, &wi), wi, self.get_type())
    }

    /// Evaluates the PDF of `sample_f`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !same_hemisphere(wo, wi) {
            abs_cos_theta(wi) * INV_PI
        } else {
            0.0
        }
    }
}
