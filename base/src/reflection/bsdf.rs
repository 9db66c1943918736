//! BSDF

use super::*;
use crate::interaction::SurfaceInteraction;
use crate::rng::ONE_MINUS_EPSILON;

/// Maximum number of BxDFs that can be stored in `BSDF`.
pub const MAX_BXDFS: usize = 8;

/// A collection of BRDFs and BTDFs at a surface point, expressed in world
/// space.
#[derive(Clone, Debug)]
pub struct BSDF {
    /// The shading normal. First axis of the shading frame and the normal
    /// used for cosine terms.
    pub ns: Normal3f,

    /// The geometric normal defined by surface geometry.
    pub ng: Normal3f,

    /// Second axis for the orthonormal coordinate system.
    pub ss: Vector3f,

    /// Third axis for the orthonormal coordinate system.
    pub ts: Vector3f,

    /// The `BxDFs`.
    pub bxdfs: Vec<BxDF>,

    /// Relative index of refraction over the surface boundary.
    pub eta: Float,
}

impl BSDF {
    /// Creates a new `BSDF` with the shading frame of a surface interaction.
    ///
    /// * `si`  - The surface interaction.
    /// * `eta` - Optional relative index of refraction; defaults to 1.0 for
    ///           opaque surfaces.
    pub fn new(si: &SurfaceInteraction, eta: Option<Float>) -> Self {
        Self::from_frame(si.shading.n, si.hit.n, &si.shading.dpdu, eta.unwrap_or(1.0))
    }

    /// Creates a new `BSDF` from a shading normal and tangent.
    ///
    /// * `ns`   - Shading normal.
    /// * `ng`   - Geometric normal.
    /// * `dpdu` - Shading tangent; any vector not parallel to `ns` is
    ///            accepted and orthogonalized.
    /// * `eta`  - Relative index of refraction.
    pub fn from_frame(ns: Normal3f, ng: Normal3f, dpdu: &Vector3f, eta: Float) -> Self {
        let n = Vector3f::from(ns);
        let tangent = *dpdu - n * n.dot(dpdu);
        let (ss, ts) = if tangent.length_squared() > 0.0 {
            let ss = tangent.normalize();
            (ss, n.cross(&ss))
        } else {
            coordinate_system(&n)
        };

        Self {
            ns,
            ng,
            ss,
            ts,
            bxdfs: Vec::with_capacity(MAX_BXDFS),
            eta,
        }
    }

    /// Add a `BxDF`. BxDFs past `MAX_BXDFS` are dropped with a warning.
    ///
    /// * `bxdf` - The `BxDF`.
    pub fn add(&mut self, bxdf: BxDF) {
        if self.bxdfs.len() < MAX_BXDFS {
            self.bxdfs.push(bxdf);
        } else {
            warn!("BSDF already holds {} BxDFs; ignoring {:?}", MAX_BXDFS, bxdf.get_type());
        }
    }

    /// Returns the number of `BxDF`s that match the given type.
    ///
    /// * `bxdf_type` - The `BxdFType` to match.
    pub fn num_components(&self, bxdf_type: BxDFType) -> usize {
        self.bxdfs.iter().filter(|b| b.matches_flags(bxdf_type)).count()
    }

    /// Transforms a vector from world space to local space.
    ///
    /// * `v` - The vector to transform.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.ss), v.dot(&self.ts), v.dot(&self.ns))
    }

    /// Transforms a vector from local space to world space.
    ///
    /// * `v` - The vector to transform.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(
            self.ss.x * v.x + self.ts.x * v.y + self.ns.x * v.z,
            self.ss.y * v.x + self.ts.y * v.y + self.ns.y * v.z,
            self.ss.z * v.x + self.ts.z * v.y + self.ns.z * v.z,
        )
    }

    /// Sums the matching BxDFs whose side (reflection or transmission) agrees
    /// with the geometric relationship of the two world-space directions.
    fn eval_matching(&self, wo_w: &Vector3f, wi_w: &Vector3f, wo: &Vector3f, wi: &Vector3f, bxdf_type: BxDFType) -> Spectrum {
        let reflect = wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0;
        let side = if reflect {
            BxDFType::BSDF_REFLECTION
        } else {
            BxDFType::BSDF_TRANSMISSION
        };

        self.bxdfs
            .iter()
            .filter(|b| b.matches_flags(bxdf_type) && b.get_type().intersects(side))
            .fold(Spectrum::ZERO, |acc, b| acc + b.f(wo, wi))
    }

    /// Returns the BSDF evaluated for a pair of directions.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxdFType` to evaluate.
    pub fn f(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Spectrum {
        let wi = self.world_to_local(wi_w);
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return Spectrum::ZERO;
        }
        self.eval_matching(wo_w, wi_w, &wo, &wi, bxdf_type)
    }

    /// Samples an incident direction by choosing one matching BxDF uniformly.
    /// Returns `None` when nothing matches or the sampled density is zero.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `u`         - The 2D uniform random values.
    /// * `bxdf_type` - The `BxdFType` to sample.
    pub fn sample_f(&self, wo_w: &Vector3f, u: &Point2f, bxdf_type: BxDFType) -> Option<BxDFSample> {
        // Choose which `BxDF` to sample.
        let matching_comps = self.num_components(bxdf_type);
        if matching_comps == 0 {
            return None;
        }
        let comp = min(
            (u[0] * matching_comps as Float).floor() as usize,
            matching_comps - 1,
        );
        let bxdf = self.bxdfs.iter().filter(|b| b.matches_flags(bxdf_type)).nth(comp)?;

        // Remap BxDF sample `u` to `[0,1)^2`.
        let u_remapped = Point2f::new(
            min(u[0] * matching_comps as Float - comp as Float, ONE_MINUS_EPSILON),
            u[1],
        );

        // Sample chosen `BxDF`.
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return None;
        }
        let sample = bxdf.sample_f(&wo, &u_remapped);
        if sample.pdf == 0.0 {
            return None;
        }
        let wi_w = self.local_to_world(&sample.wi);
        let sampled_type = bxdf.get_type();

        // Compute overall PDF with all matching BxDFs.
        let mut pdf = sample.pdf;
        if !sampled_type.is_specular() && matching_comps > 1 {
            pdf += self
                .bxdfs
                .iter()
                .filter(|b| b.matches_flags(bxdf_type))
                .enumerate()
                .filter(|(i, _)| *i != comp)
                .map(|(_, b)| b.pdf(&wo, &sample.wi))
                .sum::<Float>();
        }
        if matching_comps > 1 {
            pdf /= matching_comps as Float;
        }

        // Compute value of BSDF for sampled direction.
        let f = if sampled_type.is_specular() {
            sample.f
        } else {
            self.eval_matching(wo_w, &wi_w, &wo, &sample.wi, bxdf_type)
        };

        Some(BxDFSample::new(f, pdf, wi_w, sampled_type))
    }

    /// Evaluates the combined PDF of `sample_f`.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxdFType` to evaluate.
    pub fn pdf(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Float {
        if self.bxdfs.is_empty() {
            return 0.0;
        }

        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);
        if wo.z == 0.0 {
            return 0.0;
        }

        let (matching_comps, pdf) = self
            .bxdfs
            .iter()
            .filter(|b| b.matches_flags(bxdf_type))
            .fold((0, 0.0), |(n, pdf), b| (n + 1, pdf + b.pdf(&wo, &wi)));

        if matching_comps > 0 {
            pdf / matching_comps as Float
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn frame() -> BSDF {
        BSDF::from_frame(
            Normal3f::new(0.0, 0.0, 1.0),
            Normal3f::new(0.0, 0.0, 1.0),
            &Vector3f::new(1.0, 0.0, 0.0),
            1.0,
        )
    }

    #[test]
    fn frame_round_trips_directions() {
        let bsdf = BSDF::from_frame(
            Normal3f::new(0.0, 1.0, 0.0),
            Normal3f::new(0.0, 1.0, 0.0),
            &Vector3f::new(1.0, 0.3, 0.0),
            1.0,
        );
        let v = Vector3f::new(0.2, 0.5, -0.7);
        let back = bsdf.local_to_world(&bsdf.world_to_local(&v));
        assert!(approx_eq!(f32, back.x, v.x, epsilon = 1e-5));
        assert!(approx_eq!(f32, back.y, v.y, epsilon = 1e-5));
        assert!(approx_eq!(f32, back.z, v.z, epsilon = 1e-5));
    }

    #[test]
    fn diffuse_f_ignores_transmission_side() {
        let mut bsdf = frame();
        bsdf.add(LambertianReflection::new(Spectrum::ONE));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let above = bsdf.f(&wo, &Vector3f::new(0.0, 0.6, 0.8), BxDFType::BSDF_ALL);
        let below = bsdf.f(&wo, &Vector3f::new(0.0, 0.6, -0.8), BxDFType::BSDF_ALL);
        assert!(approx_eq!(f32, above[0], INV_PI, epsilon = 1e-6));
        assert!(below.is_black());
    }

    #[test]
    fn specular_excluded_by_flags() {
        let mut bsdf = frame();
        bsdf.add(SpecularReflection::new(Spectrum::ONE, Fresnel::NoOp));
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        assert!(bsdf.sample_f(&wo, &Point2f::new(0.5, 0.5), BxDFType::sampling_flags(false)).is_none());
        let s = bsdf.sample_f(&wo, &Point2f::new(0.5, 0.5), BxDFType::BSDF_ALL).unwrap();
        assert!(s.bxdf_type.is_specular());
        assert_eq!(s.pdf, 1.0);
    }

    #[test]
    fn component_choice_near_one_picks_last_lobe() {
        let mut bsdf = frame();
        bsdf.add(LambertianReflection::new(Spectrum::new(0.4)));
        bsdf.add(LambertianTransmission::new(Spectrum::new(0.3)));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let s = bsdf.sample_f(&wo, &Point2f::new(ONE_MINUS_EPSILON, 0.5), BxDFType::BSDF_ALL).unwrap();
        assert!(s.bxdf_type.contains(BxDFType::BSDF_TRANSMISSION));
        assert!(s.wi.z < 0.0);
        assert!(s.pdf > 0.0 && s.pdf.is_finite());
    }

    #[test]
    fn empty_bsdf_samples_nothing() {
        let bsdf = frame();
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        assert!(bsdf.sample_f(&wo, &Point2f::new(0.2, 0.2), BxDFType::BSDF_ALL).is_none());
        assert_eq!(bsdf.pdf(&wo, &wo, BxDFType::BSDF_ALL), 0.0);
    }

    proptest! {
        #[test]
        fn sampled_pdf_matches_pdf_with_two_lobes(x in 0.0..1.0f32, y in 0.01..0.99f32) {
            let mut bsdf = frame();
            bsdf.add(LambertianReflection::new(Spectrum::new(0.4)));
            bsdf.add(LambertianTransmission::new(Spectrum::new(0.3)));
            let wo = Vector3f::new(0.0, 0.6, 0.8);
            if let Some(s) = bsdf.sample_f(&wo, &Point2f::new(x, y), BxDFType::BSDF_ALL) {
                let pdf = bsdf.pdf(&wo, &s.wi, BxDFType::BSDF_ALL);
                prop_assert!(approx_eq!(f32, s.pdf, pdf, epsilon = 1e-5));
                let f = bsdf.f(&wo, &s.wi, BxDFType::BSDF_ALL);
                prop_assert!(approx_eq!(f32, s.f[0], f[0], epsilon = 1e-5));
            }
        }
    }
}
