//! Surface Interactions

use super::Hit;
use crate::geometry::*;
use crate::material::*;
use crate::pbrt::*;
use crate::primitive::*;
use crate::reflection::*;
use crate::spectrum::*;
use std::fmt;

/// Interaction at a point on a surface.
#[derive(Clone)]
pub struct SurfaceInteraction<'scene> {
    /// Common interaction data.
    pub hit: Hit,

    /// UV coordinates from surface parametrization.
    pub uv: Point2f,

    /// Parametric partial derivative of the point ∂p/∂u.
    pub dpdu: Vector3f,

    /// Parametric partial derivative of the point ∂p/∂v.
    pub dpdv: Vector3f,

    /// Shading geometry used for perturbed values.
    pub shading: Shading,

    /// The BSDF at the point, filled in by `compute_scattering_functions`.
    pub bsdf: Option<BSDF>,

    /// The primitive that was hit.
    pub primitive: Option<&'scene dyn Primitive>,
}

impl<'scene> SurfaceInteraction<'scene> {
    /// Create a new surface interaction.
    ///
    /// * `p`                   - Point of interaction.
    /// * `p_error`             - Floating point error for ray intersection points.
    /// * `uv`                  - The uv coordinates from surface parametrization.
    /// * `wo`                  - The negative ray direction.
    /// * `dpdu`                - Parametric partial derivative of the point ∂p/∂u.
    /// * `dpdv`                - Parametric partial derivative of the point ∂p/∂v.
    /// * `time`                - Time when interaction occurred.
    /// * `reverse_orientation` - Flip the normal computed from `dpdu x dpdv`.
    pub fn new(
        p: Point3f,
        p_error: Vector3f,
        uv: Point2f,
        wo: Vector3f,
        dpdu: Vector3f,
        dpdv: Vector3f,
        time: Float,
        reverse_orientation: bool,
    ) -> Self {
        let mut n = Normal3f::from(dpdu.cross(&dpdv).normalize());
        if reverse_orientation {
            n *= -1.0;
        }

        Self {
            hit: Hit::new(p, time, p_error, wo, n),
            uv,
            dpdu,
            dpdv,
            shading: Shading::new(n, dpdu, dpdv),
            bsdf: None,
            primitive: None,
        }
    }

    /// Update the shading geometry. The shading normal is flipped to lie in
    /// the same hemisphere as the geometric normal.
    ///
    /// * `dpdu` - Shading ∂p/∂u.
    /// * `dpdv` - Shading ∂p/∂v.
    pub fn set_shading_geometry(&mut self, dpdu: Vector3f, dpdv: Vector3f) {
        self.shading.n = Normal3f::from(dpdu.cross(&dpdv)).normalize().face_forward(&Vector3f::from(self.hit.n));
        self.shading.dpdu = dpdu;
        self.shading.dpdv = dpdv;
    }

    /// Ask the primitive's material for the BSDF at this point and store it
    /// in `bsdf`. Surfaces without a material leave `bsdf` as `None`.
    ///
    /// * `mode`                 - Transport mode.
    /// * `allow_multiple_lobes` - Allow multiple lobes of the same type.
    pub fn compute_scattering_functions(&mut self, mode: TransportMode, allow_multiple_lobes: bool) {
        let bsdf = self
            .primitive
            .and_then(|primitive| primitive.compute_bsdf(self, mode, allow_multiple_lobes));
        self.bsdf = bsdf;
    }

    /// Returns the emitted radiance at a surface point intersected by a ray
    /// when the surface belongs to an area light.
    ///
    /// * `w` - The outgoing direction.
    pub fn le(&self, w: &Vector3f) -> Spectrum {
        match self.primitive.and_then(|p| p.get_area_light()) {
            Some(area_light) => area_light.l(&self.hit, w),
            None => Spectrum::ZERO,
        }
    }

    /// Spawn a ray leaving the surface in a given direction.
    ///
    /// * `d` - The new direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        self.hit.spawn_ray(d)
    }
}

impl fmt::Display for SurfaceInteraction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SurfaceInteraction {{ p: ({}, {}, {}), n: ({}, {}, {}), uv: ({}, {}), bsdf: {} }}",
            self.hit.p.x,
            self.hit.p.y,
            self.hit.p.z,
            self.hit.n.x,
            self.hit.n.y,
            self.hit.n.z,
            self.uv.x,
            self.uv.y,
            self.bsdf.is_some(),
        )
    }
}

/// Shading geometry used for perturbed values.
#[derive(Copy, Clone, Debug, Default)]
pub struct Shading {
    /// Surface normal.
    pub n: Normal3f,

    /// Parametric partial derivative of the point ∂p/∂u.
    pub dpdu: Vector3f,

    /// Parametric partial derivative of the point ∂p/∂v.
    pub dpdv: Vector3f,
}

impl Shading {
    /// Create a new shading frame.
    ///
    /// * `n`    - Surface normal.
    /// * `dpdu` - Parametric partial derivative of the point ∂p/∂u.
    /// * `dpdv` - Parametric partial derivative of the point ∂p/∂v.
    pub fn new(n: Normal3f, dpdu: Vector3f, dpdv: Vector3f) -> Self {
        Self { n, dpdu, dpdv }
    }
}
