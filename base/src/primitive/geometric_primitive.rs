//! Geometric Primitives

use super::*;
use crate::shape::*;

/// A single shape with its material and optional area light.
#[derive(Clone)]
pub struct GeometricPrimitive {
    /// The shape.
    pub shape: ArcShape,

    /// The material; `None` marks a surface that only delimits space.
    pub material: Option<ArcMaterial>,

    /// The area light emitting from the shape.
    pub area_light: Option<ArcAreaLight>,
}

impl GeometricPrimitive {
    /// Create a new geometric primitive.
    ///
    /// * `shape`      - The shape.
    /// * `material`   - The material.
    /// * `area_light` - The area light emitting from the shape.
    pub fn new(shape: ArcShape, material: Option<ArcMaterial>, area_light: Option<ArcAreaLight>) -> Self {
        Self {
            shape,
            material,
            area_light,
        }
    }
}

impl Primitive for GeometricPrimitive {
    fn world_bound(&self) -> Bounds3f {
        self.shape.world_bound()
    }

    fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction<'_>> {
        let mut it = self.shape.intersect(r)?;
        r.t_max = it.t;
        it.isect.primitive = Some(self);
        Some(it.isect)
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.shape.intersect_p(r)
    }

    fn get_area_light(&self) -> Option<&ArcAreaLight> {
        self.area_light.as_ref()
    }

    fn get_material(&self) -> Option<&ArcMaterial> {
        self.material.as_ref()
    }

    fn compute_bsdf(&self, si: &SurfaceInteraction, mode: TransportMode, allow_multiple_lobes: bool) -> Option<BSDF> {
        self.material
            .as_ref()
            .map(|material| material.compute_scattering_functions(si, mode, allow_multiple_lobes))
    }
}
