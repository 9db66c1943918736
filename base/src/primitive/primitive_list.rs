//! Primitive List

use super::*;

/// Aggregate that tests every primitive in turn.
#[derive(Clone, Default)]
pub struct PrimitiveList {
    /// The primitives.
    pub primitives: Vec<ArcPrimitive>,

    /// Union of the primitive bounds.
    bounds: Bounds3f,
}

impl PrimitiveList {
    /// Create a new aggregate.
    ///
    /// * `primitives` - The primitives.
    pub fn new(primitives: Vec<ArcPrimitive>) -> Self {
        let bounds = primitives
            .iter()
            .fold(Bounds3f::EMPTY, |b, p| b.union(&p.world_bound()));
        Self { primitives, bounds }
    }
}

impl Primitive for PrimitiveList {
    fn world_bound(&self) -> Bounds3f {
        self.bounds
    }

    fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction<'_>> {
        // Each hit shortens `t_max`, so the last hit is the closest.
        let mut closest = None;
        for primitive in self.primitives.iter() {
            if let Some(si) = primitive.intersect(r) {
                closest = Some(si);
            }
        }
        closest
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.primitives.iter().any(|p| p.intersect_p(r))
    }

    fn get_area_light(&self) -> Option<&ArcAreaLight> {
        None
    }

    fn get_material(&self) -> Option<&ArcMaterial> {
        None
    }

    fn compute_bsdf(&self, _si: &SurfaceInteraction, _mode: TransportMode, _allow_multiple_lobes: bool) -> Option<BSDF> {
        None
    }
}
