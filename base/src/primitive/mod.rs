//! Primitives

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::material::*;
use crate::reflection::*;
use std::sync::Arc;

mod geometric_primitive;
mod primitive_list;

// Re-export
pub use geometric_primitive::*;
pub use primitive_list::*;

/// Primitive interface that bridges geometry and shading.
pub trait Primitive {
    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns the closest intersection along the ray and shortens the ray's
    /// `t_max` to it.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction<'_>>;

    /// Returns `true` if the ray intersects the primitive.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool;

    /// Returns the area light emitting from the primitive, if any.
    fn get_area_light(&self) -> Option<&ArcAreaLight>;

    /// Returns the material of the primitive, if any.
    fn get_material(&self) -> Option<&ArcMaterial>;

    /// Returns the BSDF at an intersection point on the primitive, or `None`
    /// when the primitive has no material.
    ///
    /// * `si`                   - The surface interaction.
    /// * `mode`                 - Transport mode.
    /// * `allow_multiple_lobes` - Allow multiple lobes of the same type.
    fn compute_bsdf(&self, si: &SurfaceInteraction, mode: TransportMode, allow_multiple_lobes: bool) -> Option<BSDF>;
}

/// Atomic reference counted `Primitive`.
pub type ArcPrimitive = Arc<dyn Primitive + Send + Sync>;
