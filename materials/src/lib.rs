//! Materials

#[macro_use]
extern crate log;

mod glass;
mod matte;
mod mirror;
mod translucent;

// Re-export
pub use glass::*;
pub use matte::*;
pub use mirror::*;
pub use translucent::*;

#[cfg(test)]
pub(crate) mod test_support {
    use base::geometry::*;
    use base::interaction::*;

    /// Surface interaction at the origin facing +z, viewed from `wo`.
    pub fn surface_facing_z(wo: Vector3f) -> SurfaceInteraction<'static> {
        SurfaceInteraction::new(
            Point3f::ZERO,
            Vector3f::ZERO,
            Point2f::ZERO,
            wo,
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            0.0,
            false,
        )
    }
}
