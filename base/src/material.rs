//! Material

use crate::interaction::*;
use crate::reflection::*;
use std::sync::Arc;

/// Light transport mode enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportMode {
    /// Radiance flows from lights toward the camera.
    Radiance,

    /// Importance flows from the camera toward lights.
    Importance,
}

/// Material interface.
pub trait Material {
    /// Returns the BSDF describing scattering at a surface point.
    ///
    /// * `si`                   - The surface interaction at the point.
    /// * `mode`                 - Transport mode.
    /// * `allow_multiple_lobes` - Allow multiple lobes of the same type to be
    ///                            combined in one BxDF where supported.
    fn compute_scattering_functions(
        &self,
        si: &SurfaceInteraction,
        mode: TransportMode,
        allow_multiple_lobes: bool,
    ) -> BSDF;
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<dyn Material + Send + Sync>;
