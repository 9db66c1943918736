//! Medium Interactions

use super::Hit;
use crate::geometry::*;
use crate::medium::*;
use crate::pbrt::*;

/// Represents an interaction point in a participating medium.
#[derive(Copy, Clone)]
pub struct MediumInteraction {
    /// The common interaction data.
    pub hit: Hit,

    /// The phase function.
    pub phase: PhaseFunction,
}

impl MediumInteraction {
    /// Create a new medium interaction.
    ///
    /// * `p`     - Point of interaction.
    /// * `wo`    - Outgoing direction.
    /// * `time`  - Time when interaction occurred.
    /// * `phase` - The phase function.
    pub fn new(p: Point3f, wo: Vector3f, time: Float, phase: PhaseFunction) -> Self {
        Self {
            hit: Hit::new(p, time, Vector3f::ZERO, wo, Normal3f::ZERO),
            phase,
        }
    }
}
