//! Interactions

use crate::geometry::*;
use crate::pbrt::*;

mod medium_interaction;
mod surface_interaction;

// Re-export
pub use medium_interaction::*;
pub use surface_interaction::*;

/// Interaction at a point on a surface or inside a participating medium.
pub enum Interaction<'scene> {
    /// Represents a surface interaction.
    Surface { si: SurfaceInteraction<'scene> },

    /// Represents a medium interaction.
    Medium { mi: MediumInteraction },
}

impl<'scene> Interaction<'scene> {
    /// Returns the common interaction data.
    pub fn get_hit(&self) -> &Hit {
        match self {
            Self::Surface { si } => &si.hit,
            Self::Medium { mi } => &mi.hit,
        }
    }
}

impl<'scene> From<SurfaceInteraction<'scene>> for Interaction<'scene> {
    fn from(si: SurfaceInteraction<'scene>) -> Self {
        Self::Surface { si }
    }
}

impl From<MediumInteraction> for Interaction<'_> {
    fn from(mi: MediumInteraction) -> Self {
        Self::Medium { mi }
    }
}

/// Common interaction data.
#[derive(Copy, Clone, Debug, Default)]
pub struct Hit {
    /// Point of interaction.
    pub p: Point3f,

    /// Time when interaction occurred.
    pub time: Float,

    /// Floating point error for ray intersection points.
    pub p_error: Vector3f,

    /// The negative ray direction (outgoing direction used when computing
    /// lighting at points).
    pub wo: Vector3f,

    /// Surface normal at the point `p`. Zero for medium interactions.
    pub n: Normal3f,
}

impl Hit {
    /// Create a new hit.
    ///
    /// * `p`       - Point of interaction.
    /// * `time`    - Time when interaction occurred.
    /// * `p_error` - Floating point error for ray intersection points.
    /// * `wo`      - The negative ray direction; normalized here.
    /// * `n`       - Surface normal at the point `p`.
    pub fn new(p: Point3f, time: Float, p_error: Vector3f, wo: Vector3f, n: Normal3f) -> Self {
        let wo = if wo.length_squared() > 0.0 { wo.normalize() } else { wo };
        Self {
            p,
            time,
            p_error,
            wo,
            n,
        }
    }

    /// Create a new hit with only a position and time.
    ///
    /// * `p`    - Point of interaction.
    /// * `time` - Time when interaction occurred.
    pub fn new_minimal(p: Point3f, time: Float) -> Self {
        Self {
            p,
            time,
            ..Default::default()
        }
    }

    /// Returns true if this is a surface interaction.
    pub fn is_surface_interaction(&self) -> bool {
        !self.n.is_zero()
    }

    /// Returns true if this is a medium interaction.
    pub fn is_medium_interaction(&self) -> bool {
        !self.is_surface_interaction()
    }

    /// Spawn a ray leaving the interaction in a given direction.
    ///
    /// * `d` - The new direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        let origin = Ray::offset_origin(&self.p, &self.p_error, &self.n, d);
        Ray::new(origin, *d, INFINITY, self.time)
    }

    /// Spawn a ray toward a point; it stops just short of the point.
    ///
    /// * `p` - The target point.
    pub fn spawn_ray_to_point(&self, p: &Point3f) -> Ray {
        let d = *p - self.p;
        let origin = Ray::offset_origin(&self.p, &self.p_error, &self.n, &d);
        Ray::new(origin, d, 1.0 - SHADOW_EPSILON, self.time)
    }

    /// Spawn a ray toward another interaction with both end points offset
    /// off their surfaces.
    ///
    /// * `hit` - The target interaction.
    pub fn spawn_ray_to_hit(&self, hit: &Hit) -> Ray {
        let origin = Ray::offset_origin(&self.p, &self.p_error, &self.n, &(hit.p - self.p));
        let target = Ray::offset_origin(&hit.p, &hit.p_error, &hit.n, &(origin - hit.p));
        let d = target - origin;
        Ray::new(origin, d, 1.0 - SHADOW_EPSILON, self.time)
    }
}
