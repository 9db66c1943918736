//! 3D Axis Aligned Bounding Boxes.

use super::point3::*;
use super::vector3::*;
use crate::pbrt::*;

/// 3D Axis Aligned Bounding Box with `Float` bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// Minimum bounds.
    pub p_min: Point3f,

    /// Maximum bounds.
    pub p_max: Point3f,
}

impl Default for Bounds3f {
    /// Returns an empty bounding box that can be grown with `union`.
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds3f {
    /// Bounding box where minimum and maximum bounds are inverted so it can be
    /// grown from nothing iteratively.
    pub const EMPTY: Self = Self {
        p_min: Point3f {
            x: INFINITY,
            y: INFINITY,
            z: INFINITY,
        },
        p_max: Point3f {
            x: -INFINITY,
            y: -INFINITY,
            z: -INFINITY,
        },
    };

    /// Creates a new 3D bounding box from 2 points.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns true if the box contains nothing.
    pub fn is_empty(&self) -> bool {
        self.p_max.x < self.p_min.x || self.p_max.y < self.p_min.y || self.p_max.z < self.p_min.z
    }

    /// Returns the vector along the box diagonal.
    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    /// Returns a box grown to contain a point.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3f) -> Self {
        Self {
            p_min: self.p_min.min(p),
            p_max: self.p_max.max(p),
        }
    }

    /// Returns a box enclosing both boxes.
    ///
    /// * `other` - The other box.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }

    /// Returns true if the point is inside the box.
    ///
    /// * `p` - The point.
    pub fn contains(&self, p: &Point3f) -> bool {
        p.x >= self.p_min.x
            && p.x <= self.p_max.x
            && p.y >= self.p_min.y
            && p.y <= self.p_max.y
            && p.z >= self.p_min.z
            && p.z <= self.p_max.z
    }

    /// Returns the center and radius of a sphere that bounds the box.
    pub fn bounding_sphere(&self) -> (Point3f, Float) {
        if self.is_empty() {
            return (Point3f::ZERO, 0.0);
        }
        let center = (self.p_min + self.p_max) * 0.5;
        let radius = if self.contains(&center) {
            center.distance(&self.p_max)
        } else {
            0.0
        };
        (center, radius)
    }
}
