//! 2D Axis Aligned Bounding Boxes.

use super::point2::*;
use super::vector2::*;
use crate::pbrt::*;
use itertools::{iproduct, Product};
use num_traits::Num;
use std::ops::Range;

/// 2D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds2<T> {
    /// Minimum bounds.
    pub p_min: Point2<T>,

    /// Maximum bounds.
    pub p_max: Point2<T>,
}

/// 2-D bounding box containing `Float` points.
pub type Bounds2f = Bounds2<Float>;

/// 2-D bounding box containing `Int` points.
pub type Bounds2i = Bounds2<Int>;

impl<T: Num + PartialOrd + Copy> Bounds2<T> {
    /// Creates a new 2D bounding box from 2 points. The minimum and maximum
    /// bounds are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point2<T>, p2: Point2<T>) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns true if the box has no area.
    pub fn is_empty(&self) -> bool {
        self.p_max.x <= self.p_min.x || self.p_max.y <= self.p_min.y
    }

    /// Returns the vector along the box diagonal from the minimum point to
    /// the maximum point.
    pub fn diagonal(&self) -> Vector2<T> {
        self.p_max - self.p_min
    }

    /// Returns the area of the bounding box.
    pub fn area(&self) -> T {
        if self.is_empty() {
            T::zero()
        } else {
            let d = self.diagonal();
            d.x * d.y
        }
    }

    /// Returns the intersection with another bounding box. The result may be
    /// empty.
    ///
    /// * `other` - The other bounding box.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            p_min: self.p_min.max(&other.p_min),
            p_max: self.p_max.min(&other.p_max),
        }
    }

    /// Returns true if the point lies inside the box, excluding the upper
    /// boundary.
    ///
    /// * `p` - The point.
    pub fn contains_exclusive(&self, p: &Point2<T>) -> bool {
        p.x >= self.p_min.x && p.x < self.p_max.x && p.y >= self.p_min.y && p.y < self.p_max.y
    }
}

impl From<Bounds2i> for Bounds2f {
    /// Convert a `Bounds2i` to `Bounds2f`.
    ///
    /// * `b` - The `Bounds2i` to convert.
    fn from(b: Bounds2i) -> Self {
        Self {
            p_min: b.p_min.into(),
            p_max: b.p_max.into(),
        }
    }
}

/// Iterates the pixels of a `Bounds2i` in scanline order.
pub struct Bounds2iIterator {
    /// The iterator that will supply points.
    p: Product<Range<Int>, Range<Int>>,
}

impl IntoIterator for Bounds2i {
    type Item = Point2i;
    type IntoIter = Bounds2iIterator;

    /// Create an iterator over the half-open pixel range of `Bounds2i`.
    fn into_iter(self) -> Self::IntoIter {
        Bounds2iIterator {
            p: iproduct!(self.p_min.y..self.p_max.y, self.p_min.x..self.p_max.x),
        }
    }
}

impl Iterator for Bounds2iIterator {
    type Item = Point2i;

    /// Get the next point.
    fn next(&mut self) -> Option<Self::Item> {
        self.p.next().map(|(y, x)| Point2i::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn iterating_empty_bounds2i_returns_none() {
        let b = Bounds2i::new(Point2i::new(2, 2), Point2i::new(2, 5));
        assert_eq!(b.into_iter().next(), None);
    }

    #[test]
    fn iterates_in_scanline_order() {
        let b = Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 2));
        let points: Vec<Point2i> = b.into_iter().collect();
        assert_eq!(
            points,
            vec![
                Point2i::new(0, 0),
                Point2i::new(1, 0),
                Point2i::new(0, 1),
                Point2i::new(1, 1)
            ]
        );
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = Bounds2i::new(Point2i::new(0, 0), Point2i::new(4, 4));
        let b = Bounds2i::new(Point2i::new(5, 5), Point2i::new(8, 8));
        assert!(a.intersect(&b).is_empty());
        assert_eq!(a.intersect(&b).area(), 0);
    }

    prop_point2!(point2_i32, i32, -100..100i32, -100..100i32);

    proptest! {
        #[test]
        fn bounds2i_sorts_x_and_y_components(p1 in point2_i32(), p2 in point2_i32()) {
            let b = Bounds2i::new(p1, p2);
            prop_assert!(b.p_min.x <= b.p_max.x && b.p_min.y <= b.p_max.y);
        }

        #[test]
        fn iteration_count_matches_area(p1 in point2_i32(), p2 in point2_i32()) {
            let b = Bounds2i::new(p1, p2);
            prop_assert_eq!(b.into_iter().count() as i32, b.area());
        }
    }
}
