//! Box Filter

use base::filter::*;
use base::geometry::*;
use base::pbrt::*;

/// Implements a box filter that weights every sample within its extent
/// equally.
pub struct BoxFilter {
    /// Filter data.
    pub data: FilterData,
}

impl BoxFilter {
    /// Returns a new instance of `BoxFilter`.
    ///
    /// * `radius` - Radius of the filter in x and y directions; beyond this
    ///              filter is 0.
    pub fn new(radius: Vector2f) -> Self {
        Self {
            data: FilterData::new(radius),
        }
    }
}

impl Filter for BoxFilter {
    fn get_data(&self) -> &FilterData {
        &self.data
    }

    fn evaluate(&self, _p: &Point2f) -> Float {
        1.0
    }
}
