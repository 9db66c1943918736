//! Gaussian Filter

use base::filter::*;
use base::geometry::*;
use base::pbrt::*;

/// Implements a Gaussian filter offset so it reaches zero at the edge of its
/// extent.
pub struct GaussianFilter {
    /// Filter data.
    pub data: FilterData,

    /// Falloff rate.
    pub alpha: Float,

    /// Gaussian value at the x radius.
    pub exp_x: Float,

    /// Gaussian value at the y radius.
    pub exp_y: Float,
}

impl GaussianFilter {
    /// Returns a new instance of `GaussianFilter`.
    ///
    /// * `radius` - Radius of the filter in x and y directions; beyond this
    ///              filter is 0.
    /// * `alpha`  - Falloff rate; smaller values give a slower falloff.
    pub fn new(radius: Vector2f, alpha: Float) -> Self {
        Self {
            data: FilterData::new(radius),
            alpha,
            exp_x: (-alpha * radius.x * radius.x).exp(),
            exp_y: (-alpha * radius.y * radius.y).exp(),
        }
    }

    /// Returns the offset 1D Gaussian.
    fn gaussian(&self, d: Float, expv: Float) -> Float {
        max(0.0, (-self.alpha * d * d).exp() - expv)
    }
}

impl Filter for GaussianFilter {
    fn get_data(&self) -> &FilterData {
        &self.data
    }

    fn evaluate(&self, p: &Point2f) -> Float {
        self.gaussian(p.x, self.exp_x) * self.gaussian(p.y, self.exp_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn peaks_at_center_and_vanishes_at_edge() {
        let f = GaussianFilter::new(Vector2f::new(1.5, 1.5), 2.0);
        let e = (-2.0_f32 * 2.25).exp();
        let center = f.evaluate(&Point2f::ZERO);
        assert!(approx_eq!(f32, center, (1.0 - e) * (1.0 - e), epsilon = 1e-6));
        assert!(f.evaluate(&Point2f::new(0.5, 0.0)) < center);
        assert!(approx_eq!(f32, f.evaluate(&Point2f::new(1.5, 0.0)), 0.0, epsilon = 1e-6));
    }
}
