//! Common

use crate::pbrt::*;

/// Interface and helper functions for SPDs.
pub trait CoefficientSpectrum: Sized + Copy {
    /// Returns the stored samples.
    fn samples(&self) -> &[Float];

    /// Returns stored samples as mutable.
    fn samples_mut(&mut self) -> &mut [Float];

    /// Returns true if either coordinate is NaN.
    fn has_nans(&self) -> bool {
        self.samples().iter().any(|v| v.is_nan())
    }

    /// Returns true if the values are zero everywhere.
    fn is_black(&self) -> bool {
        self.samples().iter().all(|v| *v == 0.0)
    }

    /// Returns the maximum sample value.
    fn max_component_value(&self) -> Float {
        let samples = self.samples();
        samples[1..].iter().fold(samples[0], |m, v| max(m, *v))
    }

    /// Returns the y-coefficient of XYZ colour (luminance).
    fn y(&self) -> Float;

    /// Convert the SPD to RGB cooefficients.
    fn to_rgb(&self) -> [Float; 3];

    /// Takes the square root of all sample values.
    fn sqrt(&self) -> Self {
        let mut ret = *self;
        for s in ret.samples_mut().iter_mut() {
            *s = s.sqrt();
        }
        ret
    }

    /// Clamps the sample values to `[low, high]`.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: Float, high: Float) -> Self {
        let mut ret = *self;
        for s in ret.samples_mut().iter_mut() {
            *s = clamp(*s, low, high);
        }
        ret
    }
}

/// Converts the given RGB coefficients to XYZ coefficients using RGB spectra
/// defined for high-definition TVs.
///
/// * `rgb` - The RGB coefficients.
#[rustfmt::skip]
pub fn rgb_to_xyz(rgb: &[Float; 3]) -> [Float; 3] {
    [
        0.412453 * rgb[0] + 0.357580 * rgb[1] + 0.180423 * rgb[2],
        0.212671 * rgb[0] + 0.715160 * rgb[1] + 0.072169 * rgb[2],
        0.019334 * rgb[0] + 0.119193 * rgb[1] + 0.950227 * rgb[2],
    ]
}
