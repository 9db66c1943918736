//! RGB Spectrum

use super::common::*;
use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// Number of samples in `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// Spectral power distribution represented by red, green and blue
/// coefficients.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    /// RGB coefficients.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// All coefficients zero.
    pub const ZERO: Self = Self { c: [0.0; RGB_SAMPLES] };

    /// All coefficients one.
    pub const ONE: Self = Self { c: [1.0; RGB_SAMPLES] };

    /// Create a spectrum with a constant value in every channel.
    ///
    /// * `v` - The constant value.
    pub fn new(v: Float) -> Self {
        Self { c: [v; RGB_SAMPLES] }
    }

    /// Create a spectrum from RGB coefficients.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub fn from_rgb(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Returns `e^v` for each coefficient.
    pub fn exp(&self) -> Self {
        Self {
            c: [self.c[0].exp(), self.c[1].exp(), self.c[2].exp()],
        }
    }
}

impl CoefficientSpectrum for RGBSpectrum {
    /// Returns the stored samples.
    fn samples(&self) -> &[Float] {
        &self.c
    }

    /// Returns stored samples as mutable.
    fn samples_mut(&mut self) -> &mut [Float] {
        &mut self.c
    }

    /// Returns the y-coefficient of XYZ colour.
    fn y(&self) -> Float {
        rgb_to_xyz(&self.c)[1]
    }

    /// Convert the SPD to RGB cooefficients.
    fn to_rgb(&self) -> [Float; 3] {
        self.c
    }
}

impl From<Float> for RGBSpectrum {
    fn from(v: Float) -> Self {
        Self::new(v)
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            c: [self.c[0] + other.c[0], self.c[1] + other.c[1], self.c[2] + other.c[2]],
        }
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, other: Self) {
        for i in 0..RGB_SAMPLES {
            self.c[i] += other.c[i];
        }
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            c: [self.c[0] - other.c[0], self.c[1] - other.c[1], self.c[2] - other.c[2]],
        }
    }
}

impl SubAssign for RGBSpectrum {
    fn sub_assign(&mut self, other: Self) {
        for i in 0..RGB_SAMPLES {
            self.c[i] -= other.c[i];
        }
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            c: [self.c[0] * other.c[0], self.c[1] * other.c[1], self.c[2] * other.c[2]],
        }
    }
}

impl MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, other: Self) {
        for i in 0..RGB_SAMPLES {
            self.c[i] *= other.c[i];
        }
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    fn mul(self, f: Float) -> Self {
        Self {
            c: [self.c[0] * f, self.c[1] * f, self.c[2] * f],
        }
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    fn mul(self, s: RGBSpectrum) -> RGBSpectrum {
        s * self
    }
}

impl MulAssign<Float> for RGBSpectrum {
    fn mul_assign(&mut self, f: Float) {
        for v in self.c.iter_mut() {
            *v *= f;
        }
    }
}

impl Div for RGBSpectrum {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        Self {
            c: [self.c[0] / other.c[0], self.c[1] / other.c[1], self.c[2] / other.c[2]],
        }
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    fn div(self, f: Float) -> Self {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        self * inv
    }
}

impl DivAssign<Float> for RGBSpectrum {
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Neg for RGBSpectrum {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            c: [-self.c[0], -self.c[1], -self.c[2]],
        }
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl IndexMut<usize> for RGBSpectrum {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.c[0], self.c[1], self.c[2])
    }
}
