//! 1D Distribution.

use crate::pbrt::*;

/// Represents a piecewise-constant 1D function's PDF and CDF and provides
/// methods to perform this sampling efficiently.
#[derive(Clone, Debug)]
pub struct Distribution1D {
    /// Piecewise-constant function.
    pub func: Vec<Float>,

    /// CDF for `func`.
    pub cdf: Vec<Float>,

    /// Integral of `func`.
    pub func_int: Float,
}

impl Distribution1D {
    /// Create a new `Distribution1D` for a given piecewise-constant function.
    ///
    /// * `f` - Piecewise-constant function values; must not be empty.
    pub fn new(f: Vec<Float>) -> Self {
        let n = f.len();

        // Compute integral of step function at `x_i`
        let mut cdf: Vec<Float> = Vec::with_capacity(n + 1);
        cdf.push(0.0);
        for i in 1..n + 1 {
            cdf.push(cdf[i - 1] + f[i - 1] / n as Float);
        }

        // Transform step function integral into CDF.
        let func_int = cdf[n];
        if func_int == 0.0 {
            for (i, v) in cdf.iter_mut().enumerate().skip(1) {
                *v = i as Float / n as Float;
            }
        } else {
            for v in cdf.iter_mut().skip(1) {
                *v /= func_int;
            }
        }

        Self { func: f, cdf, func_int }
    }

    /// Returns the number of piecewise-constant segments.
    pub fn count(&self) -> usize {
        self.func.len()
    }

    /// Samples the continuous distribution and returns the sampled value in
    /// `[0, 1)`, its PDF and the segment offset.
    ///
    /// * `u` - The random sample.
    pub fn sample_continuous(&self, u: Float) -> (Float, Float, usize) {
        // Find surrounding CDF segments and `offset`.
        let offset = find_interval(self.cdf.len(), |index| self.cdf[index] <= u);

        // Compute offset along CDF segment.
        let mut du = u - self.cdf[offset];
        let width = self.cdf[offset + 1] - self.cdf[offset];
        if width > 0.0 {
            du /= width;
        }

        let pdf = if self.func_int > 0.0 {
            self.func[offset] / self.func_int
        } else {
            0.0
        };

        ((offset as Float + du) / self.count() as Float, pdf, offset)
    }

    /// Samples the discrete distribution and returns the chosen index, the
    /// probability of choosing it and `u` remapped into `[0, 1)` within the
    /// chosen segment.
    ///
    /// * `u` - The random sample.
    pub fn sample_discrete(&self, u: Float) -> (usize, Float, Float) {
        let offset = find_interval(self.cdf.len(), |index| self.cdf[index] <= u);
        let pdf = self.discrete_pdf(offset);

        let width = self.cdf[offset + 1] - self.cdf[offset];
        let u_remapped = if width > 0.0 {
            clamp((u - self.cdf[offset]) / width, 0.0, 1.0)
        } else {
            0.0
        };

        (offset, pdf, u_remapped)
    }

    /// Returns the probability of sampling a given index.
    ///
    /// * `index` - The index.
    pub fn discrete_pdf(&self, index: usize) -> Float {
        if self.func_int > 0.0 {
            self.func[index] / (self.func_int * self.count() as Float)
        } else {
            0.0
        }
    }
}
