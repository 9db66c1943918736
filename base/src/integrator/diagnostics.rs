//! Radiance diagnostics

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Luminance below this is treated as a negative radiance estimate.
pub const NEGATIVE_LUMINANCE_THRESHOLD: Float = -1e-5;

/// Problems detected in a per-sample radiance estimate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RadianceIssue {
    /// At least one component is NaN.
    NotANumber,

    /// Luminance is below `NEGATIVE_LUMINANCE_THRESHOLD`.
    NegativeLuminance(Float),

    /// Luminance is infinite.
    InfiniteLuminance,
}

impl fmt::Display for RadianceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "not-a-number radiance value"),
            Self::NegativeLuminance(y) => write!(f, "negative luminance value {y}"),
            Self::InfiniteLuminance => write!(f, "infinite luminance value"),
        }
    }
}

/// Receives reports of invalid radiance estimates from the render loop.
pub trait RadianceDiagnostics: Send + Sync {
    /// Report an invalid estimate. The estimate has already been replaced
    /// with black.
    ///
    /// * `pixel`        - The pixel being rendered.
    /// * `sample_index` - Index of the sample within the pixel.
    /// * `issue`        - What was wrong with the estimate.
    fn report(&self, pixel: &Point2i, sample_index: usize, issue: RadianceIssue);
}

/// Forwards every report to the `log` facade as a warning.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogDiagnostics;

impl RadianceDiagnostics for LogDiagnostics {
    fn report(&self, pixel: &Point2i, sample_index: usize, issue: RadianceIssue) {
        warn!(
            "{issue} returned for pixel ({}, {}), sample {sample_index}. Setting to black.",
            pixel.x, pixel.y
        );
    }
}

/// Counts reports by kind.
#[derive(Debug, Default)]
pub struct CountingDiagnostics {
    not_a_number: AtomicUsize,
    negative_luminance: AtomicUsize,
    infinite_luminance: AtomicUsize,
}

impl CountingDiagnostics {
    /// Create a sink with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of NaN estimates.
    pub fn not_a_number(&self) -> usize {
        self.not_a_number.load(Ordering::Relaxed)
    }

    /// Returns the number of negative luminance estimates.
    pub fn negative_luminance(&self) -> usize {
        self.negative_luminance.load(Ordering::Relaxed)
    }

    /// Returns the number of infinite luminance estimates.
    pub fn infinite_luminance(&self) -> usize {
        self.infinite_luminance.load(Ordering::Relaxed)
    }

    /// Returns the total number of reports.
    pub fn total(&self) -> usize {
        self.not_a_number() + self.negative_luminance() + self.infinite_luminance()
    }

    /// Log a one line summary; a warning if anything was reported.
    pub fn log_summary(&self) {
        if self.total() == 0 {
            info!("All radiance estimates were valid");
        } else {
            warn!(
                "Replaced {} radiance estimates with black: {} NaN, {} negative, {} infinite",
                self.total(),
                self.not_a_number(),
                self.negative_luminance(),
                self.infinite_luminance()
            );
        }
    }
}

impl RadianceDiagnostics for CountingDiagnostics {
    fn report(&self, pixel: &Point2i, sample_index: usize, issue: RadianceIssue) {
        debug!("{issue} at pixel ({}, {}), sample {sample_index}", pixel.x, pixel.y);
        let counter = match issue {
            RadianceIssue::NotANumber => &self.not_a_number,
            RadianceIssue::NegativeLuminance(_) => &self.negative_luminance,
            RadianceIssue::InfiniteLuminance => &self.infinite_luminance,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Validate a radiance estimate before it reaches the film. NaN, negative
/// and infinite luminance values are replaced with black and reported once.
///
/// * `pixel`        - The pixel being rendered.
/// * `sample_index` - Index of the sample within the pixel.
/// * `l`            - The radiance estimate.
/// * `diagnostics`  - Sink for reports.
pub fn check_radiance(
    pixel: &Point2i,
    sample_index: usize,
    l: Spectrum,
    diagnostics: &dyn RadianceDiagnostics,
) -> Spectrum {
    let issue = if l.has_nans() {
        Some(RadianceIssue::NotANumber)
    } else {
        let y = l.y();
        if y < NEGATIVE_LUMINANCE_THRESHOLD {
            Some(RadianceIssue::NegativeLuminance(y))
        } else if y.is_infinite() {
            Some(RadianceIssue::InfiniteLuminance)
        } else {
            None
        }
    };

    match issue {
        Some(issue) => {
            diagnostics.report(pixel, sample_index, issue);
            Spectrum::ZERO
        }
        None => l,
    }
}
