//! Spectrum

mod common;
mod rgb_spectrum;

// Re-export
pub use common::*;
pub use rgb_spectrum::*;

/// Radiance values are carried as RGB triples.
pub type Spectrum = RGBSpectrum;
