//! Errors

use crate::image_io::ImageError;
use thiserror::Error;

/// Errors that abort a render.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The rendered image could not be written.
    #[error("unable to write image: {0}")]
    Image(#[from] ImageError),

    /// A render option is out of range.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },

    /// A worker thread panicked.
    #[error("render worker failed: {0}")]
    Worker(String),
}
