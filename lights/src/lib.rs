//! Lights

#[macro_use]
extern crate log;

mod diffuse;
mod infinite;
mod point;

// Re-export
pub use diffuse::*;
pub use infinite::*;
pub use point::*;
