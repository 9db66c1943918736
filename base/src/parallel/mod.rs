//! Parallel

mod atomic_float;

pub use atomic_float::*;
