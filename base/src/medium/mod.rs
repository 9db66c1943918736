//! Participating media
//!
//! Only the vacuum is modelled. The phase functions are kept so interactions
//! inside a medium can still be estimated by the direct lighting code.

mod henyey_greenstein;
mod phase_function;

// Re-exports
pub use henyey_greenstein::*;
pub use phase_function::*;
