//! Base types and the Monte-Carlo estimator core shared by every crate in the
//! renderer.

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

pub mod camera;
pub mod error;
pub mod film;
pub mod filter;
pub mod geometry;
pub mod image_io;
pub mod integrator;
pub mod interaction;
pub mod light;
pub mod material;
pub mod medium;
pub mod parallel;
pub mod pbrt;
pub mod primitive;
pub mod reflection;
pub mod rng;
pub mod sampler;
pub mod sampling;
pub mod scene;
pub mod shape;
pub mod spectrum;
