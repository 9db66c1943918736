//! Camera

use crate::film::Film;
use crate::geometry::*;
use crate::pbrt::*;
use std::fmt;
use std::sync::Arc;

/// Holds all the sample values needed to generate a camera ray.
#[derive(Copy, Clone, Debug, Default)]
pub struct CameraSample {
    /// The point on the film to which the generated ray carries radiance.
    pub p_film: Point2f,

    /// The point on the lens the ray passes through.
    pub p_lens: Point2f,

    /// The time at which the ray should sample the scene.
    pub time: Float,
}

impl CameraSample {
    /// Create a new `CameraSample`.
    ///
    /// * `p_film` - Point on the film.
    /// * `p_lens` - Point on the lens.
    /// * `time`   - Time value.
    pub fn new(p_film: Point2f, p_lens: Point2f, time: Float) -> Self {
        Self { p_film, p_lens, time }
    }
}

impl fmt::Display for CameraSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[pFilm: ({}, {}), pLens: ({}, {}), time {}]",
            self.p_film.x, self.p_film.y, self.p_lens.x, self.p_lens.y, self.time
        )
    }
}

/// Common camera data.
pub struct CameraData {
    /// Time when shutter is open.
    pub shutter_open: Float,

    /// Time when shutter is closed.
    pub shutter_close: Float,

    /// The film that captures the image.
    pub film: Film,
}

impl CameraData {
    /// Create a new `CameraData`.
    ///
    /// * `shutter_open`  - Time when shutter is open.
    /// * `shutter_close` - Time when shutter is closed.
    /// * `film`          - The film.
    pub fn new(shutter_open: Float, shutter_close: Float, film: Film) -> Self {
        Self {
            shutter_open,
            shutter_close,
            film,
        }
    }
}

/// Camera interface.
pub trait Camera: Send + Sync {
    /// Returns the common camera data.
    fn get_data(&self) -> &CameraData;

    /// Returns a world space ray for a sample and a weight for how much the
    /// radiance arriving along it contributes to the image.
    ///
    /// * `sample` - The sample.
    fn generate_ray(&self, sample: &CameraSample) -> (Ray, Float);

    /// Returns the film.
    fn get_film(&self) -> &Film {
        &self.get_data().film
    }
}

/// Atomic reference counted `Camera`.
pub type ArcCamera = Arc<dyn Camera>;
