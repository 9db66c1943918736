//! Sampler Integrator

use super::*;
use crate::camera::*;
use crate::error::RenderError;
use crate::film::FilmTile;
use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::reflection::*;
use crate::sampler::*;
use crate::scene::*;
use crate::spectrum::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::any::Any;
use std::iter::once;
use std::num::NonZeroUsize;
use std::thread;

/// Default edge length of a square image tile in pixels.
pub const DEFAULT_TILE_SIZE: usize = 16;

/// Settings for the parallel render loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Number of worker threads.
    pub threads: usize,

    /// Edge length of a square image tile in pixels.
    pub tile_size: usize,

    /// Hide the progress bar.
    pub quiet: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            threads: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            tile_size: DEFAULT_TILE_SIZE,
            quiet: false,
        }
    }
}

impl RenderOptions {
    /// Check that the thread count and tile size are usable.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.threads == 0 {
            return Err(RenderError::InvalidOption {
                name: "threads",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.tile_size == 0 {
            return Err(RenderError::InvalidOption {
                name: "tile_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Common data for sampler integrators.
pub struct SamplerIntegratorData {
    /// Sampler responsible for choosing points on the image plane from which
    /// to trace rays and for supplying sample positions used by integrators.
    pub sampler: Box<dyn Sampler>,

    /// The camera.
    pub camera: ArcCamera,

    /// Pixel bounds for the image.
    pub pixel_bounds: Bounds2i,

    /// Maximum recursion depth.
    pub max_depth: usize,
}

impl SamplerIntegratorData {
    /// Create a new `SamplerIntegratorData`.
    ///
    /// * `max_depth`    - Maximum recursion depth.
    /// * `camera`       - The camera.
    /// * `sampler`      - Sampler responsible for choosing point on image plane
    ///                    from which to trace rays.
    /// * `pixel_bounds` - Pixel bounds for the image.
    pub fn new(max_depth: usize, camera: ArcCamera, sampler: Box<dyn Sampler>, pixel_bounds: Bounds2i) -> Self {
        Self {
            sampler,
            camera,
            pixel_bounds,
            max_depth,
        }
    }
}

/// Implements the basis of a rendering process driven by a stream of samples
/// from a `Sampler`. Each sample identifies a point on the image plane at
/// which we compute the light arriving from the scene.
pub trait SamplerIntegrator: Integrator + Send + Sync {
    /// Returns the common data.
    fn get_data(&self) -> &SamplerIntegratorData;

    /// Trace rays for specular reflection.
    ///
    /// * `isect`   - The surface interaction with its BSDF.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    /// * `depth`   - The recursive depth.
    fn specular_reflect(&self, isect: &SurfaceInteraction, scene: &Scene, sampler: &mut dyn Sampler, depth: usize) -> Spectrum {
        let bxdf_type = BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR;
        specular_continuation(self, isect, scene, sampler, depth, bxdf_type)
    }

    /// Trace rays for specular refraction.
    ///
    /// * `isect`   - The surface interaction with its BSDF.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    /// * `depth`   - The recursive depth.
    fn specular_transmit(&self, isect: &SurfaceInteraction, scene: &Scene, sampler: &mut dyn Sampler, depth: usize) -> Spectrum {
        let bxdf_type = BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_SPECULAR;
        specular_continuation(self, isect, scene, sampler, depth, bxdf_type)
    }

    /// Render the scene and write the image.
    ///
    /// * `scene`       - The scene.
    /// * `options`     - Thread count, tile size and progress settings.
    /// * `diagnostics` - Receives reports of invalid radiance values.
    fn render(
        &mut self,
        scene: &Scene,
        options: &RenderOptions,
        diagnostics: &dyn RadianceDiagnostics,
    ) -> Result<(), RenderError>
    where
        Self: Sized,
    {
        options.validate()?;
        self.preprocess(scene);

        let this = &*self;
        let film = this.get_data().camera.get_film();

        // Compute number of tiles, `n_tiles`, to use for parallel rendering.
        let sample_bounds = film.get_sample_bounds();
        let sample_extent = sample_bounds.diagonal();
        let tile_size = options.tile_size as Int;
        let n_tiles = Point2::new(
            ((sample_extent.x + tile_size - 1) / tile_size) as usize,
            ((sample_extent.y + tile_size - 1) / tile_size) as usize,
        );
        let tile_count = n_tiles.x * n_tiles.y;
        info!(
            "Rendering {}x{} tiles on {} threads",
            n_tiles.x, n_tiles.y, options.threads
        );

        let progress = create_progress_bar(tile_count as u64, options.quiet);
        progress.set_message("Rendering scene");

        thread::scope(|scope| {
            let (work_tx, work_rx) = crossbeam_channel::bounded::<usize>(options.threads);
            let (tile_tx, tile_rx) = crossbeam_channel::bounded::<FilmTile>(options.threads);

            // Send work.
            let feeder = scope.spawn(move || {
                for tile_index in 0..tile_count {
                    if work_tx.send(tile_index).is_err() {
                        break;
                    }
                }
            });

            // Spawn worker threads.
            let workers: Vec<_> = (0..options.threads)
                .map(|_| {
                    let work_rx = work_rx.clone();
                    let tile_tx = tile_tx.clone();
                    scope.spawn(move || {
                        for tile_index in work_rx.iter() {
                            let film_tile = this.render_tile(tile_index, n_tiles, scene, &sample_bounds, tile_size, diagnostics);
                            if tile_tx.send(film_tile).is_err() {
                                break;
                            }
                        }
                    })
                })
                .collect();
            drop(work_rx);
            drop(tile_tx);

            // Merge image tiles into `Film` as they finish.
            for film_tile in tile_rx.iter() {
                film.merge_film_tile(&film_tile);
                progress.inc(1);
            }

            let mut failure = None;
            for handle in workers.into_iter().chain(once(feeder)) {
                if let Err(panic) = handle.join() {
                    failure.get_or_insert_with(|| panic_message(panic.as_ref()));
                }
            }
            failure.map_or(Ok(()), |message| Err(RenderError::Worker(message)))
        })?;

        // Save final image after rendering.
        progress.set_message("Writing image");
        film.write_image(1.0)?;
        progress.finish_with_message("Render complete");

        Ok(())
    }

    /// Render an image tile.
    ///
    /// * `tile_index`    - Unique tile index.
    /// * `n_tiles`       - Number of tiles in (x, y) direction.
    /// * `scene`         - Scene.
    /// * `sample_bounds` - Sample bounds.
    /// * `tile_size`     - Tile edge length in pixels.
    /// * `diagnostics`   - Receives reports of invalid radiance values.
    fn render_tile(
        &self,
        tile_index: usize,
        n_tiles: Point2<usize>,
        scene: &Scene,
        sample_bounds: &Bounds2i,
        tile_size: Int,
        diagnostics: &dyn RadianceDiagnostics,
    ) -> FilmTile {
        // Get the x and y tile indices.
        let tile_x = (tile_index % n_tiles.x) as Int;
        let tile_y = (tile_index / n_tiles.x) as Int;

        let data = self.get_data();
        let camera = &data.camera;

        // Get sampler instance for tile.
        let mut tile_sampler = data.sampler.clone_sampler(tile_index as u64);

        // Compute sample bounds for tile.
        let x0 = sample_bounds.p_min.x + tile_x * tile_size;
        let x1 = min(x0 + tile_size, sample_bounds.p_max.x);
        let y0 = sample_bounds.p_min.y + tile_y * tile_size;
        let y1 = min(y0 + tile_size, sample_bounds.p_max.y);
        let tile_bounds = Bounds2i::new(Point2i::new(x0, y0), Point2i::new(x1, y1));
        debug!("Starting image tile ({tile_x}, {tile_y})");

        let mut film_tile = camera.get_film().get_film_tile(&tile_bounds);

        // Loop over pixels in tile to render them.
        for pixel in tile_bounds {
            tile_sampler.start_pixel(&pixel);

            // Checked after `start_pixel` so samplers consume the same random
            // values regardless of the crop window.
            if !data.pixel_bounds.contains_exclusive(&pixel) {
                continue;
            }

            loop {
                let camera_sample = tile_sampler.get_camera_sample(&pixel);

                // Generate camera ray for current sample.
                let (mut ray, ray_weight) = camera.generate_ray(&camera_sample);

                // Evaluate radiance along camera ray.
                let mut l = Spectrum::ZERO;
                if ray_weight > 0.0 {
                    l = self.li(&mut ray, scene, &mut *tile_sampler, 0);
                }
                l = check_radiance(&pixel, tile_sampler.current_sample_number(), l, diagnostics);
                trace!("Pixel: {pixel:?}, camera sample: {camera_sample} -> ray weight {ray_weight} -> L = {l}");

                // Add camera ray's contribution to image.
                film_tile.add_sample(camera_sample.p_film, l, ray_weight);

                if !tile_sampler.start_next_sample() {
                    break;
                }
            }
        }

        debug!("Finished image tile ({tile_x}, {tile_y})");
        film_tile
    }
}

/// Shared body of `specular_reflect` and `specular_transmit`.
fn specular_continuation<I: SamplerIntegrator + ?Sized>(
    integrator: &I,
    isect: &SurfaceInteraction,
    scene: &Scene,
    sampler: &mut dyn Sampler,
    depth: usize,
    bxdf_type: BxDFType,
) -> Spectrum {
    let Some(bsdf) = isect.bsdf.as_ref() else {
        return Spectrum::ZERO;
    };

    // Compute specular direction `wi` and BSDF value.
    let u = sampler.get_2d();
    let Some(BxDFSample { f, pdf, wi, .. }) = bsdf.sample_f(&isect.hit.wo, &u, bxdf_type) else {
        return Spectrum::ZERO;
    };

    // Return contribution of specular reflection or transmission.
    let cos_theta = wi.abs_dot(&isect.shading.n);
    if pdf > 0.0 && !f.is_black() && cos_theta != 0.0 {
        let mut rd = isect.spawn_ray(&wi);
        f * integrator.li(&mut rd, scene, sampler, depth + 1) * cos_theta / pdf
    } else {
        Spectrum::ZERO
    }
}

/// Returns a progress bar for `len` steps, hidden when `quiet` is set.
///
/// * `len`   - Number of steps.
/// * `quiet` - Hide the bar.
pub fn create_progress_bar(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    match ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}") {
        Ok(style) => progress.set_style(style.progress_chars("=> ")),
        Err(err) => warn!("Using default progress bar style: {err}"),
    }
    progress
}

/// Extracts a readable message from a worker panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
