//! Command line options

use base::geometry::*;
use base::integrator::DEFAULT_TILE_SIZE;
use base::pbrt::*;
use clap::{Parser, ValueEnum};
use std::num::NonZeroUsize;
use std::thread;

/// Default number of samples per pixel.
pub const DEFAULT_SPP: usize = 16;

/// Default maximum recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Built-in scenes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Closed box with coloured walls, a ceiling light, a mirror sphere and a
    /// glass sphere.
    Cornell,

    /// Spheres of every material on a ground plane under a sky and a point
    /// light.
    Spheres,

    /// No geometry and no lights.
    Empty,
}

/// Available integrators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum IntegratorKind {
    /// Direct lighting with specular recursion.
    Directlighting,

    /// Path tracing.
    Path,

    /// Whitted ray tracing.
    Whitted,
}

/// Available samplers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SamplerKind {
    /// Jittered stratified samples.
    Stratified,

    /// Independent uniform random samples.
    Random,
}

/// Available reconstruction filters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterKind {
    /// Box filter.
    Box,

    /// Triangle filter.
    Triangle,

    /// Gaussian filter.
    Gaussian,
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        help = "Use specified number of threads for rendering. Defaults to the number of logical CPUs."
    )]
    n_threads: Option<usize>,

    /// Automatically reduce a number of quality settings to render more quickly.
    #[arg(
        long = "quick",
        help = "Automatically reduce a number of quality settings to render more quickly."
    )]
    pub quick_render: bool,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Path to the image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "mis-render.png",
        help = "Write the final image to the given filename."
    )]
    pub image_file: String,

    /// The crop window x0, x1, y0, y1.
    #[arg(
        long = "cropwindow",
        short = 'c',
        value_name = "FLOAT",
        num_args = 4,
        allow_negative_numbers = true,
        help = "Specify an image crop window (x0 x1 y0 y1)."
    )]
    crop_window: Vec<Float>,

    /// Tile size.
    #[arg(
        long = "tilesize",
        short = 'p',
        value_name = "NUM",
        default_value_t = DEFAULT_TILE_SIZE,
        help = "Size in pixels of square tiles rendered per thread."
    )]
    tile_size: usize,

    /// Samples per pixel.
    #[arg(long, value_name = "NUM", default_value_t = DEFAULT_SPP, help = "Number of samples per pixel.")]
    spp: usize,

    /// Integrator.
    #[arg(long, value_enum, default_value_t = IntegratorKind::Directlighting)]
    pub integrator: IntegratorKind,

    /// Light sampling strategy for the direct lighting integrator.
    #[arg(
        long,
        value_name = "NAME",
        default_value = "all",
        help = "Light sampling strategy for direct lighting: 'all' or 'one'."
    )]
    pub strategy: String,

    /// Maximum recursion depth.
    #[arg(long = "maxdepth", value_name = "NUM", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Scene to render.
    #[arg(long, value_enum, default_value_t = SceneKind::Cornell)]
    pub scene: SceneKind,

    /// Sampler.
    #[arg(long, value_enum, default_value_t = SamplerKind::Stratified)]
    pub sampler: SamplerKind,

    /// Reconstruction filter.
    #[arg(long, value_enum, default_value_t = FilterKind::Gaussian)]
    pub filter: FilterKind,

    /// Image resolution.
    #[arg(
        long,
        value_name = "NUM",
        num_args = 2,
        default_values_t = [400, 400],
        help = "Image resolution (width height)."
    )]
    resolution: Vec<Int>,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        match self.n_threads {
            None => max_threads,
            Some(0) => {
                warn!("Invalid nthreads 0. Using {max_threads}.");
                max_threads
            }
            Some(n) if n > max_threads => {
                warn!("Num threads > max logical CPUs {max_threads}");
                max_threads
            }
            Some(n) => n,
        }
    }

    /// Returns the tile size.
    pub fn tile_size(&self) -> usize {
        if self.tile_size == 0 {
            warn!("Invalid tilesize 0. Using {DEFAULT_TILE_SIZE}.");
            DEFAULT_TILE_SIZE
        } else {
            self.tile_size
        }
    }

    /// Returns the number of samples per pixel; one in quick mode.
    pub fn samples_per_pixel(&self) -> usize {
        if self.quick_render {
            1
        } else if self.spp == 0 {
            warn!("Invalid spp 0. Using {DEFAULT_SPP}.");
            DEFAULT_SPP
        } else {
            self.spp
        }
    }

    /// Returns the maximum recursion depth; capped at 2 in quick mode.
    pub fn max_depth(&self) -> usize {
        if self.quick_render {
            min(self.max_depth, 2)
        } else {
            self.max_depth
        }
    }

    /// Returns the image resolution; quartered in quick mode.
    pub fn resolution(&self) -> Point2i {
        let (x, y) = match self.resolution.as_slice() {
            &[x, y] if x > 0 && y > 0 => (x, y),
            r => {
                warn!("Invalid resolution {r:?}. Using 400x400.");
                (400, 400)
            }
        };
        if self.quick_render {
            Point2i::new(max(x / 4, 1), max(y / 4, 1))
        } else {
            Point2i::new(x, y)
        }
    }

    /// Returns the crop window in NDC space. Invalid windows are replaced
    /// with the full image.
    pub fn crop_window(&self) -> Bounds2f {
        let full = Bounds2f::new(Point2f::new(0.0, 0.0), Point2f::new(1.0, 1.0));
        match self.crop_window.as_slice() {
            [] => full,
            &[x0, x1, y0, y1] => {
                let in_range = [x0, x1, y0, y1].iter().all(|v| (0.0..=1.0).contains(v));
                if in_range && x0 < x1 && y0 < y1 {
                    Bounds2f::new(Point2f::new(x0, y0), Point2f::new(x1, y1))
                } else {
                    warn!("Invalid crop window [{x0}, {x1}] x [{y0}, {y1}]. Rendering the full image.");
                    full
                }
            }
            c => {
                warn!("Crop window needs 4 values, got {}. Rendering the full image.", c.len());
                full
            }
        }
    }
}
