//! Film tile

use super::{FILTER_TABLE_SIZE, FILTER_TABLE_WIDTH};
use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Arc;

/// A tile of pixels that a single worker accumulates samples into before it
/// is merged into the film.
pub struct FilmTile {
    /// The pixels.
    pub pixels: Vec<FilmTilePixel>,

    /// Pixel bounds of the tile.
    pixel_bounds: Bounds2i,

    /// Filter radius.
    filter_radius: Vector2f,

    /// Reciprocal of filter radius.
    inv_filter_radius: Vector2f,

    /// Precomputed filter values shared with the film.
    filter_table: Arc<[Float; FILTER_TABLE_SIZE]>,

    /// Samples brighter than this are scaled down to it.
    max_sample_luminance: Float,
}

impl FilmTile {
    /// Returns a new instance of `FilmTile`.
    ///
    /// * `pixel_bounds`         - Pixel bounds of the tile.
    /// * `filter_radius`        - Filter radius.
    /// * `filter_table`         - Precomputed filter values.
    /// * `max_sample_luminance` - Maximum sample luminance; defaults to
    ///                            infinity.
    pub fn new(
        pixel_bounds: Bounds2i,
        filter_radius: Vector2f,
        filter_table: Arc<[Float; FILTER_TABLE_SIZE]>,
        max_sample_luminance: Option<Float>,
    ) -> Self {
        Self {
            pixel_bounds,
            filter_radius,
            inv_filter_radius: Vector2f::new(1.0 / filter_radius.x, 1.0 / filter_radius.y),
            filter_table,
            pixels: vec![FilmTilePixel::default(); pixel_bounds.area().max(0) as usize],
            max_sample_luminance: max_sample_luminance.unwrap_or(INFINITY),
        }
    }

    /// Add a radiance sample to every pixel within the filter's support.
    ///
    /// * `p_film`        - Sample position in raster space.
    /// * `l`             - Radiance carried by the sample.
    /// * `sample_weight` - Camera ray weight.
    pub fn add_sample(&mut self, p_film: Point2f, l: Spectrum, sample_weight: Float) {
        let ly = l.y();
        let l = if ly > self.max_sample_luminance {
            l * self.max_sample_luminance / ly
        } else {
            l
        };

        // Compute sample's raster bounds.
        let p_film_discrete = p_film - Vector2f::new(0.5, 0.5);
        let p0 = Point2i::from((p_film_discrete - self.filter_radius).ceil()).max(&self.pixel_bounds.p_min);
        let p1 = (Point2i::from((p_film_discrete + self.filter_radius).floor()) + Point2i::new(1, 1))
            .min(&self.pixel_bounds.p_max);
        if p0.x >= p1.x || p0.y >= p1.y {
            return;
        }

        let table_offset = |d: Float, inv_radius: Float| -> usize {
            let f = abs(d * inv_radius * FILTER_TABLE_WIDTH as Float);
            min(f.floor(), FILTER_TABLE_WIDTH as Float - 1.0) as usize
        };

        let ifx: Vec<usize> = (p0.x..p1.x)
            .map(|x| table_offset(x as Float - p_film_discrete.x, self.inv_filter_radius.x))
            .collect();
        let ify: Vec<usize> = (p0.y..p1.y)
            .map(|y| table_offset(y as Float - p_film_discrete.y, self.inv_filter_radius.y))
            .collect();

        for (iy, y) in (p0.y..p1.y).enumerate() {
            for (ix, x) in (p0.x..p1.x).enumerate() {
                let filter_weight = self.filter_table[ify[iy] * FILTER_TABLE_WIDTH + ifx[ix]];

                let pixel_offset = self.get_pixel_offset(&Point2i::new(x, y));
                let pixel = &mut self.pixels[pixel_offset];
                pixel.contrib_sum += l * sample_weight * filter_weight;
                pixel.filter_weight_sum += filter_weight;
            }
        }
    }

    /// Returns the offset into the tile's pixels for a point in raster space.
    ///
    /// * `p` - A point inside the tile's bounds.
    pub fn get_pixel_offset(&self, p: &Point2i) -> usize {
        debug_assert!(self.pixel_bounds.contains_exclusive(p));
        let width = self.pixel_bounds.p_max.x - self.pixel_bounds.p_min.x;
        let offset = (p.x - self.pixel_bounds.p_min.x) + (p.y - self.pixel_bounds.p_min.y) * width;
        offset as usize
    }

    /// Returns the tile's pixel bounds.
    pub fn get_pixel_bounds(&self) -> Bounds2i {
        self.pixel_bounds
    }

    /// Returns the filter radius the tile was created with.
    pub fn filter_radius(&self) -> Vector2f {
        self.filter_radius
    }
}

/// Accumulated contribution of samples to a tile pixel.
#[derive(Default, Copy, Clone, Debug)]
pub struct FilmTilePixel {
    /// Sum of weighted sample contributions.
    pub contrib_sum: Spectrum,

    /// Sum of filter weights.
    pub filter_weight_sum: Float,
}
