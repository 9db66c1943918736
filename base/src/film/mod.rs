//! Film

use crate::filter::*;
use crate::geometry::*;
use crate::image_io::*;
use crate::parallel::AtomicFloat;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

mod film_tile;

// Re-export.
pub use film_tile::*;

/// Filter table width.
pub const FILTER_TABLE_WIDTH: usize = 16;

/// Filter table size.
pub const FILTER_TABLE_SIZE: usize = FILTER_TABLE_WIDTH * FILTER_TABLE_WIDTH;

/// Inverse of filter table width.
pub const INV_FILTER_TABLE_WIDTH: Float = 1.0 / (FILTER_TABLE_WIDTH as Float);

/// Number of image rows guarded by a single lock.
pub const ROWS_PER_BAND: Int = 16;

/// Film pixel accumulator.
#[derive(Copy, Clone, Default, Debug)]
pub struct Pixel {
    /// Weighted sum of RGB contributions.
    pub rgb: [Float; 3],

    /// Sum of filter weights.
    pub filter_weight_sum: Float,
}

/// Film models the sensing device in the simulated camera.
///
/// Pixels are stored in horizontal bands of `ROWS_PER_BAND` rows, each behind
/// its own lock, so workers merging tiles from different parts of the image
/// don't contend. Splats are accumulated with atomic adds.
pub struct Film {
    /// Overall resolution of the image in pixels.
    pub full_resolution: Point2i,

    /// Length of the diagonal of the film's physical area in meters.
    pub diagonal: Float,

    /// Filter used to reconstruct the image.
    pub filter: ArcFilter,

    /// Output image file path.
    pub filename: String,

    /// Pixel bounds of the image to render.
    pub cropped_pixel_bounds: Bounds2i,

    /// Precomputed filter weights.
    filter_table: Arc<[Float; FILTER_TABLE_SIZE]>,

    /// Scale factor applied to final pixel values.
    scale: Float,

    /// Samples brighter than this are scaled down to it.
    max_sample_luminance: Float,

    /// Pixel storage split into row bands.
    bands: Vec<Mutex<Vec<Pixel>>>,

    /// Splatted RGB contributions per pixel.
    splats: Vec<[AtomicFloat; 3]>,
}

impl Film {
    /// Returns a new instance of `Film`.
    ///
    /// * `resolution`           - Overall resolution of the image in pixels.
    /// * `crop_window`          - Crop window in NDC space.
    /// * `filter`               - Filter used to reconstruct the image.
    /// * `diagonal`             - Length of the film diagonal in millimeters.
    /// * `filename`             - Output image file path.
    /// * `scale`                - Scale factor applied to pixel values; defaults to 1.
    /// * `max_sample_luminance` - Maximum sample luminance; defaults to infinity.
    pub fn new(
        resolution: &Point2i,
        crop_window: &Bounds2f,
        filter: ArcFilter,
        diagonal: Float,
        filename: &str,
        scale: Option<Float>,
        max_sample_luminance: Option<Float>,
    ) -> Self {
        // Compute the film image bounds.
        let cropped_pixel_bounds = Bounds2i::new(
            Point2i::new(
                (resolution.x as Float * crop_window.p_min.x).ceil() as Int,
                (resolution.y as Float * crop_window.p_min.y).ceil() as Int,
            ),
            Point2i::new(
                (resolution.x as Float * crop_window.p_max.x).ceil() as Int,
                (resolution.y as Float * crop_window.p_max.y).ceil() as Int,
            ),
        );
        info!(
            "Created film with full resolution {}x{}. Crop window covers [{}, {}) x [{}, {})",
            resolution.x,
            resolution.y,
            cropped_pixel_bounds.p_min.x,
            cropped_pixel_bounds.p_max.x,
            cropped_pixel_bounds.p_min.y,
            cropped_pixel_bounds.p_max.y,
        );

        // Precompute filter weight table.
        let filter_data = filter.get_data();
        let mut filter_table = [0.0; FILTER_TABLE_SIZE];
        for y in 0..FILTER_TABLE_WIDTH {
            for x in 0..FILTER_TABLE_WIDTH {
                let p = Point2f::new(
                    (x as Float + 0.5) * filter_data.radius.x * INV_FILTER_TABLE_WIDTH,
                    (y as Float + 0.5) * filter_data.radius.y * INV_FILTER_TABLE_WIDTH,
                );
                filter_table[y * FILTER_TABLE_WIDTH + x] = filter.evaluate(&p);
            }
        }

        // Allocate film image storage.
        let width = cropped_pixel_bounds.diagonal().x.max(0) as usize;
        let height = cropped_pixel_bounds.diagonal().y.max(0);
        let bands = (0..height)
            .step_by(ROWS_PER_BAND as usize)
            .map(|y0| {
                let rows = min(ROWS_PER_BAND, height - y0) as usize;
                Mutex::new(vec![Pixel::default(); rows * width])
            })
            .collect();
        let splats = (0..width * height as usize).map(|_| Default::default()).collect();

        Self {
            full_resolution: *resolution,
            diagonal: diagonal * 0.001,
            filter,
            filename: String::from(filename),
            cropped_pixel_bounds,
            filter_table: Arc::new(filter_table),
            scale: scale.unwrap_or(1.0),
            max_sample_luminance: max_sample_luminance.unwrap_or(INFINITY),
            bands,
            splats,
        }
    }

    /// Returns the area to be sampled for the image, taking the filter's
    /// extent into account.
    pub fn get_sample_bounds(&self) -> Bounds2i {
        let filter_data = self.filter.get_data();
        let half_pixel = Vector2f::new(0.5, 0.5);

        let p0 = (Point2f::from(self.cropped_pixel_bounds.p_min) + half_pixel - filter_data.radius).floor();
        let p1 = (Point2f::from(self.cropped_pixel_bounds.p_max) - half_pixel + filter_data.radius).ceil();

        Bounds2i::new(Point2i::from(p0), Point2i::from(p1))
    }

    /// Returns the physical extent of the film in scene space.
    pub fn get_physical_extent(&self) -> Bounds2f {
        let aspect = self.full_resolution.y as Float / self.full_resolution.x as Float;
        let x = (self.diagonal * self.diagonal / (1.0 + aspect * aspect)).sqrt();
        let y = aspect * x;
        Bounds2f::new(Point2f::new(-x / 2.0, -y / 2.0), Point2f::new(x / 2.0, y / 2.0))
    }

    /// Returns a `FilmTile` covering every pixel that samples inside
    /// `sample_bounds` can contribute to.
    ///
    /// * `sample_bounds` - Tile bounds in the overall image.
    pub fn get_film_tile(&self, sample_bounds: &Bounds2i) -> FilmTile {
        let filter_data = self.filter.get_data();
        let half_pixel = Vector2f::new(0.5, 0.5);

        let float_bounds = Bounds2f::from(*sample_bounds);
        let p0 = Point2i::from((float_bounds.p_min - half_pixel - filter_data.radius).ceil());
        let p1 = Point2i::from((float_bounds.p_max - half_pixel + filter_data.radius).floor()) + Point2i::new(1, 1);
        let tile_pixel_bounds = Bounds2i::new(p0, p1).intersect(&self.cropped_pixel_bounds);

        FilmTile::new(
            tile_pixel_bounds,
            filter_data.radius,
            Arc::clone(&self.filter_table),
            Some(self.max_sample_luminance),
        )
    }

    /// Merge a finished tile into the film. Only the row bands the tile
    /// overlaps are locked, one at a time.
    ///
    /// * `tile` - The tile to merge.
    pub fn merge_film_tile(&self, tile: &FilmTile) {
        let tile_bounds = tile.get_pixel_bounds();
        if tile_bounds.is_empty() {
            return;
        }
        debug!(
            "Merging film tile [{}, {}) x [{}, {})",
            tile_bounds.p_min.x, tile_bounds.p_max.x, tile_bounds.p_min.y, tile_bounds.p_max.y
        );

        let width = self.width();
        let mut y = tile_bounds.p_min.y;
        while y < tile_bounds.p_max.y {
            let (band_index, band_y0) = self.band_of(y);
            let band_end = min(band_y0 + ROWS_PER_BAND, tile_bounds.p_max.y);
            let mut band = self.lock_band(band_index);

            for row in y..band_end {
                let row_offset = (row - band_y0) as usize * width;
                for x in tile_bounds.p_min.x..tile_bounds.p_max.x {
                    let tile_pixel = &tile.pixels[tile.get_pixel_offset(&Point2i::new(x, row))];
                    let pixel = &mut band[row_offset + (x - self.cropped_pixel_bounds.p_min.x) as usize];

                    let rgb = tile_pixel.contrib_sum.to_rgb();
                    for (c, v) in pixel.rgb.iter_mut().zip(rgb.iter()) {
                        *c += *v;
                    }
                    pixel.filter_weight_sum += tile_pixel.filter_weight_sum;
                }
            }

            y = band_end;
        }
    }

    /// Replace the image with the given pixel values.
    ///
    /// * `img` - One value per pixel in the cropped bounds, in scanline order.
    pub fn set_image(&self, img: &[Spectrum]) {
        let width = self.width();
        for (band_index, band) in self.bands.iter().enumerate() {
            let mut band = band.lock().unwrap_or_else(PoisonError::into_inner);
            let start = band_index * ROWS_PER_BAND as usize * width;
            for (pixel, v) in band.iter_mut().zip(img[start..].iter()) {
                pixel.rgb = v.to_rgb();
                pixel.filter_weight_sum = 1.0;
            }
        }
        for splat in self.splats.iter() {
            for c in splat.iter() {
                c.store(0.0, Ordering::Relaxed);
            }
        }
    }

    /// Add a contribution to a pixel without filtering or weighting. Invalid
    /// values are dropped with a warning.
    ///
    /// * `p` - Position in raster space.
    /// * `v` - The contribution.
    pub fn add_splat(&self, p: &Point2f, v: &Spectrum) {
        if v.has_nans() {
            warn!("Ignoring splatted spectrum with NaN values at ({}, {})", p.x, p.y);
            return;
        }

        let vy = v.y();
        if vy < 0.0 {
            warn!("Ignoring splatted spectrum with negative luminance {vy} at ({}, {})", p.x, p.y);
            return;
        } else if vy.is_infinite() {
            warn!("Ignoring splatted spectrum with infinite luminance at ({}, {})", p.x, p.y);
            return;
        }

        let pi = Point2i::from(p.floor());
        if !self.cropped_pixel_bounds.contains_exclusive(&pi) {
            return;
        }

        let v = if vy > self.max_sample_luminance {
            *v * self.max_sample_luminance / vy
        } else {
            *v
        };

        let splat = &self.splats[self.get_pixel_offset(&pi)];
        for (c, value) in splat.iter().zip(v.to_rgb().iter()) {
            c.add(*value);
        }
    }

    /// Returns the final RGB values for every pixel in scanline order.
    ///
    /// * `splat_scale` - Scale factor for splatted contributions.
    pub fn get_image_rgb(&self, splat_scale: Float) -> Vec<Float> {
        let width = self.width();
        let mut rgb = Vec::with_capacity(3 * self.splats.len());

        for (band_index, band) in self.bands.iter().enumerate() {
            let band = band.lock().unwrap_or_else(PoisonError::into_inner);
            let start = band_index * ROWS_PER_BAND as usize * width;
            for (i, pixel) in band.iter().enumerate() {
                let splat = &self.splats[start + i];
                let splat_rgb = [
                    splat[0].load(Ordering::Relaxed),
                    splat[1].load(Ordering::Relaxed),
                    splat[2].load(Ordering::Relaxed),
                ];
                rgb.extend_from_slice(&self.get_pixel_rgb(pixel, &splat_rgb, splat_scale));
            }
        }

        rgb
    }

    /// Write the image to `filename`.
    ///
    /// * `splat_scale` - Scale factor for splatted contributions.
    pub fn write_image(&self, splat_scale: Float) -> Result<(), ImageError> {
        info!("Computing final weighted pixel values");
        let rgb = self.get_image_rgb(splat_scale);
        write_image(&self.filename, &rgb, &self.cropped_pixel_bounds)
    }

    /// Returns the offset of a pixel into the splat storage.
    ///
    /// * `p` - A point inside the cropped pixel bounds.
    pub fn get_pixel_offset(&self, p: &Point2i) -> usize {
        debug_assert!(self.cropped_pixel_bounds.contains_exclusive(p));
        let width = self.cropped_pixel_bounds.p_max.x - self.cropped_pixel_bounds.p_min.x;
        let offset = (p.x - self.cropped_pixel_bounds.p_min.x) + (p.y - self.cropped_pixel_bounds.p_min.y) * width;
        offset as usize
    }

    fn width(&self) -> usize {
        (self.cropped_pixel_bounds.p_max.x - self.cropped_pixel_bounds.p_min.x) as usize
    }

    /// Returns the band index and the first image row of the band holding row `y`.
    fn band_of(&self, y: Int) -> (usize, Int) {
        let band_index = (y - self.cropped_pixel_bounds.p_min.y) / ROWS_PER_BAND;
        (
            band_index as usize,
            self.cropped_pixel_bounds.p_min.y + band_index * ROWS_PER_BAND,
        )
    }

    /// A panic on another worker leaves the pixel sums intact, so a poisoned
    /// lock is still usable.
    fn lock_band(&self, band_index: usize) -> MutexGuard<'_, Vec<Pixel>> {
        self.bands[band_index].lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get_pixel_rgb(&self, pixel: &Pixel, splat_rgb: &[Float; 3], splat_scale: Float) -> [Float; 3] {
        let mut rgb = pixel.rgb;
        for (v, splat) in rgb.iter_mut().zip(splat_rgb.iter()) {
            if pixel.filter_weight_sum != 0.0 {
                // Normalize pixel with weight sum.
                *v = max(0.0, *v / pixel.filter_weight_sum);
            }

            *v += splat_scale * splat;
            *v *= self.scale;
        }
        rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    struct BoxFilter {
        data: FilterData,
    }

    impl Filter for BoxFilter {
        fn get_data(&self) -> &FilterData {
            &self.data
        }

        fn evaluate(&self, _p: &Point2f) -> Float {
            1.0
        }
    }

    fn film(width: Int, height: Int) -> Film {
        let filter = Arc::new(BoxFilter {
            data: FilterData::new(Vector2f::new(0.5, 0.5)),
        });
        Film::new(
            &Point2i::new(width, height),
            &Bounds2f::new(Point2f::new(0.0, 0.0), Point2f::new(1.0, 1.0)),
            filter,
            35.0,
            "test.pfm",
            None,
            None,
        )
    }

    #[test]
    fn sample_bounds_cover_filter_extent() {
        let f = film(4, 4);
        let b = f.get_sample_bounds();
        assert_eq!(b.p_min, Point2i::new(0, 0));
        assert_eq!(b.p_max, Point2i::new(4, 4));
    }

    #[test]
    fn merged_tile_sample_is_normalized() {
        let f = film(4, 4);
        let mut tile = f.get_film_tile(&Bounds2i::new(Point2i::new(1, 1), Point2i::new(2, 2)));
        tile.add_sample(Point2f::new(1.5, 1.5), Spectrum::from_rgb(2.0, 4.0, 6.0), 1.0);
        tile.add_sample(Point2f::new(1.5, 1.5), Spectrum::from_rgb(0.0, 0.0, 0.0), 1.0);
        f.merge_film_tile(&tile);

        let rgb = f.get_image_rgb(1.0);
        let offset = 3 * f.get_pixel_offset(&Point2i::new(1, 1));
        assert!(approx_eq!(f32, rgb[offset], 1.0));
        assert!(approx_eq!(f32, rgb[offset + 1], 2.0));
        assert!(approx_eq!(f32, rgb[offset + 2], 3.0));
        assert_eq!(rgb[0], 0.0);
    }

    #[test]
    fn tiles_spanning_bands_merge_every_row() {
        let f = film(2, 40);
        let bounds = Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 40));
        let mut tile = f.get_film_tile(&bounds);
        for p in bounds {
            tile.add_sample(
                Point2f::new(p.x as Float + 0.5, p.y as Float + 0.5),
                Spectrum::new(1.0),
                1.0,
            );
        }
        f.merge_film_tile(&tile);

        let rgb = f.get_image_rgb(1.0);
        assert_eq!(rgb.len(), 3 * 80);
        assert!(rgb.iter().all(|v| approx_eq!(f32, *v, 1.0)));
    }

    #[test]
    fn concurrent_merges_accumulate() {
        let f = film(8, 8);
        let bounds = Bounds2i::new(Point2i::new(0, 0), Point2i::new(8, 8));
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let mut tile = f.get_film_tile(&bounds);
                    for p in bounds {
                        tile.add_sample(
                            Point2f::new(p.x as Float + 0.5, p.y as Float + 0.5),
                            Spectrum::new(1.0),
                            1.0,
                        );
                    }
                    f.merge_film_tile(&tile);
                });
            }
        });

        let band = f.lock_band(0);
        assert!(band.iter().all(|p| p.filter_weight_sum == 4.0));
    }

    #[test]
    fn splats_keep_each_channel() {
        let f = film(2, 2);
        f.add_splat(&Point2f::new(0.5, 0.5), &Spectrum::from_rgb(1.0, 2.0, 3.0));
        f.add_splat(&Point2f::new(0.5, 0.5), &Spectrum::from_rgb(Float::NAN, 0.0, 0.0));
        let rgb = f.get_image_rgb(0.5);
        assert_eq!(&rgb[0..3], &[0.5, 1.0, 1.5]);
    }
}
