//! Image output

use crate::geometry::*;
use crate::pbrt::*;
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use image::{ImageBuffer, ImageFormat, Rgb};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised while writing an image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The file name has no extension to infer the format from.
    #[error("can't determine file type from suffix of filename {0}")]
    MissingExtension(String),

    /// The file extension is not a supported output format.
    #[error("extension {0} is not supported")]
    UnsupportedExtension(String),

    /// Pixel buffer doesn't match the image dimensions.
    #[error("expected {expected} floats for the image but found {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Encode(#[from] image::ImageError),

    #[error(transparent)]
    Exr(#[from] exr::error::Error),
}

/// Write an RGB image. The format is selected by the file extension.
///
/// * `path`          - Output file path.
/// * `rgb`           - Floating point RGB pixel data.
/// * `output_bounds` - The bounds of the image; only its extent is used.
pub fn write_image(path: &str, rgb: &[Float], output_bounds: &Bounds2i) -> Result<(), ImageError> {
    let resolution = output_bounds.diagonal();
    let res_x = max(resolution.x, 0) as u32;
    let res_y = max(resolution.y, 0) as u32;

    let expected = 3 * res_x as usize * res_y as usize;
    if rgb.len() != expected {
        return Err(ImageError::SizeMismatch {
            expected,
            found: rgb.len(),
        });
    }

    match get_extension_from_filename(path) {
        Some(".exr") => write_exr(path, rgb, res_x, res_y),
        Some(".tga") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Tga),
        Some(".png") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Png),
        Some(".pfm") => write_pfm(path, rgb, res_x, res_y),
        Some(extension) => Err(ImageError::UnsupportedExtension(extension.to_string())),
        None => Err(ImageError::MissingExtension(path.to_string())),
    }
}

fn regex_file_ext() -> Option<&'static Regex> {
    static DATA: OnceLock<Option<Regex>> = OnceLock::new();
    DATA.get_or_init(|| Regex::new(r"(\.[^./\\]+)$").ok()).as_ref()
}

/// Returns the file extension including the leading `.`.
fn get_extension_from_filename(path: &str) -> Option<&str> {
    regex_file_ext()?
        .captures(path)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn write_exr(path: &str, rgb: &[Float], res_x: u32, res_y: u32) -> Result<(), ImageError> {
    use exr::prelude::*;

    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let size = Vec2(res_x as usize, res_y as usize);

    let layer = Layer::new(
        size,
        LayerAttributes::named("render"),
        Encoding::SMALL_LOSSLESS,
        SpecificChannels::rgb(|pos: Vec2<usize>| {
            let offset = 3 * (pos.1 * (res_x as usize) + pos.0);
            (rgb[offset], rgb[offset + 1], rgb[offset + 2])
        }),
    );

    let attributes = ImageAttributes::new(IntegerBounds::from_dimensions(size));
    Image::empty(attributes).with_layer(layer).write().to_file(path)?;
    Ok(())
}

fn write_8_bit(
    path: &str,
    rgb: &[Float],
    res_x: u32,
    res_y: u32,
    image_format: ImageFormat,
) -> Result<(), ImageError> {
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let mut imgbuf = ImageBuffer::new(res_x, res_y);
    for (offset, (_x, _y, pixel)) in imgbuf.enumerate_pixels_mut().enumerate() {
        let i = 3 * offset;
        *pixel = Rgb(apply_gamma(&[rgb[i], rgb[i + 1], rgb[i + 2]]));
    }

    imgbuf.save_with_format(path, image_format)?;
    Ok(())
}

/// Writes a 3 channel PFM (Portable FloatMap) in native byte order.
fn write_pfm(path: &str, rgb: &[Float], res_x: u32, res_y: u32) -> Result<(), ImageError> {
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let width = res_x as usize;
    let height = res_y as usize;
    let big_endian = cfg!(target_endian = "big");

    let mut file = BufWriter::new(File::create(path)?);

    // Negative scale marks little endian data.
    let scale = if big_endian { 1.0 } else { -1.0 };
    write!(file, "PF\n{width} {height}\n{scale}\n")?;

    // Rows run bottom to top.
    for y in (0..height).rev() {
        for &f in &rgb[y * width * 3..(y + 1) * width * 3] {
            if big_endian {
                file.write_f32::<BigEndian>(f)?;
            } else {
                file.write_f32::<LittleEndian>(f)?;
            }
        }
    }

    file.flush()?;
    Ok(())
}

/// Apply gamma correction to a RGB floating point pixel and return the clamped 8-bit values.
///
/// * `rgb` - RGB floating point pixel value.
#[inline]
fn apply_gamma(rgb: &[Float; 3]) -> [u8; 3] {
    [clamp_byte(rgb[0]), clamp_byte(rgb[1]), clamp_byte(rgb[2])]
}

#[inline]
fn clamp_byte(v: Float) -> u8 {
    clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_taken_from_last_component() {
        assert_eq!(get_extension_from_filename("out/render.png"), Some(".png"));
        assert_eq!(get_extension_from_filename("a.b/render.exr"), Some(".exr"));
        assert_eq!(get_extension_from_filename("a.b/render"), None);
    }

    #[test]
    fn gamma_maps_extremes() {
        assert_eq!(apply_gamma(&[0.0, 1.0, 10.0]), [0, 255, 255]);
        assert_eq!(apply_gamma(&[-1.0, 0.0, 0.0])[0], 0);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let bounds = Bounds2i::new(Point2i::new(0, 0), Point2i::new(1, 1));
        let err = write_image("render.bmp", &[0.0; 3], &bounds);
        assert!(matches!(err, Err(ImageError::UnsupportedExtension(ref e)) if e == ".bmp"));
    }

    #[test]
    fn pixel_count_must_match_bounds() {
        let bounds = Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 2));
        let err = write_image("render.pfm", &[0.0; 3], &bounds);
        assert!(matches!(err, Err(ImageError::SizeMismatch { expected: 12, found: 3 })));
    }

    #[test]
    fn writes_pfm_header_and_data() {
        let path = std::env::temp_dir().join(format!("pfm-test-{}.pfm", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let bounds = Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 1));
        write_image(&path, &[0.0, 0.5, 1.0, 2.0, 3.0, 4.0], &bounds).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let header = "PF\n2 1\n";
        assert!(bytes.starts_with(header.as_bytes()));
        let header_len = bytes.iter().enumerate().filter(|(_, b)| **b == b'\n').nth(2).unwrap().0 + 1;
        assert_eq!(bytes.len() - header_len, 6 * 4);
    }
}
