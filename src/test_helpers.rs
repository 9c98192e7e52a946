//! Shared test fixtures: synthetic image buffers and small canvases.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let images = vec![solid_png(40, 30, RED), corrupt_bytes()];
//! let request = CollageRequest::new(images, Some("Trip".into()));
//! let config = small_config();
//! ```

use crate::collage::CollageRequest;
use crate::config::CollageConfig;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::path::PathBuf;

pub const RED: [u8; 3] = [220, 20, 20];
pub const GREEN: [u8; 3] = [20, 200, 40];
pub const BLUE: [u8; 3] = [30, 40, 220];
pub const YELLOW: [u8; 3] = [240, 220, 10];
pub const PURPLE: [u8; 3] = [140, 30, 160];
pub const PALETTE: [[u8; 3]; 5] = [RED, GREEN, BLUE, YELLOW, PURPLE];

// =========================================================================
// Image buffers
// =========================================================================

/// A single-colour PNG. Lossless, so resized pixels keep the exact colour.
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

/// A single-colour JPEG.
pub fn solid_jpeg(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

/// A JPEG whose left half is `left` and right half is `right`.
pub fn split_jpeg(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| {
        image::Rgb(if x < width / 2 { left } else { right })
    });
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, 95)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

/// Insert an EXIF APP1 segment carrying only an orientation tag right after
/// the JPEG SOI marker.
pub fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM");
    tiff.extend_from_slice(&42u16.to_be_bytes());
    tiff.extend_from_slice(&8u32.to_be_bytes()); // first IFD offset
    tiff.extend_from_slice(&1u16.to_be_bytes()); // one entry
    tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
    tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes()); // no next IFD

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Bytes no decoder will accept.
pub fn corrupt_bytes() -> Vec<u8> {
    b"this is not an image at all".to_vec()
}

/// Five small PNGs, one per [`PALETTE`] colour, with mixed aspect ratios.
pub fn palette_images() -> Vec<Vec<u8>> {
    let sizes = [(40, 30), (30, 40), (50, 50), (80, 20), (20, 80)];
    PALETTE
        .iter()
        .zip(sizes)
        .map(|(rgb, (w, h))| solid_png(w, h, *rgb))
        .collect()
}

pub fn request(images: Vec<Vec<u8>>, title: Option<&str>) -> CollageRequest {
    CollageRequest::new(images, title.map(str::to_string))
}

// =========================================================================
// Configs
// =========================================================================

/// A config with a small raster canvas so tests stay fast, and no font
/// candidates so the title always uses the built-in font.
pub fn small_config() -> CollageConfig {
    let mut config = CollageConfig::default();
    config.raster.width = 300;
    config.raster.height = 330;
    config.raster.title_band = 30;
    config.raster.title_font_size = 14.0;
    config.raster.border_width = 2;
    config.raster.font_paths = Vec::<PathBuf>::new();
    config
}
