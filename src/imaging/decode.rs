//! Decoding, per-cell pixel work, and temporary staging.

use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::LazyLock;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Extensions whose decoders are compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the image file extensions that have working decoders compiled in.
pub fn supported_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Decode an in-memory image and rotate/flip it upright according to its
/// EXIF orientation.
///
/// The format is sniffed from the bytes, never from a file name. An
/// unreadable orientation tag is treated as "no transform" rather than a
/// decode failure.
pub fn decode_upright(bytes: &[u8]) -> Result<DynamicImage, ImagingError> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_decoder()
        .map_err(|e| ImagingError::Decode(e.to_string()))?;
    let orientation = decoder
        .orientation()
        .unwrap_or(image::metadata::Orientation::NoTransforms);
    let mut img =
        DynamicImage::from_decoder(decoder).map_err(|e| ImagingError::Decode(e.to_string()))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Stretch an image to exactly `width` × `height`, ignoring its aspect ratio.
pub fn resize_to_cell(img: &DynamicImage, width: u32, height: u32) -> RgbImage {
    img.resize_exact(width, height, FilterType::Lanczos3).to_rgb8()
}

/// Draw a solid border of `thickness` pixels along the image's own edges.
///
/// Rings that would not fit inside the image are skipped.
pub fn draw_border(img: &mut RgbImage, thickness: u32, color: Rgb<u8>) {
    let (width, height) = img.dimensions();
    for inset in 0..thickness {
        let (Some(w), Some(h)) = (
            width.checked_sub(2 * inset).filter(|w| *w > 0),
            height.checked_sub(2 * inset).filter(|h| *h > 0),
        ) else {
            break;
        };
        let ring = Rect::at(inset as i32, inset as i32).of_size(w, h);
        draw_hollow_rect_mut(img, ring, color);
    }
}

/// Encode an RGB canvas as PNG bytes.
pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>, ImagingError> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ImagingError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// An upright image written to a named temporary PNG file.
///
/// The file is removed when the value is dropped, on every exit path.
pub struct StagedImage {
    file: NamedTempFile,
}

impl StagedImage {
    pub fn stage(img: &DynamicImage) -> Result<Self, ImagingError> {
        let mut file = tempfile::Builder::new()
            .prefix("collage-cell-")
            .suffix(".png")
            .tempfile()?;
        DynamicImage::ImageRgba8(img.to_rgba8())
            .write_to(file.as_file_mut(), ImageFormat::Png)
            .map_err(|e| ImagingError::Encode(e.to_string()))?;
        file.as_file_mut().flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the staged file back from disk.
    pub fn read(&self) -> Result<Vec<u8>, ImagingError> {
        Ok(std::fs::read(self.path())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn supported_extensions_match_decodable_formats() {
        let exts = supported_extensions();
        for expected in &["jpg", "jpeg", "png", "tif", "tiff", "webp"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
    }

    #[test]
    fn decode_sniffs_format() {
        let jpeg = solid_jpeg(40, 20, [200, 10, 10]);
        let png = solid_png(30, 50, [10, 200, 10]);

        let a = decode_upright(&jpeg).unwrap();
        assert_eq!((a.width(), a.height()), (40, 20));
        let b = decode_upright(&png).unwrap();
        assert_eq!((b.width(), b.height()), (30, 50));
    }

    #[test]
    fn decode_applies_exif_rotation() {
        // Orientation 6: stored landscape, displayed rotated 90° clockwise.
        let jpeg = with_exif_orientation(&solid_jpeg(40, 20, [0, 0, 255]), 6);
        let img = decode_upright(&jpeg).unwrap();
        assert_eq!((img.width(), img.height()), (20, 40));
    }

    #[test]
    fn decode_keeps_dimensions_for_orientation_one() {
        let jpeg = with_exif_orientation(&solid_jpeg(40, 20, [0, 0, 255]), 1);
        let img = decode_upright(&jpeg).unwrap();
        assert_eq!((img.width(), img.height()), (40, 20));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_upright(&corrupt_bytes()).is_err());
        assert!(decode_upright(&[]).is_err());
    }

    #[test]
    fn resize_ignores_aspect_ratio() {
        let img = decode_upright(&solid_png(100, 10, [1, 2, 3])).unwrap();
        let cell = resize_to_cell(&img, 30, 60);
        assert_eq!(cell.dimensions(), (30, 60));
    }

    #[test]
    fn border_hugs_image_edges() {
        let mut img = RgbImage::from_pixel(20, 10, Rgb([255, 255, 255]));
        draw_border(&mut img, 2, Rgb([0, 0, 0]));

        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(1, 5), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(19, 9), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(18, 8), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(2, 2), Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(10, 5), Rgb([255, 255, 255]));
    }

    #[test]
    fn border_thicker_than_image_stops_at_center() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        draw_border(&mut img, 10, Rgb([0, 0, 0]));
        assert!(img.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn encode_png_round_trips_dimensions() {
        let canvas = RgbImage::from_pixel(12, 7, Rgb([9, 9, 9]));
        let bytes = encode_png(&canvas).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }

    #[test]
    fn staged_image_is_removed_on_drop() {
        let img = decode_upright(&solid_png(8, 8, [5, 5, 5])).unwrap();
        let staged = StagedImage::stage(&img).unwrap();
        let path = staged.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        let bytes = staged.read().unwrap();
        assert_eq!(image::load_from_memory(&bytes).unwrap().width(), 8);

        drop(staged);
        assert!(!path.exists());
    }
}
