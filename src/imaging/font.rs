//! Title font resolution for the raster collage.
//!
//! The title is drawn with the first scalable font that loads from the
//! configured candidate paths. When none do, the built-in
//! [`bitmap_font`](super::bitmap_font) takes over, so title rendering can
//! degrade but never fail.

use super::bitmap_font;
use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A font ready to draw the collage title.
pub enum TitleFont {
    Scalable { font: FontVec, source: PathBuf },
    Builtin,
}

impl std::fmt::Debug for TitleFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TitleFont::Scalable { source, .. } => {
                f.debug_struct("Scalable").field("source", source).finish()
            }
            TitleFont::Builtin => f.write_str("Builtin"),
        }
    }
}

/// Load the first usable font among `candidates`.
pub fn load_title_font(candidates: &[PathBuf]) -> TitleFont {
    for path in candidates {
        if let Some(font) = try_load(path) {
            debug!(font = %path.display(), "using scalable title font");
            return TitleFont::Scalable {
                font,
                source: path.clone(),
            };
        }
    }
    warn!("no scalable title font could be loaded, using the built-in bitmap font");
    TitleFont::Builtin
}

fn try_load(path: &Path) -> Option<FontVec> {
    let data = std::fs::read(path).ok()?;
    match FontVec::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(e) => {
            debug!(font = %path.display(), error = %e, "skipping unparsable font");
            None
        }
    }
}

impl TitleFont {
    pub fn is_builtin(&self) -> bool {
        matches!(self, TitleFont::Builtin)
    }

    /// Rendered width and height of `text` at `size` pixels.
    pub fn measure(&self, size: f32, text: &str) -> (u32, u32) {
        match self {
            TitleFont::Scalable { font, .. } => text_size(PxScale::from(size), font, text),
            TitleFont::Builtin => bitmap_font::text_size(size, text),
        }
    }

    /// Draw `text` centered inside the horizontal band `0..band_height` of
    /// the canvas.
    pub fn draw_centered(
        &self,
        canvas: &mut RgbImage,
        band_height: u32,
        size: f32,
        color: Rgb<u8>,
        text: &str,
    ) {
        let (text_w, text_h) = self.measure(size, text);
        let x = (canvas.width() as i64 - text_w as i64) / 2;
        let y = (band_height as i64 - text_h as i64) / 2;
        let (x, y) = (x as i32, y as i32);
        match self {
            TitleFont::Scalable { font, .. } => {
                draw_text_mut(canvas, color, x, y, PxScale::from(size), font, text)
            }
            TitleFont::Builtin => bitmap_font::draw_text(canvas, color, x, y, size, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fonts_fall_back_to_builtin() {
        let font = load_title_font(&[PathBuf::from("/nonexistent/font.ttf")]);
        assert!(font.is_builtin());
    }

    #[test]
    fn unparsable_font_file_falls_back_to_builtin() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let font = load_title_font(&[path]);
        assert!(font.is_builtin());
    }

    #[test]
    fn empty_candidate_list_falls_back_to_builtin() {
        assert!(load_title_font(&[]).is_builtin());
    }

    #[test]
    fn builtin_title_is_centered_in_band() {
        let mut canvas = RgbImage::from_pixel(200, 100, Rgb([255, 255, 255]));
        let font = TitleFont::Builtin;
        font.draw_centered(&mut canvas, 40, 14.0, Rgb([0, 0, 0]), "I");

        let (w, h) = font.measure(14.0, "I");
        let (x0, y0) = ((200 - w) / 2, (40 - h) / 2);
        let dark: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == Rgb([0, 0, 0]))
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!dark.is_empty());
        assert!(dark.iter().all(|&(x, y)| x >= x0 && x < x0 + w && y >= y0 && y < y0 + h));
    }
}
