//! Image helpers shared by the composers, all in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with format sniffing |
//! | **Orientation** | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | **Resize to cell** | `DynamicImage::resize_exact` with `Lanczos3` |
//! | **Border** | `imageproc::drawing::draw_hollow_rect_mut` |
//! | **Title text** | `imageproc::drawing::draw_text_mut` (ab_glyph), or the built-in bitmap font |
//! | **Staging for DOCX** | `tempfile::NamedTempFile`, PNG-encoded |

pub mod bitmap_font;
pub mod decode;
pub mod font;

pub use decode::{
    ImagingError, StagedImage, decode_upright, draw_border, resize_to_cell, supported_extensions,
};
pub use font::{TitleFont, load_title_font};
