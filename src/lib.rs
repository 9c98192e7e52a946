//! # Photo Collage
//!
//! Lays out any number of photos into a single-page grid collage, with an
//! optional title, and exports it either as a flattened PNG or as an editable
//! DOCX document.
//!
//! # Architecture: One Planner, Two Composers
//!
//! ```text
//!                    ┌──────────────┐
//!  images + title ─▶ │ grid::plan   │ ─▶ (columns, rows) + uniform cell size
//!                    └──────┬───────┘
//!              ┌────────────┴─────────────┐
//!     RasterComposer                DocumentComposer
//!   decode → orient → resize      decode → orient → stage
//!   → border → paste on canvas    → picture in table cell
//!              │                          │
//!           PNG bytes                 DOCX bytes
//! ```
//!
//! Both composers take the same [`CollageRequest`] and implement the same
//! [`Composer`] trait. Each one asks the planner for the grid, then walks the
//! cells row-major and fills them one image at a time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`grid`] | Grid planning: columns/rows from image count, uniform cell sizes |
//! | [`raster`] | PNG composer on a fixed-resolution canvas |
//! | [`document`] | DOCX composer with a fixed-layout table |
//! | [`collage`] | Request, artifact, per-image placement outcomes, `Composer` trait |
//! | [`imaging`] | Orientation-aware decode, resize, borders, title fonts, temp staging |
//! | [`config`] | `collage.toml` loading, merging over stock defaults, validation |
//! | [`input`] | Collects image files from CLI arguments |
//! | [`output`] | CLI report formatting |
//!
//! # Failure Model
//!
//! - **No images**: not an error, the composers return `Ok(None)`.
//! - **One bad image**: recorded as a [`SkipReason`] for that image; its cell
//!   stays blank and the rest of the collage is built normally.
//! - **No usable font**: the PNG title falls back to a built-in bitmap font.
//! - **Serialization**: failing to encode the finished PNG or pack the DOCX is
//!   the only error a generation call returns.

pub mod collage;
pub mod config;
pub mod document;
pub mod grid;
pub mod imaging;
pub mod input;
pub mod output;
pub mod raster;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use collage::{
    Artifact, ArtifactKind, Collage, CollageRequest, ComposeError, Composer, PlacedImage,
    Placement, SkipReason,
};
pub use config::CollageConfig;
pub use document::DocumentComposer;
pub use grid::{GridPlan, plan};
pub use raster::RasterComposer;

/// Build a PNG collage with the stock configuration.
///
/// Returns `Ok(None)` when `images` is empty.
pub fn generate_raster(
    images: Vec<Vec<u8>>,
    title: Option<&str>,
) -> Result<Option<Artifact>, ComposeError> {
    generate(&RasterComposer::default(), images, title)
}

/// Build a DOCX collage with the stock configuration.
///
/// Returns `Ok(None)` when `images` is empty.
pub fn generate_document(
    images: Vec<Vec<u8>>,
    title: Option<&str>,
) -> Result<Option<Artifact>, ComposeError> {
    generate(&DocumentComposer::default(), images, title)
}

fn generate(
    composer: &impl Composer,
    images: Vec<Vec<u8>>,
    title: Option<&str>,
) -> Result<Option<Artifact>, ComposeError> {
    let request = CollageRequest::new(images, title.map(str::to_string));
    Ok(composer.compose(&request)?.map(|collage| collage.artifact))
}
