//! Shared collage model: what goes into a composer and what comes out.
//!
//! Both composers consume the same [`CollageRequest`] and produce the same
//! [`Collage`] report, so callers can switch output targets without caring
//! which one does the pixel or XML work. The [`Composer`] trait is the seam.

use crate::grid::{CellPosition, GridPlan};
use thiserror::Error;

/// Fallback file stem when the collage has no title.
pub const DEFAULT_FILE_STEM: &str = "Collage";

/// Failure that aborts a whole generation call.
///
/// Per-image problems never end up here; they are recorded as [`SkipReason`]s.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Failed to encode PNG collage: {0}")]
    EncodeRaster(String),
    #[error("Failed to serialize DOCX collage: {0}")]
    SerializeDocument(String),
}

/// Why an image was left out of its cell.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("could not decode image: {0}")]
    Decode(String),
    /// Cell size in the target's unit (pixels for PNG, EMU for DOCX).
    #[error("cell is too small to hold an image ({width}x{height})")]
    CellTooSmall { width: u32, height: u32 },
    #[error("could not stage image for embedding: {0}")]
    Staging(String),
}

/// An image that made it into the collage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedImage {
    pub index: usize,
    pub row: u32,
    pub column: u32,
}

impl From<CellPosition> for PlacedImage {
    fn from(cell: CellPosition) -> Self {
        Self {
            index: cell.index,
            row: cell.row,
            column: cell.column,
        }
    }
}

/// Outcome for one input image, in input order.
pub type Placement = Result<PlacedImage, SkipReason>;

/// One generation action's input: image bytes in display order plus a title.
#[derive(Debug, Clone, Default)]
pub struct CollageRequest {
    images: Vec<Vec<u8>>,
    title: Option<String>,
}

impl CollageRequest {
    pub fn new(images: Vec<Vec<u8>>, title: Option<String>) -> Self {
        Self { images, title }
    }

    pub fn images(&self) -> &[Vec<u8>] {
        &self.images
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// The title to render, or `None` when it is missing or empty.
    ///
    /// A whitespace-only title still reserves the title band; only the
    /// suggested file name treats it as blank.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Which output target produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Raster,
    Document,
}

impl ArtifactKind {
    pub fn mime(self) -> &'static str {
        match self {
            ArtifactKind::Raster => "image/png",
            ArtifactKind::Document => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Raster => "png",
            ArtifactKind::Document => "docx",
        }
    }
}

/// A finished, serialized collage ready to hand back to the caller.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub bytes: Vec<u8>,
    /// Suggested download name, e.g. `Trip.png`.
    pub filename: String,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, bytes: Vec<u8>, title: Option<&str>) -> Self {
        Self {
            kind,
            bytes,
            filename: suggested_filename(title, kind),
        }
    }

    pub fn mime(&self) -> &'static str {
        self.kind.mime()
    }
}

/// Build `<title>.<ext>`, falling back to `Collage` for a blank title.
///
/// Characters that cannot appear in a file name on common platforms are
/// replaced with `_`.
///
/// # Examples
/// ```
/// # use photo_collage::collage::{suggested_filename, ArtifactKind};
/// assert_eq!(suggested_filename(Some("Trip"), ArtifactKind::Raster), "Trip.png");
/// assert_eq!(suggested_filename(Some("  "), ArtifactKind::Document), "Collage.docx");
/// assert_eq!(suggested_filename(Some("a/b"), ArtifactKind::Raster), "a_b.png");
/// ```
pub fn suggested_filename(title: Option<&str>, kind: ArtifactKind) -> String {
    let stem: String = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect(),
        None => DEFAULT_FILE_STEM.to_string(),
    };
    format!("{}.{}", stem, kind.extension())
}

/// A composed collage: the artifact plus how every image was placed.
#[derive(Debug, Clone)]
pub struct Collage {
    pub artifact: Artifact,
    pub plan: GridPlan,
    /// One entry per input image, in input order.
    pub placements: Vec<Placement>,
}

impl Collage {
    pub fn placed(&self) -> impl Iterator<Item = &PlacedImage> {
        self.placements.iter().filter_map(|p| p.as_ref().ok())
    }

    /// Skipped images as `(input index, reason)`.
    pub fn skipped(&self) -> impl Iterator<Item = (usize, &SkipReason)> {
        self.placements
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().err().map(|reason| (i, reason)))
    }
}

/// An output target that turns a request into a collage.
///
/// Implementations must return `Ok(None)` for an empty request, record
/// per-image failures in [`Collage::placements`] instead of failing, and only
/// return `Err` when the finished artifact cannot be serialized.
pub trait Composer {
    fn kind(&self) -> ArtifactKind;

    fn compose(&self, request: &CollageRequest) -> Result<Option<Collage>, ComposeError>;
}
