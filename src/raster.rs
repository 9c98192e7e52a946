//! Flattened PNG collage.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────┐  ┐
//! │            Title             │  │ title_band (only with a title)
//! ├─────────┬─────────┬──────────┤  ┘
//! │ image 0 │ image 1 │ image 2  │
//! ├─────────┼─────────┼──────────┤  each cell: (width / columns) ×
//! │ image 3 │ image 4 │ (empty)  │  ((height - band) / rows) pixels
//! └─────────┴─────────┴──────────┘
//! ```
//!
//! Every image is stretched to exactly fill its cell, gets a border drawn on
//! its own edges, and is pasted at `(column * cell_w, band + row * cell_h)`.
//! Leftover pixels from integer division and empty trailing cells keep the
//! background colour.

use crate::collage::{
    Artifact, ArtifactKind, Collage, CollageRequest, ComposeError, Composer, Placement, SkipReason,
};
use crate::config::{CollageConfig, ConfigError, RasterConfig, parse_hex_color};
use crate::grid::{self, CellPosition, CellSize};
use crate::imaging::{self, decode::encode_png, load_title_font};
use image::{Rgb, RgbImage, imageops};
use tracing::{debug, warn};

/// Builds PNG collages on a fixed-size canvas.
#[derive(Debug, Clone)]
pub struct RasterComposer {
    config: RasterConfig,
    background: Rgb<u8>,
    text_color: Rgb<u8>,
    border_color: Rgb<u8>,
}

impl RasterComposer {
    pub fn new(config: &CollageConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.raster.clone(),
            background: parse_hex_color(&config.raster.background)?,
            text_color: parse_hex_color(&config.raster.text_color)?,
            border_color: parse_hex_color(&config.border.color)?,
        })
    }

    /// Decode, resize, frame and paste one image. The canvas is untouched
    /// when this fails.
    fn place(
        &self,
        canvas: &mut RgbImage,
        bytes: &[u8],
        cell: CellPosition,
        size: CellSize<u32>,
        top: u32,
    ) -> Placement {
        if size.width == 0 || size.height == 0 {
            return Err(SkipReason::CellTooSmall {
                width: size.width,
                height: size.height,
            });
        }
        let img = imaging::decode_upright(bytes).map_err(|e| SkipReason::Decode(e.to_string()))?;
        let mut framed = imaging::resize_to_cell(&img, size.width, size.height);
        imaging::draw_border(&mut framed, self.config.border_width, self.border_color);

        let x = cell.column * size.width;
        let y = top + cell.row * size.height;
        imageops::replace(canvas, &framed, x as i64, y as i64);
        Ok(cell.into())
    }
}

impl Default for RasterComposer {
    fn default() -> Self {
        Self::new(&CollageConfig::default()).expect("stock config must be valid")
    }
}

impl Composer for RasterComposer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Raster
    }

    fn compose(&self, request: &CollageRequest) -> Result<Option<Collage>, ComposeError> {
        let Some(plan) = grid::plan(request.len()) else {
            return Ok(None);
        };
        let (width, height) = (self.config.width, self.config.height);
        let mut canvas = RgbImage::from_pixel(width, height, self.background);

        let title = request.title();
        let band = if title.is_some() {
            self.config.title_band
        } else {
            0
        };
        if let Some(title) = title {
            let font = load_title_font(&self.config.font_paths);
            font.draw_centered(
                &mut canvas,
                band,
                self.config.title_font_size,
                self.text_color,
                title,
            );
        }

        let available = grid::available_height(height, self.config.title_band, title.is_some());
        let size = plan.pixel_cell(width, available);
        debug!(
            columns = plan.columns,
            rows = plan.rows,
            cell_width = size.width,
            cell_height = size.height,
            "planned raster grid"
        );

        let placements: Vec<Placement> = plan
            .cells(request.len())
            .map(|cell| {
                let outcome = self.place(&mut canvas, &request.images()[cell.index], cell, size, band);
                if let Err(reason) = &outcome {
                    warn!(image = cell.index, %reason, "leaving raster cell blank");
                }
                outcome
            })
            .collect();

        let bytes =
            encode_png(&canvas).map_err(|e| ComposeError::EncodeRaster(e.to_string()))?;
        Ok(Some(Collage {
            artifact: Artifact::new(ArtifactKind::Raster, bytes, title),
            plan,
            placements,
        }))
    }
}
