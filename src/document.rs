//! Editable DOCX collage.
//!
//! The page (8 × 11 in by default, zero margins) holds an optional centered
//! bold title paragraph followed by one fixed-layout table with
//! `rows × columns` cells. Every column is `page_width / columns` wide and
//! each filled cell gets:
//!
//! - content vertically centered,
//! - a thin single border on all four edges (so the frame follows the table
//!   cell, unlike the PNG where it hugs the image),
//! - the upright image as an inline picture scaled to exactly the cell's
//!   physical size.
//!
//! Pictures go through a [`StagedImage`] (a named temporary PNG file) before
//! they are embedded; the file is gone once the cell is built, whether or not
//! embedding worked.
//!
//! ## Units
//!
//! | Quantity | Unit | Per inch |
//! |---|---|---|
//! | Page size, column widths | twips | 1440 |
//! | Picture extent | EMU | 914 400 |
//! | Font size | half-points | |
//! | Border width | eighths of a point | |

use crate::collage::{
    Artifact, ArtifactKind, Collage, CollageRequest, ComposeError, Composer, Placement, SkipReason,
};
use crate::config::{CollageConfig, ConfigError, DocumentConfig, ooxml_color};
use crate::grid::{self, CellPosition, CellSize};
use crate::imaging::{self, StagedImage};
use docx_rs::{
    AlignmentType, BorderType, Docx, PageMargin, Paragraph, Pic, Run, Table, TableCell,
    TableCellBorder, TableCellBorderPosition, TableCellMargins, TableLayoutType, TableRow,
    VAlignType, WidthType,
};
use std::io::Cursor;
use tracing::{debug, warn};

const TWIPS_PER_INCH: f64 = 1440.0;
const EMU_PER_INCH: f64 = 914_400.0;

fn inches_to_twips(inches: f64) -> usize {
    (inches * TWIPS_PER_INCH).round() as usize
}

fn inches_to_emu(inches: f64) -> u32 {
    (inches * EMU_PER_INCH).round() as u32
}

/// Builds DOCX collages on a fixed physical page.
#[derive(Debug, Clone)]
pub struct DocumentComposer {
    config: DocumentConfig,
    border_color: String,
}

impl DocumentComposer {
    pub fn new(config: &CollageConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.document.clone(),
            border_color: ooxml_color(&config.border.color)?,
        })
    }

    fn title_paragraph(&self, title: &str) -> Paragraph {
        Paragraph::new()
            .add_run(
                Run::new()
                    .add_text(title)
                    .size(self.config.title_font_size as usize * 2)
                    .bold(),
            )
            .align(AlignmentType::Center)
    }

    /// A cell that received an image (or tried to): centered, bordered.
    fn framed_cell(&self, width_twips: usize) -> TableCell {
        let cell = TableCell::new()
            .width(width_twips, WidthType::Dxa)
            .vertical_align(VAlignType::Center);
        [
            TableCellBorderPosition::Top,
            TableCellBorderPosition::Left,
            TableCellBorderPosition::Bottom,
            TableCellBorderPosition::Right,
        ]
        .into_iter()
        .fold(cell, |cell, position| {
            cell.set_border(
                TableCellBorder::new(position)
                    .border_type(BorderType::Single)
                    .size(self.config.border_size as usize)
                    .color(self.border_color.clone()),
            )
        })
    }

    /// Decode and orient the image, stage it on disk, and build a picture
    /// sized to the cell. The staged file is removed before returning.
    fn picture(&self, bytes: &[u8], size: CellSize<f64>) -> Result<Pic, SkipReason> {
        let (width, height) = (inches_to_emu(size.width), inches_to_emu(size.height));
        if width == 0 || height == 0 {
            return Err(SkipReason::CellTooSmall { width, height });
        }
        let img = imaging::decode_upright(bytes).map_err(|e| SkipReason::Decode(e.to_string()))?;
        let staged = StagedImage::stage(&img).map_err(|e| SkipReason::Staging(e.to_string()))?;
        let png = staged
            .read()
            .map_err(|e| SkipReason::Staging(e.to_string()))?;
        debug!(staged = %staged.path().display(), "embedding staged image");
        Ok(Pic::new(&png).size(width, height))
    }

    fn fill_cell(
        &self,
        bytes: &[u8],
        cell: CellPosition,
        size: CellSize<f64>,
        width_twips: usize,
    ) -> (TableCell, Placement) {
        let paragraph = Paragraph::new().align(AlignmentType::Center);
        let (paragraph, outcome) = match self.picture(bytes, size) {
            Ok(pic) => (
                paragraph.add_run(Run::new().add_image(pic)),
                Ok(cell.into()),
            ),
            Err(reason) => (paragraph, Err(reason)),
        };
        (self.framed_cell(width_twips).add_paragraph(paragraph), outcome)
    }
}

impl Default for DocumentComposer {
    fn default() -> Self {
        Self::new(&CollageConfig::default()).expect("stock config must be valid")
    }
}

impl Composer for DocumentComposer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Document
    }

    fn compose(&self, request: &CollageRequest) -> Result<Option<Collage>, ComposeError> {
        let Some(plan) = grid::plan(request.len()) else {
            return Ok(None);
        };
        let (page_width, page_height) = (self.config.page_width, self.config.page_height);
        let title = request.title();

        let mut docx = Docx::new()
            .page_size(
                inches_to_twips(page_width) as u32,
                inches_to_twips(page_height) as u32,
            )
            .page_margin(PageMargin::new().top(0).bottom(0).left(0).right(0));
        if let Some(title) = title {
            docx = docx.add_paragraph(self.title_paragraph(title));
        }

        let available = grid::available_height(page_height, self.config.title_band, title.is_some());
        let size = plan.physical_cell(page_width, available);
        let column_twips = inches_to_twips(size.width);
        debug!(
            columns = plan.columns,
            rows = plan.rows,
            cell_width_in = size.width,
            cell_height_in = size.height,
            "planned document grid"
        );

        let mut cells: Vec<TableCell> = (0..plan.capacity())
            .map(|_| {
                TableCell::new()
                    .width(column_twips, WidthType::Dxa)
                    .add_paragraph(Paragraph::new())
            })
            .collect();
        let mut placements: Vec<Placement> = Vec::with_capacity(request.len());
        for cell in plan.cells(request.len()) {
            let (table_cell, outcome) =
                self.fill_cell(&request.images()[cell.index], cell, size, column_twips);
            if let Err(reason) = &outcome {
                warn!(image = cell.index, %reason, "leaving document cell empty");
            }
            cells[cell.index] = table_cell;
            placements.push(outcome);
        }

        let mut cells = cells.into_iter();
        let rows: Vec<TableRow> = (0..plan.rows)
            .map(|_| TableRow::new(cells.by_ref().take(plan.columns as usize).collect()))
            .collect();
        let table = Table::new(rows)
            .set_grid(vec![column_twips; plan.columns as usize])
            .layout(TableLayoutType::Fixed)
            .width(inches_to_twips(page_width), WidthType::Dxa)
            .margins(TableCellMargins::new().margin(0, 0, 0, 0));
        docx = docx.add_table(table);

        let mut bytes = Vec::new();
        docx.build()
            .pack(Cursor::new(&mut bytes))
            .map_err(|e| ComposeError::SerializeDocument(e.to_string()))?;

        Ok(Some(Collage {
            artifact: Artifact::new(ArtifactKind::Document, bytes, title),
            plan,
            placements,
        }))
    }
}
