//! Grid planning: how many columns and rows a collage gets, and how big each
//! cell is.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! ## Policy
//!
//! Small collages use a fixed square lookup so the cells keep a predictable
//! aspect ratio; larger ones fall back to a near-square formula:
//!
//! | Images | Grid |
//! |---|---|
//! | 1 | 1 × 1 |
//! | 2–4 | 2 × 2 |
//! | 5–9 | 3 × 3 |
//! | 10–16 | 4 × 4 |
//! | > 16 | `ceil(sqrt(n))` columns × `ceil(n / columns)` rows |
//!
//! The plan only guarantees capacity (`columns * rows >= n`). Trailing cells
//! are simply left empty. Cells are always uniform: the available width and
//! height are divided evenly regardless of the images' own aspect ratios.

use serde::Serialize;

/// Columns and rows chosen for a given image count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridPlan {
    pub columns: u32,
    pub rows: u32,
}

/// Row-major position of one cell in a [`GridPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    /// Index of the image placed here (row-major order).
    pub index: usize,
    pub row: u32,
    pub column: u32,
}

/// Size of one grid cell, in whatever unit the canvas uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize<T> {
    pub width: T,
    pub height: T,
}

/// Plan the grid for `count` images.
///
/// Returns `None` for zero images: there is no meaningful grid, and composers
/// short-circuit before asking.
///
/// # Examples
/// ```
/// # use photo_collage::grid::plan;
/// assert_eq!(plan(1).map(|p| (p.columns, p.rows)), Some((1, 1)));
/// assert_eq!(plan(5).map(|p| (p.columns, p.rows)), Some((3, 3)));
/// assert_eq!(plan(17).map(|p| (p.columns, p.rows)), Some((5, 4)));
/// assert_eq!(plan(0), None);
/// ```
pub fn plan(count: usize) -> Option<GridPlan> {
    let (columns, rows) = match count {
        0 => return None,
        1 => (1, 1),
        2..=4 => (2, 2),
        5..=9 => (3, 3),
        10..=16 => (4, 4),
        _ => {
            let columns = ceil_sqrt(count);
            (columns, count.div_ceil(columns))
        }
    };
    Some(GridPlan {
        columns: columns as u32,
        rows: rows as u32,
    })
}

/// Smallest `c` with `c * c >= n`, computed in integers.
fn ceil_sqrt(n: usize) -> usize {
    let mut c = (n as f64).sqrt() as usize;
    while c * c < n {
        c += 1;
    }
    while c > 1 && (c - 1) * (c - 1) >= n {
        c -= 1;
    }
    c
}

impl GridPlan {
    /// Total number of cells.
    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Row-major position of image `index`.
    pub fn position(&self, index: usize) -> CellPosition {
        let columns = self.columns as usize;
        CellPosition {
            index,
            row: (index / columns) as u32,
            column: (index % columns) as u32,
        }
    }

    /// Positions of the first `min(count, capacity)` cells, row-major.
    pub fn cells(&self, count: usize) -> impl Iterator<Item = CellPosition> + '_ {
        (0..count.min(self.capacity())).map(|index| self.position(index))
    }

    /// Uniform pixel cell size for a canvas area (integer division).
    pub fn pixel_cell(&self, width: u32, height: u32) -> CellSize<u32> {
        CellSize {
            width: width / self.columns,
            height: height / self.rows,
        }
    }

    /// Uniform physical cell size (e.g. inches) for a page area.
    pub fn physical_cell(&self, width: f64, height: f64) -> CellSize<f64> {
        CellSize {
            width: width / self.columns as f64,
            height: height / self.rows as f64,
        }
    }
}

/// Height left for the grid once the title band is reserved.
///
/// The band is only reserved when there is a title; it saturates at zero.
pub fn available_height<T>(height: T, title_band: T, has_title: bool) -> T
where
    T: PartialOrd + std::ops::Sub<Output = T> + Default + Copy,
{
    if !has_title {
        return height;
    }
    if title_band >= height {
        T::default()
    } else {
        height - title_band
    }
}
