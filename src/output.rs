//! CLI output formatting.
//!
//! Each report has a `format_*` function returning lines (pure, testable) and
//! a `print_*` wrapper that writes them to stdout.
//!
//! ## Build
//!
//! ```text
//! Trip.png (image/png, 3x3 grid)
//!     001 (1, 1) photos/beach.jpg
//!     002 (1, 2) photos/dunes.jpg
//!     003 skipped: could not decode image: ... photos/broken.jpg
//! Placed 2 of 3 images
//! ```
//!
//! Grid positions are shown 1-based as `(row, column)`.

use crate::collage::Collage;
use crate::grid::GridPlan;
use std::path::{Path, PathBuf};

/// Lines describing where every image of a collage went.
pub fn format_collage(collage: &Collage, written_to: &Path, sources: &[PathBuf]) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({}, {}x{} grid)",
        written_to.display(),
        collage.artifact.mime(),
        collage.plan.columns,
        collage.plan.rows
    )];
    for (i, placement) in collage.placements.iter().enumerate() {
        let source = sources
            .get(i)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let line = match placement {
            Ok(placed) => format!(
                "    {:03} ({}, {}) {}",
                i + 1,
                placed.row + 1,
                placed.column + 1,
                source
            ),
            Err(reason) => format!("    {:03} skipped: {} {}", i + 1, reason, source),
        };
        lines.push(line.trim_end().to_string());
    }
    lines.push(format!(
        "Placed {} of {} images",
        collage.placed().count(),
        collage.placements.len()
    ));
    lines
}

pub fn print_collage(collage: &Collage, written_to: &Path, sources: &[PathBuf]) {
    for line in format_collage(collage, written_to, sources) {
        println!("{}", line);
    }
}

/// Lines describing a grid plan for `count` images.
pub fn format_plan(count: usize, plan: Option<GridPlan>) -> Vec<String> {
    match plan {
        None => vec![format!("{count} images: no grid")],
        Some(plan) => vec![format!(
            "{} images: {} columns x {} rows ({} cells, {} empty)",
            count,
            plan.columns,
            plan.rows,
            plan.capacity(),
            plan.capacity() - count
        )],
    }
}

pub fn print_plan(count: usize, plan: Option<GridPlan>) {
    for line in format_plan(count, plan) {
        println!("{}", line);
    }
}
