//! Collects the ordered list of images for a collage from CLI arguments.
//!
//! Files are taken in the order given. Directories are walked recursively in
//! file-name order and contribute only files whose extension has a decoder
//! compiled in; anything else in them is ignored. Explicit files are never
//! filtered: an unreadable one simply ends up as a blank cell.

use crate::imaging::supported_extensions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Expand files and directories into the ordered list of image paths.
pub fn collect_image_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, InputError> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() && has_supported_extension(entry.path()) {
                    paths.push(entry.into_path());
                }
            }
        } else if input.is_file() {
            paths.push(input.clone());
        } else {
            return Err(InputError::NotFound(input.clone()));
        }
    }
    debug!(count = paths.len(), "collected image paths");
    Ok(paths)
}

/// Read every path into memory, preserving order.
pub fn read_images(paths: &[PathBuf]) -> Result<Vec<Vec<u8>>, InputError> {
    paths
        .iter()
        .map(|path| {
            std::fs::read(path).map_err(|source| InputError::Read {
                path: path.clone(),
                source,
            })
        })
        .collect()
}
