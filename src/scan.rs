//! Input collection for batch commands.
//!
//! `preview` and `generate` accept a mix of image files and directories on
//! the command line. This module expands that list into a flat, ordered set
//! of source images:
//!
//! - Explicitly listed files keep their command-line order.
//! - Directories are expanded in place; the images found inside are sorted
//!   by path so runs are deterministic. Top-level only unless `recursive`.
//! - Only files with a supported extension are taken from directories;
//!   an explicitly listed file with an unsupported extension is an error
//!   (the user named it, so silently dropping it would hide a mistake).
//!
//! Missing paths fail the whole command up front — per-item error isolation
//! starts once decoding does, not before.

use crate::imaging::is_supported;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input not found: {0}")]
    NotFound(PathBuf),
    #[error("unsupported image format: {0} (expected jpg, jpeg, png, gif, or webp)")]
    UnsupportedFormat(PathBuf),
    #[error("no images found in the given inputs")]
    NoImages,
}

/// Expand files and directories into an ordered list of source images.
pub fn collect_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    let mut sources = Vec::new();

    for input in inputs {
        if !input.exists() {
            return Err(ScanError::NotFound(input.clone()));
        }
        if input.is_dir() {
            sources.extend(scan_directory(input, recursive)?);
        } else {
            if !is_supported(input) {
                return Err(ScanError::UnsupportedFormat(input.clone()));
            }
            sources.push(input.clone());
        }
    }

    if sources.is_empty() {
        return Err(ScanError::NoImages);
    }
    Ok(sources)
}

/// Collect supported images under a directory, sorted by path.
fn scan_directory(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut found = Vec::new();
    for entry in WalkDir::new(dir).max_depth(max_depth).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .map(ScanError::Io)
                .unwrap_or_else(|| ScanError::NotFound(dir.to_path_buf()))
        })?;
        if entry.file_type().is_file() && is_supported(entry.path()) {
            found.push(entry.path().to_path_buf());
        }
    }

    log::debug!("{}: {} images", dir.display(), found.len());
    Ok(found)
}
