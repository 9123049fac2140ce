//! High-level preview operations.
//!
//! These functions decide output naming, build [`PreviewParams`], and call
//! the backend.

use super::backend::{BackendError, ImageBackend};
use super::filters::FilterParams;
use super::params::{PreviewParams, Quality};
use std::path::{Path, PathBuf};

/// Result type for preview operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Configuration for preview generation, shared across a batch.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub filters: FilterParams,
    pub quality: Quality,
    /// Suffix appended to the source stem: `photo.png` → `photo-preview.jpg`.
    pub suffix: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            filters: FilterParams::default(),
            quality: Quality::default(),
            suffix: "preview".to_string(),
        }
    }
}

/// Output filename for a source stem: `{stem}-{suffix}.jpg`.
pub fn preview_filename(stem: &str, suffix: &str) -> String {
    format!("{}-{}.jpg", stem, suffix)
}

/// Plan a preview operation without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_preview(source: &Path, output_dir: &Path, config: &PreviewConfig) -> PreviewParams {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");

    PreviewParams {
        source: source.to_path_buf(),
        output: output_dir.join(preview_filename(stem, &config.suffix)),
        filters: config.filters,
        quality: config.quality,
    }
}

/// Create a preview artifact for one source image.
///
/// Returns the output path on success.
pub fn create_preview(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    config: &PreviewConfig,
) -> Result<PathBuf> {
    let params = plan_preview(source, output_dir, config);
    backend.preview(&params)?;
    Ok(params.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;

    #[test]
    fn preview_filename_appends_suffix() {
        assert_eq!(preview_filename("001-shoe", "preview"), "001-shoe-preview.jpg");
        assert_eq!(preview_filename("banner", "test"), "banner-test.jpg");
    }

    #[test]
    fn plan_preview_builds_output_path_from_stem() {
        let params = plan_preview(
            Path::new("/photos/001-shoe.png"),
            Path::new("/out"),
            &PreviewConfig::default(),
        );

        assert_eq!(params.source, Path::new("/photos/001-shoe.png"));
        assert_eq!(params.output, Path::new("/out/001-shoe-preview.jpg"));
        assert_eq!(params.quality.value(), 90);
    }

    #[test]
    fn plan_preview_carries_filters_and_custom_suffix() {
        let config = PreviewConfig {
            filters: FilterParams::new(-10, 20, -30),
            quality: Quality::new(80),
            suffix: "styled".to_string(),
        };
        let params = plan_preview(Path::new("shot.jpg"), Path::new("out"), &config);

        assert_eq!(params.output, Path::new("out/shot-styled.jpg"));
        assert_eq!(params.filters, FilterParams::new(-10, 20, -30));
        assert_eq!(params.quality.value(), 80);
    }

    #[test]
    fn create_preview_invokes_backend_and_returns_output() {
        let backend = MockBackend::new();
        let output = create_preview(
            &backend,
            Path::new("/photos/shot.jpg"),
            Path::new("/out"),
            &PreviewConfig::default(),
        )
        .unwrap();

        assert_eq!(output, Path::new("/out/shot-preview.jpg"));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].source, "/photos/shot.jpg");
        assert_eq!(ops[0].quality, 90);
    }
}
