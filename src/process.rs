//! The preview pipeline: decode → filter → encode, per source image.
//!
//! Takes an ordered list of source images and a single set of filter
//! parameters, and produces one JPEG artifact per source. Each item is
//! independent: a decode failure skips that image, the rest of the batch
//! continues, and the failure is carried in the report next to the item it
//! belongs to — never as a batch-level abort.
//!
//! ## Output structure
//!
//! ```text
//! previews/
//! ├── 001-shoe-preview.jpg
//! ├── 002-bag-preview.jpg
//! └── ...
//! ```
//!
//! ## Parallel processing
//!
//! Items are processed in parallel using [rayon](https://docs.rs/rayon).
//! Every item owns its pixel buffer and nothing is shared between workers,
//! so the report is identical to a sequential run; `collect` restores input
//! order.

use crate::imaging::{BackendError, ImageBackend, PreviewConfig, create_preview};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome for one source image: the artifact path, or why it was skipped.
#[derive(Debug)]
pub struct ItemReport {
    pub source: PathBuf,
    pub outcome: Result<PathBuf, BackendError>,
}

/// Per-item outcomes for a whole batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }
}

/// Generate previews for every source image.
///
/// Creates `output_dir` if needed. Per-item failures land in the report;
/// only failing to create the output directory aborts the batch.
pub fn preview_batch(
    backend: &impl ImageBackend,
    sources: &[PathBuf],
    output_dir: &Path,
    config: &PreviewConfig,
) -> Result<BatchReport, ProcessError> {
    std::fs::create_dir_all(output_dir)?;

    let items: Vec<ItemReport> = sources
        .par_iter()
        .map(|source| {
            let outcome = create_preview(backend, source, output_dir, config);
            match &outcome {
                Ok(output) => log::debug!("{} → {}", source.display(), output.display()),
                Err(e) => log::warn!("skipping {}: {}", source.display(), e),
            }
            ItemReport {
                source: source.clone(),
                outcome,
            }
        })
        .collect();

    Ok(BatchReport { items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::imaging::{FilterParams, Quality, RustBackend};
    use crate::test_helpers::{write_corrupt_image, write_solid_image};
    use tempfile::TempDir;

    fn sources(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn report_preserves_input_order() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();
        let inputs = sources(&["/in/c.jpg", "/in/a.jpg", "/in/b.jpg"]);

        let report = preview_batch(
            &backend,
            &inputs,
            tmp.path(),
            &PreviewConfig::default(),
        )
        .unwrap();

        let order: Vec<_> = report.items.iter().map(|i| i.source.clone()).collect();
        assert_eq!(order, inputs);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn one_bad_item_does_not_abort_the_batch() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::failing_on(vec![PathBuf::from("/in/bad.jpg")]);
        let inputs = sources(&["/in/good.jpg", "/in/bad.jpg", "/in/other.jpg"]);

        let report = preview_batch(
            &backend,
            &inputs,
            tmp.path(),
            &PreviewConfig::default(),
        )
        .unwrap();

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.items[0].outcome.is_ok());
        assert!(report.items[1].outcome.is_err());
        assert!(report.items[2].outcome.is_ok());
    }

    #[test]
    fn every_item_gets_the_same_filter_parameters() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();
        let config = PreviewConfig {
            filters: FilterParams::new(25, -10, 40),
            quality: Quality::new(85),
            ..PreviewConfig::default()
        };

        preview_batch(
            &backend,
            &sources(&["/in/a.jpg", "/in/b.jpg"]),
            tmp.path(),
            &config,
        )
        .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        for op in &ops {
            assert_eq!(op.brightness, 25);
            assert_eq!(op.contrast, -10);
            assert_eq!(op.saturation, 40);
            assert_eq!(op.quality, 85);
        }
    }

    #[test]
    fn artifacts_land_in_the_output_directory() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("previews");
        let backend = MockBackend::new();

        let report = preview_batch(
            &backend,
            &sources(&["/in/001-shoe.jpg"]),
            &out,
            &PreviewConfig::default(),
        )
        .unwrap();

        assert!(out.exists());
        assert_eq!(
            report.items[0].outcome.as_ref().unwrap(),
            &out.join("001-shoe-preview.jpg")
        );
    }

    #[test]
    fn end_to_end_with_real_backend() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("in/good.png");
        write_solid_image(&good, 10, 10, [120, 80, 40]);
        let bad = tmp.path().join("in/bad.jpg");
        write_corrupt_image(&bad);

        let out = tmp.path().join("previews");
        let report = preview_batch(
            &RustBackend::new(),
            &[good, bad],
            &out,
            &PreviewConfig {
                filters: FilterParams::new(0, 0, -100),
                ..PreviewConfig::default()
            },
        )
        .unwrap();

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(out.join("good-preview.jpg").exists());
        assert!(!out.join("bad-preview.jpg").exists());
    }
}
