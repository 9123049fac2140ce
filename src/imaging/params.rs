//! Parameter types for preview operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides where previews go) and the [`backend`](super::backend)
//! (which does the actual decode/filter/encode work). This separation allows
//! swapping backends (e.g. for testing with a mock) without changing
//! pipeline logic.

use super::filters::FilterParams;
use std::path::PathBuf;

/// JPEG encoding quality (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        // Matches the generation service's own JPEG output quality.
        Self(90)
    }
}

/// Full specification for one preview: source image, output path, the
/// adjustments to apply, and the encoding quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub filters: FilterParams,
    pub quality: Quality,
}
