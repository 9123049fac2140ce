//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, WebP) | `image` crate (pure Rust decoders) |
//! | Filter | [`filters::apply_filters`](super::filters::apply_filters) on the raw RGBA buffer |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! Previews are always encoded as JPEG: the artifact is a throwaway style
//! test meant for quick viewing and download, and JPEG at quality 90 is what
//! the generation service itself produces.

use super::backend::{BackendError, ImageBackend};
use super::filters;
use super::params::PreviewParams;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Extensions whose decoders are compiled in — the same set the generation
/// service accepts for upload.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// True if the path has a supported image extension (case-insensitive).
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| BackendError::Decode(format!("{}: {}", path.display(), e)))
}

/// Encode as JPEG. The filter buffer is RGBA; JPEG has no alpha channel, so
/// the image is flattened to RGB first (alpha is discarded, matching a
/// canvas `toDataURL("image/jpeg")` export).
fn save_jpeg(img: &image::RgbaImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality as u8);
    encoder
        .encode_image(&rgb)
        .map_err(|e| BackendError::Encode(format!("{}: {}", path.display(), e)))
}

impl ImageBackend for RustBackend {
    fn preview(&self, params: &PreviewParams) -> Result<(), BackendError> {
        let mut rgba = load_image(&params.source)?.to_rgba8();
        filters::apply_filters(rgba.as_mut(), params.filters);
        save_jpeg(&rgba, &params.output, params.quality.value())
    }
}
