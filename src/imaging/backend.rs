//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the batch pipeline and
//! the codecs. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust codecs from
//! the `image` crate, statically linked into the binary. Tests swap in a
//! recording mock.

use super::params::PreviewParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Trait for image processing backends.
///
/// `Sync` so the batch pipeline can share one backend across rayon workers.
pub trait ImageBackend: Sync {
    /// Execute a preview: decode the source, apply the filters, encode the
    /// artifact to `params.output`.
    fn preview(&self, params: &PreviewParams) -> Result<(), BackendError>;
}
