//! Image processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Filter** | [`filters::apply_filters`] — brightness/contrast/saturation on raw RGBA |
//! | **Preview** | decode → filter → encode JPEG |
//!
//! The module is split into:
//! - **Filters**: Pure pixel math (unit testable, no I/O)
//! - **Parameters**: Data structures describing preview operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining naming + backend

pub mod backend;
pub mod filters;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use filters::{FilterParams, apply_filters};
pub use operations::{PreviewConfig, create_preview, plan_preview};
pub use params::{PreviewParams, Quality};
pub use rust_backend::{RustBackend, SUPPORTED_EXTENSIONS, is_supported};
