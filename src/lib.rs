//! # Promoshot
//!
//! A terminal client for a product-photo → marketing-image generation
//! service, with an offline preview mode. Point it at a pile of product
//! shots, dial in brightness/contrast/saturation, and either test the look
//! locally (no network) or send the images to the generation service and
//! collect the results.
//!
//! # Architecture: Two Paths, One Pipeline Shape
//!
//! ```text
//! preview    images → decode → filter → encode   (local, per item)
//! generate   images → upload → poll response → save artifact (remote, per item)
//! ```
//!
//! Both paths share the same batch discipline: items are processed
//! independently and in input order, a failure on one item is reported next
//! to that item and never aborts the rest, and the final report accounts for
//! every input.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Expands CLI files/directories into an ordered list of source images |
//! | [`imaging`] | Pure-Rust image work: filter math, decode/filter/encode backend |
//! | [`process`] | The offline preview batch — per-item outcomes, parallel via rayon |
//! | [`client`] | Generation-service HTTP client with explicit session context |
//! | [`config`] | `promoshot.toml` loading, validation, stock config generation |
//! | [`output`] | CLI output formatting — pure `format_*` functions + print wrappers |
//!
//! # Design Decisions
//!
//! ## Filters Are Pure Buffer Math
//!
//! The brightness/contrast/saturation transform lives in
//! [`imaging::filters`] as a function over a raw RGBA byte slice. No codec
//! types, no I/O — every numeric property of the transform is unit-tested
//! against hand-computed pixels. Codecs only appear at the
//! [`imaging::backend::ImageBackend`] seam, which also gives the batch
//! pipeline a mock for tests.
//!
//! ## Clamp Per Step
//!
//! Channel arithmetic can leave `[0, 255]` (contrast at +100 maps 200 to
//! 272). Each filter step clamps and rounds before writing back, so the
//! next step always reads valid 8-bit values and nothing ever wraps.
//!
//! ## Sessions Are Explicit
//!
//! The generation service correlates a conversation via `session_id` values
//! it returns. That state lives in a [`client::SessionContext`] the caller
//! owns and passes to every call — no globals, no hidden state, and tests
//! can construct any session shape directly.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and encoding use the `image` crate — pure Rust, statically
//! linked. No system dependencies to install, no version conflicts; the
//! binary is fully self-contained.

pub mod client;
pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
