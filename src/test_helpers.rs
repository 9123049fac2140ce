//! Shared test utilities for the promoshot test suite.
//!
//! Image fixtures are generated on the fly — no binary files checked in.

use std::path::Path;

/// Write a solid-color test image; the format is inferred from the
/// extension (`.jpg`, `.png`, ...). Parent directories are created.
pub fn write_solid_image(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::from_pixel(width, height, image::Rgb(rgb))
        .save(path)
        .unwrap();
}

/// Write a file with an image extension that no decoder will accept.
pub fn write_corrupt_image(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"not an image at all").unwrap();
}
