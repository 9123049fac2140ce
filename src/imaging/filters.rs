//! Pixel filter math for style previews.
//!
//! All functions here are pure and operate on flat RGBA8 buffers — no I/O,
//! no codecs, no allocation. The backend decodes an image, hands the raw
//! bytes to [`apply_filters`], and re-encodes the result.
//!
//! # Adjustment model
//!
//! Three sliders, each an integer in `[-100, 100]` where 0 is neutral:
//!
//! | Step | Formula (per R/G/B channel) |
//! |------|-----------------------------|
//! | 1. Brightness | `c * (b + 100) / 100` |
//! | 2. Contrast   | `c * f + 128 * (1 - f)` with `f = (k + 100) / 100` |
//! | 3. Saturation | `luma + (c - luma) * (s + 100) / 100` |
//!
//! The steps run in that fixed order and each one is skipped when its
//! parameter is 0. Saturation pivots around the BT.601 luma of the pixel
//! *after* brightness and contrast have been applied — reordering the steps
//! produces different output, and tests pin the sequencing down.
//!
//! # Clamping
//!
//! Each step clamps its result to `[0, 255]` and rounds to the nearest
//! integer before writing the channel back, so the next step reads a valid
//! 8-bit value. Intermediate results are never allowed to wrap.

/// BT.601 luma weights — the saturation pivot.
const LUMA_R: f32 = 0.2989;
const LUMA_G: f32 = 0.5870;
const LUMA_B: f32 = 0.1140;

/// Brightness/contrast/saturation adjustments, each in `[-100, 100]`.
///
/// Values outside the range are clamped on construction. The default is
/// neutral (all zeros), which leaves pixels untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterParams {
    brightness: i32,
    contrast: i32,
    saturation: i32,
}

impl FilterParams {
    pub fn new(brightness: i32, contrast: i32, saturation: i32) -> Self {
        Self {
            brightness: brightness.clamp(-100, 100),
            contrast: contrast.clamp(-100, 100),
            saturation: saturation.clamp(-100, 100),
        }
    }

    pub fn brightness(self) -> i32 {
        self.brightness
    }

    pub fn contrast(self) -> i32 {
        self.contrast
    }

    pub fn saturation(self) -> i32 {
        self.saturation
    }

    /// True when every adjustment is 0 and [`apply_filters`] is a no-op.
    pub fn is_neutral(self) -> bool {
        self == Self::default()
    }
}

/// Scale factor for a slider value: -100 → 0.0, 0 → 1.0, 100 → 2.0.
fn factor(value: i32) -> f32 {
    (value as f32 + 100.0) / 100.0
}

/// Clamp a channel result to the valid 8-bit range and round.
fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Apply brightness, contrast, and saturation to an RGBA8 buffer in place.
///
/// `pixels` is row-major RGBA, length `width * height * 4`. Alpha is never
/// touched. A trailing partial pixel (length not a multiple of 4) is left
/// as-is.
pub fn apply_filters(pixels: &mut [u8], params: FilterParams) {
    if params.brightness != 0 {
        let f = factor(params.brightness);
        for px in pixels.chunks_exact_mut(4) {
            for c in px.iter_mut().take(3) {
                *c = quantize(*c as f32 * f);
            }
        }
    }

    if params.contrast != 0 {
        let f = factor(params.contrast);
        let intercept = 128.0 * (1.0 - f);
        for px in pixels.chunks_exact_mut(4) {
            for c in px.iter_mut().take(3) {
                *c = quantize(*c as f32 * f + intercept);
            }
        }
    }

    if params.saturation != 0 {
        let f = factor(params.saturation);
        for px in pixels.chunks_exact_mut(4) {
            let luma =
                LUMA_R * px[0] as f32 + LUMA_G * px[1] as f32 + LUMA_B * px[2] as f32;
            for c in px.iter_mut().take(3) {
                *c = quantize(luma + (*c as f32 - luma) * f);
            }
        }
    }
}
