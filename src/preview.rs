//! # Preview Scaler
//!
//! Produces a bounded-size copy of the final image for on-screen display.
//! The full-resolution image is never modified.

use image::{RgbImage, imageops::FilterType};

/// Default bound for the longest preview side, in pixels.
pub const DEFAULT_PREVIEW_MAX_DIM: u32 = 250;

/// Dimensions of a preview of a `width × height` image fitting in
/// `max_dim × max_dim`.
///
/// Each side is `floor(side × scale)` with `scale = min(max/w, max/h)`,
/// clamped to at least 1. Images smaller than the bound are scaled up.
pub fn preview_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_dim == 0 {
        return (1, 1);
    }

    // Integer math so the floor is exact
    let (w, h, max) = (width as u64, height as u64, max_dim as u64);
    let fit = |side: u64, bound: u64| ((side * max / bound) as u32).max(1);

    if w >= h {
        (max_dim, fit(h, w))
    } else {
        (fit(w, h), max_dim)
    }
}

/// Resample `img` to fit within `max_dim`, preserving aspect ratio.
///
/// Uses Lanczos3 so thin module boundaries survive heavy downscaling.
pub fn scale_preview(img: &RgbImage, max_dim: u32) -> RgbImage {
    let (width, height) = preview_dimensions(img.width(), img.height(), max_dim);
    if img.width() == 0 || img.height() == 0 {
        return RgbImage::new(width, height);
    }
    image::imageops::resize(img, width, height, FilterType::Lanczos3)
}
