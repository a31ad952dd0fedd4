//! Aspect-preserving downscaling.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Dimensions after constraining to `max_width`, or `None` when the image
/// already fits (no upscaling, ever).
///
/// Height scales by `max_width / width` and truncates to an integer, with a
/// floor of one pixel for degenerate aspect ratios.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> Option<(u32, u32)> {
    if width <= max_width {
        return None;
    }
    let ratio = f64::from(max_width) / f64::from(width);
    let new_height = ((f64::from(height) * ratio) as u32).max(1);
    Some((max_width, new_height))
}

/// Downscales to fit `max_width` using Lanczos3, or returns `None` when no
/// resize is needed.
#[must_use]
pub fn shrink_to_width(image: &RgbImage, max_width: u32) -> Option<RgbImage> {
    target_dimensions(image.width(), image.height(), max_width)
        .map(|(w, h)| imageops::resize(image, w, h, FilterType::Lanczos3))
}
