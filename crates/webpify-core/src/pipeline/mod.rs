//! Per-image optimization pipeline.
//!
//! A linear transform over one decoded image: normalize the color mode,
//! downscale to the width bound, encode as lossy WebP. Decoding and file
//! I/O live in the adapters; this module is pure and synchronous.

mod encode;
mod normalize;
mod resize;

pub use encode::encode_webp;
pub use normalize::to_opaque_rgb;
pub use resize::{shrink_to_width, target_dimensions};

use image::DynamicImage;

use crate::domain::{OptimizeError, OptimizeOptions};

/// Encoded output of one pipeline run.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// WebP bytes ready to be written.
    pub bytes: Vec<u8>,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Whether the image was downscaled.
    pub resized: bool,
}

/// Applies normalize → resize → encode with a fixed set of options.
#[derive(Debug, Clone)]
pub struct Optimizer {
    options: OptimizeOptions,
}

impl Optimizer {
    /// Creates an optimizer. `options.max_width` must be positive and
    /// `options.quality` within 0-100; callers validate at the boundary.
    #[must_use]
    pub const fn new(options: OptimizeOptions) -> Self {
        Self { options }
    }

    /// The options this optimizer was built with.
    #[must_use]
    pub const fn options(&self) -> &OptimizeOptions {
        &self.options
    }

    /// Runs the pipeline on a decoded image.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::Encode`] when encoding fails; normalization
    /// and resizing are infallible.
    pub fn optimize(&self, image: DynamicImage) -> Result<EncodedImage, OptimizeError> {
        let rgb = to_opaque_rgb(image);

        let (rgb, resized) = match shrink_to_width(&rgb, self.options.max_width) {
            Some(smaller) => (smaller, true),
            None => (rgb, false),
        };

        let bytes = encode_webp(&rgb, self.options.quality)?;

        Ok(EncodedImage {
            width: rgb.width(),
            height: rgb.height(),
            resized,
            bytes,
        })
    }
}
