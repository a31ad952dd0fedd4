//! Lossy WebP encoding via libwebp.

use image::RgbImage;
use webp::{Encoder, WebPConfig};

use crate::domain::OptimizeError;

/// libwebp compression method 6: slowest, smallest output.
const COMPRESSION_METHOD: i32 = 6;

/// Encodes opaque RGB pixels as lossy WebP at the given quality.
///
/// Output is deterministic for a fixed (pixels, quality) pair.
///
/// # Errors
///
/// Returns [`OptimizeError::Encode`] when libwebp rejects the configuration
/// or the pixel buffer.
pub fn encode_webp(image: &RgbImage, quality: u8) -> Result<Vec<u8>, OptimizeError> {
    let mut config = WebPConfig::new().map_err(|()| OptimizeError::Encode {
        reason: "libwebp configuration init failed".into(),
    })?;
    config.lossless = 0;
    config.quality = f32::from(quality);
    config.method = COMPRESSION_METHOD;

    let encoder = Encoder::from_rgb(image.as_raw(), image.width(), image.height());
    let memory = encoder
        .encode_advanced(&config)
        .map_err(|e| OptimizeError::Encode {
            reason: format!("{e:?}"),
        })?;

    Ok(memory.to_vec())
}
