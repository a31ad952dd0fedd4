//! Color mode normalization.
//!
//! WebP output here is always opaque RGB, so any alpha channel is flattened
//! onto a white background before encoding. This is a deliberate, lossy
//! policy choice: fully transparent regions render as white.

use image::{DynamicImage, RgbImage};

/// Converts a decoded image to opaque 8-bit RGB.
///
/// Images carrying alpha are composited onto white; all other modes
/// (grayscale, palette, 16-bit) convert through the standard channel
/// conversions.
#[must_use]
pub fn to_opaque_rgb(image: DynamicImage) -> RgbImage {
    if image.color().has_alpha() {
        flatten_onto_white(&image.into_rgba8())
    } else {
        image.into_rgb8()
    }
}

/// Alpha-composites an RGBA image over an opaque white background.
fn flatten_onto_white(rgba: &image::RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        image::Rgb([blend_white(r, a), blend_white(g, a), blend_white(b, a)])
    })
}

/// `c * a + 255 * (1 - a)` in integer arithmetic, rounded.
#[allow(clippy::cast_possible_truncation)]
fn blend_white(channel: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    let c = u32::from(channel);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn test_fully_transparent_becomes_white() {
        let rgba = RgbaImage::from_pixel(4, 4, Rgba([10, 200, 30, 0]));
        let rgb = to_opaque_rgb(DynamicImage::ImageRgba8(rgba));

        for pixel in rgb.pixels() {
            assert_eq!(pixel.0, [255, 255, 255]);
        }
    }

    #[test]
    fn test_opaque_alpha_keeps_color() {
        let rgba = RgbaImage::from_pixel(4, 4, Rgba([10, 200, 30, 255]));
        let rgb = to_opaque_rgb(DynamicImage::ImageRgba8(rgba));

        for pixel in rgb.pixels() {
            assert_eq!(pixel.0, [10, 200, 30]);
        }
    }

    #[test]
    fn test_half_transparent_blends_toward_white() {
        let rgba = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let rgb = to_opaque_rgb(DynamicImage::ImageRgba8(rgba));

        // Black at ~50% alpha over white lands near mid-gray.
        let [r, g, b] = rgb.get_pixel(0, 0).0;
        assert!((126..=129).contains(&r));
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_grayscale_passes_through_as_rgb() {
        let gray = GrayImage::from_pixel(3, 3, Luma([77]));
        let rgb = to_opaque_rgb(DynamicImage::ImageLuma8(gray));

        assert_eq!(rgb.dimensions(), (3, 3));
        for pixel in rgb.pixels() {
            assert_eq!(pixel.0, [77, 77, 77]);
        }
    }

    #[test]
    fn test_rgb_is_unchanged() {
        let rgb_in = RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
        let rgb = to_opaque_rgb(DynamicImage::ImageRgb8(rgb_in.clone()));
        assert_eq!(rgb, rgb_in);
    }
}
