//! Synthetic image builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

/// Builder for deterministic synthetic test images.
///
/// Every image is generated from pixel coordinates only, so repeated calls
/// produce identical pixels.
pub struct SyntheticImage;

impl SyntheticImage {
    /// Opaque RGB gradient. Smooth content that compresses well.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn opaque_gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                96,
            ])
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Uniform opaque RGB color.
    #[must_use]
    pub fn solid_rgb(width: u32, height: u32, r: u8, g: u8, b: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([r, g, b])))
    }

    /// Fully transparent RGBA image with a non-white underlying color.
    ///
    /// Useful for asserting that alpha flattening renders transparency
    /// as white rather than leaking the stored color.
    #[must_use]
    pub fn transparent_rgba(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([40, 90, 160, 0])))
    }

    /// RGBA image with a uniform partial alpha.
    #[must_use]
    pub fn semi_transparent_rgba(width: u32, height: u32, alpha: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([200, 40, 40, alpha]),
        ))
    }

    /// Pseudo-noise texture approximating photographic content.
    ///
    /// High-frequency detail makes encoded size respond to the quality
    /// setting, which smooth gradients do not.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn textured(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let h = hash_coords(x, y);
            Rgb([h as u8, (h >> 8) as u8, (h >> 16) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Grayscale gradient.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn grayscale_gradient(width: u32, height: u32) -> DynamicImage {
        let img = GrayImage::from_fn(width, height, |x, _| {
            Luma([((x * 255) / width.max(1)) as u8])
        });
        DynamicImage::ImageLuma8(img)
    }
}

/// Cheap deterministic coordinate hash (xorshift-style mix).
fn hash_coords(x: u32, y: u32) -> u32 {
    let mut v = x.wrapping_mul(0x9E37_79B9) ^ y.wrapping_mul(0x85EB_CA6B);
    v ^= v >> 13;
    v = v.wrapping_mul(0xC2B2_AE35);
    v ^ (v >> 16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn test_gradient_dimensions() {
        let img = SyntheticImage::opaque_gradient(100, 80);
        assert_eq!(img.dimensions(), (100, 80));
        assert!(!img.color().has_alpha());
    }

    #[test]
    fn test_transparent_is_fully_transparent() {
        let img = SyntheticImage::transparent_rgba(10, 10);
        let rgba = img.to_rgba8();
        assert!(rgba.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_textured_is_deterministic() {
        let a = SyntheticImage::textured(32, 32);
        let b = SyntheticImage::textured(32, 32);
        assert_eq!(a.to_rgb8().as_raw(), b.to_rgb8().as_raw());
    }

    #[test]
    fn test_textured_has_variation() {
        let rgb = SyntheticImage::textured(32, 32).to_rgb8();
        let first = rgb.get_pixel(0, 0);
        assert!(rgb.pixels().any(|p| p != first));
    }
}
