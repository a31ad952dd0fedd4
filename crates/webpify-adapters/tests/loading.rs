//! Integration tests for source loading and output writing.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use image::codecs::gif::GifEncoder;
use image::{Frame, GenericImageView, Rgba, RgbaImage};
use webpify_adapters::{ensure_dir, load_source, write_output};
use webpify_core::domain::{AnimationPolicy, OptimizeError};
use webpify_test_support::SyntheticImage;

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    SyntheticImage::opaque_gradient(width, height)
        .save(&path)
        .unwrap();
    path
}

fn write_gif(dir: &Path, name: &str, frames: usize) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut encoder = GifEncoder::new(file);
    encoder
        .encode_frames((0..frames).map(|i| {
            #[allow(clippy::cast_possible_truncation)]
            let shade = (i * 40) as u8;
            Frame::new(RgbaImage::from_pixel(8, 8, Rgba([shade, shade, shade, 255])))
        }))
        .unwrap();
    path
}

#[test]
fn test_load_png_with_byte_size() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_png(temp.path(), "a.png", 32, 24);

    let (image, bytes) = load_source(&path, AnimationPolicy::First).unwrap();
    assert_eq!(image.dimensions(), (32, 24));
    assert_eq!(bytes, fs::metadata(&path).unwrap().len());
    assert!(bytes > 0);
}

#[test]
fn test_load_bmp() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("a.bmp");
    SyntheticImage::solid_rgb(10, 10, 1, 2, 3).save(&path).unwrap();

    let (image, _) = load_source(&path, AnimationPolicy::First).unwrap();
    assert_eq!(image.dimensions(), (10, 10));
}

#[test]
fn test_corrupt_file_is_decode_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("broken.png");
    fs::write(&path, b"definitely not a png").unwrap();

    let err = load_source(&path, AnimationPolicy::First).unwrap_err();
    assert!(matches!(err, OptimizeError::Decode { .. }));
}

#[test]
fn test_missing_file_is_decode_error() {
    let err = load_source(Path::new("/no/such/file.png"), AnimationPolicy::First).unwrap_err();
    assert!(matches!(err, OptimizeError::Decode { .. }));
}

#[test]
fn test_animated_gif_first_frame_policy() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_gif(temp.path(), "anim.gif", 3);

    let (image, _) = load_source(&path, AnimationPolicy::First).unwrap();
    assert_eq!(image.dimensions(), (8, 8));
    // First frame is the darkest one.
    assert_eq!(image.to_rgba8().get_pixel(0, 0).0[0], 0);
}

#[test]
fn test_animated_gif_rejected_by_policy() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_gif(temp.path(), "anim.gif", 2);

    let err = load_source(&path, AnimationPolicy::Reject).unwrap_err();
    assert!(matches!(err, OptimizeError::AnimatedInput { .. }));
}

#[test]
fn test_single_frame_gif_passes_reject_policy() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_gif(temp.path(), "still.gif", 1);

    let (image, _) = load_source(&path, AnimationPolicy::Reject).unwrap();
    assert_eq!(image.dimensions(), (8, 8));
}

#[test]
fn test_write_output_overwrites_existing() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("out.webp");
    fs::write(&path, b"old contents").unwrap();

    write_output(&path, b"new").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"new");
}

#[test]
fn test_write_output_to_missing_dir_is_write_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("missing").join("out.webp");

    let err = write_output(&path, b"bytes").unwrap_err();
    assert!(matches!(err, OptimizeError::Write { .. }));
}

#[test]
fn test_ensure_dir_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("a").join("b");

    ensure_dir(&dir).unwrap();
    ensure_dir(&dir).unwrap();
    assert!(dir.is_dir());
}
