//! Shared fixtures for unit tests.

use crate::decode::{ColorDepth, SourceImage};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Horizontal/vertical gradient: R follows x, G follows y, B is constant.
pub fn gradient_image(width: u32, height: u32) -> SourceImage {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push(((x * 255) / width.max(1)) as u8);
            pixels.push(((y * 255) / height.max(1)) as u8);
            pixels.push(128);
            pixels.push(255);
        }
    }
    SourceImage::new(width, height, pixels, ColorDepth::RGB8)
}

/// Flat single-color image.
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> SourceImage {
    let pixels = [rgb[0], rgb[1], rgb[2], 255].repeat((width * height) as usize);
    SourceImage::new(width, height, pixels, ColorDepth::RGB8)
}

/// Deterministic pseudo-random noise; compresses badly in PNG.
pub fn noise_image(width: u32, height: u32, seed: u64) -> SourceImage {
    let mut state = seed | 1;
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let bytes = state.to_le_bytes();
        pixels.extend_from_slice(&[bytes[0], bytes[1], bytes[2], 255]);
    }
    SourceImage::new(width, height, pixels, ColorDepth::RGB8)
}

/// Encode an image as an RGB PNG file.
pub fn png_bytes(image: &SourceImage) -> Vec<u8> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            &image.to_rgb_pixels(),
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .unwrap();
    out
}

/// Encode an image as a JPEG file.
pub fn jpeg_bytes(image: &SourceImage, quality: u8) -> Vec<u8> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(
            &image.to_rgb_pixels(),
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .unwrap();
    out
}

/// Noise with a random alpha channel; compresses badly even as RGBA PNG.
pub fn translucent_noise_image(width: u32, height: u32, seed: u64) -> SourceImage {
    let mut state = seed | 1;
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        pixels.extend_from_slice(&state.to_le_bytes()[..4]);
    }
    SourceImage::new(width, height, pixels, ColorDepth::RGBA8)
}

/// Insert an APP1 `Exif` segment carrying only an Orientation tag right
/// after the SOI marker of `jpeg`.
pub fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    assert_eq!(&jpeg[0..2], &[0xFF, 0xD8], "not a JPEG");

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A"); // big-endian TIFF header
    tiff.extend_from_slice(&8u32.to_be_bytes()); // IFD0 offset
    tiff.extend_from_slice(&1u16.to_be_bytes()); // entry count
    tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
    tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
    tiff.extend_from_slice(&1u32.to_be_bytes()); // count
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]); // value padding
    tiff.extend_from_slice(&0u32.to_be_bytes()); // no next IFD

    let segment_len = (2 + 6 + tiff.len()) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + segment_len as usize + 2);
    out.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\x00\x00");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}
