//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte buffer is not in a format any compiled-in decoder recognizes.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The format was recognized but the data is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Filter type for resampling operations.
///
/// Only filters of bilinear quality or better are offered; nearest-neighbour
/// sampling produces visible aliasing on downscaled photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Color layout reported by the decoder before conversion to RGBA8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorDepth {
    /// Number of channels in the encoded source (1 = gray, 3 = RGB, ...).
    pub channels: u8,
    /// Bits stored per channel (8 or 16 for the supported formats, 32 for float).
    pub bits_per_channel: u8,
    /// Whether the source carries an alpha channel.
    pub has_alpha: bool,
}

impl ColorDepth {
    /// Plain 8-bit RGB, the layout of images produced inside the pipeline.
    pub const RGB8: ColorDepth = ColorDepth {
        channels: 3,
        bits_per_channel: 8,
        has_alpha: false,
    };

    /// 8-bit RGBA.
    pub const RGBA8: ColorDepth = ColorDepth {
        channels: 4,
        bits_per_channel: 8,
        has_alpha: true,
    };

    /// Describe an `image::ColorType`.
    pub fn from_color_type(color: image::ColorType) -> Self {
        let channels = color.channel_count();
        let bits_per_channel = (color.bits_per_pixel() / channels.max(1) as u16) as u8;
        Self {
            channels,
            bits_per_channel,
            has_alpha: color.has_alpha(),
        }
    }
}

/// Number of bytes per pixel in a [`SourceImage`] buffer.
pub const RGBA_CHANNELS: usize = 4;

/// A decoded raster. Pixels are always stored as RGBA8; the layout of the
/// original encoding is kept in `color` so encoders can drop the alpha
/// channel when the source never had one.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
    pub color: ColorDepth,
}

impl SourceImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>, color: ColorDepth) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * RGBA_CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
            color,
        }
    }

    /// Create a SourceImage from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage, color: ColorDepth) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
            color,
        }
    }

    /// Borrow the pixels as an image buffer without copying.
    pub fn as_rgba_view(&self) -> Option<image::ImageBuffer<image::Rgba<u8>, &[u8]>> {
        image::ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice())
    }

    /// Copy the pixels into an RGB buffer, discarding alpha.
    pub fn to_rgb_pixels(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixel_count() as usize * 3);
        for px in self.pixels.chunks_exact(RGBA_CHANNELS) {
            rgb.extend_from_slice(&px[..3]);
        }
        rgb
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
