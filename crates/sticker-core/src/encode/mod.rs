//! Image encoding for the normalization pipeline.
//!
//! This module provides:
//! - PNG encoding at maximum compression effort (the full-quality output)
//! - JPEG encoding with a quality parameter (the lossy fallback)
//! - [`encode_image`], which dispatches on [`OutputFormat`] with a
//!   normalized 0.0-1.0 quality
//!
//! # Example
//!
//! ```ignore
//! use sticker_core::encode::{encode_image, OutputFormat};
//!
//! let png = encode_image(&image, OutputFormat::Png, 1.0)?;
//! let jpeg = encode_image(&image, OutputFormat::Jpeg, 0.6)?;
//! ```

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{SourceImage, RGBA_CHANNELS};

pub use jpeg::{encode_jpeg, quality_to_jpeg};
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec backend failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },
}

/// Output container of an [`EncodedImage`](crate::normalize::EncodedImage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode an image in the requested format.
///
/// `quality` is normalized to 0.0-1.0. PNG is lossless and ignores it.
pub fn encode_image(
    image: &SourceImage,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png => encode_png(image),
        OutputFormat::Jpeg => encode_jpeg(image, quality_to_jpeg(quality)),
    }
}

/// Shared input validation for the encoders.
fn check_raster(image: &SourceImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.width as usize * image.height as usize * RGBA_CHANNELS;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    Ok(())
}
