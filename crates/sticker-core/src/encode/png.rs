//! PNG encoding at maximum compression effort.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use super::{check_raster, EncodeError, OutputFormat};
use crate::decode::SourceImage;

/// Encode an image to PNG bytes with the best compression level and adaptive
/// row filtering.
///
/// Sources that were decoded without an alpha channel are written as RGB,
/// which saves a quarter of the raw data before compression.
pub fn encode_png(image: &SourceImage) -> Result<Vec<u8>, EncodeError> {
    check_raster(image)?;

    let mut buffer = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, FilterType::Adaptive);

    let result = if image.color.has_alpha {
        encoder.write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgba8,
        )
    } else {
        encoder.write_image(
            &image.to_rgb_pixels(),
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format: OutputFormat::Png,
        message: e.to_string(),
    })?;

    Ok(buffer)
}
