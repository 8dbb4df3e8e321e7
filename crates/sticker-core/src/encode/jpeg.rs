//! JPEG encoding for the lossy fallback attempt.
//!
//! JPEG has no alpha channel, so sources that carried one are composited
//! onto white first.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{check_raster, EncodeError, OutputFormat};
use crate::decode::{SourceImage, RGBA_CHANNELS};

/// Map a normalized 0.0-1.0 quality onto the JPEG 1-100 scale.
pub fn quality_to_jpeg(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 100;
    }
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode an image to JPEG bytes.
///
/// # Quality Guidelines
///
/// * 90-100: High quality
/// * 60-80: Medium quality, acceptable for upload to a generation model
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &SourceImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    check_raster(image)?;

    let quality = quality.clamp(1, 100);
    let rgb = if image.color.has_alpha {
        flatten_onto_white(image)
    } else {
        image.to_rgb_pixels()
    };

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Jpeg,
            message: e.to_string(),
        })?;

    Ok(buffer)
}

/// RGB pixels composited over a white background.
fn flatten_onto_white(image: &SourceImage) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(image.pixel_count() as usize * 3);
    for px in image.pixels.chunks_exact(RGBA_CHANNELS) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}
