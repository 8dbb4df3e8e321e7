//! Region extraction.
//!
//! Crop rectangles are in source pixels and must lie entirely inside the
//! image; the planner guarantees this, and [`crop_region`] re-checks it.

use crate::decode::{SourceImage, RGBA_CHANNELS};
use crate::geometry::{CropRect, GeometryError};

/// Check that `image` is non-empty and its buffer holds exactly
/// `width * height` RGBA pixels.
pub fn validate_raster(image: &SourceImage) -> Result<(), GeometryError> {
    if image.width == 0 || image.height == 0 {
        return Err(GeometryError::UnsupportedGeometry {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.pixel_count() as usize * RGBA_CHANNELS;
    if image.pixels.len() != expected {
        return Err(GeometryError::PixelBufferMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

/// Copy `rect` out of `image` into a new raster.
///
/// A rectangle covering the whole source returns a clone.
pub fn crop_region(image: &SourceImage, rect: CropRect) -> Result<SourceImage, GeometryError> {
    validate_raster(image)?;
    if !rect.fits_within(image.width, image.height) {
        return Err(GeometryError::InvalidCrop {
            rect,
            width: image.width,
            height: image.height,
        });
    }

    if rect == CropRect::full(image.width, image.height) {
        return Ok(image.clone());
    }

    let src_stride = image.width as usize * RGBA_CHANNELS;
    let row_len = rect.width as usize * RGBA_CHANNELS;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    // Rows are contiguous in both buffers, so copy a row at a time
    for y in rect.y..rect.y + rect.height {
        let start = y as usize * src_stride + rect.x as usize * RGBA_CHANNELS;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(SourceImage::new(rect.width, rect.height, output, image.color))
}
