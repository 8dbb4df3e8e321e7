//! Resampling to the planned output size.
//!
//! Uses the `image` crate's separable filters on a borrowed view of the
//! source, so the only allocation is the output raster.

use crate::decode::{FilterType, SourceImage, RGBA_CHANNELS};
use crate::geometry::{GeometryError, TargetSize};

/// Resize an image to exact dimensions.
///
/// Matching dimensions return a clone without resampling.
///
/// # Errors
///
/// `UnsupportedGeometry` for an empty source or target, and
/// `PixelBufferMismatch` when the pixel buffer does not match the declared
/// dimensions.
pub fn resize(
    image: &SourceImage,
    target: TargetSize,
    filter: FilterType,
) -> Result<SourceImage, GeometryError> {
    if target.width == 0 || target.height == 0 {
        return Err(GeometryError::UnsupportedGeometry {
            width: target.width,
            height: target.height,
        });
    }
    if image.width == 0 || image.height == 0 {
        return Err(GeometryError::UnsupportedGeometry {
            width: image.width,
            height: image.height,
        });
    }

    if image.width == target.width && image.height == target.height {
        return Ok(image.clone());
    }

    let view = image
        .as_rgba_view()
        .ok_or(GeometryError::PixelBufferMismatch {
            expected: image.pixel_count() as usize * RGBA_CHANNELS,
            actual: image.pixels.len(),
        })?;

    let resized = image::imageops::resize(
        &view,
        target.width,
        target.height,
        filter.to_image_filter(),
    );

    Ok(SourceImage::from_rgba_image(resized, image.color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorDepth;
    use crate::test_support::{gradient_image, solid_image};

    #[test]
    fn test_resize_exact_dimensions() {
        let img = gradient_image(100, 50);
        let out = resize(&img, TargetSize { width: 40, height: 30 }, FilterType::Bilinear).unwrap();

        assert_eq!((out.width, out.height), (40, 30));
        assert_eq!(out.pixels.len(), 40 * 30 * 4);
    }

    #[test]
    fn test_resize_same_size_is_identity() {
        let img = gradient_image(64, 64);
        let out = resize(&img, TargetSize::square(64), FilterType::Lanczos3).unwrap();
        assert_eq!(out.pixels, img.pixels);
    }

    #[test]
    fn test_resize_enlarges() {
        let img = gradient_image(10, 10);
        let out = resize(&img, TargetSize::square(100), FilterType::Bilinear).unwrap();
        assert_eq!((out.width, out.height), (100, 100));
    }

    #[test]
    fn test_resize_preserves_solid_color() {
        let img = solid_image(50, 50, [200, 100, 50]);
        for filter in [FilterType::Bilinear, FilterType::Lanczos3] {
            let out = resize(&img, TargetSize::square(17), filter).unwrap();
            for px in out.pixels.chunks_exact(4) {
                assert!((px[0] as i32 - 200).abs() <= 1);
                assert!((px[1] as i32 - 100).abs() <= 1);
                assert!((px[2] as i32 - 50).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_resize_keeps_color_depth() {
        let mut img = gradient_image(8, 8);
        img.color = ColorDepth::RGBA8;
        let out = resize(&img, TargetSize::square(4), FilterType::Bilinear).unwrap();
        assert!(out.color.has_alpha);
    }

    #[test]
    fn test_resize_zero_target() {
        let img = gradient_image(10, 10);
        let result = resize(&img, TargetSize { width: 0, height: 5 }, FilterType::Bilinear);
        assert!(matches!(
            result,
            Err(GeometryError::UnsupportedGeometry { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_resize_short_buffer() {
        let img = SourceImage {
            width: 10,
            height: 10,
            pixels: vec![0; 12],
            color: ColorDepth::RGB8,
        };
        let result = resize(&img, TargetSize::square(5), FilterType::Bilinear);
        assert!(matches!(
            result,
            Err(GeometryError::PixelBufferMismatch { expected: 400, actual: 12 })
        ));
    }
}
