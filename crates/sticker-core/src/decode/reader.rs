//! Byte-buffer decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{ColorDepth, DecodeError, Orientation, SourceImage};

/// Decode an image of any compiled-in format (PNG, JPEG, GIF, WebP, BMP,
/// TIFF) from bytes, applying EXIF orientation correction.
///
/// The pixel data is converted to RGBA8. The layout of the original encoding
/// is kept in [`SourceImage::color`].
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be detected.
/// Returns `DecodeError::CorruptedFile` if the data is truncated or malformed.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let orientation = read_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(|e| match e {
        image::ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let color = ColorDepth::from_color_type(img.color());
    let oriented = apply_orientation(img, orientation);

    Ok(SourceImage::from_rgba_image(oriented.into_rgba8(), color))
}

/// Read the EXIF orientation tag.
///
/// Returns `Orientation::Normal` when the container has no EXIF block or the
/// tag is missing.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gradient_image, jpeg_bytes, png_bytes, with_exif_orientation};

    fn red_green_strip() -> DynamicImage {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(&gradient_image(40, 30));
        let img = decode_image(&bytes).unwrap();

        assert_eq!(img.width, 40);
        assert_eq!(img.height, 30);
        assert_eq!(img.pixels.len(), 40 * 30 * 4);
        assert_eq!(img.color, ColorDepth::RGB8);
    }

    #[test]
    fn test_decode_png_pixels_preserved() {
        let source = gradient_image(8, 8);
        let img = decode_image(&png_bytes(&source)).unwrap();
        assert_eq!(img.pixels, source.pixels);
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = jpeg_bytes(&gradient_image(64, 48), 90);
        let img = decode_image(&bytes).unwrap();

        assert_eq!((img.width, img.height), (64, 48));
        assert!(!img.color.has_alpha);
    }

    #[test]
    fn test_decode_rgba_png_reports_alpha() {
        let mut out = Vec::new();
        image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 40]))
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();

        let img = decode_image(&out).unwrap();
        assert_eq!(img.color, ColorDepth::RGBA8);
        assert_eq!(&img.pixels[0..4], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_decode_garbage_is_invalid_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(&gradient_image(32, 32));
        let result = decode_image(&bytes[..40]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        let bytes = jpeg_bytes(&gradient_image(4, 4), 90);
        assert_eq!(read_orientation(&bytes), Orientation::Normal);
        assert_eq!(read_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_read_orientation_from_exif() {
        let jpeg = jpeg_bytes(&gradient_image(8, 8), 90);
        for (tag, expected) in [
            (1, Orientation::Normal),
            (3, Orientation::Rotate180),
            (6, Orientation::Rotate90CW),
            (8, Orientation::Rotate270CW),
        ] {
            assert_eq!(read_orientation(&with_exif_orientation(&jpeg, tag)), expected);
        }
    }

    #[test]
    fn test_decode_applies_exif_rotation() {
        let bytes = with_exif_orientation(&jpeg_bytes(&gradient_image(64, 48), 90), 6);
        let img = decode_image(&bytes).unwrap();

        assert_eq!((img.width, img.height), (48, 64));
        assert_eq!(img.pixels.len(), 48 * 64 * 4);

        // Rotating 90 CW brings the source's bottom-left corner to the top-left
        let (r, g) = (img.pixels[0], img.pixels[1]);
        assert!(r < 60, "red {r}");
        assert!(g > 180, "green {g}");
    }

    #[test]
    fn test_decode_ignores_normal_exif() {
        let bytes = with_exif_orientation(&jpeg_bytes(&gradient_image(64, 48), 90), 1);
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (64, 48));
    }

    #[test]
    fn test_apply_orientation_normal() {
        let result = apply_orientation(red_green_strip(), Orientation::Normal).into_rgb8();
        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let result = apply_orientation(red_green_strip(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let result = apply_orientation(red_green_strip(), Orientation::Rotate180).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let result =
            apply_orientation(red_green_strip(), Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
