//! Validation of user uploads before they reach the normalizer.

use thiserror::Error;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted for upload.
pub const ALLOWED_IMAGE_TYPES: [&str; 7] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
    "image/tiff",
];

/// Why an upload was rejected. Display strings are shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("File size must be less than {}MB", .max_bytes / (1024 * 1024))]
    TooLarge { max_bytes: u64 },

    #[error("Please upload a valid image file (JPEG, PNG, GIF, WebP, BMP, or TIFF)")]
    UnsupportedType(String),
}

/// Check an upload's size and declared MIME type. Size is checked first.
pub fn validate_upload(size: u64, mime_type: &str) -> Result<(), UploadError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            max_bytes: MAX_UPLOAD_BYTES,
        });
    }

    if !ALLOWED_IMAGE_TYPES.iter().any(|allowed| *allowed == mime_type) {
        return Err(UploadError::UnsupportedType(mime_type.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ALLOWED_IMAGE_TYPES {
            assert_eq!(validate_upload(1024, mime), Ok(()));
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_upload(MAX_UPLOAD_BYTES, "image/png").is_ok());
        assert_eq!(
            validate_upload(MAX_UPLOAD_BYTES + 1, "image/png"),
            Err(UploadError::TooLarge {
                max_bytes: MAX_UPLOAD_BYTES
            })
        );
    }

    #[test]
    fn test_rejects_other_types() {
        for mime in ["image/svg+xml", "application/pdf", "", "IMAGE/PNG"] {
            assert_eq!(
                validate_upload(10, mime),
                Err(UploadError::UnsupportedType(mime.to_string()))
            );
        }
    }

    #[test]
    fn test_size_checked_before_type() {
        assert!(matches!(
            validate_upload(MAX_UPLOAD_BYTES * 2, "text/plain"),
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_messages() {
        let too_large = UploadError::TooLarge {
            max_bytes: MAX_UPLOAD_BYTES,
        };
        assert_eq!(too_large.to_string(), "File size must be less than 10MB");

        let bad_type = UploadError::UnsupportedType("text/plain".into());
        assert_eq!(
            bad_type.to_string(),
            "Please upload a valid image file (JPEG, PNG, GIF, WebP, BMP, or TIFF)"
        );
    }
}
