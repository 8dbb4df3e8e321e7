//! Sticker Core - Image normalization library
//!
//! This crate prepares uploaded photos for a sticker-generation model:
//! it decodes the upload, crops it square around the interesting region,
//! resizes it, and re-encodes it under the model's byte budget. It also
//! carries the small pieces of upload handling around that pipeline
//! (validation, size formatting, and a short-lived image store).

pub mod decode;
pub mod encode;
pub mod geometry;
pub mod normalize;
pub mod size;
pub mod store;
pub mod transform;
pub mod upload;

#[cfg(test)]
mod test_support;

pub use decode::{decode_image, DecodeError, FilterType, SourceImage};
pub use encode::{EncodeError, OutputFormat};
pub use geometry::{plan_geometry, Anchor, AnchorChooser, GeometryError, GeometryPlan};
pub use normalize::{
    normalize, EncodedImage, ImageCodec, NormalizeError, NormalizeOptions, Normalizer, RustCodec,
};
pub use size::{format_file_size, validate_size, DEFAULT_BYTE_BUDGET, SMALL_IMAGE_THRESHOLD};
pub use store::{ImageStore, StoredImage};
pub use upload::{validate_upload, UploadError, ALLOWED_IMAGE_TYPES, MAX_UPLOAD_BYTES};
