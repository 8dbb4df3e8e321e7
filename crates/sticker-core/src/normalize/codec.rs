//! Codec capability used by the normalizer.
//!
//! The shrink loop only needs "bytes to raster" and "raster to bytes"; hiding
//! them behind [`ImageCodec`] lets tests drive the loop with a mock whose
//! output sizes are known in advance.

use crate::decode::{decode_image, DecodeError, SourceImage};
use crate::encode::{encode_image, EncodeError, OutputFormat};

pub trait ImageCodec: Sync {
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, DecodeError>;

    /// `quality` is normalized to 0.0-1.0 and ignored by lossless formats.
    fn encode(
        &self,
        image: &SourceImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Pure-Rust codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCodec;

impl ImageCodec for RustCodec {
    fn decode(&self, bytes: &[u8]) -> Result<SourceImage, DecodeError> {
        decode_image(bytes)
    }

    fn encode(
        &self,
        image: &SourceImage,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        encode_image(image, format, quality)
    }
}
