//! Size-constrained normalization.
//!
//! Decode, plan geometry, crop and resample, encode, then shrink until the
//! output fits the byte budget or the attempts run out:
//!
//! ```text
//! input ──▶ fast path? ──yes──▶ input unchanged
//!              │ no
//!              ▼
//!   decode ─▶ plan ─▶ crop ─▶ resize ─▶ encode ─▶ over budget? ─▶ shrink ─┐
//!                               ▲                                        │
//!                               └────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sticker_core::normalize::{normalize, NormalizeOptions};
//!
//! let sticker = normalize(&upload, &NormalizeOptions::default())?;
//! assert_eq!(sticker.width, sticker.height);
//! ```

mod codec;
mod options;
mod shrink;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::decode::{DecodeError, SourceImage};
use crate::encode::{EncodeError, OutputFormat};
use crate::geometry::{plan_geometry, AnchorChooser, ContentAwareChooser, GeometryError};
use crate::transform::{crop_region, resize, validate_raster};
use shrink::ShrinkState;

pub use codec::{ImageCodec, RustCodec};
pub use options::{
    NormalizeOptions, DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_DIMENSION, FALLBACK_QUALITY,
    MAX_ATTEMPTS_LIMIT, MAX_DIMENSION,
};

/// Normalization failures. Ending over budget is not one of them.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}

/// The normalized output.
///
/// `width` and `height` are `(0, 0)` when the input passed through the fast
/// path untouched; callers must not rely on them in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl EncodedImage {
    /// Wrap untouched input. The format tag is always `png`.
    pub fn passthrough(input: &[u8]) -> Self {
        Self {
            bytes: input.to_vec(),
            width: 0,
            height: 0,
            format: OutputFormat::Png,
        }
    }

    pub fn has_dimensions(&self) -> bool {
        self.width != 0 && self.height != 0
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Runs the pipeline over a codec and an anchor chooser.
///
/// Holds only shared references to stateless capabilities, so one
/// `Normalizer` can serve concurrent requests.
#[derive(Clone, Copy)]
pub struct Normalizer<'a> {
    codec: &'a dyn ImageCodec,
    chooser: &'a dyn AnchorChooser,
}

impl<'a> Normalizer<'a> {
    pub fn new(codec: &'a dyn ImageCodec, chooser: &'a dyn AnchorChooser) -> Self {
        Self { codec, chooser }
    }

    pub fn normalize(
        &self,
        input: &[u8],
        options: &NormalizeOptions,
    ) -> Result<EncodedImage, NormalizeError> {
        let options = options.sanitized();

        if input.len() <= options.byte_budget && input.len() < options.small_image_threshold {
            info!(
                bytes = input.len(),
                threshold = options.small_image_threshold,
                "Input already small, skipping normalization"
            );
            return Ok(EncodedImage::passthrough(input));
        }

        let source = self.codec.decode(input)?;
        validate_raster(&source)?;
        let plan = plan_geometry(&source, &options.geometry(), self.chooser)?;
        debug!(
            source_width = source.width,
            source_height = source.height,
            anchor = %options.crop_anchor,
            crop = ?plan.crop_rect,
            target = ?plan.target_size,
            "Planned geometry"
        );

        let cropped = crop_region(&source, plan.crop_rect)?;
        drop(source);

        let mut state = ShrinkState::initial(plan.target_size);
        let mut encoded = self.render(&cropped, &state, &options)?;

        while encoded.len() > options.byte_budget && state.attempts < options.max_attempts {
            state = state.next(encoded.len(), &options);
            encoded = self.render(&cropped, &state, &options)?;
        }

        if encoded.len() > options.byte_budget {
            warn!(
                bytes = encoded.len(),
                budget = options.byte_budget,
                attempts = state.attempts,
                "Output still over budget after final attempt"
            );
        }

        info!(
            input_bytes = input.len(),
            output_bytes = encoded.len(),
            width = encoded.width,
            height = encoded.height,
            format = %encoded.format,
            "Normalized image"
        );

        Ok(encoded)
    }

    fn render(
        &self,
        cropped: &SourceImage,
        state: &ShrinkState,
        options: &NormalizeOptions,
    ) -> Result<EncodedImage, NormalizeError> {
        let resized = resize(cropped, state.target, options.filter)?;
        let bytes = self.codec.encode(&resized, state.format, state.quality)?;

        debug!(
            attempt = state.attempts,
            width = resized.width,
            height = resized.height,
            format = %state.format,
            quality = state.quality,
            bytes = bytes.len(),
            "Encoded attempt"
        );

        Ok(EncodedImage {
            bytes,
            width: resized.width,
            height: resized.height,
            format: state.format,
        })
    }
}

/// Normalize with the `image`-crate codec and the content-aware choosers.
pub fn normalize(input: &[u8], options: &NormalizeOptions) -> Result<EncodedImage, NormalizeError> {
    let codec = RustCodec;
    let chooser = ContentAwareChooser::default();
    Normalizer::new(&codec, &chooser).normalize(input, options)
}
