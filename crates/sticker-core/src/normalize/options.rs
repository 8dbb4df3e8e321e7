//! Normalization options.
//!
//! Every field has a default, so partial objects from JavaScript
//! deserialize cleanly.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::geometry::{Anchor, GeometryRequest};
use crate::size::{DEFAULT_BYTE_BUDGET, SMALL_IMAGE_THRESHOLD};

/// Largest output edge the downstream model accepts.
pub const MAX_DIMENSION: u32 = 1024;

/// Shrink floor for the size-check loop.
pub const DEFAULT_MIN_DIMENSION: u32 = 256;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
pub const MAX_ATTEMPTS_LIMIT: u32 = 8;

/// Quality of the last shrink attempt (0.6 maps to JPEG q60).
pub const FALLBACK_QUALITY: f32 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizeOptions {
    /// Output long edge; clamped to `1..=1024`.
    pub max_dimension: u32,
    pub force_square: bool,
    pub crop_anchor: Anchor,
    pub byte_budget: usize,
    /// Inputs smaller than this (and within budget) pass through untouched.
    pub small_image_threshold: usize,
    pub min_dimension: u32,
    /// Total encodes allowed, the first one included; clamped to `1..=8`.
    pub max_attempts: u32,
    /// Write the final attempt as JPEG instead of PNG.
    pub lossy_fallback: bool,
    pub filter: FilterType,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            force_square: true,
            crop_anchor: Anchor::default(),
            byte_budget: DEFAULT_BYTE_BUDGET,
            small_image_threshold: SMALL_IMAGE_THRESHOLD,
            min_dimension: DEFAULT_MIN_DIMENSION,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            lossy_fallback: true,
            filter: FilterType::default(),
        }
    }
}

impl NormalizeOptions {
    /// Copy with every field pulled into its valid range.
    pub fn sanitized(&self) -> Self {
        Self {
            max_dimension: self.max_dimension.clamp(1, MAX_DIMENSION),
            min_dimension: self.min_dimension.max(1),
            max_attempts: self.max_attempts.clamp(1, MAX_ATTEMPTS_LIMIT),
            ..self.clone()
        }
    }

    pub fn geometry(&self) -> GeometryRequest {
        GeometryRequest {
            max_dimension: self.max_dimension,
            force_square: self.force_square,
            anchor: self.crop_anchor,
        }
    }
}
