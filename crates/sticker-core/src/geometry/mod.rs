//! Crop and resize planning.
//!
//! This module provides:
//! - [`Anchor`] policies for which region survives a square crop
//! - [`AnchorChooser`] implementations for the content-aware anchors
//! - [`plan_geometry`] to turn source dimensions and a request into a
//!   [`GeometryPlan`]

mod anchor;
mod chooser;
mod plan;

use thiserror::Error;

pub use anchor::Anchor;
pub use chooser::{
    AnchorChooser, AttentionChooser, CenterChooser, ContentAwareChooser, EntropyChooser,
    THUMBNAIL_EDGE,
};
pub use plan::{
    fit_within, plan_fixed_geometry, plan_geometry, scale_long_side, CropRect, GeometryPlan,
    GeometryRequest, TargetSize,
};

/// Errors from geometry planning and region extraction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("unsupported geometry: source is {width}x{height}")]
    UnsupportedGeometry { width: u32, height: u32 },

    #[error(
        "crop {}x{} at ({}, {}) exceeds {width}x{height} source",
        .rect.width, .rect.height, .rect.x, .rect.y
    )]
    InvalidCrop {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    #[error("unknown crop anchor: {0}")]
    UnknownAnchor(String),

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferMismatch { expected: usize, actual: usize },
}
