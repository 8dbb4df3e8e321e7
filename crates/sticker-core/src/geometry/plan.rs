//! Geometry planning: which source region to sample and how large the
//! output raster is.
//!
//! All functions here are pure. The only content-dependent step (choosing
//! an anchor for `entropy`/`attention`) is delegated to an
//! [`AnchorChooser`].

use serde::{Deserialize, Serialize};

use super::{Anchor, AnchorChooser, GeometryError};
use crate::decode::SourceImage;

/// Region of the source to sample, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// The whole of a `width` x `height` source.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// True when the rectangle is non-empty and lies inside the source.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

/// Output raster dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    pub fn long_side(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// Where to sample and what to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryPlan {
    pub crop_rect: CropRect,
    pub target_size: TargetSize,
}

/// The geometry-relevant subset of the normalization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryRequest {
    pub max_dimension: u32,
    pub force_square: bool,
    pub anchor: Anchor,
}

/// Plan geometry from dimensions alone.
///
/// Deterministic in `width`, `height` and the request. Content-aware anchors
/// resolve to center; use [`plan_geometry`] to honor them.
pub fn plan_fixed_geometry(
    width: u32,
    height: u32,
    request: &GeometryRequest,
) -> Result<GeometryPlan, GeometryError> {
    plan_with(width, height, request, |side| {
        request.anchor.fixed_offset(width, height, side)
    })
}

/// Plan geometry for a decoded source, consulting `chooser` for
/// content-aware anchors.
pub fn plan_geometry(
    source: &SourceImage,
    request: &GeometryRequest,
    chooser: &dyn AnchorChooser,
) -> Result<GeometryPlan, GeometryError> {
    plan_with(source.width, source.height, request, |side| {
        if request.anchor.is_content_aware() {
            chooser.choose_anchor(source, side, request.anchor)
        } else {
            request.anchor.fixed_offset(source.width, source.height, side)
        }
    })
}

fn plan_with(
    width: u32,
    height: u32,
    request: &GeometryRequest,
    offset: impl FnOnce(u32) -> (u32, u32),
) -> Result<GeometryPlan, GeometryError> {
    if width == 0 || height == 0 {
        return Err(GeometryError::UnsupportedGeometry { width, height });
    }

    let max_dimension = request.max_dimension.max(1);

    let plan = if request.force_square {
        let side = width.min(height);
        let (x, y) = offset(side);

        // Chooser output is untrusted; pull it back inside the source.
        let crop_rect = CropRect {
            x: x.min(width - side),
            y: y.min(height - side),
            width: side,
            height: side,
        };

        GeometryPlan {
            crop_rect,
            target_size: TargetSize::square(max_dimension),
        }
    } else {
        let (target_w, target_h) = fit_within(width, height, max_dimension);
        GeometryPlan {
            crop_rect: CropRect::full(width, height),
            target_size: TargetSize {
                width: target_w,
                height: target_h,
            },
        }
    };

    if !plan.crop_rect.fits_within(width, height) {
        return Err(GeometryError::InvalidCrop {
            rect: plan.crop_rect,
            width,
            height,
        });
    }

    Ok(plan)
}

/// Shrink `width` x `height` so the longer side is at most `max_edge`,
/// preserving aspect ratio. Sources already within bounds are unchanged.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }
    scale_long_side(width, height, max_edge)
}

/// Dimensions whose longer side is exactly `long_side`, with the shorter
/// side scaled proportionally (rounded, minimum 1).
pub fn scale_long_side(width: u32, height: u32, long_side: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (long_side as f64 / ratio).round() as u32;
        (long_side, new_height.max(1))
    } else {
        let new_width = (long_side as f64 * ratio).round() as u32;
        (new_width.max(1), long_side)
    }
}
