//! Raster transforms that execute a [`GeometryPlan`](crate::geometry::GeometryPlan).
//!
//! # Transform Order
//!
//! 1. Crop to `plan.crop_rect` (once per request)
//! 2. Resample to the current target size (once per encode attempt)
//!
//! Both steps work on RGBA8 rasters in source pixel coordinates, origin at
//! the top-left corner.

mod crop;
mod resize;

pub use crop::{crop_region, validate_raster};
pub use resize::resize;
