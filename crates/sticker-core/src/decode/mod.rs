//! Image decoding for the normalization pipeline.
//!
//! This module provides:
//! - Decoding an arbitrary input buffer (PNG, JPEG, GIF, WebP, BMP, TIFF)
//! - EXIF orientation correction, so crop geometry is computed on the
//!   upright image
//! - The [`SourceImage`] raster every later stage reads from
//!
//! # Example
//!
//! ```ignore
//! use sticker_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, read_orientation};
pub use types::{
    ColorDepth, DecodeError, FilterType, Orientation, SourceImage, RGBA_CHANNELS,
};
