//! Sticker WASM - WebAssembly bindings for the sticker normalizer
//!
//! This crate exposes sticker-core to the browser upload flow.
//!
//! # Module Structure
//!
//! - `normalize` - Size-constrained normalization (`normalize_image`)
//! - `validation` - Upload checks and byte-size formatting
//! - `types` - WASM-compatible wrapper types for results
//!
//! # Usage
//!
//! ```typescript
//! import init, { normalize_image, validate_upload } from '@sticker/wasm';
//!
//! await init();
//!
//! const check = validate_upload(file.size, file.type);
//! if (!check.isValid) throw new Error(check.error);
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const sticker = normalize_image(bytes, { maxDimension: 1024 });
//! console.log(`Normalized to ${sticker.width}x${sticker.height} ${sticker.format}`);
//! ```

use wasm_bindgen::prelude::*;

mod normalize;
mod types;
mod validation;

pub use normalize::{default_options, normalize_image};
pub use types::{JsEncodedImage, JsUploadValidation};
pub use validation::{format_file_size, validate_size, validate_upload};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Wrap an error message in a JavaScript `Error`.
pub(crate) fn js_error(err: &dyn std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
