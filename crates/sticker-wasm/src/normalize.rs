//! Normalization WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { normalize_image } from '@sticker/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const sticker = normalize_image(bytes, { cropAnchor: 'entropy' });
//! const blob = new Blob([sticker.bytes()], { type: sticker.mimeType });
//! ```

use crate::types::JsEncodedImage;
use sticker_core::normalize::{NormalizeError, NormalizeOptions};
use wasm_bindgen::prelude::*;

/// Normalize an uploaded image for sticker generation.
///
/// # Arguments
///
/// * `bytes` - The encoded upload (PNG, JPEG, GIF, WebP, BMP or TIFF)
/// * `options` - Partial `NormalizeOptions` object; `undefined` or `null`
///   uses every default
///
/// # Errors
///
/// Throws an `Error` if the options are malformed, the upload cannot be
/// decoded, or encoding fails. Ending over budget is not an error; check
/// `byteLength` against the budget.
#[wasm_bindgen]
pub fn normalize_image(bytes: &[u8], options: JsValue) -> Result<JsEncodedImage, JsValue> {
    let options = parse_options(options)?;
    normalize_bytes(bytes, &options).map_err(|e| crate::js_error(&e))
}

/// The default options as a plain object.
#[wasm_bindgen]
pub fn default_options() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&NormalizeOptions::default()).map_err(|e| crate::js_error(&e))
}

fn parse_options(options: JsValue) -> Result<NormalizeOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(NormalizeOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| crate::js_error(&format!("Invalid normalize options: {}", e)))
}

/// Host-callable core of [`normalize_image`].
pub(crate) fn normalize_bytes(
    bytes: &[u8],
    options: &NormalizeOptions,
) -> Result<JsEncodedImage, NormalizeError> {
    sticker_core::normalize(bytes, options).map(JsEncodedImage::from)
}
