//! Upload checks and size helpers for the browser.

use crate::types::JsUploadValidation;
use sticker_core::{size, upload};
use wasm_bindgen::prelude::*;

/// True when `bytes` fits in `budget`.
#[wasm_bindgen]
pub fn validate_size(bytes: &[u8], budget: usize) -> bool {
    size::validate_size(bytes, budget)
}

/// Check a `File`'s size and MIME type before upload.
///
/// ```typescript
/// const result = validate_upload(file.size, file.type);
/// if (!result.isValid) showError(result.error);
/// ```
#[wasm_bindgen]
pub fn validate_upload(size: f64, mime_type: &str) -> JsUploadValidation {
    JsUploadValidation::from_result(upload::validate_upload(js_byte_count(size), mime_type))
}

/// Human-readable byte count, e.g. `"1.5 KB"`.
#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    size::format_file_size(js_byte_count(bytes))
}

/// JS numbers are doubles; negative and NaN sizes count as zero.
fn js_byte_count(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value as u64
    }
}
