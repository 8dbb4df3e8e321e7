//! WASM-compatible wrapper types for normalizer output.

use sticker_core::encode::OutputFormat;
use sticker_core::normalize::EncodedImage;
use wasm_bindgen::prelude::*;

/// A normalized image for JavaScript.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes()` copies them into a
/// `Uint8Array`; call it once and keep the result.
#[wasm_bindgen]
pub struct JsEncodedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    format: OutputFormat,
}

#[wasm_bindgen]
impl JsEncodedImage {
    /// Output width, or 0 when the input passed through untouched.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height, or 0 when the input passed through untouched.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `"png"` or `"jpeg"`.
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.format.as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.format.mime_type().to_string()
    }

    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// False for fast-path output, whose dimensions are unknown.
    #[wasm_bindgen(getter, js_name = hasDimensions)]
    pub fn has_dimensions(&self) -> bool {
        self.width != 0 && self.height != 0
    }

    /// Returns the encoded bytes as a Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer handles cleanup.
    pub fn free(self) {}
}

impl From<EncodedImage> for JsEncodedImage {
    fn from(image: EncodedImage) -> Self {
        Self {
            bytes: image.bytes,
            width: image.width,
            height: image.height,
            format: image.format,
        }
    }
}

/// Result of checking an upload, shaped like `{ isValid, error }`.
#[wasm_bindgen]
pub struct JsUploadValidation {
    error: Option<String>,
}

#[wasm_bindgen]
impl JsUploadValidation {
    #[wasm_bindgen(getter, js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// User-facing message, or `undefined` when valid.
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

impl JsUploadValidation {
    pub(crate) fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        Self {
            error: result.err().map(|e| e.to_string()),
        }
    }
}
