//! Upload decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode an uploaded JPEG or PNG into an RGB buffer
//! - [`detect_format`] - Report the MIME type of an upload without decoding it
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@pixelab/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsPixelBuffer;
use pixelab_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded image from bytes.
///
/// The format is sniffed from the bytes; only JPEG and PNG are accepted. The
/// result is always a three-channel RGB buffer.
///
/// # Errors
///
/// Returns an error if:
/// - The upload is empty
/// - The bytes are not a JPEG or PNG
/// - The file is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_image(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Identify an upload's format from its magic bytes.
///
/// Returns the MIME type (`image/jpeg` or `image/png`).
#[wasm_bindgen]
pub fn detect_format(bytes: &[u8]) -> Result<String, JsValue> {
    decode::detect_format(bytes)
        .map(|format| format.mime_type().to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
