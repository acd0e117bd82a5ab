//! WASM bindings for the individual image operations.
//!
//! Each binding borrows the current image and returns a new one, so the
//! presentation layer can keep showing the original next to the result.

use crate::types::JsPixelBuffer;
use pixelab_core::transform;
use wasm_bindgen::prelude::*;

/// Convert an image to single-channel grayscale.
///
/// A grayscale input is returned unchanged.
#[wasm_bindgen]
pub fn to_grayscale(image: &JsPixelBuffer) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(transform::to_grayscale(image.buffer()))
}

/// Report the image's shape metadata as a plain object:
/// `{width, height, channels, shape, total_pixels, data_type, byte_size}`.
#[wasm_bindgen]
pub fn image_properties(image: &JsPixelBuffer) -> Result<JsValue, JsValue> {
    let props = transform::properties(image.buffer());
    serde_wasm_bindgen::to_value(&props).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rotate an image clockwise by a right angle.
///
/// # Arguments
///
/// * `image` - Source image
/// * `degrees` - 90, 180 or 270
///
/// # Errors
///
/// Returns an error for any other angle.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate(image, 90);
/// console.log(`${rotated.width}x${rotated.height}`); // dimensions swapped
/// ```
#[wasm_bindgen]
pub fn rotate(image: &JsPixelBuffer, degrees: i32) -> Result<JsPixelBuffer, JsValue> {
    transform::rotate(image.buffer(), degrees)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Flip an image horizontally.
#[wasm_bindgen]
pub fn mirror(image: &JsPixelBuffer) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(transform::mirror(image.buffer()))
}

/// Flip an image vertically.
#[wasm_bindgen]
pub fn flip_vertical(image: &JsPixelBuffer) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(transform::flip_vertical(image.buffer()))
}
