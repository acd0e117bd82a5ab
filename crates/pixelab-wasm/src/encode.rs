//! Image encoding WASM bindings.
//!
//! Results are handed to the browser as ordinary image files for display.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode a buffer to PNG bytes (lossless)
//! - [`encode_jpeg`] - Encode a buffer to JPEG bytes
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@pixelab/wasm';
//!
//! const png = encode_png(result.image());
//! img.src = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! ```

use crate::types::JsPixelBuffer;
use pixelab_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a buffer to PNG bytes.
///
/// Grayscale buffers are written as 8-bit grayscale PNGs.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.buffer()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a buffer to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The buffer to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality, recommended: 90)
///
/// # Quality Guidelines
///
/// * 90-100: High quality
/// * 60-80: Medium quality, acceptable for previews
/// * Below 60: Low quality, visible artifacts
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsPixelBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.buffer(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for encode bindings.
///
/// Note: Only success paths run natively. For error cases, see the tests in
/// `pixelab_core::encode` which test the underlying functionality.
#[cfg(test)]
mod tests {
    use super::*;
    use pixelab_core::{Channels, PixelBuffer};

    #[test]
    fn test_encode_png_creates_valid_png() {
        let img = JsPixelBuffer::from_buffer(
            PixelBuffer::new(10, 10, Channels::Rgb, vec![128u8; 10 * 10 * 3]).unwrap(),
        );
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_encode_jpeg_gray() {
        let img = JsPixelBuffer::from_buffer(
            PixelBuffer::new(10, 10, Channels::Gray, vec![128u8; 10 * 10]).unwrap(),
        );
        let jpeg = encode_jpeg(&img, 90).unwrap();
        // Verify JPEG magic bytes
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
