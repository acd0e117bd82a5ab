//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Pixelab types,
//! handling the conversion between Rust and JavaScript data representations.

use pixelab_core::{Channels, PixelBuffer, ProcessingConfig};
use wasm_bindgen::prelude::*;

/// A pixel buffer wrapper for JavaScript.
///
/// Holds either a single-channel (grayscale) or three-channel (RGB) image.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep the buffer in WASM memory between
/// operations and only extract pixels for display.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new buffer from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - 1 for grayscale, 3 for RGB
    /// * `pixels` - Interleaved pixel data (row-major order)
    ///
    /// # Errors
    ///
    /// Fails if a dimension is zero, `channels` is not 1 or 3, or the pixel data
    /// length doesn't match `width * height * channels`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<JsPixelBuffer, JsValue> {
        Channels::try_from(channels)
            .and_then(|channels| PixelBuffer::new(width, height, channels, pixels))
            .map(Self::from_buffer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of channels (1 or 3)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels().count()
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns the pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Returns the pixels expanded to RGBA, ready for `ImageData`.
    ///
    /// Grayscale values are replicated across the color channels and alpha is
    /// fully opaque.
    pub fn to_rgba(&self) -> Vec<u8> {
        let stride = self.inner.channels().count() as usize;
        let mut out = Vec::with_capacity(self.inner.pixel_count() as usize * 4);
        for px in self.inner.pixels().chunks_exact(stride) {
            match px {
                [v] => out.extend_from_slice(&[*v, *v, *v, 255]),
                [r, g, b] => out.extend_from_slice(&[*r, *g, *b, 255]),
                _ => {}
            }
        }
        out
    }
}

impl JsPixelBuffer {
    /// Wrap a core buffer.
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self { inner: buffer }
    }

    /// Borrow the core buffer for passing to core functions.
    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}

/// Read a processing configuration passed from JavaScript.
///
/// `undefined` and `null` select the defaults; missing fields of a partial
/// object take their default values.
pub(crate) fn config_from_js(value: JsValue) -> Result<ProcessingConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(ProcessingConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_buffer(width: u32, height: u32) -> JsPixelBuffer {
        let pixels: Vec<u8> = (0..(width * height * 3) as usize)
            .map(|i| (i % 256) as u8)
            .collect();
        JsPixelBuffer::from_buffer(PixelBuffer::new(width, height, Channels::Rgb, pixels).unwrap())
    }

    #[test]
    fn test_js_pixel_buffer_creation() {
        let img = rgb_buffer(100, 50);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.channels(), 3);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_js_pixel_buffer_pixels() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8]; // 2 RGB pixels
        let img = JsPixelBuffer::from_buffer(
            PixelBuffer::new(2, 1, Channels::Rgb, pixels.clone()).unwrap(),
        );
        assert_eq!(img.pixels(), pixels);
        assert_eq!(img.buffer().pixel(1, 0), &[32, 16, 8]);
    }

    #[test]
    fn test_to_rgba_rgb() {
        let img = JsPixelBuffer::from_buffer(
            PixelBuffer::new(2, 1, Channels::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap(),
        );
        assert_eq!(img.to_rgba(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_to_rgba_gray() {
        let img = JsPixelBuffer::from_buffer(
            PixelBuffer::new(2, 1, Channels::Gray, vec![10, 200]).unwrap(),
        );
        assert_eq!(img.channels(), 1);
        assert_eq!(img.to_rgba(), vec![10, 10, 10, 255, 200, 200, 200, 255]);
    }
}
