//! Pixelab WASM - WebAssembly bindings for Pixelab
//!
//! This crate provides WASM bindings to expose the pixelab-core functionality
//! to the browser front end.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Upload decoding bindings (JPEG, PNG)
//! - `transform` - Individual operation bindings
//! - `pipeline` - The `Pixelab` handle: startup configuration, selections,
//!   grid overlay and object detection
//! - `encode` - Display encoding bindings (PNG, JPEG)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, Pixelab } from '@pixelab/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! const pixelab = new Pixelab(undefined);
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const results = pixelab.run_selection(image, 'all');
//! console.log(`${results.length} results`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod pipeline;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_image, detect_format};
pub use encode::{encode_jpeg, encode_png};
pub use pipeline::{operation_names, JsOperationResult, Pixelab};
pub use transform::{flip_vertical, image_properties, mirror, rotate, to_grayscale};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    pixelab_core::VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
