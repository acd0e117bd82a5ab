//! Encoding of result buffers for display.
//!
//! The presentation layer shows results as ordinary image files:
//! - PNG for lossless display of transformed buffers
//! - JPEG with configurable quality for lightweight previews
//!
//! Both encoders accept single-channel and RGB buffers.
//!
//! # Examples
//!
//! ```ignore
//! use pixelab_core::encode::encode_png;
//!
//! let png_bytes = encode_png(&buffer).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod jpeg;
mod png;

use thiserror::Error;

use crate::buffer::{Channels, PixelBuffer};

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Reject buffers the encoders cannot represent.
fn check_dimensions(buffer: &PixelBuffer) -> Result<(), EncodeError> {
    if buffer.is_empty() {
        return Err(EncodeError::InvalidDimensions {
            width: buffer.width(),
            height: buffer.height(),
        });
    }
    Ok(())
}

fn color_type(channels: Channels) -> image::ExtendedColorType {
    match channels {
        Channels::Gray => image::ExtendedColorType::L8,
        Channels::Rgb => image::ExtendedColorType::Rgb8,
    }
}
