//! Upload decoding for Pixelab.
//!
//! This module turns an uploaded byte stream into a [`PixelBuffer`]:
//! - Sniffing the format (JPEG and PNG are accepted)
//! - Decoding with the `image` crate
//! - Normalising to 8-bit RGB
//!
//! A failure here aborts a request before any transform runs.
//!
//! # Examples
//!
//! ```ignore
//! use pixelab_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```
//!
//! [`PixelBuffer`]: crate::buffer::PixelBuffer

mod types;
mod upload;

pub use types::{DecodeError, UploadFormat};
pub use upload::{decode_image, detect_format};
