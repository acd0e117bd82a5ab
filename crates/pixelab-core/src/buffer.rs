//! In-memory pixel buffers shared by every operation.
//!
//! A [`PixelBuffer`] is a height x width x channels array of bytes in
//! row-major order. Only single-channel (luma) and three-channel (RGB)
//! layouts exist; the enum variants make any other layout unrepresentable.

use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when raw bytes do not describe a valid buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match width * height * channels.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Channel count other than 1 or 3.
    #[error("Unsupported channel count: {0} (expected 1 or 3)")]
    UnsupportedChannels(u8),
}

/// Number of interleaved channels per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Channels {
    /// Single luma channel.
    Gray = 1,
    /// Red, green, blue.
    Rgb = 3,
}

impl Channels {
    /// Number of bytes per pixel.
    #[inline]
    pub fn count(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Channels {
    type Error = BufferError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            other => Err(BufferError::UnsupportedChannels(other)),
        }
    }
}

/// A decoded image owned by one request.
///
/// Transforms take `&PixelBuffer` and return a new buffer; nothing in this
/// crate mutates a buffer it was handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelBuffer {
    /// Single-channel luma image.
    Gray(GrayImage),
    /// Three-channel RGB image.
    Rgb(RgbImage),
}

impl PixelBuffer {
    /// Build a buffer from raw row-major bytes.
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        pixels: Vec<u8>,
    ) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }

        let expected = width as usize * height as usize * channels.count() as usize;
        let mismatch = BufferError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        };
        if pixels.len() != expected {
            return Err(mismatch);
        }

        match channels {
            Channels::Gray => GrayImage::from_raw(width, height, pixels).map(PixelBuffer::Gray),
            Channels::Rgb => RgbImage::from_raw(width, height, pixels).map(PixelBuffer::Rgb),
        }
        .ok_or(mismatch)
    }

    pub fn width(&self) -> u32 {
        match self {
            PixelBuffer::Gray(img) => img.width(),
            PixelBuffer::Rgb(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            PixelBuffer::Gray(img) => img.height(),
            PixelBuffer::Rgb(img) => img.height(),
        }
    }

    pub fn channels(&self) -> Channels {
        match self {
            PixelBuffer::Gray(_) => Channels::Gray,
            PixelBuffer::Rgb(_) => Channels::Rgb,
        }
    }

    /// Array shape as (height, width, channels).
    pub fn shape(&self) -> (u32, u32, u8) {
        (self.height(), self.width(), self.channels().count())
    }

    /// Raw interleaved bytes in row-major order.
    pub fn pixels(&self) -> &[u8] {
        match self {
            PixelBuffer::Gray(img) => img.as_raw(),
            PixelBuffer::Rgb(img) => img.as_raw(),
        }
    }

    /// Channel values of the pixel at row `y`, column `x`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let stride = self.channels().count() as usize;
        let idx = (y as usize * self.width() as usize + x as usize) * stride;
        &self.pixels()[idx..idx + stride]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels().len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rgb_buffer() {
        let buf = PixelBuffer::new(4, 2, Channels::Rgb, vec![0u8; 4 * 2 * 3]).unwrap();
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.channels(), Channels::Rgb);
        assert_eq!(buf.shape(), (2, 4, 3));
        assert_eq!(buf.pixel_count(), 8);
        assert_eq!(buf.byte_size(), 24);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let result = PixelBuffer::new(0, 10, Channels::Gray, vec![]);
        assert_eq!(
            result,
            Err(BufferError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = PixelBuffer::new(10, 10, Channels::Rgb, vec![0u8; 10 * 10]);
        assert_eq!(
            result,
            Err(BufferError::InvalidPixelData {
                expected: 300,
                actual: 100
            })
        );
    }

    #[test]
    fn test_channels_try_from() {
        assert_eq!(Channels::try_from(1), Ok(Channels::Gray));
        assert_eq!(Channels::try_from(3), Ok(Channels::Rgb));
        assert_eq!(
            Channels::try_from(4),
            Err(BufferError::UnsupportedChannels(4))
        );
    }

    #[test]
    fn test_pixel_accessor() {
        let pixels = vec![
            1, 2, 3, 4, 5, 6, // row 0
            7, 8, 9, 10, 11, 12, // row 1
        ];
        let buf = PixelBuffer::new(2, 2, Channels::Rgb, pixels).unwrap();
        assert_eq!(buf.pixel(0, 0), &[1, 2, 3]);
        assert_eq!(buf.pixel(1, 0), &[4, 5, 6]);
        assert_eq!(buf.pixel(0, 1), &[7, 8, 9]);
        assert_eq!(buf.pixel(1, 1), &[10, 11, 12]);
    }

    #[test]
    fn test_buffer_error_display() {
        let err = BufferError::UnsupportedChannels(2);
        assert_eq!(
            err.to_string(),
            "Unsupported channel count: 2 (expected 1 or 3)"
        );
    }
}
