//! JPEG encoding for lightweight previews.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! The encoder supports configurable quality settings for balancing preview
//! size and fidelity.

use image::codecs::jpeg::JpegEncoder;
use image::ImageEncoder;

use super::{check_dimensions, color_type, EncodeError};
use crate::buffer::PixelBuffer;

/// Encode a buffer to JPEG bytes.
///
/// # Arguments
///
/// * `buffer` - Gray or RGB buffer to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for saving results
/// * 60-80: Medium quality, acceptable for on-screen previews
/// * Below 60: Low quality, visible artifacts around drawn lines
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    check_dimensions(buffer)?;

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(
            buffer.pixels(),
            buffer.width(),
            buffer.height(),
            color_type(buffer.channels()),
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;

    fn gray_rgb(width: u32, height: u32) -> PixelBuffer {
        let size = (width * height * 3) as usize;
        PixelBuffer::new(width, height, Channels::Rgb, vec![128u8; size]).unwrap()
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let jpeg_bytes = encode_jpeg(&gray_rgb(100, 100), 90).unwrap();

        // Check JPEG magic bytes (SOI marker)
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);

        // Check JPEG ends with EOI marker
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_single_channel() {
        let buffer = PixelBuffer::new(8, 8, Channels::Gray, vec![64u8; 64]).unwrap();
        let jpeg_bytes = encode_jpeg(&buffer, 90).unwrap();
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let buffer = gray_rgb(10, 10);

        // Quality 0 should be clamped to 1
        assert!(encode_jpeg(&buffer, 0).is_ok());

        // Quality 255 should be clamped to 100
        assert!(encode_jpeg(&buffer, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_zero_width() {
        let buffer = PixelBuffer::Rgb(image::RgbImage::new(0, 100));
        let result = encode_jpeg(&buffer, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_jpeg_non_square() {
        assert!(encode_jpeg(&gray_rgb(200, 50), 90).is_ok());
        assert!(encode_jpeg(&gray_rgb(50, 200), 90).is_ok());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::Channels;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=40, 1u32..=40)
    }

    proptest! {
        /// Property: Encoding always produces a framed JPEG for valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in dimensions_strategy(),
            quality in 1u8..=100,
        ) {
            let size = (width as usize) * (height as usize) * 3;
            let buffer = PixelBuffer::new(width, height, Channels::Rgb, vec![128u8; size]).unwrap();

            let jpeg_bytes = encode_jpeg(&buffer, quality).unwrap();
            let len = jpeg_bytes.len();
            prop_assert!(len >= 4, "JPEG should have at least 4 bytes");
            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8], "Should have SOI marker");
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9], "Should have EOI marker");
        }

        /// Property: Same input always produces same output (deterministic).
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 1u8..=100,
        ) {
            let size = (width as usize) * (height as usize);
            let buffer = PixelBuffer::new(width, height, Channels::Gray, vec![100u8; size]).unwrap();

            let first = encode_jpeg(&buffer, quality).unwrap();
            let second = encode_jpeg(&buffer, quality).unwrap();
            prop_assert_eq!(first, second, "Same input should produce same output");
        }
    }
}
