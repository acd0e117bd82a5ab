//! PNG encoding for lossless display.

use image::codecs::png::PngEncoder;
use image::ImageEncoder;

use super::{check_dimensions, color_type, EncodeError};
use crate::buffer::PixelBuffer;

/// Encode a buffer to PNG bytes.
///
/// Single-channel buffers are written as 8-bit grayscale PNGs, RGB buffers
/// as 8-bit truecolor.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    check_dimensions(buffer)?;

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            buffer.pixels(),
            buffer.width(),
            buffer.height(),
            color_type(buffer.channels()),
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out)
}
