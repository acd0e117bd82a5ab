//! Color to grayscale conversion.

use image::{GrayImage, Luma};

use crate::buffer::PixelBuffer;
use crate::luminance::calculate_luma_u8;

/// Convert an RGB buffer to a single-channel luma buffer.
///
/// Uses BT.601 weights. A buffer that is already single-channel has nothing
/// to convert and is returned unchanged (as a copy).
pub fn to_grayscale(buffer: &PixelBuffer) -> PixelBuffer {
    match buffer {
        PixelBuffer::Gray(img) => PixelBuffer::Gray(img.clone()),
        PixelBuffer::Rgb(img) => {
            let gray = GrayImage::from_fn(img.width(), img.height(), |x, y| {
                let [r, g, b] = img.get_pixel(x, y).0;
                Luma([calculate_luma_u8(r, g, b)])
            });
            PixelBuffer::Gray(gray)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_rgb_becomes_single_channel() {
        let img = RgbImage::from_pixel(7, 3, Rgb([10, 200, 30]));
        let gray = to_grayscale(&PixelBuffer::Rgb(img));

        assert_eq!(gray.channels(), Channels::Gray);
        assert_eq!(gray.width(), 7);
        assert_eq!(gray.height(), 3);
        assert_eq!(gray.byte_size(), 21);
    }

    #[test]
    fn test_luma_values() {
        let pixels = vec![
            255, 0, 0, // Red
            0, 255, 0, // Green
            0, 0, 255, // Blue
            255, 255, 255, // White
        ];
        let buffer = PixelBuffer::new(4, 1, Channels::Rgb, pixels).unwrap();
        let gray = to_grayscale(&buffer);
        assert_eq!(gray.pixels(), &[76, 150, 29, 255]);
    }

    #[test]
    fn test_gray_input_is_noop() {
        let buffer = PixelBuffer::new(2, 2, Channels::Gray, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(to_grayscale(&buffer), buffer);
    }

    #[test]
    fn test_input_not_mutated() {
        let buffer = PixelBuffer::new(1, 1, Channels::Rgb, vec![9, 8, 7]).unwrap();
        let before = buffer.clone();
        let _ = to_grayscale(&buffer);
        assert_eq!(buffer, before);
    }
}
