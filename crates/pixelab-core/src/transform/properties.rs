//! Shape metadata report.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

/// Read-only description of a buffer's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageProperties {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    /// (height, width, channels), the array shape
    pub shape: (u32, u32, u8),
    /// width * height
    pub total_pixels: u64,
    /// Element type of the array
    pub data_type: String,
    /// Number of array elements, width * height * channels
    pub byte_size: u64,
}

/// Report the shape metadata of a buffer. Always succeeds.
pub fn properties(buffer: &PixelBuffer) -> ImageProperties {
    ImageProperties {
        width: buffer.width(),
        height: buffer.height(),
        channels: buffer.channels().count(),
        shape: buffer.shape(),
        total_pixels: buffer.pixel_count(),
        data_type: "uint8".to_string(),
        byte_size: buffer.byte_size() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;

    #[test]
    fn test_rgb_properties() {
        let buffer = PixelBuffer::new(200, 100, Channels::Rgb, vec![0u8; 200 * 100 * 3]).unwrap();
        let props = properties(&buffer);

        assert_eq!(props.width, 200);
        assert_eq!(props.height, 100);
        assert_eq!(props.channels, 3);
        assert_eq!(props.shape, (100, 200, 3));
        assert_eq!(props.total_pixels, 20_000);
        assert_eq!(props.byte_size, 60_000);
        assert_eq!(props.data_type, "uint8");
    }

    #[test]
    fn test_gray_properties() {
        let buffer = PixelBuffer::new(3, 5, Channels::Gray, vec![0u8; 15]).unwrap();
        let props = properties(&buffer);

        assert_eq!(props.channels, 1);
        assert_eq!(props.shape, (5, 3, 1));
        assert_eq!(props.total_pixels, 15);
        assert_eq!(props.byte_size, 15);
    }
}
