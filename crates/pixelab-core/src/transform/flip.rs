//! Mirror flips.

use image::imageops;

use crate::buffer::PixelBuffer;

/// Horizontal flip: reverses column order, dimensions unchanged.
pub fn mirror(buffer: &PixelBuffer) -> PixelBuffer {
    match buffer {
        PixelBuffer::Gray(img) => PixelBuffer::Gray(imageops::flip_horizontal(img)),
        PixelBuffer::Rgb(img) => PixelBuffer::Rgb(imageops::flip_horizontal(img)),
    }
}

/// Vertical flip: reverses row order, dimensions unchanged.
pub fn flip_vertical(buffer: &PixelBuffer) -> PixelBuffer {
    match buffer {
        PixelBuffer::Gray(img) => PixelBuffer::Gray(imageops::flip_vertical(img)),
        PixelBuffer::Rgb(img) => PixelBuffer::Rgb(imageops::flip_vertical(img)),
    }
}
