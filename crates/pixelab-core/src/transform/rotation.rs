//! Right-angle rotation.
//!
//! Rotations are exact pixel permutations (transpose + flip for 90/270,
//! double flip for 180), so no interpolation is involved and four quarter
//! turns reproduce the input bit for bit.

use image::{imageops, ImageBuffer, Pixel};
use serde::{Deserialize, Serialize};

use super::TransformError;
use crate::buffer::PixelBuffer;

/// Supported clockwise rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// 90 degrees clockwise.
    Cw90,
    /// 180 degrees.
    Cw180,
    /// 270 degrees clockwise (90 counter-clockwise).
    Cw270,
}

impl Rotation {
    /// Angle in degrees, clockwise.
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Cw90 | Rotation::Cw270)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = TransformError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees {
            90 => Ok(Rotation::Cw90),
            180 => Ok(Rotation::Cw180),
            270 => Ok(Rotation::Cw270),
            other => Err(TransformError::InvalidAngle(other)),
        }
    }
}

/// Rotate a buffer clockwise by 90, 180 or 270 degrees.
///
/// # Errors
///
/// Returns `TransformError::InvalidAngle` for any other angle; the value is
/// never clamped or rounded to the nearest right angle.
pub fn rotate(buffer: &PixelBuffer, degrees: i32) -> Result<PixelBuffer, TransformError> {
    let rotation = Rotation::try_from(degrees)?;
    Ok(rotate_by(buffer, rotation))
}

/// Rotate a buffer by an already validated rotation.
pub fn rotate_by(buffer: &PixelBuffer, rotation: Rotation) -> PixelBuffer {
    match buffer {
        PixelBuffer::Gray(img) => PixelBuffer::Gray(rotate_image(img, rotation)),
        PixelBuffer::Rgb(img) => PixelBuffer::Rgb(rotate_image(img, rotation)),
    }
}

fn rotate_image<P>(img: &ImageBuffer<P, Vec<u8>>, rotation: Rotation) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    match rotation {
        Rotation::Cw90 => imageops::rotate90(img),
        Rotation::Cw180 => imageops::rotate180(img),
        Rotation::Cw270 => imageops::rotate270(img),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
