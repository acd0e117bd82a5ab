//! Pure image operations over [`PixelBuffer`]s.
//!
//! Every function here borrows its input and returns new data; none of
//! them mutate the buffer they are given, and none depend on the output of
//! another call.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows rightwards, y grows downwards
//! - Rotation angles are in degrees, positive = clockwise
//!
//! [`PixelBuffer`]: crate::buffer::PixelBuffer

mod flip;
mod glyphs;
mod grayscale;
mod grid;
mod properties;
mod rotation;

use thiserror::Error;

pub use flip::{flip_vertical, mirror};
pub use grayscale::to_grayscale;
pub use grid::{grid_boundaries, grid_overlay, non_prime_labels, GridCell, GridOverlay};
pub use properties::{properties, ImageProperties};
pub use rotation::{rotate, rotate_by, Rotation};

/// Errors raised by parameterised transforms.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Rotation angle outside the supported right angles.
    #[error("Invalid parameter: rotation angle {0} is not one of 90, 180, 270")]
    InvalidAngle(i32),
}
