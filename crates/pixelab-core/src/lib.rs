//! Pixelab Core - Image processing library
//!
//! This crate provides the image operations behind the Pixelab demo:
//! upload decoding, grayscale and geometric transforms, grid overlays,
//! contour-based object outlining, and the selector that runs one or all
//! of them on the current image.

pub mod buffer;
pub mod config;
pub mod decode;
pub mod detect;
pub mod encode;
pub mod luminance;
pub mod pipeline;
pub mod transform;

pub use buffer::{BufferError, Channels, PixelBuffer};
pub use config::{ConfigError, DetectionConfig, GridConfig, ProcessingConfig};
pub use decode::{decode_image, DecodeError};
pub use detect::{detect_objects, BoundingBox, DetectionResult};
pub use encode::{encode_jpeg, encode_png, EncodeError};
pub use pipeline::{
    parse_selection, process_upload, run, Operation, OperationOutput, PipelineError,
    PipelineOutput, Selection,
};
pub use transform::{
    grid_overlay, mirror, properties, rotate, to_grayscale, GridOverlay, ImageProperties,
    Rotation, TransformError,
};

/// Crate version, as reported to the presentation layer.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_upload_to_display_flow() {
        let input = PixelBuffer::new(6, 4, Channels::Rgb, vec![200u8; 6 * 4 * 3]).unwrap();
        let png = encode_png(&input).unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded, input);

        let output = run(
            Some(&decoded),
            Selection::One(Operation::Grayscale),
            &ProcessingConfig::default(),
        )
        .unwrap();
        let gray = output.get(Operation::Grayscale).unwrap().image().unwrap();
        assert_eq!(gray.channels(), Channels::Gray);

        let shown = encode_png(gray).unwrap();
        assert_eq!(decode_image(&shown).unwrap().channels(), Channels::Rgb);
    }

    #[test]
    fn test_invalid_angle_is_an_invalid_parameter() {
        let input = PixelBuffer::new(2, 2, Channels::Gray, vec![0u8; 4]).unwrap();
        let err = rotate(&input, 45).unwrap_err();
        assert_eq!(err, TransformError::InvalidAngle(45));
        assert!(err.to_string().starts_with("Invalid parameter"));
    }
}
