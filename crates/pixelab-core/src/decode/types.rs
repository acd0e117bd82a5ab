//! Core types for upload decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The upload contained no bytes.
    #[error("Empty upload: no image data")]
    Empty,

    /// The bytes don't match any known image signature.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// A recognised image format that uploads may not use.
    #[error("Unsupported image format: {0} (expected JPEG or PNG)")]
    UnsupportedFormat(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Upload formats accepted by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadFormat {
    Jpeg,
    Png,
}

impl UploadFormat {
    /// Convert to the image crate's ImageFormat.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            UploadFormat::Jpeg => image::ImageFormat::Jpeg,
            UploadFormat::Png => image::ImageFormat::Png,
        }
    }

    /// MIME type for display and re-encoding.
    pub fn mime_type(self) -> &'static str {
        match self {
            UploadFormat::Jpeg => "image/jpeg",
            UploadFormat::Png => "image/png",
        }
    }
}

impl TryFrom<image::ImageFormat> for UploadFormat {
    type Error = DecodeError;

    fn try_from(format: image::ImageFormat) -> Result<Self, Self::Error> {
        match format {
            image::ImageFormat::Jpeg => Ok(UploadFormat::Jpeg),
            image::ImageFormat::Png => Ok(UploadFormat::Png),
            other => Err(DecodeError::UnsupportedFormat(format!("{:?}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_conversion() {
        assert_eq!(
            UploadFormat::Jpeg.to_image_format(),
            image::ImageFormat::Jpeg
        );
        assert_eq!(UploadFormat::Png.to_image_format(), image::ImageFormat::Png);
    }

    #[test]
    fn test_try_from_image_format() {
        assert_eq!(
            UploadFormat::try_from(image::ImageFormat::Png),
            Ok(UploadFormat::Png)
        );
        assert_eq!(
            UploadFormat::try_from(image::ImageFormat::Gif),
            Err(DecodeError::UnsupportedFormat("Gif".to_string()))
        );
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(UploadFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(UploadFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::UnsupportedFormat("Gif".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported image format: Gif (expected JPEG or PNG)"
        );

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
