//! Upload decoding: format sniffing and conversion to RGB.

use tracing::{debug, instrument, warn};

use super::{DecodeError, UploadFormat};
use crate::buffer::PixelBuffer;

/// Decode an uploaded JPEG or PNG into an RGB buffer.
///
/// The format is sniffed from the leading bytes, not trusted from a file
/// name. Alpha is dropped and grayscale uploads are promoted to RGB so every
/// operation starts from the same canonical layout.
///
/// # Errors
///
/// Returns `DecodeError::Empty` for an empty upload, `InvalidFormat` or
/// `UnsupportedFormat` when sniffing fails, and `CorruptedFile` when the
/// bytes are truncated or malformed.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let format = detect_format(bytes).inspect_err(|e| warn!(error = %e, "Upload rejected"))?;

    let img = image::load_from_memory_with_format(bytes, format.to_image_format())
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
        .inspect_err(|e| warn!(error = %e, "Upload could not be decoded"))?;

    let rgb = img.into_rgb8();
    debug!(
        width = rgb.width(),
        height = rgb.height(),
        format = ?format,
        "Upload decoded"
    );
    Ok(PixelBuffer::Rgb(rgb))
}

/// Identify the upload format from its magic bytes.
pub fn detect_format(bytes: &[u8]) -> Result<UploadFormat, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    UploadFormat::try_from(format)
}
