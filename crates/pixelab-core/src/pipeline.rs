//! Operation selection and fan-out.
//!
//! A request names one [`Operation`] or asks for all of them. Each
//! operation is resolved through a static dispatch table to a plain
//! function pointer and always receives the original buffer: operations
//! never chain, and "all" runs every handler independently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::buffer::PixelBuffer;
use crate::config::{ConfigError, ProcessingConfig};
use crate::decode::{decode_image, DecodeError};
use crate::detect::{detect_objects, DetectionResult};
use crate::transform::{
    grid_overlay, mirror, properties, rotate_by, to_grayscale, GridOverlay, ImageProperties,
    Rotation, TransformError,
};

/// Errors surfaced to the user for one request.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    /// An operation was requested before any image was uploaded.
    #[error("No image uploaded: upload a JPEG or PNG image first")]
    MissingInput,

    /// Unknown operation name or out-of-range parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One entry of the operation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "grayscale")]
    Grayscale,
    #[serde(rename = "properties")]
    Properties,
    #[serde(rename = "rotate_90")]
    Rotate90,
    #[serde(rename = "rotate_180")]
    Rotate180,
    #[serde(rename = "rotate_270")]
    Rotate270,
    #[serde(rename = "mirror")]
    Mirror,
    #[serde(rename = "grid_overlay")]
    GridOverlay,
    #[serde(rename = "object_detection")]
    ObjectDetection,
}

type Handler = fn(&PixelBuffer, &ProcessingConfig) -> Result<OperationOutput, TransformError>;

/// Dispatch table, in menu order.
const HANDLERS: [(Operation, Handler); 8] = [
    (Operation::Grayscale, run_grayscale),
    (Operation::Properties, run_properties),
    (Operation::Rotate90, run_rotate_90),
    (Operation::Rotate180, run_rotate_180),
    (Operation::Rotate270, run_rotate_270),
    (Operation::Mirror, run_mirror),
    (Operation::GridOverlay, run_grid_overlay),
    (Operation::ObjectDetection, run_object_detection),
];

impl Operation {
    /// Every operation, in menu order.
    pub const ALL: [Operation; 8] = [
        Operation::Grayscale,
        Operation::Properties,
        Operation::Rotate90,
        Operation::Rotate180,
        Operation::Rotate270,
        Operation::Mirror,
        Operation::GridOverlay,
        Operation::ObjectDetection,
    ];

    /// Stable name used in requests and result keys.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Grayscale => "grayscale",
            Operation::Properties => "properties",
            Operation::Rotate90 => "rotate_90",
            Operation::Rotate180 => "rotate_180",
            Operation::Rotate270 => "rotate_270",
            Operation::Mirror => "mirror",
            Operation::GridOverlay => "grid_overlay",
            Operation::ObjectDetection => "object_detection",
        }
    }

    /// Human-readable title for display.
    pub fn title(self) -> &'static str {
        match self {
            Operation::Grayscale => "Black & White",
            Operation::Properties => "Image Properties",
            Operation::Rotate90 => "Rotated 90°",
            Operation::Rotate180 => "Rotated 180°",
            Operation::Rotate270 => "Rotated 270°",
            Operation::Mirror => "Mirror Image",
            Operation::GridOverlay => "Grid",
            Operation::ObjectDetection => "Object Detection",
        }
    }

    fn handler(self) -> Handler {
        let (op, handler) = HANDLERS[self as usize];
        debug_assert_eq!(op, self, "dispatch table out of order");
        handler
    }

    /// Run this operation alone on `buffer`.
    pub fn apply(
        self,
        buffer: &PixelBuffer,
        config: &ProcessingConfig,
    ) -> Result<OperationOutput, TransformError> {
        (self.handler())(buffer, config)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == normalized)
            .ok_or_else(|| PipelineError::InvalidParameter(format!("unknown operation '{}'", s)))
    }
}

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    One(Operation),
    All,
}

impl Selection {
    /// Operations this selection expands to, in menu order.
    pub fn operations(self) -> Vec<Operation> {
        match self {
            Selection::One(op) => vec![op],
            Selection::All => Operation::ALL.to_vec(),
        }
    }
}

impl From<Operation> for Selection {
    fn from(op: Operation) -> Self {
        Selection::One(op)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::One(op) => op.fmt(f),
            Selection::All => f.write_str("all"),
        }
    }
}

impl FromStr for Selection {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize(s) == "all" {
            return Ok(Selection::All);
        }
        s.parse().map(Selection::One)
    }
}

/// Parse a selection name such as `"rotate_90"` or `"all"`.
pub fn parse_selection(name: &str) -> Result<Selection, PipelineError> {
    name.parse()
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

/// Result of a single operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput {
    Image(PixelBuffer),
    Properties(ImageProperties),
    Grid(GridOverlay),
    Detection(DetectionResult),
}

impl OperationOutput {
    /// The buffer to display, if this output has one.
    pub fn image(&self) -> Option<&PixelBuffer> {
        match self {
            OperationOutput::Image(image) => Some(image),
            OperationOutput::Properties(_) => None,
            OperationOutput::Grid(grid) => Some(&grid.image),
            OperationOutput::Detection(detection) => Some(&detection.image),
        }
    }
}

/// Results keyed by operation, in menu order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineOutput {
    entries: Vec<(Operation, OperationOutput)>,
}

impl PipelineOutput {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, op: Operation) -> Option<&OperationOutput> {
        self.entries
            .iter()
            .find(|(key, _)| *key == op)
            .map(|(_, output)| output)
    }

    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.entries.iter().map(|(op, _)| *op)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Operation, OperationOutput)> {
        self.entries.iter()
    }
}

impl IntoIterator for PipelineOutput {
    type Item = (Operation, OperationOutput);
    type IntoIter = std::vec::IntoIter<(Operation, OperationOutput)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Run a selection against the current image.
///
/// The image is passed in explicitly; the selector keeps no state between
/// calls.
///
/// # Errors
///
/// `MissingInput` when no image is present (no transform runs), `Config`
/// when the configuration is invalid, and `Transform` if a handler rejects
/// its parameters.
#[instrument(skip_all, fields(selection = %selection))]
pub fn run(
    input: Option<&PixelBuffer>,
    selection: Selection,
    config: &ProcessingConfig,
) -> Result<PipelineOutput, PipelineError> {
    let Some(buffer) = input else {
        warn!("Operation requested without an image");
        return Err(PipelineError::MissingInput);
    };
    config.validate()?;

    let mut entries = Vec::with_capacity(Operation::ALL.len());
    for op in selection.operations() {
        let output = op.apply(buffer, config)?;
        debug!(operation = %op, "Operation applied");
        entries.push((op, output));
    }

    Ok(PipelineOutput { entries })
}

/// Decode an upload and run a selection on it.
///
/// A decode failure aborts the request before any transform runs.
#[instrument(skip_all, fields(selection = %selection, len = upload.map(<[u8]>::len)))]
pub fn process_upload(
    upload: Option<&[u8]>,
    selection: Selection,
    config: &ProcessingConfig,
) -> Result<PipelineOutput, PipelineError> {
    let Some(bytes) = upload else {
        warn!("Upload requested without any bytes");
        return Err(PipelineError::MissingInput);
    };
    let buffer = decode_image(bytes)?;
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        "Upload ready for processing"
    );
    run(Some(&buffer), selection, config)
}

fn run_grayscale(
    buffer: &PixelBuffer,
    _config: &ProcessingConfig,
) -> Result<OperationOutput, TransformError> {
    Ok(OperationOutput::Image(to_grayscale(buffer)))
}

fn run_properties(
    buffer: &PixelBuffer,
    _config: &ProcessingConfig,
) -> Result<OperationOutput, TransformError> {
    Ok(OperationOutput::Properties(properties(buffer)))
}

fn run_rotate_90(
    buffer: &PixelBuffer,
    _config: &ProcessingConfig,
) -> Result<OperationOutput, TransformError> {
    Ok(OperationOutput::Image(rotate_by(buffer, Rotation::Cw90)))
}

fn run_rotate_180(
    buffer: &PixelBuffer,
    _config: &ProcessingConfig,
) -> Result<OperationOutput, TransformError> {
    Ok(OperationOutput::Image(rotate_by(buffer, Rotation::Cw180)))
}

fn run_rotate_270(
    buffer: &PixelBuffer,
    _config: &ProcessingConfig,
) -> Result<OperationOutput, TransformError> {
    Ok(OperationOutput::Image(rotate_by(buffer, Rotation::Cw270)))
}

fn run_mirror(
    buffer: &PixelBuffer,
    _config: &ProcessingConfig,
) -> Result<OperationOutput, TransformError> {
    Ok(OperationOutput::Image(mirror(buffer)))
}

fn run_grid_overlay(
    buffer: &PixelBuffer,
    config: &ProcessingConfig,
) -> Result<OperationOutput, TransformError> {
    Ok(OperationOutput::Grid(grid_overlay(buffer, &config.grid)))
}

fn run_object_detection(
    buffer: &PixelBuffer,
    config: &ProcessingConfig,
) -> Result<OperationOutput, TransformError> {
    Ok(OperationOutput::Detection(detect_objects(
        buffer,
        &config.detection,
    )))
}
