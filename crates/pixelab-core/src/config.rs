//! Fixed processing constants, grouped per operation.
//!
//! Values are chosen once at startup and injected into the operations that
//! need them; they never come from an individual request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted number of grid rows or columns.
pub const MAX_GRID_DIMENSION: u32 = 64;

/// Largest accepted label glyph scale.
pub const MAX_LABEL_SCALE: u32 = 16;

/// Largest accepted bounding box stroke width.
pub const MAX_BOX_THICKNESS: u32 = 16;

/// Errors raised by [`ProcessingConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A grid needs at least one row and one column.
    #[error("Invalid grid: rows ({rows}) and cols ({cols}) must be non-zero")]
    EmptyGrid { rows: u32, cols: u32 },

    /// More rows or columns than a grid overlay can label.
    #[error("Invalid grid: rows ({rows}) and cols ({cols}) must be at most {}", MAX_GRID_DIMENSION)]
    GridTooLarge { rows: u32, cols: u32 },

    /// Label glyph scale above the supported maximum.
    #[error("Invalid label scale: {0} (must be at most {max})", max = MAX_LABEL_SCALE)]
    LabelScale(u32),

    /// Hysteresis threshold that is not a number.
    #[error("Invalid edge thresholds: low ({low}) and high ({high}) must not be NaN")]
    ThresholdNan { low: f32, high: f32 },

    /// Hysteresis thresholds out of order or negative.
    #[error("Invalid edge thresholds: low ({low}) must be >= 0 and <= high ({high})")]
    ThresholdOrder { low: f32, high: f32 },

    /// Area filter below zero or not a number.
    #[error("Invalid minimum contour area: {0} (must be >= 0)")]
    NegativeArea(f64),

    /// Bounding box stroke wider than supported.
    #[error("Invalid box thickness: {0} (must be at most {max})", max = MAX_BOX_THICKNESS)]
    BoxThickness(u32),
}

/// Settings for contour-based object detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Lower hysteresis threshold for edge binarization
    pub edge_low_threshold: f32,
    /// Gradient magnitude a pixel must reach to seed an edge
    pub binarization_threshold: f32,
    /// Contours enclosing this area or less are treated as noise
    pub min_contour_area: f64,
    /// Bounding box stroke width in pixels
    pub box_thickness: u32,
    /// Bounding box color on RGB images
    pub box_color: [u8; 3],
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            edge_low_threshold: 50.0,
            binarization_threshold: 150.0,
            min_contour_area: 500.0,
            box_thickness: 2,
            box_color: [0, 255, 0],
        }
    }
}

/// Settings for the grid overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    /// Color of grid lines and cell labels on RGB images
    pub line_color: [u8; 3],
    /// Draw the cell labels, not just the lines
    pub draw_labels: bool,
    /// Size multiplier for label glyphs (0 hides them)
    pub label_scale: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            line_color: [0, 255, 0],
            draw_labels: true,
            label_scale: 2,
        }
    }
}

impl GridConfig {
    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// All constants used by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub detection: DetectionConfig,
    pub grid: GridConfig,
}

impl ProcessingConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check invariants the operations rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = &self.grid;
        if grid.rows == 0 || grid.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        if grid.rows > MAX_GRID_DIMENSION || grid.cols > MAX_GRID_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        if grid.label_scale > MAX_LABEL_SCALE {
            return Err(ConfigError::LabelScale(grid.label_scale));
        }

        let det = &self.detection;
        let (low, high) = (det.edge_low_threshold, det.binarization_threshold);
        if low.is_nan() || high.is_nan() {
            return Err(ConfigError::ThresholdNan { low, high });
        }
        if low < 0.0 || low > high {
            return Err(ConfigError::ThresholdOrder { low, high });
        }

        if det.min_contour_area.is_nan() || det.min_contour_area < 0.0 {
            return Err(ConfigError::NegativeArea(det.min_contour_area));
        }
        if det.box_thickness > MAX_BOX_THICKNESS {
            return Err(ConfigError::BoxThickness(det.box_thickness));
        }

        Ok(())
    }
}
