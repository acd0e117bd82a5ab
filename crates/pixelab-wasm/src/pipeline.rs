//! Operation selection WASM bindings.
//!
//! Processing constants are fixed once, when the [`Pixelab`] handle is
//! created. After that a request carries only the current image (kept by
//! the browser) and the selection; no image is remembered between calls.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_png, Pixelab } from '@pixelab/wasm';
//!
//! // At startup; omitted fields keep their defaults
//! const pixelab = new Pixelab({ grid: { rows: 4, cols: 4 } });
//!
//! const image = decode_image(bytes);
//! for (const result of pixelab.run_selection(image, 'all')) {
//!   if (result.has_image) {
//!     show(result.title, encode_png(result.image()));
//!   }
//! }
//! ```

use crate::types::{config_from_js, JsPixelBuffer};
use pixelab_core::detect::{self, BoundingBox};
use pixelab_core::pipeline::{
    self, Operation, OperationOutput, PipelineError, PipelineOutput, Selection,
};
use pixelab_core::transform::{self, GridCell, ImageProperties};
use pixelab_core::{ConfigError, PixelBuffer, ProcessingConfig};
use wasm_bindgen::prelude::*;

/// Result of one operation, accessible from JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsOperationResult {
    operation: Operation,
    image: Option<JsPixelBuffer>,
    properties: Option<ImageProperties>,
    object_count: Option<usize>,
    boxes: Vec<BoundingBox>,
    cells: Vec<GridCell>,
}

#[wasm_bindgen]
impl JsOperationResult {
    /// Operation key, e.g. `rotate_90`.
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.operation.name().to_string()
    }

    /// Display title, e.g. `Rotated 90°`.
    #[wasm_bindgen(getter)]
    pub fn title(&self) -> String {
        self.operation.title().to_string()
    }

    /// Whether this result carries an image (everything but properties).
    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Resulting image, if any.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn image(&self) -> Option<JsPixelBuffer> {
        self.image.clone()
    }

    /// Number of objects found (object detection only).
    #[wasm_bindgen(getter)]
    pub fn object_count(&self) -> Option<u32> {
        self.object_count.map(|count| count as u32)
    }

    /// Image properties as a plain object (properties only).
    pub fn properties(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.properties).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Bounding boxes as an array of `{x, y, width, height, area}`.
    pub fn boxes(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.boxes).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Grid cells as an array of `{row, col, label, x, y, width, height}`.
    pub fn cells(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.cells).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsOperationResult {
    pub(crate) fn from_output(operation: Operation, output: OperationOutput) -> Self {
        let mut result = Self {
            operation,
            image: None,
            properties: None,
            object_count: None,
            boxes: Vec::new(),
            cells: Vec::new(),
        };

        match output {
            OperationOutput::Image(buffer) => {
                result.image = Some(JsPixelBuffer::from_buffer(buffer));
            }
            OperationOutput::Properties(props) => {
                result.properties = Some(props);
            }
            OperationOutput::Grid(grid) => {
                result.image = Some(JsPixelBuffer::from_buffer(grid.image));
                result.cells = grid.cells;
            }
            OperationOutput::Detection(detection) => {
                result.image = Some(JsPixelBuffer::from_buffer(detection.image));
                result.object_count = Some(detection.object_count);
                result.boxes = detection.boxes;
            }
        }
        result
    }
}

/// Convert pipeline output to binding results, keeping menu order.
fn build_results(output: PipelineOutput) -> Vec<JsOperationResult> {
    output
        .into_iter()
        .map(|(op, out)| JsOperationResult::from_output(op, out))
        .collect()
}

fn into_array(results: Vec<JsOperationResult>) -> js_sys::Array {
    results.into_iter().map(JsValue::from).collect()
}

/// Processing handle holding the startup configuration.
///
/// Create one when the page loads and reuse it for every request.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct Pixelab {
    config: ProcessingConfig,
}

#[wasm_bindgen]
impl Pixelab {
    /// Create a handle from an optional partial configuration object.
    ///
    /// `undefined` or `null` selects the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the object has the wrong shape or its values are
    /// out of range (empty or oversized grid, thresholds out of order, ...).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Pixelab, JsValue> {
        let config = config_from_js(config)?;
        Self::with_config(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The configuration in use, as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Run a selection (`"all"` or one operation name) on the current image.
    ///
    /// # Arguments
    ///
    /// * `image` - The current image, or `undefined` if nothing was uploaded
    /// * `selection` - Operation name such as `grayscale`, `rotate_90` or `all`
    ///
    /// # Returns
    ///
    /// An array of `JsOperationResult`, one per operation, in menu order.
    ///
    /// # Errors
    ///
    /// Returns an error if no image is given or the selection name is unknown.
    pub fn run_selection(
        &self,
        image: Option<JsPixelBuffer>,
        selection: &str,
    ) -> Result<js_sys::Array, JsValue> {
        self.run(image.as_ref().map(JsPixelBuffer::buffer), selection)
            .map(into_array)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Decode an upload and run a selection on it in one call.
    ///
    /// `bytes` may be `undefined`, in which case the missing-image error is
    /// returned without decoding anything.
    pub fn process_upload(
        &self,
        bytes: Option<Vec<u8>>,
        selection: &str,
    ) -> Result<js_sys::Array, JsValue> {
        self.process(bytes.as_deref(), selection)
            .map(into_array)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Draw the labelled grid over a copy of the image.
    pub fn grid_overlay(&self, image: &JsPixelBuffer) -> JsOperationResult {
        let grid = transform::grid_overlay(image.buffer(), &self.config.grid);
        JsOperationResult::from_output(Operation::GridOverlay, OperationOutput::Grid(grid))
    }

    /// Outline the objects in the image.
    ///
    /// The result carries the annotated image, `object_count` and the boxes.
    pub fn detect_objects(&self, image: &JsPixelBuffer) -> JsOperationResult {
        let detection = detect::detect_objects(image.buffer(), &self.config.detection);
        JsOperationResult::from_output(
            Operation::ObjectDetection,
            OperationOutput::Detection(detection),
        )
    }
}

impl Pixelab {
    /// Build a handle from an already parsed configuration.
    pub(crate) fn with_config(config: ProcessingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    fn run(
        &self,
        image: Option<&PixelBuffer>,
        selection: &str,
    ) -> Result<Vec<JsOperationResult>, PipelineError> {
        let selection = pipeline::parse_selection(selection)?;
        pipeline::run(image, selection, &self.config).map(build_results)
    }

    fn process(
        &self,
        bytes: Option<&[u8]>,
        selection: &str,
    ) -> Result<Vec<JsOperationResult>, PipelineError> {
        let selection = pipeline::parse_selection(selection)?;
        pipeline::process_upload(bytes, selection, &self.config).map(build_results)
    }
}

/// Names accepted by [`Pixelab::run_selection`], in menu order, ending with `all`.
#[wasm_bindgen]
pub fn operation_names() -> Vec<String> {
    Operation::ALL
        .iter()
        .map(|op| op.name().to_string())
        .chain(std::iter::once(Selection::All.to_string()))
        .collect()
}


/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use pixelab_core::{encode_png, Channels};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_image() -> JsPixelBuffer {
        JsPixelBuffer::new(16, 8, 3, vec![120u8; 16 * 8 * 3]).unwrap()
    }

    fn default_handle() -> Pixelab {
        Pixelab::new(JsValue::UNDEFINED).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_new_with_partial_config() {
        let config = js_sys::JSON::parse(r#"{"grid": {"rows": 2}}"#).unwrap();
        let pixelab = Pixelab::new(config).unwrap();
        let result = pixelab.grid_overlay(&test_image());
        assert_eq!(result.cells.len(), 8);
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_invalid_config() {
        let config = js_sys::JSON::parse(r#"{"grid": {"rows": 0}}"#).unwrap();
        assert!(Pixelab::new(config).is_err());

        let config = js_sys::JSON::parse(r#"{"grid": {"label_scale": 2147483647}}"#).unwrap();
        assert!(Pixelab::new(config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_run_selection_all() {
        let results = default_handle()
            .run_selection(Some(test_image()), "all")
            .unwrap();
        assert_eq!(results.length(), 8);
    }

    #[wasm_bindgen_test]
    fn test_run_selection_missing_image() {
        let err = default_handle().run_selection(None, "all").unwrap_err();
        assert!(err.as_string().unwrap().starts_with("No image uploaded"));
    }

    #[wasm_bindgen_test]
    fn test_run_selection_unknown_operation() {
        let err = default_handle()
            .run_selection(Some(test_image()), "rotate_45")
            .unwrap_err();
        assert!(err.as_string().unwrap().starts_with("Invalid parameter"));
    }

    #[wasm_bindgen_test]
    fn test_process_upload() {
        let buffer = PixelBuffer::new(6, 4, Channels::Rgb, vec![10u8; 6 * 4 * 3]).unwrap();
        let png = encode_png(&buffer).unwrap();
        let pixelab = default_handle();

        let results = pixelab.process_upload(Some(png), "all").unwrap();
        assert_eq!(results.length(), 8);
        assert!(pixelab.process_upload(None, "all").is_err());
    }

    #[wasm_bindgen_test]
    fn test_result_serialization() {
        let pixelab = default_handle();
        assert!(pixelab.config().unwrap().is_object());

        let result = pixelab.detect_objects(&test_image());
        assert!(js_sys::Array::is_array(&result.boxes().unwrap()));
        assert!(js_sys::Array::is_array(&result.cells().unwrap()));
    }
}
