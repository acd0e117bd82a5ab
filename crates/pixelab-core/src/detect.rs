//! Object outlining without learned models.
//!
//! # Algorithm
//!
//! 1. Convert to grayscale (BT.601 luma)
//! 2. Binarize the gradient with fixed hysteresis thresholds (Canny, which
//!    smooths with a Gaussian first)
//! 3. Trace the borders of connected edge regions and keep only top-level
//!    outer borders (external contours)
//! 4. Drop contours whose enclosed area is at most `min_contour_area`
//! 5. Draw an axis-aligned bounding box for each survivor on a copy of the
//!    input
//!
//! Detection is purely intensity driven: low contrast or uneven lighting
//! will merge or miss objects.

use image::{ImageBuffer, Luma, Pixel, Rgb};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::edges::canny;
use imageproc::point::Point;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::buffer::PixelBuffer;
use crate::config::DetectionConfig;
use crate::transform::to_grayscale;

/// Smallest side length that can hold a closed contour.
const MIN_DETECTION_SIZE: u32 = 3;

/// Axis-aligned box around one detected object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Area enclosed by the contour (shoelace formula)
    pub area: f64,
}

/// Annotated copy of the input plus what was found.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub image: PixelBuffer,
    pub object_count: usize,
    pub boxes: Vec<BoundingBox>,
}

/// Outline the objects in a buffer.
///
/// RGB inputs get boxes in `box_color`; single-channel inputs get white
/// boxes. The same buffer and configuration always produce the same result.
#[instrument(skip_all, fields(width = buffer.width(), height = buffer.height()))]
pub fn detect_objects(buffer: &PixelBuffer, config: &DetectionConfig) -> DetectionResult {
    let boxes = find_objects(buffer, config);
    let thickness = config.box_thickness;

    let image = match buffer {
        PixelBuffer::Gray(img) => PixelBuffer::Gray(draw_boxes(img, &boxes, thickness, Luma([255]))),
        PixelBuffer::Rgb(img) => {
            PixelBuffer::Rgb(draw_boxes(img, &boxes, thickness, Rgb(config.box_color)))
        }
    };

    debug!(object_count = boxes.len(), "Objects detected");
    DetectionResult {
        image,
        object_count: boxes.len(),
        boxes,
    }
}

/// Locate objects without drawing anything.
pub fn find_objects(buffer: &PixelBuffer, config: &DetectionConfig) -> Vec<BoundingBox> {
    if buffer.width() < MIN_DETECTION_SIZE || buffer.height() < MIN_DETECTION_SIZE {
        return Vec::new();
    }

    let PixelBuffer::Gray(gray) = to_grayscale(buffer) else {
        return Vec::new();
    };
    let edges = canny(
        &gray,
        config.edge_low_threshold,
        config.binarization_threshold,
    );

    let contours: Vec<Contour<i32>> = find_contours(&edges);
    let boxes: Vec<BoundingBox> = contours
        .iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .filter_map(|c| {
            let area = contour_area(&c.points);
            (area > config.min_contour_area)
                .then(|| bounding_box(&c.points, area))
                .flatten()
        })
        .collect();

    debug!(
        contours = contours.len(),
        kept = boxes.len(),
        min_area = config.min_contour_area,
        "Contours filtered"
    );
    boxes
}

/// Area enclosed by a closed polygon.
fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let twice_area: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    (twice_area as f64 / 2.0).abs()
}

fn bounding_box(points: &[Point<i32>], area: f64) -> Option<BoundingBox> {
    let min_x = points.iter().map(|p| p.x).min()?;
    let max_x = points.iter().map(|p| p.x).max()?;
    let min_y = points.iter().map(|p| p.y).min()?;
    let max_y = points.iter().map(|p| p.y).max()?;

    Some(BoundingBox {
        x: min_x.max(0) as u32,
        y: min_y.max(0) as u32,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
        area,
    })
}

/// Draw each box as nested one-pixel rectangles growing outwards.
fn draw_boxes<P>(
    img: &ImageBuffer<P, Vec<u8>>,
    boxes: &[BoundingBox],
    thickness: u32,
    color: P,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let mut out = img.clone();
    for b in boxes {
        for i in 0..thickness {
            let rect = Rect::at(b.x as i32 - i as i32, b.y as i32 - i as i32)
                .of_size(b.width + 2 * i, b.height + 2 * i);
            draw_hollow_rect_mut(&mut out, rect, color);
        }
    }
    out
}
