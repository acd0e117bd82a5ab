//! Grid overlay with non-prime cell labels.
//!
//! The image is split into `rows x cols` cells. Boundary `i` of `n` parts
//! over a length `len` sits at `floor(len * i / n)`, so the final cell
//! always ends at the image edge. One-pixel lines are drawn on the inner
//! boundaries and each cell is tagged, in row-major order, with the next
//! non-prime positive integer (1, 4, 6, 8, 9, ...).

use image::{ImageBuffer, Luma, Pixel, Rgb};
use imageproc::drawing::draw_line_segment_mut;
use serde::{Deserialize, Serialize};

use super::glyphs;
use crate::buffer::PixelBuffer;
use crate::config::GridConfig;
use crate::luminance::calculate_luma_u8;

/// Gap between a cell's top-left corner and its label.
const LABEL_MARGIN: u32 = 2;

/// One cell of the overlay grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub label: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Annotated image plus the cell layout it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOverlay {
    pub image: PixelBuffer,
    /// Cells in row-major order
    pub cells: Vec<GridCell>,
}

/// Boundaries splitting `length` into `parts` spans: `parts + 1` values,
/// the first 0 and the last `length`.
pub fn grid_boundaries(length: u32, parts: u32) -> Vec<u32> {
    let parts = parts.max(1) as u64;
    (0..=parts)
        .map(|i| (length as u64 * i / parts) as u32)
        .collect()
}

/// The first `count` positive integers that are not prime.
pub fn non_prime_labels(count: usize) -> Vec<u32> {
    (1u32..).filter(|&n| !is_prime(n)).take(count).collect()
}

fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

/// Draw a labelled grid over a copy of the buffer.
///
/// Only the line pixels and the label glyphs differ from the input; the
/// output keeps the input's dimensions and channel layout.
pub fn grid_overlay(buffer: &PixelBuffer, config: &GridConfig) -> GridOverlay {
    let cells = layout_cells(buffer.width(), buffer.height(), config);

    let image = match buffer {
        PixelBuffer::Gray(img) => {
            let [r, g, b] = config.line_color;
            let color = Luma([calculate_luma_u8(r, g, b)]);
            PixelBuffer::Gray(draw_grid(img, &cells, config, color))
        }
        PixelBuffer::Rgb(img) => {
            PixelBuffer::Rgb(draw_grid(img, &cells, config, Rgb(config.line_color)))
        }
    };

    GridOverlay { image, cells }
}

fn layout_cells(width: u32, height: u32, config: &GridConfig) -> Vec<GridCell> {
    let xs = grid_boundaries(width, config.cols);
    let ys = grid_boundaries(height, config.rows);
    let mut labels = non_prime_labels((xs.len() - 1) * (ys.len() - 1)).into_iter();

    let mut cells = Vec::with_capacity(config.cell_count());
    for (row, span_y) in ys.windows(2).enumerate() {
        for (col, span_x) in xs.windows(2).enumerate() {
            cells.push(GridCell {
                row: row as u32,
                col: col as u32,
                label: labels.next().unwrap_or_default(),
                x: span_x[0],
                y: span_y[0],
                width: span_x[1] - span_x[0],
                height: span_y[1] - span_y[0],
            });
        }
    }
    cells
}

fn draw_grid<P>(
    img: &ImageBuffer<P, Vec<u8>>,
    cells: &[GridCell],
    config: &GridConfig,
    color: P,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let mut out = img.clone();
    let (width, height) = out.dimensions();
    if width == 0 || height == 0 {
        return out;
    }

    if config.draw_labels {
        let scale = config.label_scale;
        for cell in cells {
            let (label_w, label_h) = glyphs::number_size(cell.label, scale);
            let fits_x = label_w.saturating_add(LABEL_MARGIN) < cell.width;
            let fits_y = label_h.saturating_add(LABEL_MARGIN) < cell.height;
            if fits_x && fits_y {
                glyphs::draw_number(
                    &mut out,
                    cell.label,
                    cell.x + LABEL_MARGIN,
                    cell.y + LABEL_MARGIN,
                    scale,
                    color,
                );
            }
        }
    }

    // Lines go on top of labels; segment ends past the edge are clipped
    let bottom = height as f32;
    let right = width as f32;
    for &x in inner(&grid_boundaries(width, config.cols)) {
        draw_line_segment_mut(&mut out, (x as f32, 0.0), (x as f32, bottom), color);
    }
    for &y in inner(&grid_boundaries(height, config.rows)) {
        draw_line_segment_mut(&mut out, (0.0, y as f32), (right, y as f32), color);
    }

    out
}

/// Boundaries strictly between the image edges.
fn inner(boundaries: &[u32]) -> &[u32] {
    &boundaries[1..boundaries.len() - 1]
}
