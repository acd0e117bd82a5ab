//! Minimal 3x5 bitmap digits for cell labels.

use image::{ImageBuffer, Pixel};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;
const GLYPH_SPACING: u32 = 1;

/// Rows of each digit, most significant of the low three bits is the left column.
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Pixel size of a number rendered at `scale`.
pub(super) fn number_size(value: u32, scale: u32) -> (u32, u32) {
    let digits = value.to_string().len() as u32;
    let width = digits * GLYPH_WIDTH + (digits - 1) * GLYPH_SPACING;
    (width.saturating_mul(scale), GLYPH_HEIGHT.saturating_mul(scale))
}

/// Draw `value` with its top-left corner at (`x`, `y`).
pub(super) fn draw_number<P>(
    img: &mut ImageBuffer<P, Vec<u8>>,
    value: u32,
    x: u32,
    y: u32,
    scale: u32,
    color: P,
) where
    P: Pixel<Subpixel = u8>,
{
    if scale == 0 {
        return;
    }

    let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;
    let digits = value.to_string();
    for (i, ch) in digits.chars().enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            continue;
        };
        let origin_x = x + i as u32 * advance;

        for (row, bits) in DIGITS[digit as usize].iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                    continue;
                }
                let px = origin_x + col * scale;
                let py = y + row as u32 * scale;
                let cell = Rect::at(px as i32, py as i32).of_size(scale, scale);
                draw_filled_rect_mut(img, cell, color);
            }
        }
    }
}
