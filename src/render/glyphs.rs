//! Built-in 3x5 bitmap font.
//!
//! Covers digits, Latin letters (lowercase drawn as uppercase) and the
//! punctuation tick labels and readouts use. Anything else renders as an
//! outlined box.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

/// Font size units per glyph cell: five rows of ink plus two of leading.
const CELLS_PER_EM: f64 = 7.0;
/// Horizontal cells per glyph: three of ink plus one of spacing.
const ADVANCE_CELLS: f64 = 4.0;

/// Rows top to bottom; bit 2 is the left column.
type Glyph = [u8; 5];

const MISSING: Glyph = [0b111, 0b101, 0b101, 0b101, 0b111];

#[rustfmt::skip]
fn glyph(c: char) -> Option<Glyph> {
    let rows = match c.to_ascii_uppercase() {
        ' ' => [0, 0, 0, 0, 0],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        _ => return None,
    };
    Some(rows)
}

/// Horizontal advance of one glyph at `size`.
#[must_use]
pub fn glyph_advance(size: f64) -> f64 {
    size / CELLS_PER_EM * ADVANCE_CELLS
}

/// Draw `text` with its baseline starting at `origin`.
pub fn draw_glyphs(fb: &mut Framebuffer, text: &str, origin: Point, size: f64, color: Rgba) {
    let cell = size / CELLS_PER_EM;
    let top = origin.y - 5.0 * cell;
    let mut x = origin.x;
    for c in text.chars() {
        let rows = glyph(c).unwrap_or(MISSING);
        for (row, bits) in rows.iter().enumerate() {
            let y0 = (top + row as f64 * cell).floor() as i64;
            let y1 = ((top + (row + 1) as f64 * cell).floor() as i64).max(y0 + 1);
            for col in 0..3 {
                if bits & (0b100 >> col) == 0 {
                    continue;
                }
                let x0 = (x + f64::from(col) * cell).floor() as i64;
                let x1 = ((x + f64::from(col + 1) * cell).floor() as i64).max(x0 + 1);
                for y in y0..y1 {
                    fb.blend_span(x0, x1, y, color);
                }
            }
        }
        x += glyph_advance(size);
    }
}
