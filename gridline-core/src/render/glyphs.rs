//! Widget outline glyphs for the editor view
//!
//! Each widget is split into parts (corners, edges, strip ends) and every
//! part is drawn as a 6x6 bitmap. Bit 5 of a row is the left-most pixel.

use heapless::Vec;

use crate::geometry::Rect;

/// Side length of an outline glyph in pixels
pub const GLYPH_SIZE: usize = 6;

/// Which part of a widget outline a cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OutlinePart {
    Single = 1,
    VerticalTop = 2,
    VerticalMiddle = 3,
    VerticalBottom = 4,
    HorizontalLeft = 5,
    HorizontalMiddle = 6,
    HorizontalRight = 7,
    TopLeft = 8,
    Top = 9,
    TopRight = 10,
    Left = 11,
    Right = 12,
    BottomLeft = 13,
    Bottom = 14,
    BottomRight = 15,
}

impl OutlinePart {
    /// Glyph code stored in the screen cell buffer
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Split a widget's area into outline parts
pub fn outline_parts(rect: Rect) -> Vec<(Rect, OutlinePart), 8> {
    use OutlinePart::*;

    let Rect { x, y, w, h } = rect;
    let (last_x, last_y) = (rect.last_x(), rect.last_y());
    let inner_w = w.saturating_sub(2);
    let inner_h = h.saturating_sub(2);
    let mut parts = Vec::new();
    let mut push = |rect: Rect, part: OutlinePart| {
        let _ = parts.push((rect, part));
    };

    match (w, h) {
        (0, _) | (_, 0) => {}
        (1, 1) => push(Rect::new(x, y, 1, 1), Single),
        (1, _) => {
            push(Rect::new(x, y, 1, 1), VerticalTop);
            push(Rect::new(x, y.saturating_add(1), 1, inner_h), VerticalMiddle);
            push(Rect::new(x, last_y, 1, 1), VerticalBottom);
        }
        (_, 1) => {
            push(Rect::new(x, y, 1, 1), HorizontalLeft);
            push(Rect::new(x.saturating_add(1), y, inner_w, 1), HorizontalMiddle);
            push(Rect::new(last_x, y, 1, 1), HorizontalRight);
        }
        _ => {
            push(Rect::new(x, y, 1, 1), TopLeft);
            push(Rect::new(x.saturating_add(1), y, inner_w, 1), Top);
            push(Rect::new(last_x, y, 1, 1), TopRight);
            push(Rect::new(x, y.saturating_add(1), 1, inner_h), Left);
            push(Rect::new(last_x, y.saturating_add(1), 1, inner_h), Right);
            push(Rect::new(x, last_y, 1, 1), BottomLeft);
            push(Rect::new(x.saturating_add(1), last_y, inner_w, 1), Bottom);
            push(Rect::new(last_x, last_y, 1, 1), BottomRight);
        }
    }

    parts
}

/// Check if pixel `(px, py)` of glyph `code` is set
pub fn glyph_pixel(code: u8, px: usize, py: usize) -> bool {
    match OUTLINE_GLYPHS.get(code as usize).and_then(|rows| rows.get(py)) {
        Some(row) if px < GLYPH_SIZE => row & (1 << (GLYPH_SIZE - 1 - px)) != 0,
        _ => false,
    }
}

pub(crate) const OUTLINE_GLYPHS: [[u8; GLYPH_SIZE]; 16] = [
    // unused
    [0b000000, 0b000000, 0b000000, 0b000000, 0b000000, 0b000000],
    // single cell
    [0b000000, 0b011110, 0b010010, 0b010010, 0b011110, 0b000000],
    // vertical strip top
    [0b000000, 0b011110, 0b010010, 0b010010, 0b010010, 0b010010],
    // vertical strip middle
    [0b010010, 0b010010, 0b010010, 0b010010, 0b010010, 0b010010],
    // vertical strip bottom
    [0b010010, 0b010010, 0b010010, 0b010010, 0b011110, 0b000000],
    // horizontal strip left
    [0b000000, 0b011111, 0b010000, 0b010000, 0b011111, 0b000000],
    // horizontal strip middle
    [0b000000, 0b111111, 0b000000, 0b000000, 0b111111, 0b000000],
    // horizontal strip right
    [0b000000, 0b111110, 0b000010, 0b000010, 0b111110, 0b000000],
    // top-left corner
    [0b000000, 0b011111, 0b010000, 0b010000, 0b010000, 0b010000],
    // top edge
    [0b000000, 0b111111, 0b000000, 0b000000, 0b000000, 0b000000],
    // top-right corner
    [0b000000, 0b111110, 0b000010, 0b000010, 0b000010, 0b000010],
    // left edge
    [0b010000, 0b010000, 0b010000, 0b010000, 0b010000, 0b010000],
    // right edge
    [0b000010, 0b000010, 0b000010, 0b000010, 0b000010, 0b000010],
    // bottom-left corner
    [0b010000, 0b010000, 0b010000, 0b010000, 0b011111, 0b000000],
    // bottom edge
    [0b000000, 0b000000, 0b000000, 0b000000, 0b111111, 0b000000],
    // bottom-right corner
    [0b000010, 0b000010, 0b000010, 0b000010, 0b111110, 0b000000],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell() {
        let parts = outline_parts(Rect::new(3, 3, 1, 1));
        assert_eq!(parts.as_slice(), &[(Rect::new(3, 3, 1, 1), OutlinePart::Single)]);
    }

    #[test]
    fn test_vertical_strip() {
        let parts = outline_parts(Rect::new(2, 0, 1, 4));
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], (Rect::new(2, 0, 1, 1), OutlinePart::VerticalTop));
        assert_eq!(parts[1], (Rect::new(2, 1, 1, 2), OutlinePart::VerticalMiddle));
        assert_eq!(parts[2], (Rect::new(2, 3, 1, 1), OutlinePart::VerticalBottom));
    }

    #[test]
    fn test_rectangle_codes() {
        let parts = outline_parts(Rect::new(0, 0, 4, 3));
        let codes: Vec<u8, 8> = parts.iter().map(|(_, part)| part.code()).collect();
        assert_eq!(codes.as_slice(), &[8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(parts[6].0, Rect::new(1, 2, 2, 1));
    }

    #[test]
    fn test_two_wide_strip_has_empty_middle() {
        let parts = outline_parts(Rect::new(0, 0, 2, 1));
        assert!(parts[1].0.is_empty());
    }

    #[test]
    fn test_glyph_pixels() {
        // Single cell glyph: square from (1,1) to (4,4)
        assert!(glyph_pixel(1, 1, 1));
        assert!(glyph_pixel(1, 4, 4));
        assert!(!glyph_pixel(1, 2, 2));
        assert!(!glyph_pixel(1, 0, 0));
        assert!(!glyph_pixel(0, 1, 1));
        assert!(!glyph_pixel(16, 1, 1));
        assert!(!glyph_pixel(1, 6, 1));
    }
}
