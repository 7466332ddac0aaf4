//! Cell geometry
//!
//! Rectangles in grid cells and the clamped, mode-aware fill shared by the
//! LED buffer and the paged screen buffer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Brightest LED level
pub const MAX_LEVEL: u8 = 15;

/// A rectangle of grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: u8,
    pub y: u8,
    pub w: u8,
    pub h: u8,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: u8, y: u8, w: u8, h: u8) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive-lower, exclusive-upper containment test
    pub fn within(&self, x: u8, y: u8) -> bool {
        let (x, y) = (x as u16, y as u16);
        x >= self.x as u16
            && x < self.x as u16 + self.w as u16
            && y >= self.y as u16
            && y < self.y as u16 + self.h as u16
    }

    /// Column of the right-most cell
    pub fn last_x(&self) -> u8 {
        self.x.saturating_add(self.w).saturating_sub(1)
    }

    /// Row of the bottom-most cell
    pub fn last_y(&self) -> u8 {
        self.y.saturating_add(self.h).saturating_sub(1)
    }

    /// True when the rectangle covers no cells
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// How a fill treats the cells it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FillLevel {
    /// Leave existing content untouched
    Off,
    /// Halve the existing level
    Dim,
    /// Double the existing level, clamped to 15
    Bright,
    /// Overwrite with an explicit level
    Level(u8),
}

impl FillLevel {
    /// Apply this fill to a single cell value
    pub fn apply(self, cell: u8) -> u8 {
        match self {
            FillLevel::Off => cell,
            FillLevel::Dim => cell >> 1,
            FillLevel::Bright => (cell << 1).min(MAX_LEVEL),
            FillLevel::Level(level) => level.min(MAX_LEVEL),
        }
    }
}

/// A rectangular buffer of cell levels
///
/// Implemented by the LED buffer and by page views of the screen buffer so
/// both pipelines share one fill routine.
pub trait CellBuffer {
    /// Width in cells; fills are clamped to it
    fn width(&self) -> u8;

    /// Height in cells; fills are clamped to it
    fn height(&self) -> u8;

    /// Mutable access to a cell, `None` if the cell has no backing storage
    fn cell_mut(&mut self, x: u8, y: u8) -> Option<&mut u8>;
}

/// Fill `rect` in `buffer`, clamped to the buffer bounds
pub fn fill<B: CellBuffer + ?Sized>(buffer: &mut B, rect: Rect, level: FillLevel) {
    if level == FillLevel::Off {
        return;
    }

    let x_end = (rect.x as u16 + rect.w as u16).min(buffer.width() as u16);
    let y_end = (rect.y as u16 + rect.h as u16).min(buffer.height() as u16);

    for x in rect.x as u16..x_end {
        for y in rect.y as u16..y_end {
            if let Some(cell) = buffer.cell_mut(x as u8, y as u8) {
                *cell = level.apply(*cell);
            }
        }
    }
}
