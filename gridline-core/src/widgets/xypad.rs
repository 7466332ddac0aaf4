//! XY pads

use super::{Fill, Fills};
use crate::config::{Placement, XyPadConfig};
use crate::geometry::MAX_LEVEL;

/// A two-axis touch surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct XyPad {
    pub placement: Placement,
    value_x: u8,
    value_y: u8,
}

impl XyPad {
    /// Create a pad at rest (both axes zero)
    pub fn new(config: XyPadConfig) -> Self {
        Self {
            placement: config.placement,
            value_x: 0,
            value_y: 0,
        }
    }

    /// Horizontal value, relative to the left column
    pub fn value_x(&self) -> u8 {
        self.value_x
    }

    /// Vertical value, relative to the top row
    pub fn value_y(&self) -> u8 {
        self.value_y
    }

    /// Set both values, clamped to the pad
    pub fn set_value(&mut self, x: u8, y: u8) {
        self.value_x = x.min(self.placement.w.saturating_sub(1));
        self.value_y = y.min(self.placement.h.saturating_sub(1));
    }

    /// Take the values from a touch at absolute grid coordinates
    pub fn touch(&mut self, x: u8, y: u8) {
        self.set_value(x.saturating_sub(self.placement.x), y.saturating_sub(self.placement.y));
    }

    /// Guide row, guide column and marker; nothing while at the origin
    pub fn fills(&self) -> Fills {
        let mut fills = Fills::new();
        if self.value_x == 0 && self.value_y == 0 {
            return fills;
        }

        let p = &self.placement;
        let x = p.x as u16 + self.value_x as u16;
        let y = p.y as u16 + self.value_y as u16;
        let _ = fills.push(Fill::cells(p.x as u16, y, p.w as u16, 1, p.level));
        let _ = fills.push(Fill::cells(x, p.y as u16, 1, p.h as u16, p.level));
        let _ = fills.push(Fill::cells(x, y, 1, 1, MAX_LEVEL));
        fills
    }
}
