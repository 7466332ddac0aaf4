//! Per-cell LED overrides

use crate::geometry::MAX_LEVEL;

/// Override applied to one LED after widgets are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedOverlay {
    /// Keep the widget output
    #[default]
    Unset,
    /// Replace with an explicit level
    Level(u8),
    /// Halve the widget output
    Dim,
    /// Double the widget output, never below 1
    Bright,
}

impl LedOverlay {
    /// Apply the override to a composed cell level
    pub fn apply(self, cell: u8) -> u8 {
        match self {
            LedOverlay::Unset => cell,
            LedOverlay::Level(level) => level.min(MAX_LEVEL),
            LedOverlay::Dim => cell >> 1,
            LedOverlay::Bright => (cell << 1).clamp(1, MAX_LEVEL),
        }
    }
}
