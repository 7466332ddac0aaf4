//! Grid controller
//!
//! Process-wide state of the grid core: the held-key pool and the output
//! buffers. The host creates one controller and passes it, together with the
//! scene, to every entry point.

use gridline_display::DisplayLines;

use crate::input::HeldKeyPool;
use crate::render::{LedBuffer, ScreenCells};

/// Held keys and render targets
pub struct GridController {
    pub(crate) held: HeldKeyPool,
    pub(crate) leds: LedBuffer,
    pub(crate) cells: ScreenCells,
    pub(crate) lines: DisplayLines,
}

impl Default for GridController {
    fn default() -> Self {
        Self::new()
    }
}

impl GridController {
    pub fn new() -> Self {
        Self {
            held: HeldKeyPool::new(),
            leds: LedBuffer::new(),
            cells: ScreenCells::new(),
            lines: DisplayLines::new(),
        }
    }

    /// Keys currently tracked for hold/repeat
    pub fn held_keys(&self) -> &HeldKeyPool {
        &self.held
    }

    /// Last rendered LED frame
    pub fn leds(&self) -> &LedBuffer {
        &self.leds
    }

    /// Cell buffer of the last rendered screen page
    ///
    /// Holds composed cell levels, except after an edit render with outlines,
    /// where it holds the outline glyph code (1-15) of every covered cell.
    pub fn screen_cells(&self) -> &ScreenCells {
        &self.cells
    }

    /// Last rendered display lines
    pub fn lines(&self) -> &DisplayLines {
        &self.lines
    }

    /// Mutable display lines, for flushing to a backend
    pub fn lines_mut(&mut self) -> &mut DisplayLines {
        &mut self.lines
    }
}
