//! Display line buffers
//!
//! The editor display is 128x64 pixels with 4-bit intensity per pixel. It is
//! addressed as eight horizontal lines of 128x8 pixels; a pixel at absolute
//! `(x, y)` lives in line `y >> 3` at offset `x + ((y & 7) << 7)`.

/// Pixel width of every line
pub const LINE_WIDTH: usize = 128;

/// Pixel height of every line
pub const LINE_HEIGHT: usize = 8;

/// Number of lines on the display
pub const DISPLAY_LINES: usize = 8;

/// Total display height in pixels
pub const DISPLAY_HEIGHT: usize = DISPLAY_LINES * LINE_HEIGHT;

/// Brightest representable pixel intensity
pub const MAX_INTENSITY: u8 = 15;

const LINE_PIXELS: usize = LINE_WIDTH * LINE_HEIGHT;

/// One 128x8 strip of the display
#[derive(Clone, PartialEq, Eq)]
pub struct Line {
    data: [u8; LINE_PIXELS],
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Line {
    /// Create a blank line
    pub const fn new() -> Self {
        Self {
            data: [0; LINE_PIXELS],
        }
    }

    /// Set every pixel to `level`
    pub fn fill(&mut self, level: u8) {
        self.data.fill(level.min(MAX_INTENSITY));
    }

    /// Set the pixel at line-local coordinates; out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, level: u8) {
        if x < LINE_WIDTH && y < LINE_HEIGHT {
            self.data[x + (y << 7)] = level.min(MAX_INTENSITY);
        }
    }

    /// Pixel at line-local coordinates, 0 when out of range
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < LINE_WIDTH && y < LINE_HEIGHT {
            self.data[x + (y << 7)]
        } else {
            0
        }
    }

    /// Raw row-major pixel data
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The full display as eight lines
#[derive(Clone)]
pub struct DisplayLines {
    lines: [Line; DISPLAY_LINES],
    /// Whether the lines changed since the last flush
    dirty: bool,
}

impl Default for DisplayLines {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayLines {
    /// Create a blank display
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| Line::new()),
            dirty: true,
        }
    }

    /// Clear the first `count` lines to black
    pub fn clear_lines(&mut self, count: usize) {
        for line in self.lines.iter_mut().take(count) {
            line.fill(0);
        }
        self.dirty = true;
    }

    /// Set a pixel by absolute display coordinates
    pub fn set_pixel(&mut self, x: usize, y: usize, level: u8) {
        if let Some(line) = self.lines.get_mut(y >> 3) {
            line.set(x, y & 7, level);
            self.dirty = true;
        }
    }

    /// Pixel by absolute display coordinates, 0 when out of range
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.lines.get(y >> 3).map_or(0, |line| line.get(x, y & 7))
    }

    /// Borrow a line
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Mutably borrow a line
    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.dirty = true;
        self.lines.get_mut(index)
    }

    /// Iterate over all lines
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Check if the display needs to be pushed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Push every line to `backend` and flush it
    ///
    /// The lines stay dirty when the backend is not ready or fails, so the
    /// next flush retries them.
    pub fn flush<B: crate::DisplayBackend>(&mut self, backend: &mut B) -> Result<(), crate::DisplayError> {
        if !backend.is_ready() {
            return Err(crate::DisplayError::NotInitialized);
        }
        for (index, line) in self.lines.iter().enumerate() {
            backend.draw_line(index as u8, line)?;
        }
        backend.flush()?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DisplayLines {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DisplayLines[dirty={}]", self.dirty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplayBackend, DisplayError};

    struct Panel {
        ready: bool,
        fail_line: Option<u8>,
        drawn: usize,
        flushes: usize,
    }

    impl Panel {
        fn new(ready: bool) -> Self {
            Self {
                ready,
                fail_line: None,
                drawn: 0,
                flushes: 0,
            }
        }
    }

    impl DisplayBackend for Panel {
        fn draw_line(&mut self, index: u8, _line: &Line) -> Result<(), DisplayError> {
            if self.fail_line == Some(index) {
                return Err(DisplayError::Communication);
            }
            self.drawn += 1;
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn test_flush_pushes_all_lines() {
        let mut lines = DisplayLines::new();
        let mut panel = Panel::new(true);
        assert_eq!(lines.flush(&mut panel), Ok(()));
        assert_eq!(panel.drawn, DISPLAY_LINES);
        assert_eq!(panel.flushes, 1);
        assert!(!lines.is_dirty());
    }

    #[test]
    fn test_flush_waits_for_ready_backend() {
        let mut lines = DisplayLines::new();
        let mut panel = Panel::new(false);
        assert_eq!(lines.flush(&mut panel), Err(DisplayError::NotInitialized));
        assert_eq!(panel.drawn, 0);
        assert!(lines.is_dirty());

        panel.ready = true;
        assert_eq!(lines.flush(&mut panel), Ok(()));
        assert!(!lines.is_dirty());
    }

    #[test]
    fn test_failed_line_keeps_display_dirty() {
        let mut lines = DisplayLines::new();
        let mut panel = Panel::new(true);
        panel.fail_line = Some(3);
        assert_eq!(lines.flush(&mut panel), Err(DisplayError::Communication));
        assert_eq!(panel.drawn, 3);
        assert_eq!(panel.flushes, 0);
        assert!(lines.is_dirty());
    }

    #[test]
    fn test_absolute_addressing() {
        let mut lines = DisplayLines::new();
        lines.set_pixel(5, 19, 7);

        // y = 19 -> line 2, row 3
        assert_eq!(lines.line(2).unwrap().data()[5 + (3 << 7)], 7);
        assert_eq!(lines.pixel(5, 19), 7);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut lines = DisplayLines::new();
        lines.set_pixel(LINE_WIDTH, 0, 9);
        lines.set_pixel(0, DISPLAY_HEIGHT, 9);
        assert!(lines.lines().all(|l| l.data().iter().all(|&p| p == 0)));
        assert_eq!(lines.pixel(500, 500), 0);
    }

    #[test]
    fn test_intensity_clamped() {
        let mut line = Line::new();
        line.set(0, 0, 200);
        assert_eq!(line.get(0, 0), MAX_INTENSITY);
    }

    #[test]
    fn test_clear_lines_partial() {
        let mut lines = DisplayLines::new();
        lines.set_pixel(0, 0, 5);
        lines.set_pixel(0, 60, 5);
        lines.clear_lines(6);
        assert_eq!(lines.pixel(0, 0), 0);
        assert_eq!(lines.pixel(0, 60), 5);
    }
}
