//! Display collaborator traits
//!
//! Defines the interface to the display transport and to the bitmap font
//! subsystem. Both live outside the grid core.

use core::fmt::Write;

use heapless::String;

use crate::screen::Line;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Display not initialized
    NotInitialized,
}

/// Display backend trait
///
/// Receives finished lines from a `DisplayLines` buffer. Implementations
/// handle the specifics of the panel and its bus.
pub trait DisplayBackend {
    /// Send one 128x8 line
    ///
    /// - `index`: Line number (0-7, top to bottom)
    /// - `line`: Pixel data, 4-bit intensity per pixel
    fn draw_line(&mut self, index: u8, line: &Line) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// For displays with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}

/// Bitmap font subsystem
pub trait FontRenderer {
    /// Draw `text` into `line` so that it ends at pixel column `right_x`,
    /// clipping anything that would fall left of the line.
    ///
    /// - `y`: Top row inside the line
    /// - `fg`: Foreground intensity (0-15)
    /// - `bg`: Background intensity (0-15)
    fn draw_right(&mut self, line: &mut Line, text: &str, right_x: u16, y: u8, fg: u8, bg: u8);
}

/// Helpers for the label/value readouts used by editor panels
pub trait FontExt: FontRenderer {
    /// Draw a single-character label right-aligned at `right_x`
    fn draw_label_right(&mut self, line: &mut Line, label: char, right_x: u16, fg: u8) {
        let mut buf = [0u8; 4];
        let text = label.encode_utf8(&mut buf);
        self.draw_right(line, text, right_x, 0, fg, 0);
    }

    /// Draw a decimal number right-aligned at `right_x`
    fn draw_decimal_right(&mut self, line: &mut Line, value: u16, right_x: u16, fg: u8) {
        let mut text: String<6> = String::new();
        // u16 never exceeds five digits
        let _ = write!(text, "{}", value);
        self.draw_right(line, &text, right_x, 0, fg, 0);
    }
}

// Blanket implementation for all FontRenderer types
impl<T: FontRenderer> FontExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        last: String<8>,
        right_x: u16,
    }

    impl FontRenderer for Recorder {
        fn draw_right(&mut self, _line: &mut Line, text: &str, right_x: u16, _y: u8, _fg: u8, _bg: u8) {
            self.last.clear();
            let _ = self.last.push_str(text);
            self.right_x = right_x;
        }
    }

    #[test]
    fn test_decimal_formatting() {
        let mut font = Recorder {
            last: String::new(),
            right_x: 0,
        };
        let mut line = Line::new();

        font.draw_decimal_right(&mut line, 12, 117, 8);
        assert_eq!(font.last.as_str(), "12");
        assert_eq!(font.right_x, 117);

        font.draw_decimal_right(&mut line, u16::MAX, 117, 8);
        assert_eq!(font.last.as_str(), "65535");
    }

    #[test]
    fn test_label() {
        let mut font = Recorder {
            last: String::new(),
            right_x: 0,
        };
        let mut line = Line::new();
        font.draw_label_right(&mut line, 'G', 127, 1);
        assert_eq!(font.last.as_str(), "G");
    }
}
