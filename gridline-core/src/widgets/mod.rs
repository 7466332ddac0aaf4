//! Widget value model
//!
//! Runtime state for buttons, faders and XY pads, the touch-to-value
//! mapping for each widget type, and the value-to-cells geometry shared by
//! hit testing and both render pipelines.

pub mod button;
pub mod fader;
pub mod xypad;

pub use button::Button;
pub use fader::{Fader, FineFill, Glide, SlideDirection, COARSE_SLIDE_STEP_RATE};
pub use xypad::XyPad;

use heapless::Vec;

use crate::geometry::{FillLevel, Rect};

/// Maximum fills any single widget draws
pub const MAX_WIDGET_FILLS: usize = 4;

/// One rectangle of a widget's visual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fill {
    pub rect: Rect,
    pub level: FillLevel,
}

impl Fill {
    /// Solid fill at an explicit level
    ///
    /// Coordinates are computed wide and saturated so degenerate widgets
    /// produce empty or clipped fills instead of wrapping.
    pub(crate) fn cells(x: u16, y: u16, w: u16, h: u16, level: u8) -> Self {
        let narrow = |v: u16| v.min(u8::MAX as u16) as u8;
        Self {
            rect: Rect::new(narrow(x), narrow(y), narrow(w), narrow(h)),
            level: FillLevel::Level(level),
        }
    }
}

/// The fills making up one widget's visual, drawn in order
pub type Fills = Vec<Fill, MAX_WIDGET_FILLS>;
