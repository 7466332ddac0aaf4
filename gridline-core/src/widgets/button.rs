//! Buttons

use super::Fill;
use crate::config::{ButtonConfig, Placement};
use crate::geometry::{FillLevel, MAX_LEVEL};

/// A momentary or latching button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    pub placement: Placement,
    /// Toggle on press instead of following the key
    pub latch: bool,
    state: bool,
}

impl Button {
    /// Create a released button from its configuration
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            placement: config.placement,
            latch: config.latch,
            state: false,
        }
    }

    /// Current on/off state
    pub fn state(&self) -> bool {
        self.state
    }

    /// Force the state (script operators, scene recall)
    pub fn set_state(&mut self, state: bool) {
        self.state = state;
    }

    /// Apply a key edge
    ///
    /// Returns true when the button's own script should run: latching buttons
    /// toggle and fire on the press edge only, momentary buttons mirror the
    /// key and fire on both edges.
    pub fn press(&mut self, pressed: bool) -> bool {
        if self.latch {
            if pressed {
                self.state = !self.state;
            }
            pressed
        } else {
            self.state = pressed;
            true
        }
    }

    /// Full-brightness when on, resting level otherwise
    pub fn fill(&self) -> Fill {
        let p = &self.placement;
        Fill {
            rect: p.rect(),
            level: FillLevel::Level(if self.state { MAX_LEVEL } else { p.level }),
        }
    }
}
