//! Faders
//!
//! Coarse faders store the raw cell offset of the touch. Fine faders map
//! their interior cells (everything but the two end caps) proportionally
//! onto `[0, level]` and draw the inverse mapping with a dimmed partial cell
//! holding the fractional remainder, using 4 fractional bits.
//!
//! Horizontal faders grow to the right, vertical faders grow upwards: the
//! low cap is the left cell or the bottom cell respectively.

use super::{Fill, Fills};
use crate::config::{FaderConfig, FaderKind, Orientation, Placement};
use crate::geometry::MAX_LEVEL;

/// Ticks per value step when a coarse fader glides
pub const COARSE_SLIDE_STEP_RATE: u16 = 16;

/// Fractional bits used by fine fader rendering and glide rates
const FINE_FRACTION_BITS: u32 = 4;

/// Direction of a glide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlideDirection {
    Up,
    Down,
}

/// A pending animated move towards `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glide {
    /// Value the glide ends on
    pub target: u8,
    /// Ticks elapsed since the last step
    pub accumulator: u16,
    /// Ticks per value step (at least 1)
    pub step_rate: u16,
    pub direction: SlideDirection,
}

/// Fine fader fill split into whole cells and a 1/16 remainder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FineFill {
    /// Fully lit interior cells
    pub filled: u16,
    /// Brightness of the partial cell, 0 when there is none
    pub partial: u8,
}

/// A fader widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fader {
    pub placement: Placement,
    pub kind: FaderKind,
    value: u8,
    glide: Option<Glide>,
}

impl Fader {
    /// Create a fader at value 0
    pub fn new(config: FaderConfig) -> Self {
        Self {
            placement: config.placement,
            kind: config.kind,
            value: 0,
            glide: None,
        }
    }

    /// Current value
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Pending glide, if any
    pub fn glide(&self) -> Option<&Glide> {
        self.glide.as_ref()
    }

    /// Check if the fader is gliding towards a target
    pub fn is_sliding(&self) -> bool {
        self.glide.is_some()
    }

    /// Cells along the direction of travel
    fn travel(&self) -> u8 {
        match self.kind.orientation() {
            Orientation::Horizontal => self.placement.w,
            Orientation::Vertical => self.placement.h,
        }
    }

    /// Cells between the two end caps
    pub fn interior(&self) -> u16 {
        self.travel().saturating_sub(2) as u16
    }

    /// Largest value this fader can hold
    pub fn max_value(&self) -> u8 {
        if self.kind.is_fine() {
            self.placement.level
        } else {
            self.travel().saturating_sub(1)
        }
    }

    /// Set the value directly, clamped, cancelling any glide
    pub fn set_value(&mut self, value: u8) {
        self.value = value.min(self.max_value());
        self.glide = None;
    }

    /// Proportional value for an interior cell offset
    fn fine_value(&self, offset: u8) -> u8 {
        let interior = self.interior() as u32;
        if interior == 0 {
            return 0;
        }
        let level = self.placement.level as u32;
        let scaled = ((2 * offset as u32 + 1) * level) / interior;
        let rounded = (scaled >> 1) + (scaled & 1);
        rounded.min(level) as u8
    }

    /// Check if a cell is one of the end caps along the direction of travel
    pub fn is_boundary(&self, x: u8, y: u8) -> bool {
        let p = &self.placement;
        match self.kind.orientation() {
            Orientation::Horizontal => x == p.x || x == p.last_x(),
            Orientation::Vertical => y == p.y || y == p.last_y(),
        }
    }

    /// Value a raw press at absolute grid coordinates selects
    ///
    /// Fine faders jump to 0 or `level` when an end cap is pressed.
    pub fn touch_value(&self, x: u8, y: u8) -> u8 {
        let p = &self.placement;
        let value = match self.kind {
            FaderKind::CoarseHorizontalBar | FaderKind::CoarseHorizontalDot => x.saturating_sub(p.x),
            FaderKind::CoarseVerticalBar | FaderKind::CoarseVerticalDot => p.last_y().saturating_sub(y),
            FaderKind::FineHorizontalBar | FaderKind::FineHorizontalDot => {
                if x == p.x {
                    0
                } else if x == p.last_x() {
                    p.level
                } else {
                    self.fine_value(x.saturating_sub(p.x + 1))
                }
            }
            FaderKind::FineVerticalBar | FaderKind::FineVerticalDot => {
                if y == p.y {
                    p.level
                } else if y == p.last_y() {
                    0
                } else {
                    self.fine_value(p.last_y().saturating_sub(y + 1))
                }
            }
        };
        value.min(self.max_value())
    }

    /// Whether a key held at `held` lets a press at `press` start a glide
    ///
    /// The held key must lie inside this fader at a different position along
    /// the direction of travel.
    pub fn accepts_anchor(&self, press: (u8, u8), held: (u8, u8)) -> bool {
        if !self.placement.within(held.0, held.1) {
            return false;
        }
        match self.kind.orientation() {
            Orientation::Horizontal => held.0 != press.0,
            Orientation::Vertical => held.1 != press.1,
        }
    }

    /// Ticks per step so a fine glide crosses the interior in a fixed time
    pub fn step_rate(&self) -> u16 {
        if !self.kind.is_fine() {
            return COARSE_SLIDE_STEP_RATE;
        }
        let level = self.placement.level as u16;
        if level == 0 {
            return 1;
        }
        ((self.interior() << FINE_FRACTION_BITS) / level).max(1)
    }

    /// Apply a press: jump directly, or glide when anchored by a second key
    pub fn press(&mut self, x: u8, y: u8, glide: bool) {
        let target = self.touch_value(x, y);
        if glide {
            self.start_glide(target);
        } else {
            self.set_value(target);
        }
    }

    /// Begin gliding towards `target`
    ///
    /// A target equal to the current value completes immediately.
    pub fn start_glide(&mut self, target: u8) {
        let target = target.min(self.max_value());
        self.glide = match target.cmp(&self.value) {
            core::cmp::Ordering::Equal => None,
            core::cmp::Ordering::Greater => Some(Glide {
                target,
                accumulator: 0,
                step_rate: self.step_rate(),
                direction: SlideDirection::Up,
            }),
            core::cmp::Ordering::Less => Some(Glide {
                target,
                accumulator: 0,
                step_rate: self.step_rate(),
                direction: SlideDirection::Down,
            }),
        };
    }

    /// Advance a glide by one tick
    ///
    /// Returns true when the value stepped.
    pub fn advance_glide(&mut self) -> bool {
        let Some(glide) = self.glide.as_mut() else {
            return false;
        };

        glide.accumulator = glide.accumulator.saturating_add(1);
        if glide.accumulator < glide.step_rate {
            return false;
        }
        glide.accumulator = 0;

        let target = glide.target;
        let done = match glide.direction {
            SlideDirection::Up => {
                self.value = self.value.saturating_add(1);
                self.value >= target
            }
            SlideDirection::Down => {
                self.value = self.value.saturating_sub(1);
                self.value <= target
            }
        };
        if done {
            self.value = target;
            self.glide = None;
        }
        self.value = self.value.min(self.max_value());
        true
    }

    /// Move a fine fader one step towards the end cap at `(x, y)`
    ///
    /// Returns true when the cell is an end cap of a fine fader (even if the
    /// value was already at the limit).
    pub fn nudge(&mut self, x: u8, y: u8) -> bool {
        let p = self.placement;
        let up = match self.kind {
            FaderKind::FineHorizontalBar | FaderKind::FineHorizontalDot => {
                if x == p.x {
                    false
                } else if x == p.last_x() {
                    true
                } else {
                    return false;
                }
            }
            FaderKind::FineVerticalBar | FaderKind::FineVerticalDot => {
                if y == p.y {
                    true
                } else if y == p.last_y() {
                    false
                } else {
                    return false;
                }
            }
            FaderKind::CoarseHorizontalBar
            | FaderKind::CoarseVerticalBar
            | FaderKind::CoarseHorizontalDot
            | FaderKind::CoarseVerticalDot => return false,
        };

        self.value = if up {
            self.value.saturating_add(1).min(p.level)
        } else {
            self.value.saturating_sub(1)
        };
        true
    }

    /// Split the current value into whole interior cells and a remainder
    pub fn fine_fill(&self) -> FineFill {
        let level = self.placement.level as u32;
        let scaled = if level == 0 {
            0
        } else {
            ((self.interior() as u32) << FINE_FRACTION_BITS) * self.value as u32 / level
        };
        FineFill {
            filled: (scaled >> FINE_FRACTION_BITS) as u16,
            partial: (scaled & 0xF) as u8,
        }
    }

    /// Cells to draw for the current value, in order
    pub fn fills(&self) -> Fills {
        let p = &self.placement;
        let (x, y, w, h) = (p.x as u16, p.y as u16, p.w as u16, p.h as u16);
        let v = self.value as u16;
        let FineFill { filled: ff, partial: fp } = self.fine_fill();
        let mut fills = Fills::new();
        let mut push = |fill: Fill| {
            let _ = fills.push(fill);
        };

        match self.kind {
            FaderKind::CoarseHorizontalBar => {
                push(Fill::cells(x, y, v + 1, h, MAX_LEVEL));
                push(Fill::cells(x + v + 1, y, w.saturating_sub(v + 1), h, p.level));
            }
            FaderKind::CoarseVerticalBar => {
                push(Fill::cells(x, y, w, h.saturating_sub(v + 1), p.level));
                push(Fill::cells(x, (y + h).saturating_sub(v + 1), w, v + 1, MAX_LEVEL));
            }
            FaderKind::CoarseHorizontalDot => {
                push(Fill::cells(x + v, y, 1, h, MAX_LEVEL));
            }
            FaderKind::CoarseVerticalDot => {
                push(Fill::cells(x, (y + h).saturating_sub(v + 1), w, 1, MAX_LEVEL));
            }
            FaderKind::FineHorizontalBar => {
                push(Fill::cells(x, y, ff + 1, h, MAX_LEVEL));
                if fp != 0 {
                    push(Fill::cells(x + ff + 1, y, 1, h, fp));
                }
                push(Fill::cells((x + w).saturating_sub(1), y, 1, h, MAX_LEVEL));
            }
            FaderKind::FineVerticalBar => {
                push(Fill::cells(x, (y + h).saturating_sub(ff + 1), w, ff + 1, MAX_LEVEL));
                if fp != 0 {
                    push(Fill::cells(x, (y + h).saturating_sub(ff + 2), w, 1, fp));
                }
                push(Fill::cells(x, y, w, 1, MAX_LEVEL));
            }
            FaderKind::FineHorizontalDot => {
                push(Fill::cells(x, y, 1, h, MAX_LEVEL));
                push(Fill::cells((x + w).saturating_sub(1), y, 1, h, MAX_LEVEL));
                if fp != 0 {
                    push(Fill::cells(x + ff + 1, y, 1, h, fp));
                } else if ff != 0 {
                    push(Fill::cells(x + ff, y, 1, h, MAX_LEVEL));
                }
            }
            FaderKind::FineVerticalDot => {
                push(Fill::cells(x, (y + h).saturating_sub(1), w, 1, MAX_LEVEL));
                push(Fill::cells(x, y, w, 1, MAX_LEVEL));
                if fp != 0 {
                    push(Fill::cells(x, (y + h).saturating_sub(ff + 2), w, 1, fp));
                } else if ff != 0 {
                    push(Fill::cells(x, (y + h).saturating_sub(ff + 1), w, 1, MAX_LEVEL));
                }
            }
        }
        fills
    }
}
