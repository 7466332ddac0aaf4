//! Hold/repeat state machine
//!
//! Every held-key entry moves through `Free -> Pressed -> Holding -> Free`.
//! The pool drives timers from these transitions: entering `Pressed` arms
//! the hold delay, entering `Holding` switches to the repeat rate, entering
//! `Free` cancels.

use super::events::TrackerEvent;

/// Delay before a pressed key counts as held
pub const KEY_HOLD_DELAY_MS: u32 = 700;

/// Repeat period while a key is held
pub const KEY_REPEAT_RATE_MS: u32 = 40;

/// Held-key entry states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Slot unused
    #[default]
    Free,
    /// Key down, waiting for the hold delay
    Pressed,
    /// Key held past the delay, repeating
    Holding,
}

impl KeyState {
    /// Check if the slot tracks a key
    pub fn is_down(&self) -> bool {
        !matches!(self, KeyState::Free)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: TrackerEvent) -> Self {
        use KeyState::*;
        use TrackerEvent::*;

        match (self, event) {
            // Any key-down (re)arms the hold delay
            (_, KeyDown) => Pressed,

            // Hold delay elapsed, start repeating
            (Pressed, TimerFired) => Holding,
            (Holding, TimerFired) => Holding,

            (_, KeyUp) => Free,

            // Stale fire against a free slot
            (Free, TimerFired) => Free,
        }
    }
}
