//! Held-key pool
//!
//! Tracks up to [`MAX_HELD_KEYS`] keys that are currently down, each with its
//! own hold/repeat timer. A press first reuses the entry of the same key,
//! then claims the first free slot; with no slot left the press is dropped.
//!
//! Entries are keyed by the key as reported (coordinates and source) and
//! remember the scene cell the press landed on, so a release reaches the
//! same cell even if the scene was rotated in between.

use crate::state::{KeyEvent, KeySource, KeyState, TrackerEvent, KEY_HOLD_DELAY_MS, KEY_REPEAT_RATE_MS};
use crate::traits::{HoldToken, TimerMode, TimerService};

/// Maximum keys tracked at once
pub const MAX_HELD_KEYS: usize = 10;

/// One pool entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeldKey {
    state: KeyState,
    key: u8,
    source: KeySource,
    x: u8,
    y: u8,
    generation: u16,
}

impl HeldKey {
    pub fn state(&self) -> KeyState {
        self.state
    }

    /// Position of the key, in scene coordinates
    pub fn position(&self) -> (u8, u8) {
        (self.x, self.y)
    }

    fn token(&self, slot: usize) -> HoldToken {
        HoldToken {
            slot: slot as u8,
            generation: self.generation,
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        self.state.is_down() && self.key == event.packed() && self.source == event.source
    }

    fn apply(&mut self, event: TrackerEvent) {
        self.state = self.state.transition(event);
    }
}

/// Which timer a fire came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FireKind {
    /// The initial hold delay elapsed
    Hold,
    /// A periodic repeat while holding
    Repeat,
}

/// A valid timer fire for a held key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldFire {
    pub x: u8,
    pub y: u8,
    pub kind: FireKind,
}

/// Fixed pool of held keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldKeyPool {
    slots: [HeldKey; MAX_HELD_KEYS],
}

impl Default for HeldKeyPool {
    fn default() -> Self {
        Self::new()
    }
}

impl HeldKeyPool {
    pub const fn new() -> Self {
        Self {
            slots: [HeldKey {
                state: KeyState::Free,
                key: 0,
                source: KeySource::Device,
                x: 0,
                y: 0,
                generation: 0,
            }; MAX_HELD_KEYS],
        }
    }

    /// Track a key-down landing on scene cell `(x, y)` and arm its hold timer
    ///
    /// Returns `None` when the pool is full.
    pub fn press<T: TimerService + ?Sized>(
        &mut self,
        event: KeyEvent,
        (x, y): (u8, u8),
        timers: &mut T,
    ) -> Option<HoldToken> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.matches(&event))
            .or_else(|| self.slots.iter().position(|slot| !slot.state.is_down()))?;

        let slot = &mut self.slots[index];
        if slot.state.is_down() {
            timers.cancel(slot.token(index));
        }
        slot.generation = slot.generation.wrapping_add(1);
        slot.key = event.packed();
        slot.source = event.source;
        slot.x = x;
        slot.y = y;
        slot.apply(TrackerEvent::KeyDown);

        let token = slot.token(index);
        timers.start(token, KEY_HOLD_DELAY_MS, TimerMode::OneShot);

        #[cfg(feature = "defmt")]
        defmt::trace!("key ({}, {}) held in slot {}", x, y, index);

        Some(token)
    }

    /// Track a key-up and cancel its timer
    ///
    /// Returns the scene cell recorded at press time, `None` when the key
    /// was not tracked.
    pub fn release<T: TimerService + ?Sized>(&mut self, event: KeyEvent, timers: &mut T) -> Option<(u8, u8)> {
        let index = self.slots.iter().position(|slot| slot.matches(&event))?;

        let slot = &mut self.slots[index];
        timers.cancel(slot.token(index));
        slot.generation = slot.generation.wrapping_add(1);
        slot.apply(TrackerEvent::KeyUp);
        Some(slot.position())
    }

    /// Handle a timer fire
    ///
    /// Stale tokens (released or re-armed keys) yield `None`. The first fire
    /// of a hold switches the entry to the periodic repeat timer.
    pub fn fire<T: TimerService + ?Sized>(&mut self, token: HoldToken, timers: &mut T) -> Option<HoldFire> {
        let slot = self.slots.get_mut(token.slot as usize)?;
        if !slot.state.is_down() || slot.generation != token.generation {
            #[cfg(feature = "defmt")]
            defmt::trace!("ignoring stale timer for slot {}", token.slot);
            return None;
        }

        let kind = match slot.state {
            KeyState::Pressed => {
                timers.start(token, KEY_REPEAT_RATE_MS, TimerMode::Periodic);
                FireKind::Hold
            }
            KeyState::Holding | KeyState::Free => FireKind::Repeat,
        };
        slot.apply(TrackerEvent::TimerFired);

        Some(HoldFire {
            x: slot.x,
            y: slot.y,
            kind,
        })
    }

    /// Positions of the keys currently down, in slot order
    pub fn held(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.state.is_down())
            .map(HeldKey::position)
    }

    /// State of the entry held on scene cell `(x, y)`, `Free` if none
    pub fn state_of(&self, x: u8, y: u8) -> KeyState {
        self.slots
            .iter()
            .find(|slot| slot.state.is_down() && slot.position() == (x, y))
            .map_or(KeyState::Free, HeldKey::state)
    }

    pub fn slots(&self) -> &[HeldKey] {
        &self.slots
    }

    /// Keys currently down
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.state.is_down()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == MAX_HELD_KEYS
    }
}
