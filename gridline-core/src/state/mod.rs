//! Key events and the hold/repeat state machine
//!
//! The state machine is explicit, finite, and deterministic; the held-key
//! pool applies it per slot.

pub mod events;
pub mod machine;

pub use events::{pack_key, KeyEvent, KeySource, TrackerEvent};
pub use machine::{KeyState, KEY_HOLD_DELAY_MS, KEY_REPEAT_RATE_MS};
