//! Key input
//!
//! The held-key pool with its hold/repeat timers, deduplicated script
//! triggering, and the dispatcher that routes key events and timer fires to
//! the scene's widgets.

pub mod dispatch;
pub mod held_keys;
pub mod scripts;

pub use dispatch::{Dispatch, KeyOutcome};
pub use held_keys::{FireKind, HeldKey, HeldKeyPool, HoldFire, MAX_HELD_KEYS};
pub use scripts::ScriptSet;
