//! Collaborator traits
//!
//! These traits define the interface between the grid core and the
//! host-side services it drives: the grid hardware, the timer service and
//! the scripting engine.

pub mod grid;
pub mod script;
pub mod timer;

pub use grid::{GridDevice, MAX_LED_CELLS};
pub use script::ScriptRunner;
pub use timer::{HoldToken, TimerMode, TimerService};

/// Everything a key event or timer fire may touch
pub trait GridHost: GridDevice + TimerService + ScriptRunner {}

// Blanket implementation for all types providing the three services
impl<T: GridDevice + TimerService + ScriptRunner> GridHost for T {}
