//! Board-agnostic core of the grid controller
//!
//! This crate contains all grid logic that does not depend on a specific
//! device, timer or scripting implementation:
//!
//! - Collaborator traits (grid device, timer service, script runner)
//! - Scene configuration and validation
//! - Widget value model (buttons, faders, XY pads)
//! - Held-key tracking with the hold/repeat state machine
//! - Key dispatch and the fader slew engine
//! - LED and screen render pipelines

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod render;
pub mod scene;
pub mod state;
pub mod traits;
pub mod widgets;

#[cfg(test)]
pub(crate) mod mocks;

pub use config::ConfigError;
pub use controller::GridController;
pub use input::{Dispatch, KeyOutcome, ScriptSet};
pub use render::{LedBuffer, Page, ScreenMode, ScreenRequest, Selection};
pub use scene::{LedOverlay, Scene};
pub use state::{KeyEvent, KeySource};
