//! Configuration types
//!
//! Board-agnostic widget and group definitions, scene capacities, and the
//! validation applied when widgets are added to a scene.

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::{validate_group, validate_placement, validate_script, ConfigError};
