//! Configuration-time validation
//!
//! Placements are checked once when a widget is added to a scene; the event
//! and render paths rely on these invariants without re-checking them.

use super::types::{Placement, GRID_MAX_DIMENSION, MAX_GROUPS, MAX_SCRIPTS};
use crate::geometry::MAX_LEVEL;

/// Errors that can occur while configuring a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Widget extends past the virtual grid
    OutOfBounds,
    /// Widget has zero width or height
    EmptyArea,
    /// Group index past the last group
    UnknownGroup,
    /// Script id past the last script
    InvalidScript,
    /// Brightness above 15
    InvalidLevel,
    /// Scene already holds the maximum number of widgets of this type
    CapacityExceeded,
    /// Widget index past the last configured widget
    UnknownWidget,
}

/// Check a placement against the grid, group and script limits
///
/// `level_is_brightness` is false for fine faders, whose level is a maximum
/// value rather than an LED level.
pub fn validate_placement(placement: &Placement, level_is_brightness: bool) -> Result<(), ConfigError> {
    if placement.w == 0 || placement.h == 0 {
        return Err(ConfigError::EmptyArea);
    }

    let max = GRID_MAX_DIMENSION as u16;
    if placement.x as u16 + placement.w as u16 > max || placement.y as u16 + placement.h as u16 > max {
        return Err(ConfigError::OutOfBounds);
    }

    validate_group(placement.group)?;

    if let Some(script) = placement.script {
        validate_script(script.index())?;
    }

    if level_is_brightness && placement.level > MAX_LEVEL {
        return Err(ConfigError::InvalidLevel);
    }

    Ok(())
}

/// Check a group index
pub fn validate_group(group: u8) -> Result<(), ConfigError> {
    if (group as usize) < MAX_GROUPS {
        Ok(())
    } else {
        Err(ConfigError::UnknownGroup)
    }
}

/// Check a raw script id (deserialized ids bypass `ScriptId::new`)
pub fn validate_script(script: u8) -> Result<(), ConfigError> {
    if (script as usize) < MAX_SCRIPTS {
        Ok(())
    } else {
        Err(ConfigError::InvalidScript)
    }
}
