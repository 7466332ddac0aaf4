//! Scene state
//!
//! A scene is the session context the host owns: the configured groups and
//! widgets with their runtime values, the LED overlay, global display
//! settings and the dirty flags the render pipelines consume.
//!
//! Widgets are validated once when added; the event and render paths trust
//! the stored placements.

pub mod overlay;

pub use overlay::LedOverlay;

use heapless::Vec;

use crate::config::{
    validate_group, validate_placement, validate_script, ButtonConfig, ConfigError, FaderConfig,
    GroupConfig, XyPadConfig, GRID_MAX_DIMENSION, MAX_BUTTONS, MAX_FADERS, MAX_GROUPS, MAX_XYPADS,
};
use crate::geometry::MAX_LEVEL;
use crate::widgets::{Button, Fader, XyPad};

const GRID: usize = GRID_MAX_DIMENSION as usize;

/// The most recently touched widgets, for script operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatestTouched {
    /// Group of the last widget hit
    pub group: u8,
    /// Index of the last button hit
    pub button: Option<usize>,
    /// Index of the last fader hit
    pub fader: Option<usize>,
}

/// Groups, widgets and display settings of the running session
pub struct Scene {
    pub(crate) groups: [GroupConfig; MAX_GROUPS],
    pub(crate) buttons: Vec<Button, MAX_BUTTONS>,
    pub(crate) faders: Vec<Fader, MAX_FADERS>,
    pub(crate) xypads: Vec<XyPad, MAX_XYPADS>,
    /// Indexed `[x][y]`
    pub(crate) overlay: [[LedOverlay; GRID]; GRID],
    pub(crate) dim: u8,
    pub(crate) rotate: bool,
    pub(crate) grid_dirty: bool,
    pub(crate) screen_dirty: bool,
    pub(crate) current_group: u8,
    pub(crate) latest: LatestTouched,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with every group enabled
    pub fn new() -> Self {
        Self {
            groups: [GroupConfig::default(); MAX_GROUPS],
            buttons: Vec::new(),
            faders: Vec::new(),
            xypads: Vec::new(),
            overlay: [[LedOverlay::Unset; GRID]; GRID],
            dim: 0,
            rotate: false,
            grid_dirty: true,
            screen_dirty: true,
            current_group: 0,
            latest: LatestTouched::default(),
        }
    }

    /// Remove every widget and reset groups, overlay and settings
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Add a button, returning its index
    pub fn add_button(&mut self, config: ButtonConfig) -> Result<usize, ConfigError> {
        validate_placement(&config.placement, true)?;
        self.buttons
            .push(Button::new(config))
            .map_err(|_| ConfigError::CapacityExceeded)?;
        self.mark_dirty();
        Ok(self.buttons.len() - 1)
    }

    /// Add a fader, returning its index
    pub fn add_fader(&mut self, config: FaderConfig) -> Result<usize, ConfigError> {
        validate_placement(&config.placement, !config.kind.is_fine())?;
        self.faders
            .push(Fader::new(config))
            .map_err(|_| ConfigError::CapacityExceeded)?;
        self.mark_dirty();
        Ok(self.faders.len() - 1)
    }

    /// Add an XY pad, returning its index
    pub fn add_xypad(&mut self, config: XyPadConfig) -> Result<usize, ConfigError> {
        validate_placement(&config.placement, true)?;
        self.xypads
            .push(XyPad::new(config))
            .map_err(|_| ConfigError::CapacityExceeded)?;
        self.mark_dirty();
        Ok(self.xypads.len() - 1)
    }

    /// Replace a group's configuration
    pub fn set_group(&mut self, index: u8, config: GroupConfig) -> Result<(), ConfigError> {
        validate_group(index)?;
        if let Some(script) = config.script {
            validate_script(script.index())?;
        }
        self.groups[index as usize] = config;
        self.mark_dirty();
        Ok(())
    }

    /// Enable or disable a group
    pub fn set_group_enabled(&mut self, index: u8, enabled: bool) -> Result<(), ConfigError> {
        let group = self.groups.get_mut(index as usize).ok_or(ConfigError::UnknownGroup)?;
        group.enabled = enabled;
        self.mark_dirty();
        Ok(())
    }

    /// Group configuration
    pub fn group(&self, index: u8) -> Option<&GroupConfig> {
        self.groups.get(index as usize)
    }

    /// Check if a group exists and is enabled
    pub fn group_enabled(&self, index: u8) -> bool {
        group_enabled(&self.groups, index)
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn faders(&self) -> &[Fader] {
        &self.faders
    }

    pub fn xypads(&self) -> &[XyPad] {
        &self.xypads
    }

    /// Force a button state
    pub fn set_button_state(&mut self, index: usize, state: bool) -> Result<(), ConfigError> {
        let button = self.buttons.get_mut(index).ok_or(ConfigError::UnknownWidget)?;
        button.set_state(state);
        self.mark_dirty();
        Ok(())
    }

    /// Set a fader value, clamped to its range; cancels any glide
    pub fn set_fader_value(&mut self, index: usize, value: u8) -> Result<(), ConfigError> {
        let fader = self.faders.get_mut(index).ok_or(ConfigError::UnknownWidget)?;
        fader.set_value(value);
        self.mark_dirty();
        Ok(())
    }

    /// Set an XY pad value, clamped to the pad
    pub fn set_xypad_value(&mut self, index: usize, x: u8, y: u8) -> Result<(), ConfigError> {
        let pad = self.xypads.get_mut(index).ok_or(ConfigError::UnknownWidget)?;
        pad.set_value(x, y);
        self.mark_dirty();
        Ok(())
    }

    /// Enable or disable a button
    pub fn set_button_enabled(&mut self, index: usize, enabled: bool) -> Result<(), ConfigError> {
        let button = self.buttons.get_mut(index).ok_or(ConfigError::UnknownWidget)?;
        button.placement.enabled = enabled;
        self.mark_dirty();
        Ok(())
    }

    /// Enable or disable a fader
    pub fn set_fader_enabled(&mut self, index: usize, enabled: bool) -> Result<(), ConfigError> {
        let fader = self.faders.get_mut(index).ok_or(ConfigError::UnknownWidget)?;
        fader.placement.enabled = enabled;
        self.mark_dirty();
        Ok(())
    }

    /// Enable or disable an XY pad
    pub fn set_xypad_enabled(&mut self, index: usize, enabled: bool) -> Result<(), ConfigError> {
        let pad = self.xypads.get_mut(index).ok_or(ConfigError::UnknownWidget)?;
        pad.placement.enabled = enabled;
        self.mark_dirty();
        Ok(())
    }

    /// Override one LED
    pub fn set_overlay(&mut self, x: u8, y: u8, overlay: LedOverlay) -> Result<(), ConfigError> {
        if let LedOverlay::Level(level) = overlay {
            if level > MAX_LEVEL {
                return Err(ConfigError::InvalidLevel);
            }
        }
        let cell = self
            .overlay
            .get_mut(x as usize)
            .and_then(|column| column.get_mut(y as usize))
            .ok_or(ConfigError::OutOfBounds)?;
        *cell = overlay;
        self.mark_dirty();
        Ok(())
    }

    /// LED override for a cell, `Unset` outside the grid
    pub fn overlay(&self, x: u8, y: u8) -> LedOverlay {
        self.overlay
            .get(x as usize)
            .and_then(|column| column.get(y as usize))
            .copied()
            .unwrap_or_default()
    }

    /// Reset every LED override
    pub fn clear_overlay(&mut self) {
        self.overlay = [[LedOverlay::Unset; GRID]; GRID];
        self.mark_dirty();
    }

    /// Global dimming subtracted from every LED, clamped to 15
    pub fn set_dim(&mut self, dim: u8) {
        self.dim = dim.min(MAX_LEVEL);
        self.grid_dirty = true;
    }

    pub fn dim(&self) -> u8 {
        self.dim
    }

    /// Mount the grid upside down
    pub fn set_rotate(&mut self, rotate: bool) {
        self.rotate = rotate;
        self.mark_dirty();
    }

    pub fn rotate(&self) -> bool {
        self.rotate
    }

    /// Group shown in the editor
    pub fn set_current_group(&mut self, group: u8) -> Result<(), ConfigError> {
        validate_group(group)?;
        self.current_group = group;
        self.screen_dirty = true;
        Ok(())
    }

    pub fn current_group(&self) -> u8 {
        self.current_group
    }

    /// Most recently touched widgets
    pub fn latest(&self) -> LatestTouched {
        self.latest
    }

    /// Flag both outputs for redraw
    pub fn mark_dirty(&mut self) {
        self.grid_dirty = true;
        self.screen_dirty = true;
    }

    /// LEDs need a redraw
    pub fn is_grid_dirty(&self) -> bool {
        self.grid_dirty
    }

    /// Screen visualization needs a redraw
    pub fn is_screen_dirty(&self) -> bool {
        self.screen_dirty
    }
}

/// Check a group index against a group table, failing closed
pub(crate) fn group_enabled(groups: &[GroupConfig; MAX_GROUPS], index: u8) -> bool {
    groups.get(index as usize).is_some_and(|group| group.enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FaderKind, Placement, ScriptId};

    fn button(x: u8, y: u8) -> ButtonConfig {
        ButtonConfig {
            placement: Placement::new(x, y, 1, 1),
            latch: false,
        }
    }

    #[test]
    fn test_new_scene_is_dirty_and_enabled() {
        let scene = Scene::new();
        assert!(scene.is_grid_dirty());
        assert!(scene.is_screen_dirty());
        assert!(scene.group_enabled(0));
        assert!(scene.group_enabled(63));
        assert!(!scene.group_enabled(64));
    }

    #[test]
    fn test_add_widgets_returns_indices() {
        let mut scene = Scene::new();
        assert_eq!(scene.add_button(button(0, 0)), Ok(0));
        assert_eq!(scene.add_button(button(1, 0)), Ok(1));
        assert_eq!(scene.buttons().len(), 2);
    }

    #[test]
    fn test_add_rejects_invalid_placement() {
        let mut scene = Scene::new();
        let config = ButtonConfig {
            placement: Placement::new(15, 0, 2, 1),
            latch: false,
        };
        assert_eq!(scene.add_button(config), Err(ConfigError::OutOfBounds));
        assert!(scene.buttons().is_empty());
    }

    #[test]
    fn test_fine_fader_level_may_exceed_brightness() {
        let mut scene = Scene::new();
        let fine = FaderConfig {
            placement: Placement::new(0, 0, 10, 1).with_level(100),
            kind: FaderKind::FineHorizontalBar,
        };
        assert_eq!(scene.add_fader(fine), Ok(0));

        let coarse = FaderConfig {
            placement: Placement::new(0, 1, 10, 1).with_level(100),
            kind: FaderKind::CoarseHorizontalBar,
        };
        assert_eq!(scene.add_fader(coarse), Err(ConfigError::InvalidLevel));
    }

    #[test]
    fn test_xypad_capacity() {
        let mut scene = Scene::new();
        for _ in 0..MAX_XYPADS {
            let config = XyPadConfig {
                placement: Placement::new(0, 0, 4, 4),
            };
            assert!(scene.add_xypad(config).is_ok());
        }
        let config = XyPadConfig {
            placement: Placement::new(0, 0, 4, 4),
        };
        assert_eq!(scene.add_xypad(config), Err(ConfigError::CapacityExceeded));
    }

    #[test]
    fn test_widget_enable_setters() {
        let mut scene = Scene::new();
        scene.add_button(button(0, 0)).unwrap();
        scene
            .add_xypad(XyPadConfig {
                placement: Placement::new(4, 4, 4, 4),
            })
            .unwrap();
        scene.grid_dirty = false;
        scene.screen_dirty = false;

        assert_eq!(scene.set_xypad_enabled(0, false), Ok(()));
        assert!(!scene.xypads()[0].placement.enabled);
        assert!(scene.is_grid_dirty());
        assert!(scene.is_screen_dirty());
        assert_eq!(scene.set_xypad_enabled(1, false), Err(ConfigError::UnknownWidget));

        assert_eq!(scene.set_button_enabled(0, false), Ok(()));
        assert!(!scene.buttons()[0].placement.enabled);
        assert_eq!(scene.set_fader_enabled(0, false), Err(ConfigError::UnknownWidget));
    }

    #[test]
    fn test_set_group() {
        let mut scene = Scene::new();
        let config = GroupConfig {
            enabled: false,
            script: ScriptId::new(2),
        };
        assert_eq!(scene.set_group(3, config), Ok(()));
        assert!(!scene.group_enabled(3));
        assert_eq!(scene.group(3).and_then(|g| g.script), ScriptId::new(2));
        assert_eq!(scene.set_group(64, config), Err(ConfigError::UnknownGroup));

        assert_eq!(scene.set_group_enabled(3, true), Ok(()));
        assert!(scene.group_enabled(3));
    }

    #[test]
    fn test_overlay_bounds_and_level() {
        let mut scene = Scene::new();
        assert_eq!(scene.set_overlay(2, 3, LedOverlay::Bright), Ok(()));
        assert_eq!(scene.overlay(2, 3), LedOverlay::Bright);
        assert_eq!(
            scene.set_overlay(16, 0, LedOverlay::Dim),
            Err(ConfigError::OutOfBounds)
        );
        assert_eq!(
            scene.set_overlay(0, 0, LedOverlay::Level(16)),
            Err(ConfigError::InvalidLevel)
        );
        assert_eq!(scene.overlay(20, 20), LedOverlay::Unset);

        scene.clear_overlay();
        assert_eq!(scene.overlay(2, 3), LedOverlay::Unset);
    }

    #[test]
    fn test_fader_value_setter_clamps() {
        let mut scene = Scene::new();
        let config = FaderConfig {
            placement: Placement::new(0, 0, 8, 1),
            kind: FaderKind::CoarseHorizontalDot,
        };
        scene.add_fader(config).unwrap();
        scene.set_fader_value(0, 20).unwrap();
        assert_eq!(scene.faders()[0].value(), 7);
        assert_eq!(scene.set_fader_value(1, 0), Err(ConfigError::UnknownWidget));
    }

    #[test]
    fn test_settings_clamp() {
        let mut scene = Scene::new();
        scene.set_dim(40);
        assert_eq!(scene.dim(), 15);
        assert_eq!(scene.set_current_group(64), Err(ConfigError::UnknownGroup));
        assert_eq!(scene.set_current_group(5), Ok(()));
        assert_eq!(scene.current_group(), 5);
    }
}
