//! Configuration type definitions
//!
//! These types describe how a scene lays widgets out on the grid. The host's
//! storage layer owns persistence; with the `serde` feature enabled every
//! type here can be serialized by it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Side length of the virtual grid every widget must fit in
pub const GRID_MAX_DIMENSION: u8 = 16;

/// Maximum groups per scene
pub const MAX_GROUPS: usize = 64;

/// Maximum buttons per scene
pub const MAX_BUTTONS: usize = 256;

/// Maximum faders per scene
pub const MAX_FADERS: usize = 64;

/// Maximum XY pads per scene
pub const MAX_XYPADS: usize = 8;

/// Number of addressable scripts
pub const MAX_SCRIPTS: usize = 16;

/// Default resting brightness for new widgets
pub const DEFAULT_LEVEL: u8 = 5;

/// Identifier of a script run by the host's scripting engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScriptId(u8);

impl ScriptId {
    /// Create a script id, `None` if it is out of range
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < MAX_SCRIPTS {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Numeric id
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Where a widget sits and what it is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Left column
    pub x: u8,
    /// Top row
    pub y: u8,
    /// Width in cells
    pub w: u8,
    /// Height in cells
    pub h: u8,
    /// Widget responds to input and is rendered
    pub enabled: bool,
    /// Owning group index
    pub group: u8,
    /// Script triggered on change
    pub script: Option<ScriptId>,
    /// Resting brightness (0-15); for fine faders, the maximum value
    pub level: u8,
}

impl Placement {
    /// Create an enabled placement in group 0 with no script
    pub const fn new(x: u8, y: u8, w: u8, h: u8) -> Self {
        Self {
            x,
            y,
            w,
            h,
            enabled: true,
            group: 0,
            script: None,
            level: DEFAULT_LEVEL,
        }
    }

    /// Set the owning group
    pub const fn with_group(mut self, group: u8) -> Self {
        self.group = group;
        self
    }

    /// Bind a script
    pub const fn with_script(mut self, script: ScriptId) -> Self {
        self.script = Some(script);
        self
    }

    /// Set the resting level (or fine fader maximum)
    pub const fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Start disabled
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Covered cells
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Check if a grid cell lies inside this widget
    pub fn within(&self, x: u8, y: u8) -> bool {
        self.rect().within(x, y)
    }

    /// Column of the right-most cell
    pub fn last_x(&self) -> u8 {
        self.rect().last_x()
    }

    /// Row of the bottom-most cell
    pub fn last_y(&self) -> u8 {
        self.rect().last_y()
    }
}

/// Group configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupConfig {
    /// Members respond to input and are rendered
    pub enabled: bool,
    /// Script triggered whenever any member changes
    pub script: Option<ScriptId>,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            script: None,
        }
    }
}

/// Fader travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// How a touch maps onto a fader value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Granularity {
    /// Value is the raw cell offset
    Coarse,
    /// Interior cells map proportionally onto [0, level], end caps nudge
    Fine,
}

/// How a fader value is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Glyph {
    Bar,
    Dot,
}

/// The eight fader kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FaderKind {
    #[default]
    CoarseHorizontalBar,
    CoarseVerticalBar,
    CoarseHorizontalDot,
    CoarseVerticalDot,
    FineHorizontalBar,
    FineVerticalBar,
    FineHorizontalDot,
    FineVerticalDot,
}

impl FaderKind {
    /// All kinds, in index order
    pub const ALL: [FaderKind; 8] = [
        FaderKind::CoarseHorizontalBar,
        FaderKind::CoarseVerticalBar,
        FaderKind::CoarseHorizontalDot,
        FaderKind::CoarseVerticalDot,
        FaderKind::FineHorizontalBar,
        FaderKind::FineVerticalBar,
        FaderKind::FineHorizontalDot,
        FaderKind::FineVerticalDot,
    ];

    /// Build a kind from its three properties
    pub const fn from_parts(orientation: Orientation, granularity: Granularity, glyph: Glyph) -> Self {
        use FaderKind::*;
        use Glyph::*;
        use Granularity::*;
        use Orientation::*;

        match (granularity, orientation, glyph) {
            (Coarse, Horizontal, Bar) => CoarseHorizontalBar,
            (Coarse, Vertical, Bar) => CoarseVerticalBar,
            (Coarse, Horizontal, Dot) => CoarseHorizontalDot,
            (Coarse, Vertical, Dot) => CoarseVerticalDot,
            (Fine, Horizontal, Bar) => FineHorizontalBar,
            (Fine, Vertical, Bar) => FineVerticalBar,
            (Fine, Horizontal, Dot) => FineHorizontalDot,
            (Fine, Vertical, Dot) => FineVerticalDot,
        }
    }

    /// Parse the numeric kind used by scene files and script operators
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Numeric kind used by scene files and script operators
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Travel direction
    pub const fn orientation(self) -> Orientation {
        match self {
            FaderKind::CoarseHorizontalBar
            | FaderKind::CoarseHorizontalDot
            | FaderKind::FineHorizontalBar
            | FaderKind::FineHorizontalDot => Orientation::Horizontal,
            FaderKind::CoarseVerticalBar
            | FaderKind::CoarseVerticalDot
            | FaderKind::FineVerticalBar
            | FaderKind::FineVerticalDot => Orientation::Vertical,
        }
    }

    /// Touch mapping
    pub const fn granularity(self) -> Granularity {
        match self {
            FaderKind::CoarseHorizontalBar
            | FaderKind::CoarseVerticalBar
            | FaderKind::CoarseHorizontalDot
            | FaderKind::CoarseVerticalDot => Granularity::Coarse,
            FaderKind::FineHorizontalBar
            | FaderKind::FineVerticalBar
            | FaderKind::FineHorizontalDot
            | FaderKind::FineVerticalDot => Granularity::Fine,
        }
    }

    /// Drawing style
    pub const fn glyph(self) -> Glyph {
        match self {
            FaderKind::CoarseHorizontalBar
            | FaderKind::CoarseVerticalBar
            | FaderKind::FineHorizontalBar
            | FaderKind::FineVerticalBar => Glyph::Bar,
            FaderKind::CoarseHorizontalDot
            | FaderKind::CoarseVerticalDot
            | FaderKind::FineHorizontalDot
            | FaderKind::FineVerticalDot => Glyph::Dot,
        }
    }

    /// Check if this is a fine (proportional) fader
    pub const fn is_fine(self) -> bool {
        matches!(self.granularity(), Granularity::Fine)
    }
}

/// Button configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    pub placement: Placement,
    /// Toggle on each press instead of following the key
    pub latch: bool,
}

/// Fader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaderConfig {
    pub placement: Placement,
    pub kind: FaderKind,
}

/// XY pad configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct XyPadConfig {
    pub placement: Placement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_id_range() {
        assert!(ScriptId::new(0).is_some());
        assert!(ScriptId::new(MAX_SCRIPTS as u8 - 1).is_some());
        assert!(ScriptId::new(MAX_SCRIPTS as u8).is_none());
    }

    #[test]
    fn test_fader_kind_parts_roundtrip() {
        for kind in FaderKind::ALL {
            let rebuilt = FaderKind::from_parts(kind.orientation(), kind.granularity(), kind.glyph());
            assert_eq!(rebuilt, kind);
            assert_eq!(FaderKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(FaderKind::from_index(8), None);
    }

    #[test]
    fn test_odd_kinds_are_vertical() {
        for kind in FaderKind::ALL {
            let vertical = kind.orientation() == Orientation::Vertical;
            assert_eq!(vertical, kind.index() & 1 == 1);
        }
    }

    #[test]
    fn test_placement_builder() {
        let script = ScriptId::new(3).unwrap();
        let p = Placement::new(1, 2, 3, 4)
            .with_group(5)
            .with_script(script)
            .with_level(9);
        assert_eq!(p.group, 5);
        assert_eq!(p.script, Some(script));
        assert_eq!(p.level, 9);
        assert_eq!(p.last_x(), 3);
        assert_eq!(p.last_y(), 5);
        assert!(p.within(3, 5));
        assert!(!p.within(4, 5));
    }
}
