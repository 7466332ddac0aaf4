//! Events driving the grid core

/// Where a key event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeySource {
    /// Physical grid; subject to device rotation
    #[default]
    Device,
    /// Synthesized by a script; already in scene coordinates
    Emulated,
}

/// A key press or release on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub x: u8,
    pub y: u8,
    pub pressed: bool,
    pub source: KeySource,
}

impl KeyEvent {
    /// Key-down from the device
    pub const fn press(x: u8, y: u8) -> Self {
        Self {
            x,
            y,
            pressed: true,
            source: KeySource::Device,
        }
    }

    /// Key-up from the device
    pub const fn release(x: u8, y: u8) -> Self {
        Self {
            x,
            y,
            pressed: false,
            source: KeySource::Device,
        }
    }

    /// Mark as synthesized, bypassing rotation
    pub const fn emulated(mut self) -> Self {
        self.source = KeySource::Emulated;
        self
    }

    /// Key packed as `y << 4 | x`
    pub const fn packed(&self) -> u8 {
        pack_key(self.x, self.y)
    }
}

/// Pack a grid coordinate into one byte
pub const fn pack_key(x: u8, y: u8) -> u8 {
    (y << 4) | (x & 0x0F)
}

/// Events seen by a single held-key entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerEvent {
    /// Key went down (first press, or re-press without release)
    KeyDown,
    /// Key went up
    KeyUp,
    /// The entry's timer fired
    TimerFired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_key() {
        assert_eq!(pack_key(0, 0), 0);
        assert_eq!(pack_key(15, 0), 0x0F);
        assert_eq!(pack_key(3, 7), 0x73);
        assert_eq!(KeyEvent::press(3, 7).packed(), 0x73);
    }

    #[test]
    fn test_emulated_source() {
        let e = KeyEvent::release(1, 2).emulated();
        assert_eq!(e.source, KeySource::Emulated);
        assert!(!e.pressed);
        assert_eq!(KeyEvent::press(1, 2).source, KeySource::Device);
    }
}
