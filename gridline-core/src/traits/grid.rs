//! Grid device trait

/// Largest LED buffer any supported grid needs (16x16)
pub const MAX_LED_CELLS: usize = 256;

/// Trait for the physical button/LED matrix
///
/// The core queries the device size on every key event and render pass and
/// hands finished LED frames back through `write_leds`; the transport itself
/// is the device's business.
pub trait GridDevice {
    /// Device size in cells as (columns, rows)
    fn size(&self) -> (u8, u8);

    /// Send a finished LED frame
    ///
    /// `leds` is row-major (`row * columns + col`), one 0-15 level per cell.
    fn write_leds(&mut self, leds: &[u8]);
}
