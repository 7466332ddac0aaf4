//! LED render pipeline

use crate::config::GRID_MAX_DIMENSION;
use crate::controller::GridController;
use crate::geometry::CellBuffer;
use crate::render::compose;
use crate::scene::Scene;
use crate::traits::{GridDevice, MAX_LED_CELLS};

/// LED frame for the connected device, row-major, one 0-15 level per cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedBuffer {
    cells: [u8; MAX_LED_CELLS],
    width: u8,
    height: u8,
}

impl Default for LedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LedBuffer {
    /// Create an empty 16x8 buffer
    pub const fn new() -> Self {
        Self {
            cells: [0; MAX_LED_CELLS],
            width: GRID_MAX_DIMENSION,
            height: GRID_MAX_DIMENSION / 2,
        }
    }

    /// Match the device size, clamped to 16x16, and clear
    pub fn resize(&mut self, width: u8, height: u8) {
        self.width = width.min(GRID_MAX_DIMENSION);
        self.height = height.min(GRID_MAX_DIMENSION);
        self.clear();
    }

    /// Turn every LED off
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Level at `(x, y)`, 0 outside the device
    pub fn get(&self, x: u8, y: u8) -> u8 {
        self.index(x, y).map_or(0, |index| self.cells[index])
    }

    /// The device region, `row * width + col`
    pub fn as_slice(&self) -> &[u8] {
        &self.cells[..self.len()]
    }

    /// Cells in the device region
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reverse the device region, for a grid mounted upside down
    pub fn reverse(&mut self) {
        let len = self.len();
        self.cells[..len].reverse();
    }

    fn index(&self, x: u8, y: u8) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

impl CellBuffer for LedBuffer {
    fn width(&self) -> u8 {
        self.width
    }

    fn height(&self) -> u8 {
        self.height
    }

    fn cell_mut(&mut self, x: u8, y: u8) -> Option<&mut u8> {
        let index = self.index(x, y)?;
        self.cells.get_mut(index)
    }
}

impl GridController {
    /// Render the scene into the LED buffer
    ///
    /// Widgets are composed, then the overlay is applied and the global dim
    /// subtracted per cell. A rotated scene reverses the whole frame.
    pub fn render_leds<D: GridDevice + ?Sized>(&mut self, scene: &mut Scene, device: &D) -> &LedBuffer {
        let (width, height) = device.size();
        self.leds.resize(width, height);

        compose(scene, &mut self.leds);

        for x in 0..self.leds.width {
            for y in 0..self.leds.height {
                let overlay = scene.overlay(x, y);
                if let Some(cell) = self.leds.cell_mut(x, y) {
                    *cell = overlay.apply(*cell).saturating_sub(scene.dim);
                }
            }
        }

        if scene.rotate {
            self.leds.reverse();
        }

        scene.grid_dirty = false;
        &self.leds
    }

    /// Render and send the LEDs if the scene changed
    ///
    /// Returns true when a frame was written.
    pub fn refresh_leds<D: GridDevice + ?Sized>(&mut self, scene: &mut Scene, device: &mut D) -> bool {
        if !scene.grid_dirty {
            return false;
        }

        let leds = self.render_leds(scene, device);
        device.write_leds(leds.as_slice());

        #[cfg(feature = "defmt")]
        defmt::trace!("wrote {} leds", leds.len());

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ButtonConfig, FaderConfig, FaderKind, Placement, XyPadConfig};
    use crate::mocks::MockHost;
    use crate::scene::LedOverlay;

    fn render(scene: &mut Scene, host: &MockHost) -> LedBuffer {
        let mut grid = GridController::new();
        grid.render_leds(scene, host).clone()
    }

    #[test]
    fn test_empty_scene_is_dark() {
        let mut scene = Scene::new();
        let host = MockHost::new(16, 8);
        let leds = render(&mut scene, &host);
        assert_eq!(leds.len(), 128);
        assert!(leds.as_slice().iter().all(|&l| l == 0));
        assert!(!scene.is_grid_dirty());
    }

    #[test]
    fn test_buttons_draw_over_faders() {
        let mut scene = Scene::new();
        scene
            .add_fader(FaderConfig {
                placement: Placement::new(0, 0, 8, 1).with_level(3),
                kind: FaderKind::CoarseHorizontalBar,
            })
            .unwrap();
        scene
            .add_button(ButtonConfig {
                placement: Placement::new(4, 0, 1, 1).with_level(7),
                latch: false,
            })
            .unwrap();
        scene.set_fader_value(0, 1).unwrap();

        let leds = render(&mut scene, &MockHost::new(16, 8));
        assert_eq!(leds.get(0, 0), 15);
        assert_eq!(leds.get(1, 0), 15);
        assert_eq!(leds.get(2, 0), 3);
        assert_eq!(leds.get(4, 0), 7);
        assert_eq!(leds.get(8, 0), 0);
    }

    #[test]
    fn test_overlay_then_dim() {
        let mut scene = Scene::new();
        scene
            .add_button(ButtonConfig {
                placement: Placement::new(0, 0, 3, 1).with_level(8),
                latch: false,
            })
            .unwrap();
        scene.set_overlay(0, 0, LedOverlay::Dim).unwrap();
        scene.set_overlay(1, 0, LedOverlay::Bright).unwrap();
        scene.set_overlay(5, 5, LedOverlay::Bright).unwrap();
        scene.set_overlay(6, 6, LedOverlay::Level(12)).unwrap();
        scene.set_dim(2);

        let leds = render(&mut scene, &MockHost::new(16, 8));
        assert_eq!(leds.get(0, 0), 2);
        assert_eq!(leds.get(1, 0), 13);
        assert_eq!(leds.get(2, 0), 6);
        // Bright lifts a dark cell to 1, then dim takes it back down
        assert_eq!(leds.get(5, 5), 0);
        assert_eq!(leds.get(6, 6), 10);
    }

    #[test]
    fn test_rotation_reverses_frame() {
        let mut scene = Scene::new();
        scene
            .add_xypad(XyPadConfig {
                placement: Placement::new(0, 0, 8, 8),
            })
            .unwrap();
        scene.set_xypad_value(0, 3, 5).unwrap();
        scene
            .add_button(ButtonConfig {
                placement: Placement::new(12, 1, 2, 3),
                latch: false,
            })
            .unwrap();

        let host = MockHost::new(16, 8);
        let upright = render(&mut scene, &host);
        scene.set_rotate(true);
        let rotated = render(&mut scene, &host);

        let mut expected = [0u8; 128];
        expected.copy_from_slice(upright.as_slice());
        expected.reverse();
        assert_eq!(rotated.as_slice(), &expected[..]);
    }

    #[test]
    fn test_small_device_clips() {
        let mut scene = Scene::new();
        scene
            .add_button(ButtonConfig {
                placement: Placement::new(6, 6, 4, 4),
                latch: false,
            })
            .unwrap();
        let leds = render(&mut scene, &MockHost::new(8, 8));
        assert_eq!(leds.len(), 64);
        assert_eq!(leds.get(7, 7), 5);
        assert_eq!(leds.get(8, 7), 0);
    }

    #[test]
    fn test_refresh_only_when_dirty() {
        let mut scene = Scene::new();
        let mut host = MockHost::new(16, 8);
        let mut grid = GridController::new();

        assert!(grid.refresh_leds(&mut scene, &mut host));
        assert_eq!(host.frames, 1);
        assert!(!grid.refresh_leds(&mut scene, &mut host));
        assert_eq!(host.frames, 1);

        scene.set_dim(1);
        assert!(grid.refresh_leds(&mut scene, &mut host));
        assert_eq!(host.frames, 2);
        assert_eq!(host.leds.len(), 128);
    }
}
