//! Render pipelines
//!
//! Both pipelines compose the same widget layers through the shared
//! [`fill`](crate::geometry::fill) routine: XY pads first, then faders, then
//! buttons, so the last writer wins where widgets overlap. The LED pipeline
//! targets the device buffer, the screen pipeline a paged cell buffer that is
//! then drawn as a zoomed visualization.

pub mod glyphs;
pub mod led;
pub mod screen;

pub use glyphs::{outline_parts, OutlinePart, GLYPH_SIZE};
pub use led::LedBuffer;
pub use screen::{Page, ScreenCells, ScreenMode, ScreenRequest, Selection};

use crate::config::Placement;
use crate::geometry::{fill, CellBuffer};
use crate::scene::Scene;

/// Widget and its group are both enabled
fn visible(scene: &Scene, placement: &Placement) -> bool {
    placement.enabled && scene.group_enabled(placement.group)
}

/// Draw every visible widget into `buffer`
pub(crate) fn compose<B: CellBuffer + ?Sized>(scene: &Scene, buffer: &mut B) {
    for pad in scene.xypads.iter().filter(|pad| visible(scene, &pad.placement)) {
        for layer in pad.fills() {
            fill(buffer, layer.rect, layer.level);
        }
    }

    for fader in scene.faders.iter().filter(|fader| visible(scene, &fader.placement)) {
        for layer in fader.fills() {
            fill(buffer, layer.rect, layer.level);
        }
    }

    for button in scene.buttons.iter().filter(|button| visible(scene, &button.placement)) {
        let layer = button.fill();
        fill(buffer, layer.rect, layer.level);
    }
}
