//! Key dispatcher
//!
//! Routes key events to widgets in a fixed order: XY pads and faders react to
//! presses only, buttons to both edges. Overlapping widgets are all hit.
//! Scripts triggered along the way run once each, lowest id first, after
//! every widget has been updated.

use crate::config::{GroupConfig, Placement, ScriptId, MAX_GROUPS};
use crate::controller::GridController;
use crate::input::{HeldKeyPool, ScriptSet};
use crate::scene::{group_enabled, LatestTouched, Scene};
use crate::state::{KeyEvent, KeySource};
use crate::traits::{GridHost, HoldToken};

/// What a key event or timer fire changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    /// Scripts that were run
    pub scripts: ScriptSet,
    /// At least one widget was hit; both outputs were marked dirty
    pub refresh: bool,
}

impl Dispatch {
    /// Record a widget hit
    fn hit(&mut self, groups: &[GroupConfig; MAX_GROUPS], placement: &Placement, own: Option<ScriptId>) {
        self.scripts.insert(own);
        self.scripts.insert(groups.get(placement.group as usize).and_then(|group| group.script));
        self.refresh = true;
    }

    /// Run the collected scripts and flag the outputs
    pub(crate) fn finish<H: GridHost + ?Sized>(&self, scene: &mut Scene, host: &mut H) {
        self.scripts.run_all(host);
        if self.refresh {
            scene.mark_dirty();
        }
    }
}

/// Result of a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyOutcome {
    /// Pool full on press, or release of an untracked key; nothing changed
    Dropped,
    /// The event was tracked and dispatched
    Handled(Dispatch),
}

/// Widget must be enabled, in an enabled group, and cover the cell
fn active(groups: &[GroupConfig; MAX_GROUPS], placement: &Placement, x: u8, y: u8) -> bool {
    placement.enabled && group_enabled(groups, placement.group) && placement.within(x, y)
}

impl GridController {
    /// Handle a key press or release
    ///
    /// Device presses are mirrored against the device extents while the
    /// scene is rotated; emulated events are already in scene coordinates.
    /// A release acts on the cell its press landed on, even if rotation
    /// changed while the key was down.
    pub fn handle_key<H: GridHost + ?Sized>(&mut self, scene: &mut Scene, host: &mut H, event: KeyEvent) -> KeyOutcome {
        let (x, y) = if event.pressed {
            let cell = if scene.rotate && event.source == KeySource::Device {
                let (columns, rows) = host.size();
                (
                    columns.saturating_sub(1).saturating_sub(event.x),
                    rows.saturating_sub(1).saturating_sub(event.y),
                )
            } else {
                (event.x, event.y)
            };
            if self.held.press(event, cell, host).is_none() {
                #[cfg(feature = "defmt")]
                defmt::warn!("held-key pool full, dropping press at ({}, {})", cell.0, cell.1);
                return KeyOutcome::Dropped;
            }
            cell
        } else {
            let Some(cell) = self.held.release(event, host) else {
                #[cfg(feature = "defmt")]
                defmt::debug!("release of untracked key ({}, {})", event.x, event.y);
                return KeyOutcome::Dropped;
            };
            cell
        };

        let mut dispatch = Dispatch::default();
        if event.pressed {
            press_xypads(scene, x, y, &mut dispatch);
            press_faders(scene, &self.held, x, y, &mut dispatch);
        }
        update_buttons(scene, x, y, event.pressed, &mut dispatch);
        dispatch.finish(scene, host);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "key ({}, {}) z={} ran {} scripts",
            x,
            y,
            event.pressed,
            dispatch.scripts.len()
        );

        KeyOutcome::Handled(dispatch)
    }

    /// Handle a hold or repeat timer fire
    ///
    /// Every enabled fine fader with an end cap under the held key moves one
    /// step towards that cap. Returns `None` for stale tokens.
    pub fn on_timer<H: GridHost + ?Sized>(&mut self, scene: &mut Scene, host: &mut H, token: HoldToken) -> Option<Dispatch> {
        let fire = self.held.fire(token, host)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("{} fire at ({}, {})", fire.kind, fire.x, fire.y);

        let mut dispatch = Dispatch::default();
        let groups = &scene.groups;
        for (index, fader) in scene.faders.iter_mut().enumerate() {
            let placement = fader.placement;
            if !active(groups, &placement, fire.x, fire.y) || !fader.nudge(fire.x, fire.y) {
                continue;
            }
            touch(&mut scene.latest, &placement, None, Some(index));
            dispatch.hit(groups, &placement, placement.script);
        }
        dispatch.finish(scene, host);

        Some(dispatch)
    }
}

fn touch(latest: &mut LatestTouched, placement: &Placement, button: Option<usize>, fader: Option<usize>) {
    latest.group = placement.group;
    if button.is_some() {
        latest.button = button;
    }
    if fader.is_some() {
        latest.fader = fader;
    }
}

fn press_xypads(scene: &mut Scene, x: u8, y: u8, dispatch: &mut Dispatch) {
    let groups = &scene.groups;
    for pad in scene.xypads.iter_mut() {
        let placement = pad.placement;
        if !active(groups, &placement, x, y) {
            continue;
        }
        pad.touch(x, y);
        touch(&mut scene.latest, &placement, None, None);
        dispatch.hit(groups, &placement, placement.script);
    }
}

fn press_faders(scene: &mut Scene, held: &HeldKeyPool, x: u8, y: u8, dispatch: &mut Dispatch) {
    let groups = &scene.groups;
    for (index, fader) in scene.faders.iter_mut().enumerate() {
        let placement = fader.placement;
        if !active(groups, &placement, x, y) {
            continue;
        }

        // First qualifying held key in pool order; a held fine end cap is
        // nudging rather than anchoring
        let glide = held
            .held()
            .find(|&key| fader.accepts_anchor((x, y), key))
            .is_some_and(|(ax, ay)| !(fader.kind.is_fine() && fader.is_boundary(ax, ay)));
        fader.press(x, y, glide);

        touch(&mut scene.latest, &placement, None, Some(index));
        dispatch.hit(groups, &placement, placement.script);
    }
}

fn update_buttons(scene: &mut Scene, x: u8, y: u8, pressed: bool, dispatch: &mut Dispatch) {
    let groups = &scene.groups;
    for (index, button) in scene.buttons.iter_mut().enumerate() {
        let placement = button.placement;
        if !active(groups, &placement, x, y) {
            continue;
        }
        let own = if button.press(pressed) { placement.script } else { None };
        touch(&mut scene.latest, &placement, Some(index), None);
        dispatch.hit(groups, &placement, own);
    }
}
