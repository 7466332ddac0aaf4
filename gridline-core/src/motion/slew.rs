//! Fader slew engine

use crate::controller::GridController;
use crate::input::Dispatch;
use crate::scene::Scene;
use crate::traits::ScriptRunner;

impl GridController {
    /// Advance every gliding fader by one tick
    ///
    /// Faders keep gliding while disabled, since the glide began while they
    /// were enabled. Each step triggers the fader's and its group's scripts;
    /// every script runs at most once per tick.
    pub fn advance_slew<S: ScriptRunner + ?Sized>(&mut self, scene: &mut Scene, scripts: &mut S) -> Dispatch {
        let mut dispatch = Dispatch::default();
        let groups = &scene.groups;

        for (index, fader) in scene.faders.iter_mut().enumerate() {
            if !fader.advance_glide() {
                continue;
            }

            let placement = fader.placement;
            scene.latest.fader = Some(index);
            scene.latest.group = placement.group;
            dispatch.scripts.insert(placement.script);
            dispatch
                .scripts
                .insert(groups.get(placement.group as usize).and_then(|group| group.script));
            dispatch.refresh = true;

            #[cfg(feature = "defmt")]
            if !fader.is_sliding() {
                defmt::debug!("fader {} reached {}", index, fader.value());
            }
        }

        dispatch.scripts.run_all(scripts);
        if dispatch.refresh {
            scene.mark_dirty();
        }
        dispatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FaderConfig, FaderKind, GroupConfig, Placement, ScriptId};
    use crate::mocks::MockHost;

    fn coarse_scene() -> Scene {
        let mut scene = Scene::new();
        let placement = Placement::new(0, 0, 8, 1).with_script(ScriptId::new(1).unwrap());
        scene
            .add_fader(FaderConfig {
                placement,
                kind: FaderKind::CoarseHorizontalDot,
            })
            .unwrap();
        scene
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut scene = coarse_scene();
        scene.grid_dirty = false;
        let mut grid = GridController::new();
        let mut host = MockHost::new(16, 8);

        let dispatch = grid.advance_slew(&mut scene, &mut host);
        assert!(!dispatch.refresh);
        assert!(host.scripts.is_empty());
        assert!(!scene.is_grid_dirty());
    }

    #[test]
    fn test_coarse_glide_steps_every_sixteen_ticks() {
        let mut scene = coarse_scene();
        scene.faders[0].start_glide(2);
        let mut grid = GridController::new();
        let mut host = MockHost::new(16, 8);

        for _ in 0..15 {
            grid.advance_slew(&mut scene, &mut host);
        }
        assert_eq!(scene.faders()[0].value(), 0);
        assert!(host.scripts.is_empty());

        let dispatch = grid.advance_slew(&mut scene, &mut host);
        assert!(dispatch.refresh);
        assert_eq!(scene.faders()[0].value(), 1);
        assert_eq!(host.scripts.as_slice(), &[1]);

        for _ in 0..16 {
            grid.advance_slew(&mut scene, &mut host);
        }
        assert_eq!(scene.faders()[0].value(), 2);
        assert!(!scene.faders()[0].is_sliding());
        assert_eq!(scene.latest().fader, Some(0));
    }

    #[test]
    fn test_shared_group_script_runs_once_per_tick() {
        let mut scene = Scene::new();
        let group = ScriptId::new(6);
        scene.set_group(2, GroupConfig { enabled: true, script: group }).unwrap();
        for row in 0..3 {
            // One interior cell over 16 values steps every tick
            let placement = Placement::new(0, row, 3, 1).with_group(2).with_level(16);
            scene
                .add_fader(FaderConfig {
                    placement,
                    kind: FaderKind::FineHorizontalBar,
                })
                .unwrap();
        }
        for fader in scene.faders.iter_mut() {
            fader.start_glide(3);
            assert_eq!(fader.glide().map(|g| g.step_rate), Some(1));
        }

        let mut grid = GridController::new();
        let mut host = MockHost::new(16, 8);
        grid.advance_slew(&mut scene, &mut host);
        assert_eq!(host.scripts.as_slice(), &[6]);
        assert!(scene.faders().iter().all(|f| f.value() == 1));
    }

    #[test]
    fn test_disabled_fader_keeps_gliding() {
        let mut scene = coarse_scene();
        scene.faders[0].start_glide(1);
        scene.set_fader_enabled(0, false).unwrap();
        let mut grid = GridController::new();
        let mut host = MockHost::new(16, 8);

        for _ in 0..16 {
            grid.advance_slew(&mut scene, &mut host);
        }
        assert_eq!(scene.faders()[0].value(), 1);
    }
}
