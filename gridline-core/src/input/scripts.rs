//! Deduplicated script triggers

use crate::config::{ScriptId, MAX_SCRIPTS};
use crate::traits::ScriptRunner;

const _: () = assert!(MAX_SCRIPTS <= u16::BITS as usize);

/// Set of scripts to run, one bit per script id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScriptSet(u16);

impl ScriptSet {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a script; `None` is ignored
    pub fn insert(&mut self, script: Option<ScriptId>) {
        if let Some(script) = script {
            self.0 |= 1 << script.index();
        }
    }

    pub fn contains(&self, script: ScriptId) -> bool {
        self.0 & (1 << script.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Scripts in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = ScriptId> {
        let bits = self.0;
        (0..MAX_SCRIPTS as u8)
            .filter(move |id| bits & (1 << id) != 0)
            .filter_map(ScriptId::new)
    }

    /// Run every script once, lowest id first
    pub fn run_all<S: ScriptRunner + ?Sized>(&self, runner: &mut S) {
        for script in self.iter() {
            #[cfg(feature = "defmt")]
            defmt::trace!("running script {}", script.index());
            runner.run_script(script);
        }
    }
}
