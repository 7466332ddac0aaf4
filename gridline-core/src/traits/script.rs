//! Scripting engine trait

use crate::config::ScriptId;

/// Trait for the host's scripting engine
pub trait ScriptRunner {
    /// Run a script; called at most once per script per key event or tick
    fn run_script(&mut self, script: ScriptId);
}
