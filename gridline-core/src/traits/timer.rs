//! Software timer service trait

/// How a scheduled timer repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerMode {
    /// Fire once after the period
    OneShot,
    /// Fire every period until cancelled
    Periodic,
}

/// Handle identifying a held-key timer
///
/// The token names a slot in the held-key pool plus the generation of that
/// slot's current arming. Releasing or re-arming a key bumps the generation,
/// so a fire carrying an old token is ignored instead of acting on a reused
/// slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldToken {
    /// Pool slot index
    pub slot: u8,
    /// Arming generation of the slot
    pub generation: u16,
}

/// Trait for the host's timer service
///
/// When a timer fires the host calls
/// [`GridController::on_timer`](crate::GridController::on_timer) with the
/// token it was started with. Callbacks must be delivered serially, never
/// concurrently with a key event.
pub trait TimerService {
    /// Start (or restart) the timer for `token`
    ///
    /// Starting a token that is already scheduled replaces its schedule.
    fn start(&mut self, token: HoldToken, period_ms: u32, mode: TimerMode);

    /// Cancel the timer for `token`; cancelling an idle token is a no-op
    fn cancel(&mut self, token: HoldToken);
}
