//! Fader motion
//!
//! Gliding faders ramp one value step at a time towards their target,
//! advanced by the host's slew tick.

pub mod slew;
