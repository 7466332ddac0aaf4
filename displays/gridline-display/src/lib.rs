//! Paged pixel display surface for Gridline
//!
//! This crate provides:
//! - `Line` / `DisplayLines`: the 128x64 greyscale editor display, split into
//!   eight 128x8 lines the way the display transport consumes it
//! - `DisplayBackend` trait for pushing lines to the physical display
//! - `FontRenderer` trait for the bitmap font subsystem, plus `FontExt`
//!   helpers for right-aligned labels and decimal readouts
//!
//! # Architecture
//!
//! The grid core composes widget state into a `DisplayLines` buffer. The
//! host owns the font and the transport and plugs them in through the
//! traits defined here, so rendering stays testable on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError, FontExt, FontRenderer};
pub use screen::{DisplayLines, Line, DISPLAY_HEIGHT, DISPLAY_LINES, LINE_HEIGHT, LINE_WIDTH};
