//! Shared collaborators for integration tests
#![allow(dead_code)]

use gridline_core::config::ScriptId;
use gridline_core::traits::{GridDevice, HoldToken, ScriptRunner, TimerMode, TimerService};
use gridline_display::{DisplayBackend, DisplayError, FontRenderer, Line};

/// Host that records every call the core makes
pub struct TestHost {
    pub size: (u8, u8),
    pub started: Vec<(HoldToken, u32, TimerMode)>,
    pub cancelled: Vec<HoldToken>,
    pub scripts: Vec<u8>,
    pub frames: Vec<Vec<u8>>,
}

impl TestHost {
    pub fn new(columns: u8, rows: u8) -> Self {
        Self {
            size: (columns, rows),
            started: Vec::new(),
            cancelled: Vec::new(),
            scripts: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Token of the most recently started timer
    pub fn last_token(&self) -> Option<HoldToken> {
        self.started.last().map(|(token, _, _)| *token)
    }
}

impl GridDevice for TestHost {
    fn size(&self) -> (u8, u8) {
        self.size
    }

    fn write_leds(&mut self, leds: &[u8]) {
        self.frames.push(leds.to_vec());
    }
}

impl TimerService for TestHost {
    fn start(&mut self, token: HoldToken, period_ms: u32, mode: TimerMode) {
        self.started.push((token, period_ms, mode));
    }

    fn cancel(&mut self, token: HoldToken) {
        self.cancelled.push(token);
    }
}

impl ScriptRunner for TestHost {
    fn run_script(&mut self, script: ScriptId) {
        self.scripts.push(script.index());
    }
}

/// Font that draws nothing and remembers the text
#[derive(Default)]
pub struct TextFont {
    pub texts: Vec<(String, u16)>,
}

impl FontRenderer for TextFont {
    fn draw_right(&mut self, _line: &mut Line, text: &str, right_x: u16, _y: u8, _fg: u8, _bg: u8) {
        self.texts.push((text.to_string(), right_x));
    }
}

/// Display backend that keeps copies of the lines it receives
#[derive(Default)]
pub struct CaptureBackend {
    pub lines: Vec<(u8, Line)>,
    pub flushes: usize,
}

impl DisplayBackend for CaptureBackend {
    fn draw_line(&mut self, index: u8, line: &Line) -> Result<(), DisplayError> {
        self.lines.push((index, line.clone()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.flushes += 1;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}
