//! Recording collaborators for unit tests

use heapless::{String, Vec};

use gridline_display::{FontRenderer, Line};

use crate::config::ScriptId;
use crate::traits::{GridDevice, HoldToken, ScriptRunner, TimerMode, TimerService, MAX_LED_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCall {
    Start(HoldToken, u32, TimerMode),
    Cancel(HoldToken),
}

/// Grid device, timer service and script runner in one
pub struct MockHost {
    pub size: (u8, u8),
    pub timers: Vec<TimerCall, 128>,
    pub scripts: Vec<u8, 64>,
    pub leds: Vec<u8, MAX_LED_CELLS>,
    pub frames: usize,
}

impl MockHost {
    pub fn new(columns: u8, rows: u8) -> Self {
        Self {
            size: (columns, rows),
            timers: Vec::new(),
            scripts: Vec::new(),
            leds: Vec::new(),
            frames: 0,
        }
    }
}

impl GridDevice for MockHost {
    fn size(&self) -> (u8, u8) {
        self.size
    }

    fn write_leds(&mut self, leds: &[u8]) {
        self.leds.clear();
        let _ = self.leds.extend_from_slice(leds);
        self.frames += 1;
    }
}

impl TimerService for MockHost {
    fn start(&mut self, token: HoldToken, period_ms: u32, mode: TimerMode) {
        let _ = self.timers.push(TimerCall::Start(token, period_ms, mode));
    }

    fn cancel(&mut self, token: HoldToken) {
        let _ = self.timers.push(TimerCall::Cancel(token));
    }
}

impl ScriptRunner for MockHost {
    fn run_script(&mut self, script: ScriptId) {
        let _ = self.scripts.push(script.index());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontCall {
    pub text: String<8>,
    pub right_x: u16,
    pub fg: u8,
}

/// Font that records what it was asked to draw
#[derive(Default)]
pub struct MockFont {
    pub calls: Vec<FontCall, 32>,
}

impl FontRenderer for MockFont {
    fn draw_right(&mut self, _line: &mut Line, text: &str, right_x: u16, _y: u8, fg: u8, _bg: u8) {
        let mut recorded = String::new();
        let _ = recorded.push_str(text);
        let _ = self.calls.push(FontCall {
            text: recorded,
            right_x,
            fg,
        });
    }
}
