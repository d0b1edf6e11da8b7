// clic_vectored/src/trap/ds/setup.rs

//! Startup configuration: which lines to wire up, built once by the board
//! instead of selecting interrupt categories at compile time.

use super::config::ControllerConfig;
use super::handler::Handler;

/// One line to configure at startup.
#[derive(Debug, Clone, Copy)]
pub struct LineSetup {
    pub line: u16,
    /// Installed in the vector table; `None` leaves the default handler.
    pub handler: Option<Handler>,
    /// Raw `clicintctl` byte.
    pub control: u8,
    pub enable: bool,
}

impl LineSetup {
    /// A disabled line with the default handler and the highest control byte.
    pub const fn new(line: u16) -> Self {
        Self {
            line,
            handler: None,
            control: 0xFF,
            enable: false,
        }
    }

    pub const fn handler(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    pub const fn control(mut self, control: u8) -> Self {
        self.control = control;
        self
    }

    pub const fn enabled(mut self) -> Self {
        self.enable = true;
        self
    }
}

/// Everything applied between closing and opening the global gate.
#[derive(Debug, Clone, Copy)]
pub struct Setup<'a> {
    pub controller: ControllerConfig,
    pub lines: &'a [LineSetup],
    /// Arms the machine timer this many milliseconds out, before any line is enabled.
    pub timer_ms: Option<u32>,
}

impl<'a> Setup<'a> {
    pub const fn new(controller: ControllerConfig, lines: &'a [LineSetup]) -> Self {
        Self {
            controller,
            lines,
            timer_ms: None,
        }
    }

    pub const fn with_timer_ms(mut self, ms: u32) -> Self {
        self.timer_ms = Some(ms);
        self
    }
}
