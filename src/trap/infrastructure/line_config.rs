// clic_vectored/src/trap/infrastructure/line_config.rs

//! # Interrupt Line Configuration
//!
//! Per-line `clicintie`/`clicintip`/`clicintctl` access and the controller
//! wide `cliccfg`. There is no shadow copy: every query reads the register,
//! every write lands immediately. IDs are range-checked before any access.
//!
//! Changing `nlbits` does not rewrite stored control bytes; their meaning
//! changes with it, so callers re-set priorities after reconfiguring.

use super::di::traits::RegisterBus;
use crate::trap::ds::{ClicError, ClicLayout, ControllerConfig, LevelEncoding, LineId};
use crate::{debug_print, warn_print};

pub struct InterruptLines<'a, B: ?Sized> {
    layout: &'a ClicLayout,
    bus: &'a B,
}

impl<'a, B: RegisterBus + ?Sized> InterruptLines<'a, B> {
    pub fn new(layout: &'a ClicLayout, bus: &'a B) -> Self {
        Self { layout, bus }
    }

    /// Idempotent.
    pub fn enable(&self, id: u16) -> Result<(), ClicError> {
        let line = LineId::new(id)?;
        self.bus.write_byte(self.layout.enable(line), 1);
        Ok(())
    }

    /// Idempotent. A handler already running for the line runs to completion.
    pub fn disable(&self, id: u16) -> Result<(), ClicError> {
        let line = LineId::new(id)?;
        self.bus.write_byte(self.layout.enable(line), 0);
        Ok(())
    }

    pub fn is_enabled(&self, id: u16) -> Result<bool, ClicError> {
        let line = LineId::new(id)?;
        Ok(self.bus.read_byte(self.layout.enable(line)) & 1 != 0)
    }

    /// Writes the raw `clicintctl` byte, read under the current `nlbits`.
    pub fn set_level_priority(&self, id: u16, raw: u8) -> Result<(), ClicError> {
        let line = LineId::new(id)?;
        self.bus.write_byte(self.layout.control(line), raw);
        Ok(())
    }

    /// The `clicintctl` byte as the controller holds it. Unimplemented low
    /// bits read as ones.
    pub fn level_priority(&self, id: u16) -> Result<u8, ClicError> {
        let line = LineId::new(id)?;
        Ok(self.bus.read_byte(self.layout.control(line)))
    }

    /// `(level, priority)` of the line under the live configuration.
    pub fn effective_level_priority(&self, id: u16) -> Result<(u8, u8), ClicError> {
        let raw = self.level_priority(id)?;
        let encoding = self.encoding();
        Ok((encoding.level(raw), encoding.priority(raw)))
    }

    pub fn is_pending(&self, id: u16) -> Result<bool, ClicError> {
        let line = LineId::new(id)?;
        Ok(self.bus.read_byte(self.layout.pending(line)) & 1 != 0)
    }

    /// Sets the pending bit. Only software-triggerable lines (such as the
    /// CLIC software interrupt, ID 12) honour this.
    pub fn set_pending(&self, id: u16) -> Result<(), ClicError> {
        let line = LineId::new(id)?;
        self.bus.write_byte(self.layout.pending(line), 1);
        Ok(())
    }

    pub fn clear_pending(&self, id: u16) -> Result<(), ClicError> {
        let line = LineId::new(id)?;
        self.bus.write_byte(self.layout.pending(line), 0);
        Ok(())
    }

    /// Validates `config` against the platform's control width, then writes `cliccfg`.
    pub fn configure(&self, config: ControllerConfig) -> Result<(), ClicError> {
        if let Err(err) = config.validate(self.layout.platform().intctl_bits) {
            warn_print!("Rejected CLIC configuration {:?}: {}", config, err);
            return Err(err);
        }
        self.bus.write_byte(self.layout.config(), config.to_cliccfg());
        debug_print!("cliccfg={:#04x} ({:?})", config.to_cliccfg(), config);
        Ok(())
    }

    /// The live `cliccfg`, decoded.
    pub fn config(&self) -> ControllerConfig {
        ControllerConfig::from_cliccfg(self.bus.read_byte(self.layout.config()))
    }

    /// The live split, for this controller's implemented control width.
    pub fn encoding(&self) -> LevelEncoding {
        self.config()
            .encoding()
            .implemented(self.layout.platform().intctl_bits)
    }

    /// The pending and enabled line the arbiter would take next: highest
    /// level, then highest priority, then highest ID.
    pub fn highest_pending(&self) -> Option<LineId> {
        let encoding = self.encoding();
        LineId::all()
            .filter(|&line| {
                self.bus.read_byte(self.layout.pending(line)) & 1 != 0
                    && self.bus.read_byte(self.layout.enable(line)) & 1 != 0
            })
            .max_by_key(|&line| {
                encoding.arbitration_key(self.bus.read_byte(self.layout.control(line)), line)
            })
    }

    /// Disables every line and clears every pending bit.
    pub fn quiesce(&self) {
        for line in LineId::all() {
            self.bus.write_byte(self.layout.enable(line), 0);
            self.bus.write_byte(self.layout.pending(line), 0);
        }
    }
}
