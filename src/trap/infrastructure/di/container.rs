// clic_vectored/src/trap/infrastructure/di/container.rs

//! # Controller Container
//!
//! `Clic` ties one hart's register layout, its hardware access, and the
//! trap vector controller (with its vector table) together. Component views
//! (`lines`, `gate`, `timer`) are cheap borrows handed out on demand.

use super::traits::Hart;
use crate::platform::Platform;
use crate::trap::ds::{
    ClicError, ClicLayout, ControllerConfig, Handler, HandlerRef, HartContext, LineId, Setup,
    TrapMode, TrapVectorState,
};
use crate::trap::infrastructure::{
    gate::GlobalGate, line_config::InterruptLines, timer::Timer,
    trap_vector::TrapVectorController, vector_table::VectorTable,
};
use crate::{debug_print, info_print};

pub struct Clic<'t, H> {
    layout: ClicLayout,
    hw: H,
    vectors: TrapVectorController<'t>,
}

impl<'t, H: Hart> Clic<'t, H> {
    pub fn new(platform: Platform, hart: HartContext, hw: H, table: &'t mut VectorTable) -> Self {
        Self {
            layout: ClicLayout::new(platform, hart),
            hw,
            vectors: TrapVectorController::new(table),
        }
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn layout(&self) -> &ClicLayout {
        &self.layout
    }

    pub fn lines(&self) -> InterruptLines<'_, H> {
        InterruptLines::new(&self.layout, &self.hw)
    }

    pub fn gate(&self) -> GlobalGate<'_, H> {
        GlobalGate::new(&self.hw)
    }

    pub fn timer(&self) -> Timer<'_, H> {
        Timer::new(&self.layout, &self.hw)
    }

    pub fn vectors(&self) -> &TrapVectorController<'t> {
        &self.vectors
    }

    /// Startup sequence: close the gate, fill the table with the default
    /// handler, switch to vectored mode, and fall back to one flat level.
    pub fn start(&mut self, trap_entry: usize) -> Result<TrapVectorState, ClicError> {
        self.gate().disable_all();
        self.vectors.reset_table();
        let state = self.vectors.arm(&self.hw, TrapMode::Vectored, trap_entry)?;
        self.lines().configure(ControllerConfig::FLAT)?;
        info_print!(
            "CLIC vectored mode armed on hart {} (table at {:#x})",
            self.layout.hart().hart_id,
            state.base
        );
        Ok(state)
    }

    /// Switches to vectored mode with an externally supplied table base.
    pub fn arm_vectored(&self, base: usize, trap_entry: usize) -> Result<TrapVectorState, ClicError> {
        self.vectors.arm_vectored(&self.hw, base, trap_entry)
    }

    /// Installs `handler` for line `id`. Refused while the global gate is
    /// open: a trap taken mid-update could read a half-written slot.
    pub fn register_handler(&mut self, id: u16, handler: Handler) -> Result<(), ClicError> {
        if self.gate().is_open() {
            return Err(ClicError::InterruptsEnabled);
        }
        self.vectors.register(id, handler)
    }

    /// Installs `handler` without checking the global gate.
    ///
    /// # Safety
    ///
    /// If interrupts are enabled, line `id` must be disabled (or otherwise
    /// unable to fire) for the duration of the call.
    pub unsafe fn register_handler_unchecked(
        &mut self,
        id: u16,
        handler: Handler,
    ) -> Result<(), ClicError> {
        self.vectors.register(id, handler)
    }

    /// What hardware dispatch would jump to for `id`.
    pub fn resolve(&self, id: u16) -> HandlerRef {
        self.vectors.resolve(id)
    }

    /// Applies a startup table. Everything is validated before the first
    /// register write, so a bad entry leaves the hardware as it was.
    pub fn apply(&mut self, setup: &Setup<'_>) -> Result<(), ClicError> {
        if self.gate().is_open() {
            return Err(ClicError::InterruptsEnabled);
        }
        setup
            .controller
            .validate(self.layout.platform().intctl_bits)?;
        for entry in setup.lines {
            LineId::new(entry.line)?;
        }

        self.lines().configure(setup.controller)?;
        for entry in setup.lines {
            if let Some(handler) = entry.handler {
                self.vectors.register(entry.line, handler)?;
            }
            self.lines().set_level_priority(entry.line, entry.control)?;
            debug_print!(
                "line {}: ctl={:#04x} handler={:?}",
                entry.line,
                entry.control,
                self.resolve(entry.line)
            );
        }
        if let Some(ms) = setup.timer_ms {
            let deadline = self.timer().arm_ms(ms);
            debug_print!("timer armed for {} ms (mtimecmp={})", ms, deadline);
        }
        for entry in setup.lines.iter().filter(|entry| entry.enable) {
            self.lines().enable(entry.line)?;
        }
        info_print!("Applied {} line configuration(s)", setup.lines.len());
        Ok(())
    }
}
