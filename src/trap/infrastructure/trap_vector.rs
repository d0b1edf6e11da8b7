// clic_vectored/src/trap/infrastructure/trap_vector.rs

//! # Trap Vector Controller
//!
//! Owns the vector table and is the only writer of `mtvec`/`mtvt`. Mode and
//! table base are validated in full and then handed to the hart in a single
//! call, so there is never a window where `mtvec` claims vectored dispatch
//! while `mtvt` still holds a stale base.

use super::di::traits::HardwareController;
use super::vector_table::VectorTable;
use crate::trap::ds::{ClicError, Handler, HandlerRef, TrapMode, TrapVectorState, VECTOR_ALIGN};
use crate::{debug_print, warn_print};

pub struct TrapVectorController<'t> {
    table: &'t mut VectorTable,
}

fn check_alignment(addr: usize) -> Result<(), ClicError> {
    if addr % VECTOR_ALIGN == 0 {
        Ok(())
    } else {
        Err(ClicError::MisalignedBase(addr))
    }
}

impl<'t> TrapVectorController<'t> {
    pub fn new(table: &'t mut VectorTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &VectorTable {
        &*self.table
    }

    pub fn reset_table(&mut self) {
        self.table.reset();
    }

    pub fn register(&mut self, id: u16, handler: Handler) -> Result<(), ClicError> {
        self.table.register(id, handler)
    }

    pub fn resolve(&self, id: u16) -> HandlerRef {
        self.table.resolve_id(id)
    }

    /// Arms `mode` with this controller's own table. Only vectored mode is
    /// supported.
    pub fn arm<H: HardwareController + ?Sized>(
        &self,
        hw: &H,
        mode: TrapMode,
        trap_entry: usize,
    ) -> Result<TrapVectorState, ClicError> {
        match mode {
            TrapMode::Vectored => self.arm_vectored(hw, self.table.base_address(), trap_entry),
            TrapMode::Direct => {
                warn_print!("CLIC direct mode requested; only vectored dispatch is supported");
                Err(ClicError::UnsupportedMode(mode))
            }
        }
    }

    /// Switches the hart to CLIC vectored mode with the table at `base` and
    /// exceptions entering at `trap_entry`. Both must be 64-byte aligned;
    /// a rejected request leaves the CSRs untouched.
    pub fn arm_vectored<H: HardwareController + ?Sized>(
        &self,
        hw: &H,
        base: usize,
        trap_entry: usize,
    ) -> Result<TrapVectorState, ClicError> {
        check_alignment(base)?;
        check_alignment(trap_entry)?;

        let state = TrapVectorState {
            mode: TrapMode::Vectored,
            base,
            trap_entry,
        };
        hw.write_trap_vector(state);
        debug_print!("mtvt={:#x} mtvec={:#x}", base, state.mtvec());
        Ok(state)
    }

    /// The live `mtvec`/`mtvt` contents.
    pub fn state<H: HardwareController + ?Sized>(&self, hw: &H) -> TrapVectorState {
        hw.read_trap_vector()
    }
}
