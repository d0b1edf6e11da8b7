// clic_vectored/src/trap/ds/context.rs

//! Diagnostic state captured by the default trap handler.

use super::types::{TrapCause, TrapType};
use core::fmt;

/// `mcause`, `mepc` and `mtval` at the moment an unhandled trap was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultRecord {
    pub cause: TrapCause,
    /// Faulting (or interrupted) program counter.
    pub epc: usize,
    /// Faulting value: bad address, instruction bits, or zero.
    pub tval: usize,
}

impl FaultRecord {
    pub const fn new(cause: TrapCause, epc: usize, tval: usize) -> Self {
        Self { cause, epc, tval }
    }

    /// Cause code with the interrupt bit masked off.
    pub const fn code(&self) -> usize {
        self.cause.code()
    }

    pub const fn is_interrupt(&self) -> bool {
        self.cause.is_interrupt()
    }

    pub fn trap_type(&self) -> TrapType {
        self.cause.to_trap_type()
    }
}

impl fmt::Display for FaultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} code {} ({:?}) mcause={:#x} mepc={:#x} mtval={:#x}",
            if self.is_interrupt() { "interrupt" } else { "exception" },
            self.code(),
            self.trap_type(),
            self.cause.bits(),
            self.epc,
            self.tval
        )
    }
}
