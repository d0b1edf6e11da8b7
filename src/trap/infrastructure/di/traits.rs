// clic_vectored/src/trap/infrastructure/di/traits.rs

//! # Hardware Seams
//!
//! The interrupt core talks to the hart only through these two traits: one
//! for the memory-mapped CLIC registers, one for the machine-mode CSRs. The
//! real hart implements both with volatile accesses and CSR instructions;
//! the simulator implements them with an in-memory register file.

use crate::trap::ds::{ByteReg, DwordReg, FaultRecord, TrapVectorState, WordReg};

/// Width-typed access to memory-mapped registers.
///
/// Every read goes to the device; implementations keep no cache.
pub trait RegisterBus {
    fn read_byte(&self, reg: ByteReg) -> u8;
    fn write_byte(&self, reg: ByteReg, value: u8);
    fn read_word(&self, reg: WordReg) -> u32;
    fn write_word(&self, reg: WordReg, value: u32);
    fn read_dword(&self, reg: DwordReg) -> u64;
    fn write_dword(&self, reg: DwordReg, value: u64);
}

/// Machine-mode trap CSRs of the current hart.
pub trait HardwareController {
    /// Writes `mtvt` and `mtvec` so that no trap can observe one without the other.
    fn write_trap_vector(&self, state: TrapVectorState);

    /// Reads `mtvt` and `mtvec` back.
    fn read_trap_vector(&self) -> TrapVectorState;

    /// Sets `mstatus.MIE`. Returns `true` if it was already set.
    fn enable_interrupts(&self) -> bool;

    /// Clears `mstatus.MIE`. Returns `true` if it was set before.
    fn disable_interrupts(&self) -> bool;

    fn interrupts_enabled(&self) -> bool;

    /// Reads `mcause`, `mepc` and `mtval`.
    fn read_fault(&self) -> FaultRecord;

    /// `mhartid`
    fn hart_id(&self) -> u32;
}

/// Everything the controller container needs from a hart.
pub trait Hart: RegisterBus + HardwareController {}

impl<T: RegisterBus + HardwareController> Hart for T {}
