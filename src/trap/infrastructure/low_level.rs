// clic_vectored/src/trap/infrastructure/low_level.rs

//! # Low-Level Trap Hardware Control
//!
//! Direct control over the machine-mode trap CSRs, volatile MMIO access,
//! and the assembly entry point exceptions land on in CLIC vectored mode.
//!
//! [`MachineHart`] only works on a RISC-V hart in machine mode. On any other
//! target it exists so the crate builds for host tests, and every CSR access
//! through it panics. Host code drives the core through
//! [`SimulatedHart`](super::sim::SimulatedHart) instead.

use super::default_handler;
use super::di::traits::{HardwareController, RegisterBus};
use crate::trap::ds::{
    ByteReg, DwordReg, FaultRecord, Handler, TrapCause, TrapMode, TrapVectorState, WordReg,
};
use core::ptr::{read_volatile, write_volatile};
use riscv::register::{mcause, mepc, mhartid, mstatus, mtval};

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
use core::arch::{asm, global_asm};

/// `mtvt`, the CLIC vector table base CSR.
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
const CSR_MTVT: usize = 0x307;

// Exceptions enter here in CLIC vectored mode. mtvec.base needs 64-byte
// alignment, which a Rust function cannot request, so the entry is a stub.
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
global_asm!(
    ".section .text.clic_trap_entry, \"ax\"",
    ".balign 64",
    ".global __clic_trap_entry",
    "__clic_trap_entry:",
    "    j {handler}",
    handler = sym default_trap_handler,
);

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
extern "C" {
    fn __clic_trap_entry();
}

/// Address to program into `mtvec.base`.
pub fn trap_entry_address() -> usize {
    #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
    {
        __clic_trap_entry as Handler as usize
    }
    #[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
    {
        default_trap_handler as Handler as usize
    }
}

/// Fallback target of every unregistered vector and of every exception.
///
/// Captures the fault, reports it, and never returns.
///
/// # Safety
///
/// Only hardware should enter here, as a trap.
#[no_mangle]
pub unsafe extern "C" fn default_trap_handler() {
    let record = default_handler::capture(&MachineHart);
    default_handler::record(record);
    default_handler::report(&record);
    halt()
}

/// Stops this hart for good. Interrupts stay masked, `wfi` only saves power.
pub fn halt() -> ! {
    MachineHart.disable_interrupts();
    loop {
        wait_for_interrupt();
    }
}

/// Idles until an interrupt is pending.
#[inline]
pub fn wait_for_interrupt() {
    #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
    unsafe {
        riscv::asm::wfi();
    }
    #[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
    core::hint::spin_loop();
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
mod csr {
    use super::{asm, CSR_MTVT};

    pub fn write_mtvec(bits: usize) {
        unsafe { asm!("csrw mtvec, {0}", in(reg) bits) }
    }

    pub fn read_mtvec() -> usize {
        let bits: usize;
        unsafe { asm!("csrr {0}, mtvec", out(reg) bits) }
        bits
    }

    pub fn write_mtvt(bits: usize) {
        unsafe { asm!("csrw {csr}, {0}", in(reg) bits, csr = const CSR_MTVT) }
    }

    pub fn read_mtvt() -> usize {
        let bits: usize;
        unsafe { asm!("csrr {0}, {csr}", out(reg) bits, csr = const CSR_MTVT) }
        bits
    }

    /// `csrrsi mstatus, MIE`; returns the old `mstatus`.
    pub fn set_mie() -> usize {
        let old: usize;
        unsafe { asm!("csrrsi {0}, mstatus, 8", out(reg) old) }
        old
    }

    /// `csrrci mstatus, MIE`; returns the old `mstatus`.
    pub fn clear_mie() -> usize {
        let old: usize;
        unsafe { asm!("csrrci {0}, mstatus, 8", out(reg) old) }
        old
    }
}

// No machine-mode CSRs off RISC-V.
#[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
mod csr {
    fn off_target(csr: &str) -> ! {
        panic!("MachineHart accessed {} off RISC-V; use SimulatedHart on the host", csr)
    }

    pub fn write_mtvec(_bits: usize) {
        off_target("mtvec")
    }

    pub fn read_mtvec() -> usize {
        off_target("mtvec")
    }

    pub fn write_mtvt(_bits: usize) {
        off_target("mtvt")
    }

    pub fn read_mtvt() -> usize {
        off_target("mtvt")
    }

    pub fn set_mie() -> usize {
        off_target("mstatus")
    }

    pub fn clear_mie() -> usize {
        off_target("mstatus")
    }
}

/// `mstatus.MIE`
const MSTATUS_MIE: usize = 1 << 3;

/// The hart this code is running on, accessed through real CSRs and MMIO.
///
/// RISC-V machine mode only: off target, CSR access panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachineHart;

impl RegisterBus for MachineHart {
    fn read_byte(&self, reg: ByteReg) -> u8 {
        unsafe { read_volatile(reg.addr() as *const u8) }
    }

    fn write_byte(&self, reg: ByteReg, value: u8) {
        unsafe { write_volatile(reg.addr() as *mut u8, value) }
    }

    fn read_word(&self, reg: WordReg) -> u32 {
        unsafe { read_volatile(reg.addr() as *const u32) }
    }

    fn write_word(&self, reg: WordReg, value: u32) {
        unsafe { write_volatile(reg.addr() as *mut u32, value) }
    }

    #[cfg(target_pointer_width = "64")]
    fn read_dword(&self, reg: DwordReg) -> u64 {
        unsafe { read_volatile(reg.addr() as *const u64) }
    }

    #[cfg(target_pointer_width = "64")]
    fn write_dword(&self, reg: DwordReg, value: u64) {
        unsafe { write_volatile(reg.addr() as *mut u64, value) }
    }

    // RV32 sees a 64-bit counter as two halves. Re-read until the high half
    // did not carry between the two accesses.
    #[cfg(target_pointer_width = "32")]
    fn read_dword(&self, reg: DwordReg) -> u64 {
        let lo_ptr = reg.addr() as *const u32;
        let hi_ptr = (reg.addr() + 4) as *const u32;
        loop {
            unsafe {
                let hi = read_volatile(hi_ptr);
                let lo = read_volatile(lo_ptr);
                if read_volatile(hi_ptr) == hi {
                    return ((hi as u64) << 32) | lo as u64;
                }
            }
        }
    }

    // Park the high half at its maximum first so the compare never
    // matches on a half-written value.
    #[cfg(target_pointer_width = "32")]
    fn write_dword(&self, reg: DwordReg, value: u64) {
        let lo_ptr = reg.addr() as *mut u32;
        let hi_ptr = (reg.addr() + 4) as *mut u32;
        unsafe {
            write_volatile(hi_ptr, u32::MAX);
            write_volatile(lo_ptr, value as u32);
            write_volatile(hi_ptr, (value >> 32) as u32);
        }
    }
}

impl HardwareController for MachineHart {
    fn write_trap_vector(&self, state: TrapVectorState) {
        let was_enabled = self.disable_interrupts();
        // Table base first: once mtvec says vectored, mtvt must already be valid.
        csr::write_mtvt(state.base);
        csr::write_mtvec(state.mtvec());
        if was_enabled {
            self.enable_interrupts();
        }
    }

    fn read_trap_vector(&self) -> TrapVectorState {
        let mtvec = csr::read_mtvec();
        TrapVectorState {
            mode: TrapMode::from_mtvec(mtvec),
            base: csr::read_mtvt(),
            trap_entry: mtvec & !0b11,
        }
    }

    fn enable_interrupts(&self) -> bool {
        csr::set_mie() & MSTATUS_MIE != 0
    }

    fn disable_interrupts(&self) -> bool {
        csr::clear_mie() & MSTATUS_MIE != 0
    }

    fn interrupts_enabled(&self) -> bool {
        mstatus::read().mie()
    }

    fn read_fault(&self) -> FaultRecord {
        FaultRecord::new(
            TrapCause::from_bits(mcause::read().bits()),
            mepc::read(),
            mtval::read(),
        )
    }

    fn hart_id(&self) -> u32 {
        mhartid::read() as u32
    }
}
