// clic_vectored/src/trap/infrastructure/default_handler.rs

//! # Default Trap Handler
//!
//! Every exception, and every interrupt whose vector was never overridden,
//! ends here. The policy is fail-fast: decode the cause, keep the diagnostic
//! registers where a debugger can find them, print them, halt. There is no
//! path back to the interrupted context.
//!
//! The hardware entry point is [`default_trap_handler`]; this module holds
//! the steps it runs so the simulator can drive the same code.
//!
//! [`default_trap_handler`]: super::low_level::default_trap_handler

use super::di::traits::HardwareController;
use crate::error_print;
use crate::trap::ds::{FaultRecord, TrapType};
use spin::Mutex;

/// The last fault this hart really took, for inspection from a debugger.
static LAST_FAULT: Mutex<Option<FaultRecord>> = Mutex::new(None);

/// Reads `mcause`, `mepc` and `mtval`.
pub fn capture<H: HardwareController + ?Sized>(hw: &H) -> FaultRecord {
    hw.read_fault()
}

/// Stores `record` as the last fault. Only the hardware entry calls this.
pub(super) fn record(record: FaultRecord) {
    // A fault inside a fault must not spin on the lock.
    if let Some(mut slot) = LAST_FAULT.try_lock() {
        *slot = Some(record);
    }
}

/// Writes the diagnostic dump to the console.
pub fn report(record: &FaultRecord) {
    match record.trap_type() {
        TrapType::Interrupt(id) => error_print!("Unhandled interrupt {} (no vector registered)", id),
        TrapType::Exception(exception) => error_print!("Unhandled exception: {:?}", exception),
        TrapType::Unknown(code) => error_print!("Unknown trap cause {}", code),
    }
    error_print!("  {}", record);
    error_print!("System halted.");
}

/// The most recently captured fault, if any.
pub fn last_fault() -> Option<FaultRecord> {
    *LAST_FAULT.lock()
}
