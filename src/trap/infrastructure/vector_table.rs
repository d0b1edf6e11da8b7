// clic_vectored/src/trap/infrastructure/vector_table.rs

//! # Vector Table
//!
//! The `mtvt` table: one entry point per interrupt ID, read by hardware on
//! every vectored interrupt. Slots are function pointers, so no slot can
//! ever be null; a slot that has not been overridden holds the default trap
//! handler. Writes are volatile because the reader is the hart, not Rust.

use super::low_level::default_trap_handler;
use crate::platform::NUM_INTERRUPTS;
use crate::trap::ds::{ClicError, Handler, HandlerRef, LineId};
use core::ptr::{addr_of, addr_of_mut, read_volatile, write_volatile};

const FALLBACK: Handler = default_trap_handler;

#[repr(C, align(64))]
pub struct VectorTable {
    slots: [Handler; NUM_INTERRUPTS],
}

impl VectorTable {
    /// A table with every slot on the default trap handler.
    pub const fn new() -> Self {
        Self {
            slots: [FALLBACK; NUM_INTERRUPTS],
        }
    }

    /// Points every slot back at the default trap handler.
    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            unsafe { write_volatile(slot, FALLBACK) };
        }
    }

    /// Installs `handler` for line `id`. Does not enable the line.
    pub fn register(&mut self, id: u16, handler: Handler) -> Result<(), ClicError> {
        let line = LineId::new(id)?;
        unsafe { write_volatile(addr_of_mut!(self.slots[line.index()]), handler) };
        Ok(())
    }

    /// What hardware would jump to for `line`.
    pub fn resolve(&self, line: LineId) -> HandlerRef {
        let handler = unsafe { read_volatile(addr_of!(self.slots[line.index()])) };
        if handler as usize == FALLBACK as usize {
            HandlerRef::Default
        } else {
            HandlerRef::Application(handler)
        }
    }

    /// Like [`resolve`](Self::resolve) for a raw ID. Hardware never indexes
    /// past the table, so out-of-range IDs resolve to the default.
    pub fn resolve_id(&self, id: u16) -> HandlerRef {
        match LineId::new(id) {
            Ok(line) => self.resolve(line),
            Err(_) => HandlerRef::Default,
        }
    }

    /// Address to program into `mtvt`.
    pub fn base_address(&self) -> usize {
        self.slots.as_ptr() as usize
    }

    pub const fn len(&self) -> usize {
        NUM_INTERRUPTS
    }

    pub const fn is_empty(&self) -> bool {
        NUM_INTERRUPTS == 0
    }
}

impl Default for VectorTable {
    fn default() -> Self {
        Self::new()
    }
}
