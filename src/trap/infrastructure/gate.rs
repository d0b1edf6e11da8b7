// clic_vectored/src/trap/infrastructure/gate.rs

//! Global enable gate: `mstatus.MIE`. Each toggle is one CSR instruction.

use super::di::traits::HardwareController;

pub struct GlobalGate<'a, H: ?Sized> {
    hw: &'a H,
}

impl<'a, H: HardwareController + ?Sized> GlobalGate<'a, H> {
    pub fn new(hw: &'a H) -> Self {
        Self { hw }
    }

    /// Opens the gate. Returns `true` if it was already open.
    pub fn enable_all(&self) -> bool {
        self.hw.enable_interrupts()
    }

    /// Closes the gate. Returns `true` if it was open.
    pub fn disable_all(&self) -> bool {
        self.hw.disable_interrupts()
    }

    /// Puts the gate back the way `enable_all`/`disable_all` found it.
    pub fn restore(&self, was_open: bool) {
        if was_open {
            self.hw.enable_interrupts();
        } else {
            self.hw.disable_interrupts();
        }
    }

    pub fn is_open(&self) -> bool {
        self.hw.interrupts_enabled()
    }
}
