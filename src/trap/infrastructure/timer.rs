// clic_vectored/src/trap/infrastructure/timer.rs

//! Per-hart machine timer and software interrupt registers.

use super::di::traits::RegisterBus;
use crate::trap::ds::ClicLayout;

/// Converts milliseconds to `mtime` ticks at `rtc_freq` Hz.
pub const fn ms_to_ticks(ms: u64, rtc_freq: u64) -> u64 {
    ms.saturating_mul(rtc_freq) / 1000
}

pub struct Timer<'a, B: ?Sized> {
    layout: &'a ClicLayout,
    bus: &'a B,
}

impl<'a, B: RegisterBus + ?Sized> Timer<'a, B> {
    pub fn new(layout: &'a ClicLayout, bus: &'a B) -> Self {
        Self { layout, bus }
    }

    pub fn now(&self) -> u64 {
        self.bus.read_dword(self.layout.mtime())
    }

    /// Sets this hart's compare register `ms` milliseconds past the current
    /// time and returns the deadline in ticks.
    pub fn arm_ms(&self, ms: u32) -> u64 {
        let ticks = ms_to_ticks(ms as u64, self.layout.platform().rtc_freq);
        let deadline = self.now().wrapping_add(ticks);
        self.bus.write_dword(self.layout.mtimecmp(), deadline);
        deadline
    }

    pub fn deadline(&self) -> u64 {
        self.bus.read_dword(self.layout.mtimecmp())
    }

    /// Parks the compare register at the end of time.
    pub fn disarm(&self) {
        self.bus.write_dword(self.layout.mtimecmp(), u64::MAX);
    }

    /// Sets this hart's MSIP bit, pending interrupt 3.
    pub fn raise_software(&self) {
        self.bus.write_word(self.layout.msip(), 1);
    }

    pub fn clear_software(&self) {
        self.bus.write_word(self.layout.msip(), 0);
    }

    pub fn software_pending(&self) -> bool {
        self.bus.read_word(self.layout.msip()) & 1 != 0
    }
}
