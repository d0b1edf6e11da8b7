// clic_vectored/src/trap/ds/address.rs

//! # Register Address Model
//!
//! Pure address arithmetic for one hart's view of the CLIC. Every register
//! comes back as an address type that names its access width, so a byte-wide
//! `clicintie` entry can never be written as a word by accident.

use super::error::ClicError;
use crate::platform::{Platform, NUM_INTERRUPTS};

macro_rules! register_address {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            pub const fn new(addr: usize) -> Self {
                Self(addr)
            }

            pub const fn addr(self) -> usize {
                self.0
            }
        }
    };
}

register_address!(
    /// Address of an 8-bit register.
    ByteReg
);
register_address!(
    /// Address of a 32-bit register.
    WordReg
);
register_address!(
    /// Address of a 64-bit register.
    DwordReg
);

/// An interrupt ID known to be below [`NUM_INTERRUPTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(u16);

impl LineId {
    pub const FIRST: LineId = LineId(0);

    pub const fn new(raw: u16) -> Result<Self, ClicError> {
        if (raw as usize) < NUM_INTERRUPTS {
            Ok(Self(raw))
        } else {
            Err(ClicError::LineOutOfRange(raw))
        }
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every valid line, lowest ID first.
    pub fn all() -> impl Iterator<Item = LineId> {
        (0..NUM_INTERRUPTS as u16).map(LineId)
    }
}

/// The hart whose registers are being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HartContext {
    pub hart_id: u32,
}

impl HartContext {
    pub const fn new(hart_id: u32) -> Self {
        Self { hart_id }
    }
}

/// Register addresses of one hart on one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClicLayout {
    platform: Platform,
    hart: HartContext,
}

impl ClicLayout {
    pub const fn new(platform: Platform, hart: HartContext) -> Self {
        Self { platform, hart }
    }

    pub const fn platform(&self) -> &Platform {
        &self.platform
    }

    pub const fn hart(&self) -> HartContext {
        self.hart
    }

    const fn hart_index(&self) -> usize {
        self.hart.hart_id as usize
    }

    const fn hart_region(&self) -> usize {
        self.platform.clic_base
            + self.platform.hart0_clic_offset
            + self.hart_index() * self.platform.clic_hart_stride
    }

    /// `clicintip[line]`
    pub const fn pending(&self, line: LineId) -> ByteReg {
        ByteReg(self.hart_region() + self.platform.intip_offset + line.index())
    }

    /// `clicintie[line]`
    pub const fn enable(&self, line: LineId) -> ByteReg {
        ByteReg(self.hart_region() + self.platform.intie_offset + line.index())
    }

    /// `clicintctl[line]`
    pub const fn control(&self, line: LineId) -> ByteReg {
        ByteReg(self.hart_region() + self.platform.intctl_offset + line.index())
    }

    /// `cliccfg`
    pub const fn config(&self) -> ByteReg {
        ByteReg(self.hart_region() + self.platform.cfg_offset)
    }

    /// This hart's machine software interrupt pending word.
    pub const fn msip(&self) -> WordReg {
        WordReg(
            self.platform.clic_base
                + self.platform.msip_offset
                + self.hart_index() * self.platform.msip_stride,
        )
    }

    /// This hart's timer compare register.
    pub const fn mtimecmp(&self) -> DwordReg {
        DwordReg(
            self.platform.clic_base
                + self.platform.mtimecmp_offset
                + self.hart_index() * self.platform.mtimecmp_stride,
        )
    }

    /// The shared `mtime` counter.
    pub const fn mtime(&self) -> DwordReg {
        DwordReg(self.platform.clic_base + self.platform.mtime_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ARTY_E21;

    fn line(id: u16) -> LineId {
        LineId::new(id).unwrap()
    }

    #[test]
    fn hart0_line_registers_are_byte_contiguous() {
        let layout = ClicLayout::new(ARTY_E21, HartContext::new(0));
        assert_eq!(layout.pending(line(0)).addr(), 0x0280_0000);
        assert_eq!(layout.pending(line(7)).addr(), 0x0280_0007);
        assert_eq!(layout.enable(line(16)).addr(), 0x0280_0410);
        assert_eq!(layout.control(line(47)).addr(), 0x0280_082F);
        assert_eq!(layout.config().addr(), 0x0280_0C00);
    }

    #[test]
    fn per_hart_registers_follow_strides() {
        let hart0 = ClicLayout::new(ARTY_E21, HartContext::new(0));
        let hart2 = ClicLayout::new(ARTY_E21, HartContext::new(2));
        assert_eq!(hart0.msip().addr(), 0x0200_0000);
        assert_eq!(hart2.msip().addr(), 0x0200_0008);
        assert_eq!(hart0.mtimecmp().addr(), 0x0200_4000);
        assert_eq!(hart2.mtimecmp().addr(), 0x0200_4010);
        assert_eq!(hart2.mtime(), hart0.mtime());
        assert_eq!(hart0.mtime().addr(), 0x0200_BFF8);
        assert_eq!(
            hart2.enable(line(3)).addr() - hart0.enable(line(3)).addr(),
            2 * ARTY_E21.clic_hart_stride
        );
    }

    #[test]
    fn line_ids_are_range_checked() {
        assert!(LineId::new(0).is_ok());
        assert!(LineId::new(NUM_INTERRUPTS as u16 - 1).is_ok());
        assert_eq!(
            LineId::new(NUM_INTERRUPTS as u16),
            Err(ClicError::LineOutOfRange(NUM_INTERRUPTS as u16))
        );
        assert_eq!(LineId::all().count(), NUM_INTERRUPTS);
    }
}
