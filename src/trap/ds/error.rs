// clic_vectored/src/trap/ds/error.rs

//! # Configuration Errors
//!
//! Every way a caller can misconfigure the interrupt core. All of them are
//! detected before any register is written; hardware faults are not errors
//! in this sense and go to the default trap handler instead.

use super::types::TrapMode;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClicError {
    /// The line ID is not below the platform's interrupt count.
    LineOutOfRange(u16),
    /// A vector table or trap entry address is not 64-byte aligned.
    MisalignedBase(usize),
    /// More preemption-level bits than the controller supports.
    LevelBitsOutOfRange(u8),
    /// More privilege-mode bits than the controller supports.
    PrivilegeBitsOutOfRange(u8),
    /// Level plus privilege bits do not fit in the implemented `clicintctl` bits.
    ConfigWidthExceeded {
        level_bits: u8,
        privilege_bits: u8,
        available: u8,
    },
    /// Only CLIC vectored mode is supported.
    UnsupportedMode(TrapMode),
    /// The vector table cannot be changed while the global gate is open.
    InterruptsEnabled,
    AlreadyInitialized,
    NotInitialized,
}

impl fmt::Display for ClicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineOutOfRange(id) => write!(f, "interrupt line {} is out of range", id),
            Self::MisalignedBase(addr) => {
                write!(f, "address {:#x} is not aligned for vectored dispatch", addr)
            }
            Self::LevelBitsOutOfRange(bits) => write!(f, "{} level bits is not supported", bits),
            Self::PrivilegeBitsOutOfRange(bits) => {
                write!(f, "{} privilege-mode bits is not supported", bits)
            }
            Self::ConfigWidthExceeded {
                level_bits,
                privilege_bits,
                available,
            } => write!(
                f,
                "{} level + {} privilege bits exceed the {} implemented control bits",
                level_bits, privilege_bits, available
            ),
            Self::UnsupportedMode(mode) => write!(f, "trap mode {:?} is not supported", mode),
            Self::InterruptsEnabled => {
                write!(f, "vector table changes require interrupts to be disabled")
            }
            Self::AlreadyInitialized => write!(f, "interrupt core is already initialized"),
            Self::NotInitialized => write!(f, "interrupt core has not been initialized"),
        }
    }
}
