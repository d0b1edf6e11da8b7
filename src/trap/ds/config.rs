// clic_vectored/src/trap/ds/config.rs

//! Controller-wide configuration, the `cliccfg` byte.
//!
//! ```text
//! bit   7  6 5    4 3 2 1   0
//!       -  nmbits nlbits    nvbits
//! ```

use super::error::ClicError;
use super::level::LevelEncoding;

/// Largest `nlbits` the controller accepts.
pub const MAX_LEVEL_BITS: u8 = 4;
/// Largest `nmbits` the controller accepts.
pub const MAX_PRIVILEGE_BITS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerConfig {
    /// `nvbits`: honour per-line selective hardware vectoring.
    pub selective_vectoring: bool,
    /// `nlbits`: control bits that select the preemption level.
    pub level_bits: u8,
    /// `nmbits`: control bits that select the privilege mode.
    pub privilege_bits: u8,
}

impl ControllerConfig {
    /// Single preemption level of 255, machine mode only, no selective vectoring.
    pub const FLAT: Self = Self::new(false, 0, 0);

    pub const fn new(selective_vectoring: bool, level_bits: u8, privilege_bits: u8) -> Self {
        Self {
            selective_vectoring,
            level_bits,
            privilege_bits,
        }
    }

    /// Checks the configuration against a controller with `intctl_bits`
    /// implemented control bits.
    pub fn validate(&self, intctl_bits: u8) -> Result<(), ClicError> {
        if self.level_bits > MAX_LEVEL_BITS {
            return Err(ClicError::LevelBitsOutOfRange(self.level_bits));
        }
        if self.privilege_bits > MAX_PRIVILEGE_BITS {
            return Err(ClicError::PrivilegeBitsOutOfRange(self.privilege_bits));
        }
        if self.level_bits + self.privilege_bits > intctl_bits {
            return Err(ClicError::ConfigWidthExceeded {
                level_bits: self.level_bits,
                privilege_bits: self.privilege_bits,
                available: intctl_bits,
            });
        }
        Ok(())
    }

    pub const fn to_cliccfg(&self) -> u8 {
        (self.selective_vectoring as u8)
            | ((self.level_bits & 0xF) << 1)
            | ((self.privilege_bits & 0x3) << 5)
    }

    pub const fn from_cliccfg(raw: u8) -> Self {
        Self {
            selective_vectoring: raw & 1 != 0,
            level_bits: (raw >> 1) & 0xF,
            privilege_bits: (raw >> 5) & 0x3,
        }
    }

    /// How control bytes are interpreted under this configuration.
    pub const fn encoding(&self) -> LevelEncoding {
        LevelEncoding::new(self.level_bits)
    }
}
