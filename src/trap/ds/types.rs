// clic_vectored/src/trap/ds/types.rs

//! # Trap Type Definitions
//!
//! Machine-mode trap causes as reported by a CLIC hart, the `mtvec` mode
//! encoding, the standard local interrupt IDs, and the trap-vector state
//! written to `mtvec`/`mtvt`.

use core::fmt;

/// Byte alignment required of `mtvt` and of the `mtvec` base in CLIC mode.
pub const VECTOR_ALIGN: usize = 64;

/// Bits of `mcause` that hold the exception or interrupt code.
/// CLIC reuses the bits above for `mpil`/`mpp`/`mpie`.
pub const MCAUSE_CODE_MASK: usize = 0x3FF;

/// The interrupt/exception discriminator, the most significant `mcause` bit.
pub const MCAUSE_INTERRUPT: usize = 1 << (usize::BITS - 1);

/// `mtvec.mode` as seen by a CLIC hart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrapMode {
    /// Every trap enters at `mtvec.base`; software decodes `mcause`.
    Direct,
    /// Interrupts jump through the `mtvt` table; exceptions enter at `mtvec.base`.
    Vectored,
}

impl TrapMode {
    /// The two-bit `mtvec.mode` field for CLIC operation.
    pub const fn mtvec_bits(self) -> usize {
        match self {
            TrapMode::Direct => 0b10,
            TrapMode::Vectored => 0b11,
        }
    }

    /// Decodes `mtvec.mode`. CLINT-style encodings read back as `Direct`.
    pub const fn from_mtvec(mtvec: usize) -> Self {
        if mtvec & 0b11 == 0b11 {
            TrapMode::Vectored
        } else {
            TrapMode::Direct
        }
    }
}

/// What `mtvec` and `mtvt` hold. Always written as one unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TrapVectorState {
    pub mode: TrapMode,
    /// `mtvt`: address of the vector table.
    pub base: usize,
    /// `mtvec.base`: where exceptions (and direct-mode traps) enter.
    pub trap_entry: usize,
}

impl TrapVectorState {
    /// Value of the CSRs before anything was armed.
    pub const RESET: Self = Self {
        mode: TrapMode::Direct,
        base: 0,
        trap_entry: 0,
    };

    /// The raw value to write into `mtvec`.
    pub const fn mtvec(&self) -> usize {
        (self.trap_entry & !(VECTOR_ALIGN - 1)) | self.mode.mtvec_bits()
    }
}

/// The standard local interrupts every CLIC hart has.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u16)]
pub enum Interrupt {
    MachineSoft = 3,
    MachineTimer = 7,
    MachineExternal = 11,
    ClicSoft = 12,
}

/// First ID of the board-wired local external lines.
pub const FIRST_LOCAL_INTERRUPT: u16 = 16;

impl Interrupt {
    pub const fn id(self) -> u16 {
        self as u16
    }

    pub const fn from_id(id: u16) -> Option<Self> {
        match id {
            3 => Some(Interrupt::MachineSoft),
            7 => Some(Interrupt::MachineTimer),
            11 => Some(Interrupt::MachineExternal),
            12 => Some(Interrupt::ClicSoft),
            _ => None,
        }
    }
}

/// ID of local external interrupt `n` (`lc{n}`).
pub const fn local_interrupt(n: u16) -> u16 {
    FIRST_LOCAL_INTERRUPT + n
}

/// Machine-mode synchronous exceptions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(usize)]
pub enum Exception {
    InstructionMisaligned = 0,
    InstructionFault = 1,
    IllegalInstruction = 2,
    Breakpoint = 3,
    LoadMisaligned = 4,
    LoadFault = 5,
    StoreMisaligned = 6,
    StoreFault = 7,
    UserEnvCall = 8,
    SupervisorEnvCall = 9,
    MachineEnvCall = 11,
    InstructionPageFault = 12,
    LoadPageFault = 13,
    StorePageFault = 15,
}

impl Exception {
    pub const fn from_code(code: usize) -> Option<Self> {
        Some(match code {
            0 => Exception::InstructionMisaligned,
            1 => Exception::InstructionFault,
            2 => Exception::IllegalInstruction,
            3 => Exception::Breakpoint,
            4 => Exception::LoadMisaligned,
            5 => Exception::LoadFault,
            6 => Exception::StoreMisaligned,
            7 => Exception::StoreFault,
            8 => Exception::UserEnvCall,
            9 => Exception::SupervisorEnvCall,
            11 => Exception::MachineEnvCall,
            12 => Exception::InstructionPageFault,
            13 => Exception::LoadPageFault,
            15 => Exception::StorePageFault,
            _ => return None,
        })
    }
}

/// A decoded trap.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrapType {
    /// An interrupt with its CLIC ID.
    Interrupt(u16),
    Exception(Exception),
    /// An exception code the architecture does not define.
    Unknown(usize),
}

/// A wrapper for the `mcause` register.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct TrapCause {
    bits: usize,
}

impl TrapCause {
    pub const fn from_bits(bits: usize) -> Self {
        Self { bits }
    }

    /// `mcause` as hardware reports it for interrupt `id`.
    pub const fn interrupt(id: u16) -> Self {
        Self::from_bits(MCAUSE_INTERRUPT | id as usize)
    }

    /// `mcause` as hardware reports it for an exception code.
    pub const fn exception(code: usize) -> Self {
        Self::from_bits(code & MCAUSE_CODE_MASK)
    }

    pub const fn bits(&self) -> usize {
        self.bits
    }

    pub const fn is_interrupt(&self) -> bool {
        self.bits & MCAUSE_INTERRUPT != 0
    }

    /// The low-order cause code with the discriminator and CLIC status bits
    /// masked off.
    pub const fn code(&self) -> usize {
        self.bits & MCAUSE_CODE_MASK
    }

    pub fn to_trap_type(&self) -> TrapType {
        if self.is_interrupt() {
            TrapType::Interrupt(self.code() as u16)
        } else {
            match Exception::from_code(self.code()) {
                Some(exception) => TrapType::Exception(exception),
                None => TrapType::Unknown(self.code()),
            }
        }
    }
}

impl fmt::Debug for TrapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrapCause::{:?} (code: {}, raw: {:#x})",
            self.to_trap_type(),
            self.code(),
            self.bits()
        )
    }
}
