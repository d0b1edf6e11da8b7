// clic_vectored/src/platform.rs

//! # Platform Description
//!
//! Build-time constants describing the target: where the CLIC and its
//! timer/software-interrupt block live, how per-hart registers are strided,
//! how many interrupt lines the vector table must cover, and the timer clock.
//! The interrupt core consumes these values as given; it only range-checks
//! line IDs against [`NUM_INTERRUPTS`].

/// Number of interrupt IDs the CLIC implements (`CLICINTNUM`).
///
/// IDs 0..16 are the standard local interrupts (software, timer, external,
/// CLIC software), 16..48 are the local external lines wired to board I/O.
pub const NUM_INTERRUPTS: usize = 48;

/// Register map and clocking of one CLIC-based platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Base of the CLIC MMIO block.
    pub clic_base: usize,
    /// Offset of the MSIP word array from `clic_base`.
    pub msip_offset: usize,
    /// Bytes between consecutive harts' MSIP words.
    pub msip_stride: usize,
    /// Offset of the `mtimecmp` array from `clic_base`.
    pub mtimecmp_offset: usize,
    /// Bytes between consecutive harts' `mtimecmp` doublewords.
    pub mtimecmp_stride: usize,
    /// Offset of the shared `mtime` counter from `clic_base`.
    pub mtime_offset: usize,
    /// Offset of hart 0's CLIC region from `clic_base`.
    pub hart0_clic_offset: usize,
    /// Bytes between consecutive harts' CLIC regions.
    pub clic_hart_stride: usize,
    /// `clicintip` array offset inside a hart region.
    pub intip_offset: usize,
    /// `clicintie` array offset inside a hart region.
    pub intie_offset: usize,
    /// `clicintctl` array offset inside a hart region.
    pub intctl_offset: usize,
    /// `cliccfg` byte offset inside a hart region.
    pub cfg_offset: usize,
    /// Implemented bits of each `clicintctl` byte (`CLICINTCTLBITS`).
    pub intctl_bits: u8,
    /// `mtime` tick frequency in Hz.
    pub rtc_freq: u64,
    /// SiFive UART0 base, used by the board console.
    pub uart0_base: usize,
}

/// SiFive E21 core on the Arty A7 board (`sifive,clic0`).
pub const ARTY_E21: Platform = Platform {
    clic_base: 0x0200_0000,
    msip_offset: 0x0000,
    msip_stride: 0x4,
    mtimecmp_offset: 0x4000,
    mtimecmp_stride: 0x8,
    mtime_offset: 0xBFF8,
    hart0_clic_offset: 0x0080_0000,
    clic_hart_stride: 0x1000,
    intip_offset: 0x000,
    intie_offset: 0x400,
    intctl_offset: 0x800,
    cfg_offset: 0xC00,
    intctl_bits: 4,
    rtc_freq: 32_768,
    uart0_base: 0x2000_0000,
};

