// clic_vectored/src/trap/ds/level.rs

//! # Preemption Level / Priority Encoding
//!
//! A `clicintctl` byte is split by `cliccfg.nlbits`: the top `nlbits` bits
//! select the preemption level, the remaining low bits are a priority that
//! only orders interrupts sharing a level. Level bits are read as a fraction
//! of the full byte range with the unused low bits filled with ones:
//!
//! ```text
//! nlbits  encoding  levels
//!   0     ........  255
//!   1     l.......  127, 255
//!   2     ll......  63, 127, 191, 255
//!   3     lll.....  31, 63, 95, 127, 159, 191, 223, 255
//!   4     llll....  15, 31, 47, ... , 239, 255
//! ```
//!
//! Among pending and enabled interrupts the hardware takes the highest
//! level, then the highest priority, then the highest ID.
//!
//! A controller with fewer than eight implemented control bits hardwires the
//! low bits to one, so bytes that differ only there rank the same. With four
//! implemented bits and `nlbits = 0`, `0x85` and `0x81` are both `0x8F`.

use super::address::LineId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEncoding {
    level_bits: u8,
    hardwired: u8,
}

impl LevelEncoding {
    /// One shared level; all eight bits are priority.
    pub const FLAT: Self = Self::new(0);

    /// Encoding for a controller implementing all eight control bits.
    /// Widths above eight behave as eight.
    pub const fn new(level_bits: u8) -> Self {
        Self {
            level_bits: if level_bits > 8 { 8 } else { level_bits },
            hardwired: 0,
        }
    }

    /// The same split on a controller implementing only the top
    /// `intctl_bits` of each control byte.
    pub const fn implemented(self, intctl_bits: u8) -> Self {
        Self {
            level_bits: self.level_bits,
            hardwired: if intctl_bits >= 8 { 0 } else { 0xFF >> intctl_bits },
        }
    }

    pub const fn level_bits(self) -> u8 {
        self.level_bits
    }

    /// The byte the controller holds after `raw` is written.
    pub const fn effective(self, raw: u8) -> u8 {
        raw | self.hardwired
    }

    const fn shift(self) -> u32 {
        8 - self.level_bits as u32
    }

    /// Ones in every bit below the level field.
    const fn fill(self) -> u8 {
        ((1u16 << self.shift()) - 1) as u8
    }

    /// Number of distinct levels.
    pub const fn level_count(self) -> u16 {
        1 << self.level_bits
    }

    /// Effective preemption level of a raw control byte.
    pub const fn level(self, raw: u8) -> u8 {
        (self.effective(raw) & !self.fill()) | self.fill()
    }

    /// Tie-break priority inside the level.
    pub const fn priority(self, raw: u8) -> u8 {
        self.effective(raw) & self.fill()
    }

    /// Raw control byte for level number `index` (0 = lowest) and `priority`.
    /// Out-of-range inputs are truncated to their fields.
    pub const fn encode(self, index: u16, priority: u8) -> u8 {
        let index = index & (self.level_count() - 1);
        ((index << self.shift()) as u8) | (priority & self.fill())
    }

    /// Every representable level, lowest first.
    pub fn boundaries(self) -> impl Iterator<Item = u8> {
        (0..self.level_count()).map(move |index| self.level(self.encode(index, 0)))
    }

    /// Ordering key used by the hardware arbiter; the largest key wins.
    pub const fn arbitration_key(self, raw: u8, line: LineId) -> (u8, u8, u16) {
        (self.level(raw), self.priority(raw), line.raw())
    }

    /// `true` if an interrupt with control byte `candidate` may interrupt a
    /// handler running with control byte `running`.
    pub const fn preempts(self, running: u8, candidate: u8) -> bool {
        self.level(candidate) > self.level(running)
    }
}
