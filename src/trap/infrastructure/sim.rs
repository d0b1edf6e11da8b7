// clic_vectored/src/trap/infrastructure/sim.rs

//! # Simulated Hart
//!
//! An in-memory register file behind the same two hardware traits the real
//! hart implements, plus a model of the hardware side of dispatch: the
//! arbiter that picks the next line, and the jump through `mtvt` (or into
//! the default trap handler). Host unit tests and the on-target self-test
//! both drive the core through it.
//!
//! Modelled behaviour:
//! - `clicintip[3]` mirrors MSIP and `clicintip[7]` is `mtime >= mtimecmp`;
//!   writes to either pending byte are ignored.
//! - Every other pending byte is writable; [`SimulatedHart::assert_line`]
//!   stands in for a device raising its line.
//! - Control bytes keep their implemented high bits; the low
//!   `8 - intctl_bits` bits read as ones.
//! - Addresses outside the layout read as zero and drop writes.

use super::default_handler;
use super::di::container::Clic;
use super::di::traits::{HardwareController, RegisterBus};
use super::vector_table::VectorTable;
use crate::platform::{Platform, NUM_INTERRUPTS};
use crate::trap::ds::{
    ByteReg, ClicLayout, DwordReg, FaultRecord, Handler, HandlerRef, HartContext, Interrupt,
    LevelEncoding, LineId, TrapCause, TrapMode, TrapVectorState, WordReg,
};
use core::cell::Cell;

/// `mtvec.base` the simulator is armed with. It is never executed.
pub const SIM_TRAP_ENTRY: usize = 0x2040_0040;

/// `mepc` reported for interrupts taken from the foreground.
pub const SIM_FOREGROUND_PC: usize = 0x2040_1000;

pub struct SimulatedHart {
    layout: ClicLayout,
    intip: [Cell<u8>; NUM_INTERRUPTS],
    intie: [Cell<u8>; NUM_INTERRUPTS],
    intctl: [Cell<u8>; NUM_INTERRUPTS],
    cliccfg: Cell<u8>,
    msip: Cell<u32>,
    mtime: Cell<u64>,
    mtimecmp: Cell<u64>,
    mie: Cell<bool>,
    trap_vector: Cell<TrapVectorState>,
    fault: Cell<FaultRecord>,
    halted: Cell<Option<FaultRecord>>,
    csr_writes: Cell<usize>,
}

impl SimulatedHart {
    /// A hart in its reset state: everything zero, timer compare parked at
    /// the end of time, gate closed, direct mode.
    pub fn new(platform: Platform, hart: HartContext) -> Self {
        Self {
            layout: ClicLayout::new(platform, hart),
            intip: core::array::from_fn(|_| Cell::new(0)),
            intie: core::array::from_fn(|_| Cell::new(0)),
            intctl: core::array::from_fn(|_| Cell::new(0)),
            cliccfg: Cell::new(0),
            msip: Cell::new(0),
            mtime: Cell::new(0),
            mtimecmp: Cell::new(u64::MAX),
            mie: Cell::new(false),
            trap_vector: Cell::new(TrapVectorState::RESET),
            fault: Cell::new(FaultRecord::new(TrapCause::from_bits(0), 0, 0)),
            halted: Cell::new(None),
            csr_writes: Cell::new(0),
        }
    }

    pub fn layout(&self) -> &ClicLayout {
        &self.layout
    }

    /// A device raises line `id`.
    pub fn assert_line(&self, id: u16) {
        if let Some(slot) = self.writable_pending(id) {
            slot.set(1);
        }
    }

    /// A device drops line `id`.
    pub fn deassert_line(&self, id: u16) {
        if let Some(slot) = self.writable_pending(id) {
            slot.set(0);
        }
    }

    /// Lets `ticks` of the real-time clock pass.
    pub fn advance(&self, ticks: u64) {
        self.mtime.set(self.mtime.get().wrapping_add(ticks));
    }

    /// Number of trap-vector CSR updates so far.
    pub fn csr_writes(&self) -> usize {
        self.csr_writes.get()
    }

    /// The fault that stopped the hart, once the default handler has run.
    pub fn halted(&self) -> Option<FaultRecord> {
        self.halted.get()
    }

    fn writable_pending(&self, id: u16) -> Option<&Cell<u8>> {
        match id {
            id if id == Interrupt::MachineSoft.id() || id == Interrupt::MachineTimer.id() => None,
            _ => self.intip.get(id as usize),
        }
    }

    fn pending_bit(&self, index: usize) -> u8 {
        if index == Interrupt::MachineSoft.id() as usize {
            (self.msip.get() & 1) as u8
        } else if index == Interrupt::MachineTimer.id() as usize {
            (self.mtime.get() >= self.mtimecmp.get()) as u8
        } else {
            self.intip[index].get()
        }
    }

    /// Which line array `addr` falls in, and the index inside it.
    fn decode(&self, addr: usize) -> Option<(LineArray, usize)> {
        let arrays = [
            (LineArray::Pending, self.layout.pending(LineId::FIRST).addr()),
            (LineArray::Enable, self.layout.enable(LineId::FIRST).addr()),
            (LineArray::Control, self.layout.control(LineId::FIRST).addr()),
        ];
        arrays.into_iter().find_map(|(array, base)| {
            let index = addr.checked_sub(base)?;
            (index < NUM_INTERRUPTS).then_some((array, index))
        })
    }

    fn trap(&self, cause: TrapCause, epc: usize, tval: usize) {
        self.fault.set(FaultRecord::new(cause, epc, tval));
        // Trap entry clears MIE; the handler's mret would set it again.
        self.mie.set(false);
    }

    // Reports like the default handler but keeps the record on this hart;
    // the global last-fault slot belongs to real traps.
    fn halt(&self) -> FaultRecord {
        let record = default_handler::capture(self);
        default_handler::report(&record);
        self.halted.set(Some(record));
        record
    }
}

#[derive(Clone, Copy)]
enum LineArray {
    Pending,
    Enable,
    Control,
}

impl RegisterBus for SimulatedHart {
    fn read_byte(&self, reg: ByteReg) -> u8 {
        if reg == self.layout.config() {
            return self.cliccfg.get();
        }
        match self.decode(reg.addr()) {
            Some((LineArray::Pending, index)) => self.pending_bit(index),
            Some((LineArray::Enable, index)) => self.intie[index].get(),
            Some((LineArray::Control, index)) => self.intctl[index].get(),
            None => 0,
        }
    }

    fn write_byte(&self, reg: ByteReg, value: u8) {
        if reg == self.layout.config() {
            // Bit 7 is reserved.
            self.cliccfg.set(value & 0x7F);
            return;
        }
        match self.decode(reg.addr()) {
            Some((LineArray::Pending, index)) => {
                if let Some(slot) = self.writable_pending(index as u16) {
                    slot.set(value & 1);
                }
            }
            Some((LineArray::Enable, index)) => self.intie[index].set(value & 1),
            Some((LineArray::Control, index)) => {
                let width = self.layout.platform().intctl_bits;
                let implemented = LevelEncoding::FLAT.implemented(width);
                self.intctl[index].set(implemented.effective(value));
            }
            None => {}
        }
    }

    fn read_word(&self, reg: WordReg) -> u32 {
        if reg == self.layout.msip() {
            self.msip.get()
        } else {
            0
        }
    }

    fn write_word(&self, reg: WordReg, value: u32) {
        if reg == self.layout.msip() {
            self.msip.set(value & 1);
        }
    }

    fn read_dword(&self, reg: DwordReg) -> u64 {
        if reg == self.layout.mtime() {
            self.mtime.get()
        } else if reg == self.layout.mtimecmp() {
            self.mtimecmp.get()
        } else {
            0
        }
    }

    fn write_dword(&self, reg: DwordReg, value: u64) {
        if reg == self.layout.mtime() {
            self.mtime.set(value);
        } else if reg == self.layout.mtimecmp() {
            self.mtimecmp.set(value);
        }
    }
}

impl HardwareController for SimulatedHart {
    fn write_trap_vector(&self, state: TrapVectorState) {
        self.trap_vector.set(state);
        self.csr_writes.set(self.csr_writes.get() + 1);
    }

    fn read_trap_vector(&self) -> TrapVectorState {
        self.trap_vector.get()
    }

    fn enable_interrupts(&self) -> bool {
        self.mie.replace(true)
    }

    fn disable_interrupts(&self) -> bool {
        self.mie.replace(false)
    }

    fn interrupts_enabled(&self) -> bool {
        self.mie.get()
    }

    fn read_fault(&self) -> FaultRecord {
        self.fault.get()
    }

    fn hart_id(&self) -> u32 {
        self.layout.hart().hart_id
    }
}

/// Where the simulated hart went after a trap or an arbitration round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Jumped through `mtvt` into an application handler.
    Handler { line: u16, handler: HandlerRef },
    /// Entered the default trap handler, which halted the hart.
    Halted(FaultRecord),
    /// Something is pending but the gate or the running level holds it back.
    Masked,
    /// Nothing is pending and enabled.
    Idle,
}

impl Dispatch {
    /// The application handler jumped to, if any.
    pub fn handler(&self) -> Option<Handler> {
        match self {
            Dispatch::Handler {
                handler: HandlerRef::Application(handler),
                ..
            } => Some(*handler),
            _ => None,
        }
    }
}

/// A controller for hart 0 of `platform` over a fresh simulated hart.
pub fn simulated_clic(platform: Platform, table: &mut VectorTable) -> Clic<'_, SimulatedHart> {
    let hart = HartContext::new(0);
    Clic::new(platform, hart, SimulatedHart::new(platform, hart), table)
}

impl<'t> Clic<'t, SimulatedHart> {
    /// The hardware takes interrupt `id` from the foreground: the gate must
    /// be open and the line enabled. Control then goes wherever `mtvt[id]`
    /// points; a default slot halts the hart.
    pub fn deliver(&self, id: u16) -> Dispatch {
        let hw = self.hardware();
        if let Some(record) = hw.halted() {
            return Dispatch::Halted(record);
        }
        if !hw.interrupts_enabled() || !self.lines().is_enabled(id).unwrap_or(false) {
            return Dispatch::Masked;
        }

        hw.trap(TrapCause::interrupt(id), SIM_FOREGROUND_PC, 0);
        let state = hw.read_trap_vector();
        if state.mode != TrapMode::Vectored || state.base != self.vectors().table().base_address() {
            return Dispatch::Halted(hw.halt());
        }
        match self.resolve(id) {
            HandlerRef::Default => Dispatch::Halted(hw.halt()),
            handler => Dispatch::Handler { line: id, handler },
        }
    }

    /// A synchronous exception at `epc`. Exceptions ignore the gate and
    /// always enter at `mtvec.base`, which is the default trap handler.
    pub fn deliver_exception(&self, code: usize, epc: usize, tval: usize) -> Dispatch {
        let hw = self.hardware();
        if let Some(record) = hw.halted() {
            return Dispatch::Halted(record);
        }
        hw.trap(TrapCause::exception(code), epc, tval);
        Dispatch::Halted(hw.halt())
    }

    /// One arbitration round. `running` is the control byte of the handler
    /// currently executing, or `None` from the foreground. The winning line
    /// is taken only if it may preempt what is running.
    pub fn dispatch_next(&self, running: Option<u8>) -> Dispatch {
        let lines = self.lines();
        let Some(line) = lines.highest_pending() else {
            return Dispatch::Idle;
        };
        if let Some(running) = running {
            let candidate = self.hardware().read_byte(self.layout().control(line));
            if !lines.encoding().preempts(running, candidate) {
                return Dispatch::Masked;
            }
        }
        self.deliver(line.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ARTY_E21;
    use crate::trap::ds::{
        local_interrupt, ClicError, ControllerConfig, Exception, LevelEncoding, LineSetup, Setup,
        TrapType,
    };
    use core::sync::atomic::{AtomicUsize, Ordering};

    static TIMER_HITS: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn on_timer() {
        TIMER_HITS.fetch_add(1, Ordering::Relaxed);
    }

    extern "C" fn on_button() {}

    extern "C" fn on_other() {}

    fn started(table: &mut VectorTable) -> Clic<'_, SimulatedHart> {
        let mut clic = simulated_clic(ARTY_E21, table);
        clic.start(SIM_TRAP_ENTRY).unwrap();
        clic
    }

    #[test]
    fn registered_timer_handler_is_dispatched() {
        let mut table = VectorTable::new();
        let mut clic = started(&mut table);

        clic.lines().configure(ControllerConfig::FLAT).unwrap();
        clic.register_handler(7, on_timer).unwrap();
        clic.lines().enable(7).unwrap();
        clic.gate().enable_all();

        let dispatch = clic.deliver(7);
        assert_eq!(
            dispatch,
            Dispatch::Handler {
                line: 7,
                handler: HandlerRef::Application(on_timer)
            }
        );
        let before = TIMER_HITS.load(Ordering::Relaxed);
        unsafe { dispatch.handler().unwrap()() };
        assert_eq!(TIMER_HITS.load(Ordering::Relaxed), before + 1);
        assert!(clic.hardware().halted().is_none());
    }

    #[test]
    fn illegal_instruction_halts_in_default_handler() {
        let mut table = VectorTable::new();
        let clic = started(&mut table);

        let dispatch = clic.deliver_exception(0x02, 0x2040_0200, 0xDEAD_BEEF);
        let Dispatch::Halted(record) = dispatch else {
            panic!("expected halt, got {:?}", dispatch);
        };
        assert_eq!(record.code(), 0x02);
        assert!(!record.is_interrupt());
        assert_eq!(record.epc, 0x2040_0200);
        assert_eq!(record.tval, 0xDEAD_BEEF);
        assert_eq!(
            record.trap_type(),
            TrapType::Exception(Exception::IllegalInstruction)
        );

        // A halted hart takes nothing else.
        assert_eq!(clic.hardware().halted(), Some(record));
        clic.gate().enable_all();
        assert_eq!(clic.deliver(7), Dispatch::Halted(record));
    }

    #[test]
    fn unregistered_vector_halts_with_interrupt_cause() {
        let mut table = VectorTable::new();
        let clic = started(&mut table);
        let id = local_interrupt(4);
        clic.lines().enable(id).unwrap();
        clic.gate().enable_all();

        let Dispatch::Halted(record) = clic.deliver(id) else {
            panic!("expected halt");
        };
        assert!(record.is_interrupt());
        assert_eq!(record.code(), id as usize);
        assert_eq!(record.epc, SIM_FOREGROUND_PC);
    }

    #[test]
    fn closed_gate_or_disabled_line_masks_delivery() {
        let mut table = VectorTable::new();
        let mut clic = started(&mut table);
        clic.register_handler(7, on_timer).unwrap();

        clic.lines().enable(7).unwrap();
        assert_eq!(clic.deliver(7), Dispatch::Masked);

        clic.gate().enable_all();
        clic.lines().disable(7).unwrap();
        assert_eq!(clic.deliver(7), Dispatch::Masked);
        assert_eq!(clic.deliver(u16::MAX), Dispatch::Masked);
    }

    #[test]
    fn misaligned_arm_leaves_state_untouched() {
        let mut table = VectorTable::new();
        let clic = started(&mut table);
        let before = clic.vectors().state(clic.hardware());
        let writes = clic.hardware().csr_writes();

        assert_eq!(
            clic.arm_vectored(0x2040_0804, SIM_TRAP_ENTRY),
            Err(ClicError::MisalignedBase(0x2040_0804))
        );
        assert_eq!(
            clic.arm_vectored(0x2040_0800, SIM_TRAP_ENTRY + 2),
            Err(ClicError::MisalignedBase(SIM_TRAP_ENTRY + 2))
        );
        assert_eq!(clic.vectors().state(clic.hardware()), before);
        assert_eq!(clic.hardware().csr_writes(), writes);

        let state = clic.arm_vectored(0x2040_0800, SIM_TRAP_ENTRY).unwrap();
        assert_eq!(clic.vectors().state(clic.hardware()), state);
        assert_eq!(clic.hardware().csr_writes(), writes + 1);
    }

    #[test]
    fn direct_mode_is_rejected() {
        let mut table = VectorTable::new();
        let clic = started(&mut table);
        let writes = clic.hardware().csr_writes();
        assert_eq!(
            clic.vectors()
                .arm(clic.hardware(), TrapMode::Direct, SIM_TRAP_ENTRY),
            Err(ClicError::UnsupportedMode(TrapMode::Direct))
        );
        assert_eq!(clic.hardware().csr_writes(), writes);
        assert_eq!(
            clic.vectors().state(clic.hardware()).mode,
            TrapMode::Vectored
        );
    }

    #[test]
    fn start_arms_vectored_mode_with_own_table() {
        let mut table = VectorTable::new();
        table.register(9, on_other).unwrap();
        let clic = started(&mut table);
        let state = clic.vectors().state(clic.hardware());

        assert_eq!(state.mode, TrapMode::Vectored);
        assert_eq!(state.base, clic.vectors().table().base_address());
        assert_eq!(state.trap_entry, SIM_TRAP_ENTRY);
        assert!(!clic.gate().is_open());
        assert_eq!(clic.lines().config(), ControllerConfig::FLAT);
        // start() resets the table.
        assert!(clic.resolve(9).is_default());
    }

    #[test]
    fn enable_disable_pair_restores_enable_bit() {
        let mut table = VectorTable::new();
        let clic = started(&mut table);
        let lines = clic.lines();

        for id in [0, 3, 12, 47] {
            let before = lines.is_enabled(id).unwrap();
            lines.enable(id).unwrap();
            lines.enable(id).unwrap();
            assert!(lines.is_enabled(id).unwrap());
            lines.disable(id).unwrap();
            assert_eq!(lines.is_enabled(id).unwrap(), before);
        }
        assert_eq!(lines.enable(48), Err(ClicError::LineOutOfRange(48)));
        assert_eq!(lines.disable(48), Err(ClicError::LineOutOfRange(48)));
    }

    #[test]
    fn higher_id_wins_at_every_level_width() {
        let low = local_interrupt(1);
        let high = local_interrupt(9);
        for level_bits in 0..=4 {
            let mut table = VectorTable::new();
            let mut clic = started(&mut table);
            let config = ControllerConfig::new(false, level_bits, 0);
            let encoding = LevelEncoding::new(level_bits);
            let control = encoding.encode(encoding.level_count() - 1, 0);

            clic.lines().configure(config).unwrap();
            for id in [low, high] {
                clic.register_handler(id, on_button).unwrap();
                clic.lines().set_level_priority(id, control).unwrap();
                clic.lines().enable(id).unwrap();
                clic.hardware().assert_line(id);
            }
            clic.gate().enable_all();

            let first = clic.dispatch_next(None);
            assert!(
                matches!(first, Dispatch::Handler { line, .. } if line == high),
                "level_bits={} took {:?}",
                level_bits,
                first
            );

            clic.hardware().deassert_line(high);
            clic.gate().enable_all();
            let second = clic.dispatch_next(None);
            assert!(matches!(second, Dispatch::Handler { line, .. } if line == low));

            clic.hardware().deassert_line(low);
            assert_eq!(clic.dispatch_next(None), Dispatch::Idle);
        }
    }

    #[test]
    fn level_beats_priority_and_id() {
        let mut table = VectorTable::new();
        let mut clic = started(&mut table);
        let encoding = LevelEncoding::new(2);
        clic.lines()
            .configure(ControllerConfig::new(false, 2, 0))
            .unwrap();

        let urgent = local_interrupt(0);
        let busy = local_interrupt(20);
        clic.register_handler(urgent, on_button).unwrap();
        clic.register_handler(busy, on_other).unwrap();
        // Level 2 with no priority beats level 1 with full priority.
        clic.lines()
            .set_level_priority(urgent, encoding.encode(2, 0))
            .unwrap();
        clic.lines()
            .set_level_priority(busy, encoding.encode(1, 0x3F))
            .unwrap();
        for id in [urgent, busy] {
            clic.lines().enable(id).unwrap();
            clic.hardware().assert_line(id);
        }
        clic.gate().enable_all();

        let taken = clic.dispatch_next(None);
        assert_eq!(
            taken.handler().map(|h| h as usize),
            Some(on_button as Handler as usize)
        );
    }

    #[test]
    fn only_strictly_higher_level_preempts() {
        let mut table = VectorTable::new();
        let mut clic = started(&mut table);
        let encoding = LevelEncoding::new(2);
        clic.lines()
            .configure(ControllerConfig::new(false, 2, 0))
            .unwrap();
        let id = local_interrupt(3);
        clic.register_handler(id, on_button).unwrap();
        clic.lines()
            .set_level_priority(id, encoding.encode(1, 0x3F))
            .unwrap();
        clic.lines().enable(id).unwrap();
        clic.hardware().assert_line(id);
        clic.gate().enable_all();

        // Same level, higher priority: waits.
        assert_eq!(clic.dispatch_next(Some(encoding.encode(1, 0))), Dispatch::Masked);
        // Running higher: waits.
        assert_eq!(clic.dispatch_next(Some(encoding.encode(3, 0))), Dispatch::Masked);
        // Running lower: preempts.
        assert!(matches!(
            clic.dispatch_next(Some(encoding.encode(0, 0x3F))),
            Dispatch::Handler { .. }
        ));
    }

    #[test]
    fn flat_level_never_nests() {
        let mut table = VectorTable::new();
        let mut clic = started(&mut table);
        let id = local_interrupt(5);
        clic.register_handler(id, on_button).unwrap();
        clic.lines().set_level_priority(id, 0xFF).unwrap();
        clic.lines().enable(id).unwrap();
        clic.hardware().assert_line(id);
        clic.gate().enable_all();

        assert_eq!(clic.dispatch_next(Some(0x00)), Dispatch::Masked);
    }

    #[test]
    fn reconfiguring_width_keeps_raw_control_byte() {
        let mut table = VectorTable::new();
        let clic = started(&mut table);
        let lines = clic.lines();
        let id = local_interrupt(2);

        lines.configure(ControllerConfig::new(false, 2, 0)).unwrap();
        lines.set_level_priority(id, 0x80).unwrap();
        // Four implemented bits: the low nibble reads as ones.
        assert_eq!(lines.level_priority(id).unwrap(), 0x8F);
        assert_eq!(lines.effective_level_priority(id).unwrap(), (191, 0x0F));

        lines.configure(ControllerConfig::FLAT).unwrap();
        assert_eq!(lines.level_priority(id).unwrap(), 0x8F);
        assert_eq!(lines.effective_level_priority(id).unwrap(), (255, 0x8F));
    }

    #[test]
    fn unimplemented_control_bits_leave_the_id_to_decide() {
        let mut table = VectorTable::new();
        let mut clic = started(&mut table);
        let low = local_interrupt(0);
        let high = local_interrupt(4);

        clic.lines().configure(ControllerConfig::FLAT).unwrap();
        for (id, control) in [(low, 0x85), (high, 0x81)] {
            clic.register_handler(id, on_button).unwrap();
            clic.lines().set_level_priority(id, control).unwrap();
            clic.lines().enable(id).unwrap();
            clic.hardware().assert_line(id);
        }
        assert_eq!(clic.lines().level_priority(low).unwrap(), 0x8F);
        assert_eq!(clic.lines().level_priority(high).unwrap(), 0x8F);
        clic.gate().enable_all();

        let taken = clic.dispatch_next(None);
        assert!(
            matches!(taken, Dispatch::Handler { line, .. } if line == high),
            "took {:?}",
            taken
        );

        // An implemented priority bit still outranks the ID.
        clic.hardware().assert_line(high);
        clic.lines().set_level_priority(low, 0x90).unwrap();
        clic.gate().enable_all();
        assert!(matches!(
            clic.dispatch_next(None),
            Dispatch::Handler { line, .. } if line == low
        ));
    }

    #[test]
    fn rejected_configuration_leaves_cliccfg() {
        let mut table = VectorTable::new();
        let clic = started(&mut table);
        let lines = clic.lines();
        lines.configure(ControllerConfig::new(true, 3, 0)).unwrap();

        assert_eq!(
            lines.configure(ControllerConfig::new(false, 3, 2)),
            Err(ClicError::ConfigWidthExceeded {
                level_bits: 3,
                privilege_bits: 2,
                available: 4
            })
        );
        assert_eq!(
            lines.configure(ControllerConfig::new(false, 5, 0)),
            Err(ClicError::LevelBitsOutOfRange(5))
        );
        assert_eq!(lines.config(), ControllerConfig::new(true, 3, 0));
    }

    #[test]
    fn software_interrupts() {
        let mut table = VectorTable::new();
        let clic = started(&mut table);
        let soft = Interrupt::MachineSoft.id();
        let clic_soft = Interrupt::ClicSoft.id();

        clic.timer().raise_software();
        assert!(clic.timer().software_pending());
        assert!(clic.lines().is_pending(soft).unwrap());
        // MSIP-backed pending bit ignores direct writes.
        clic.lines().clear_pending(soft).unwrap();
        assert!(clic.lines().is_pending(soft).unwrap());
        clic.timer().clear_software();
        assert!(!clic.lines().is_pending(soft).unwrap());

        clic.lines().set_pending(clic_soft).unwrap();
        assert!(clic.lines().is_pending(clic_soft).unwrap());
        clic.lines().clear_pending(clic_soft).unwrap();
        assert!(!clic.lines().is_pending(clic_soft).unwrap());
    }

    #[test]
    fn timer_fires_after_interval() {
        let mut table = VectorTable::new();
        let clic = started(&mut table);
        let timer_id = Interrupt::MachineTimer.id();
        clic.hardware().advance(1_000);

        let deadline = clic.timer().arm_ms(5000);
        assert_eq!(deadline, 1_000 + 163_840);
        assert_eq!(clic.timer().deadline(), deadline);
        assert!(!clic.lines().is_pending(timer_id).unwrap());

        clic.hardware().advance(163_839);
        assert!(!clic.lines().is_pending(timer_id).unwrap());
        clic.hardware().advance(1);
        assert!(clic.lines().is_pending(timer_id).unwrap());

        clic.timer().disarm();
        assert!(!clic.lines().is_pending(timer_id).unwrap());
    }

    #[test]
    fn highest_pending_ignores_disabled_lines() {
        let mut table = VectorTable::new();
        let clic = started(&mut table);
        let lines = clic.lines();
        clic.hardware().assert_line(40);
        clic.hardware().assert_line(20);
        lines.enable(20).unwrap();

        assert_eq!(lines.highest_pending(), Some(LineId::new(20).unwrap()));
        lines.quiesce();
        assert_eq!(lines.highest_pending(), None);
        assert!(!lines.is_pending(40).unwrap());
    }

    #[test]
    fn table_mutation_requires_closed_gate() {
        let mut table = VectorTable::new();
        let mut clic = started(&mut table);
        clic.gate().enable_all();

        assert_eq!(
            clic.register_handler(7, on_timer),
            Err(ClicError::InterruptsEnabled)
        );
        assert!(clic.resolve(7).is_default());

        unsafe { clic.register_handler_unchecked(7, on_timer).unwrap() };
        assert_eq!(clic.resolve(7), HandlerRef::Application(on_timer));
    }

    #[test]
    fn apply_validates_before_writing() {
        let mut table = VectorTable::new();
        let mut clic = started(&mut table);
        let bad = [
            LineSetup::new(7).handler(on_timer).enabled(),
            LineSetup::new(60).enabled(),
        ];

        assert_eq!(
            clic.apply(&Setup::new(ControllerConfig::new(false, 2, 0), &bad)),
            Err(ClicError::LineOutOfRange(60))
        );
        assert!(clic.resolve(7).is_default());
        assert!(!clic.lines().is_enabled(7).unwrap());
        assert_eq!(clic.lines().config(), ControllerConfig::FLAT);
    }

    #[test]
    fn apply_wires_up_every_line() {
        let mut table = VectorTable::new();
        let mut clic = started(&mut table);
        let button = local_interrupt(0);
        let lines = [
            LineSetup::new(7).handler(on_timer).control(0xBF).enabled(),
            LineSetup::new(button).handler(on_button).control(0x7F).enabled(),
            LineSetup::new(12).control(0x3F),
        ];
        let setup = Setup::new(ControllerConfig::new(false, 2, 0), &lines).with_timer_ms(1000);

        clic.apply(&setup).unwrap();

        assert_eq!(clic.lines().config(), ControllerConfig::new(false, 2, 0));
        assert_eq!(clic.resolve(7), HandlerRef::Application(on_timer));
        assert_eq!(clic.resolve(button), HandlerRef::Application(on_button));
        assert!(clic.resolve(12).is_default());
        assert_eq!(clic.lines().level_priority(7).unwrap(), 0xBF);
        assert!(clic.lines().is_enabled(button).unwrap());
        assert!(!clic.lines().is_enabled(12).unwrap());
        assert_eq!(clic.timer().deadline(), 32_768);
        assert!(!clic.gate().is_open());

        clic.gate().enable_all();
        assert_eq!(
            clic.apply(&setup),
            Err(ClicError::InterruptsEnabled)
        );
    }
}
