// clic_vectored/src/trap/api.rs

//! # Public API for the Trap Subsystem
//!
//! Free functions over the global controller. Each one fails with
//! [`ClicError::NotInitialized`] before [`init`](super::init) has run.
//! Foreground only: these take the controller lock.

use crate::trap::ds::{
    ClicError, ControllerConfig, FaultRecord, Handler, HandlerRef, Setup, TrapVectorState,
};
use crate::trap::infrastructure::default_handler;
use crate::trap::infrastructure::di::{self, with_clic};
use crate::trap::infrastructure::line_config::InterruptLines;
use crate::trap::infrastructure::low_level::MachineHart;

fn with_lines<F, R>(f: F) -> Result<R, ClicError>
where
    F: FnOnce(&InterruptLines<'_, MachineHart>) -> Result<R, ClicError>,
{
    with_clic(|clic| f(&clic.lines()))?
}

pub fn is_initialized() -> bool {
    di::is_initialized()
}

// --- Vector table ---

/// Installs `handler` for interrupt `id`. The global gate must be closed.
pub fn register_handler(id: u16, handler: Handler) -> Result<(), ClicError> {
    with_clic(|clic| clic.register_handler(id, handler))?
}

/// Installs `handler` for interrupt `id` with the gate open.
///
/// # Safety
///
/// Line `id` must be unable to fire for the duration of the call, or a trap
/// may jump through a half-written slot.
pub unsafe fn register_handler_unchecked(id: u16, handler: Handler) -> Result<(), ClicError> {
    with_clic(|clic| unsafe { clic.register_handler_unchecked(id, handler) })?
}

/// The handler hardware dispatch would jump to for `id`.
pub fn resolve(id: u16) -> Result<HandlerRef, ClicError> {
    with_clic(|clic| clic.resolve(id))
}

/// The live `mtvec`/`mtvt` state.
pub fn trap_vector_state() -> Result<TrapVectorState, ClicError> {
    with_clic(|clic| clic.vectors().state(clic.hardware()))
}

// --- Interrupt lines ---

pub fn enable(id: u16) -> Result<(), ClicError> {
    with_lines(|lines| lines.enable(id))
}

pub fn disable(id: u16) -> Result<(), ClicError> {
    with_lines(|lines| lines.disable(id))
}

pub fn is_enabled(id: u16) -> Result<bool, ClicError> {
    with_lines(|lines| lines.is_enabled(id))
}

pub fn set_level_priority(id: u16, raw: u8) -> Result<(), ClicError> {
    with_lines(|lines| lines.set_level_priority(id, raw))
}

pub fn level_priority(id: u16) -> Result<u8, ClicError> {
    with_lines(|lines| lines.level_priority(id))
}

pub fn is_pending(id: u16) -> Result<bool, ClicError> {
    with_lines(|lines| lines.is_pending(id))
}

pub fn set_pending(id: u16) -> Result<(), ClicError> {
    with_lines(|lines| lines.set_pending(id))
}

pub fn clear_pending(id: u16) -> Result<(), ClicError> {
    with_lines(|lines| lines.clear_pending(id))
}

pub fn configure(config: ControllerConfig) -> Result<(), ClicError> {
    with_lines(|lines| lines.configure(config))
}

pub fn config() -> Result<ControllerConfig, ClicError> {
    with_lines(|lines| Ok(lines.config()))
}

/// Applies a whole startup table; see [`Clic::apply`](super::Clic::apply).
pub fn apply(setup: &Setup<'_>) -> Result<(), ClicError> {
    with_clic(|clic| clic.apply(setup))?
}

// --- Global gate ---

/// Opens the gate. Returns the previous state.
pub fn enable_all() -> Result<bool, ClicError> {
    with_clic(|clic| clic.gate().enable_all())
}

/// Closes the gate. Returns the previous state.
pub fn disable_all() -> Result<bool, ClicError> {
    with_clic(|clic| clic.gate().disable_all())
}

pub fn restore_interrupts(was_enabled: bool) -> Result<(), ClicError> {
    with_clic(|clic| clic.gate().restore(was_enabled))
}

pub fn interrupts_enabled() -> Result<bool, ClicError> {
    with_clic(|clic| clic.gate().is_open())
}

// --- Timer and software interrupt ---

/// Arms the machine timer `ms` milliseconds from now; returns the deadline in ticks.
pub fn arm_timer_ms(ms: u32) -> Result<u64, ClicError> {
    with_clic(|clic| clic.timer().arm_ms(ms))
}

pub fn raise_software() -> Result<(), ClicError> {
    with_clic(|clic| clic.timer().raise_software())
}

pub fn clear_software() -> Result<(), ClicError> {
    with_clic(|clic| clic.timer().clear_software())
}

// --- Diagnostics ---

/// The fault the default trap handler last captured.
pub fn last_fault() -> Option<FaultRecord> {
    default_handler::last_fault()
}
