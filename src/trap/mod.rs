// clic_vectored/src/trap/mod.rs

//! # RISC-V CLIC Trap and Interrupt Subsystem
//!
//! Vectored-mode configuration and dispatch for a SiFive-style Core-Local
//! Interrupt Controller: the `mtvt` vector table, per-line enable, pending
//! and level/priority state, the global `mstatus.MIE` gate, the machine
//! timer, and the fail-fast default trap handler.
//!
//! Typical bring-up, with the gate closed throughout:
//!
//! ```ignore
//! trap::init(platform::ARTY_E21)?;
//! trap::apply(&Setup::new(config, &LINES).with_timer_ms(1000))?;
//! trap::enable_all()?;
//! ```

pub mod ds;
pub mod infrastructure;
mod api;

pub use self::api::*;

pub use self::ds::{
    local_interrupt, ClicError, ClicLayout, ControllerConfig, Exception, FaultRecord, Handler,
    HandlerRef, HartContext, Interrupt, LevelEncoding, LineId, LineSetup, Setup, TrapCause,
    TrapMode, TrapType, TrapVectorState,
};
pub use self::infrastructure::di::container::Clic;
pub use self::infrastructure::di::traits::{HardwareController, Hart, RegisterBus};
pub use self::infrastructure::low_level::{default_trap_handler, MachineHart};

use crate::platform::Platform;

/// Initializes the interrupt core on the current hart.
///
/// Must be called once, before any other function in this module. Leaves
/// the global gate closed, every vector on the default trap handler, and
/// the controller in flat (single level) mode.
pub fn init(platform: Platform) -> Result<TrapVectorState, ClicError> {
    infrastructure::di::initialize(platform)
}
