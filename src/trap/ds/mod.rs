// clic_vectored/src/trap/ds/mod.rs

//! # Trap Data Structures Module
//!
//! Plain data for the interrupt core: register addresses, control-byte
//! encodings, trap causes, handler references, errors, and the startup
//! configuration table. Nothing here touches hardware.

pub mod address;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod level;
pub mod setup;
pub mod types;

pub use self::address::{ByteReg, ClicLayout, DwordReg, HartContext, LineId, WordReg};
pub use self::config::{ControllerConfig, MAX_LEVEL_BITS, MAX_PRIVILEGE_BITS};
pub use self::context::FaultRecord;
pub use self::error::ClicError;
pub use self::handler::{Handler, HandlerRef};
pub use self::level::LevelEncoding;
pub use self::setup::{LineSetup, Setup};
pub use self::types::{
    local_interrupt, Exception, Interrupt, TrapCause, TrapMode, TrapType, TrapVectorState,
    FIRST_LOCAL_INTERRUPT, MCAUSE_CODE_MASK, VECTOR_ALIGN,
};
