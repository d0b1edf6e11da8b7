// clic_vectored/src/trap/infrastructure/mod.rs

//! # Trap Infrastructure Module
//!
//! The parts of the interrupt core that touch hardware: the CSR and MMIO
//! layer, the vector table and its controller, per-line configuration, the
//! global gate, the timer, the default trap handler, the controller
//! container with its global instance, and a simulated hart.

// The controller container and its global instance.
pub mod di;

// Real hardware access and the assembly trap entry.
pub mod low_level;

// Components.
pub mod default_handler;
pub mod gate;
pub mod line_config;
pub mod timer;
pub mod trap_vector;
pub mod vector_table;

// In-memory hart for tests and the self-test suite.
pub mod sim;

pub use di::initialize;
