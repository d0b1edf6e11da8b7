// clic_vectored/src/trap/ds/handler.rs

//! # Handler References
//!
//! What a vector table slot points at. Hardware jumps straight to the
//! address, so an application handler must be an interrupt entry routine
//! that preserves registers and returns with `mret`.

use core::fmt;

/// Entry point stored in a vector table slot.
pub type Handler = unsafe extern "C" fn();

/// A slot's target: either the default trap handler or an application handler.
#[derive(Clone, Copy)]
pub enum HandlerRef {
    Default,
    Application(Handler),
}

impl HandlerRef {
    pub const fn is_default(&self) -> bool {
        matches!(self, HandlerRef::Default)
    }

    /// Entry address of an application handler.
    pub fn address(&self) -> Option<usize> {
        match self {
            HandlerRef::Default => None,
            HandlerRef::Application(handler) => Some(*handler as usize),
        }
    }
}

impl PartialEq for HandlerRef {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for HandlerRef {}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address() {
            None => write!(f, "HandlerRef::Default"),
            Some(addr) => write!(f, "HandlerRef::Application({:#x})", addr),
        }
    }
}
