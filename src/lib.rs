// clic_vectored/src/lib.rs

//! CLIC vectored-mode interrupt core for RISC-V machine mode.
//!
//! The library is `no_std` and owns no device: the board supplies the
//! platform description, a console sink, and the entry routines that go
//! into the vector table. Host builds run the unit tests against the
//! simulated hart in [`trap::infrastructure::sim`].

#![cfg_attr(not(test), no_std)]

pub mod console;
pub mod platform;
pub mod selftest;
pub mod trap;

/// Idles forever with interrupts left as they are. Handlers do the work.
pub fn main_loop() -> ! {
    info_print!("Entering idle loop.");
    loop {
        trap::infrastructure::low_level::wait_for_interrupt();
    }
}
