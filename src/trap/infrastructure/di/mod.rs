// clic_vectored/src/trap/infrastructure/di/mod.rs

//! # Dependency Injection System - Global Access and Initialization
//!
//! Holds the one `Clic` instance for the hart this code runs on and the
//! static vector table it owns. Initialization happens exactly once; all
//! later access goes through [`with_clic`].
//!
//! The lock is for the foreground only. Interrupt handlers must not call
//! into it; they build component views over [`MachineHart`] directly.

pub mod container;
pub mod traits;

use self::container::Clic;
use self::traits::HardwareController;
use crate::platform::Platform;
use crate::trap::ds::{ClicError, HartContext, TrapVectorState};
use crate::trap::infrastructure::low_level::{self, MachineHart};
use crate::trap::infrastructure::vector_table::VectorTable;
use core::ptr::addr_of_mut;
use core::sync::atomic::{AtomicBool, Ordering};
use spin::Mutex;

/// The global controller, protected by a `Mutex` for foreground access.
static GLOBAL_CLIC: Mutex<Option<Clic<'static, MachineHart>>> = Mutex::new(None);

/// Ensures the controller (and the borrow of the table) is created only once.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// The table `mtvt` points at once initialized.
static mut VECTOR_TABLE: VectorTable = VectorTable::new();

/// Brings up CLIC vectored mode on the current hart.
///
/// Closes the global gate, resets the vector table to the default handler,
/// arms `mtvt`/`mtvec` and writes a flat `cliccfg`. The gate stays closed.
pub fn initialize(platform: Platform) -> Result<TrapVectorState, ClicError> {
    if INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
        .is_err()
    {
        return Err(ClicError::AlreadyInitialized);
    }

    let hw = MachineHart;
    let hart = HartContext::new(hw.hart_id());
    // SAFETY: INITIALIZED admits one caller, so this is the only reference.
    let table = unsafe { &mut *addr_of_mut!(VECTOR_TABLE) };
    let mut clic = Clic::new(platform, hart, hw, table);

    match clic.start(low_level::trap_entry_address()) {
        Ok(state) => {
            *GLOBAL_CLIC.lock() = Some(clic);
            Ok(state)
        }
        Err(err) => {
            // The table borrow dies with `clic`, so a retry is sound.
            drop(clic);
            INITIALIZED.store(false, Ordering::SeqCst);
            Err(err)
        }
    }
}

/// Runs `f` with exclusive access to the global controller.
pub fn with_clic<F, R>(f: F) -> Result<R, ClicError>
where
    F: FnOnce(&mut Clic<'static, MachineHart>) -> R,
{
    let mut guard = GLOBAL_CLIC.lock();
    let clic = guard.as_mut().ok_or(ClicError::NotInitialized)?;
    Ok(f(clic))
}

/// Checks if the controller has been initialized.
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Relaxed)
}
