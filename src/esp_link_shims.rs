//! ESP-IDF providers for link-time symbols third-party crates expect.
//!
//! `embassy-sync`'s `CriticalSectionRawMutex` goes through the
//! `critical-section` crate, which needs an implementation linked in. On
//! ESP-IDF the attribute queue is shared between FreeRTOS tasks, so one
//! process-wide, re-entrant lock is enough. Host builds get the `std`
//! implementation from the dev-dependency instead.

#[cfg(target_os = "espidf")]
mod critical_section_impl {
    use core::cell::{Cell, RefCell};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use critical_section::RawRestoreState;

    static LOCK: Mutex<()> = Mutex::new(());

    thread_local! {
        static NESTING: Cell<u32> = const { Cell::new(0) };
        static HELD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
    }

    struct TaskLock;
    critical_section::set_impl!(TaskLock);

    // SAFETY: the mutex serialises every task; nesting is tracked per task so
    // re-entry from the holder does not deadlock.
    unsafe impl critical_section::Impl for TaskLock {
        unsafe fn acquire() -> RawRestoreState {
            let nesting = NESTING.get();
            if nesting == 0 {
                let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
                HELD.with_borrow_mut(|held| *held = Some(guard));
            }
            NESTING.set(nesting + 1);
        }

        unsafe fn release(_restore: RawRestoreState) {
            let nesting = NESTING.get().saturating_sub(1);
            NESTING.set(nesting);
            if nesting == 0 {
                HELD.with_borrow_mut(|held| *held = None);
            }
        }
    }
}
