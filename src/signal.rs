//! Host termination signal handling.
//!
//! `SIGINT`/`SIGTERM` must not unwind or clean up the VM's storage (it owns
//! nothing externally visible), so the handler only records intent in a
//! process-wide flag; the fetch/decode/execute loop polls it once per cycle
//! and exits promptly once set.

use std::sync::atomic::{AtomicBool, Ordering};

static TERMINATE_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Installs the process-wide handler. Safe to call more than once; later
/// calls replace the handler but the flag they share is the same.
pub fn install() {
    let _ = ctrlc::set_handler(|| {
        TERMINATE_REQUESTED.store(true, Ordering::Relaxed);
    });
}

/// True once a termination signal has been observed.
pub fn requested() -> bool {
    TERMINATE_REQUESTED.load(Ordering::Relaxed)
}
