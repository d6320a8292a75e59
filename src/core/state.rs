//! Process state for Ctrl+C handling.
//!
//! - `WATCHING`: Is a watch session running? (interrupt is the normal exit)

use std::sync::atomic::{AtomicBool, Ordering};

/// A watch session is running
/// - `false`: Ctrl+C aborts a one-shot build (exit code 130)
/// - `true`: Ctrl+C ends the session (exit code 0)
static WATCHING: AtomicBool = AtomicBool::new(false);

/// Conventional exit code for SIGINT.
const INTERRUPTED: i32 = 130;

/// Mark watch mode as established
pub fn set_watching() {
    WATCHING.store(true, Ordering::SeqCst);
}

fn is_watching() -> bool {
    WATCHING.load(Ordering::SeqCst)
}

/// Exit code for an interrupt in the current state.
fn interrupt_exit_code() -> i32 {
    if is_watching() { 0 } else { INTERRUPTED }
}

/// Setup the global Ctrl+C handler. Call once at program start
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        let code = interrupt_exit_code();
        if code == 0 {
            crate::log!("watch"; "stopped");
        }
        std::process::exit(code);
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

// =============================================================================
// Tests
// =============================================================================
