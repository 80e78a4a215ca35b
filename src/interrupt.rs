//! Ctrl-C handling.
//!
//! The first signal asks the run to stop at the next check and print the
//! summary. A second one, typically while a request is hanging, exits at once.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// Finish the current request, then jump to the summary.
    Drain,
    /// Exit the process immediately.
    Exit,
}

/// Record a signal on `flag` and decide what to do with it.
pub fn on_interrupt(flag: &AtomicBool) -> InterruptAction {
    if flag.swap(true, Ordering::SeqCst) {
        InterruptAction::Exit
    } else {
        InterruptAction::Drain
    }
}
