//! Process exit codes.

use crate::config::ConfigError;

/// Every check passed and every stage ran.
pub const SUCCESS: u8 = 0;
/// A check failed, the run was cut short, or setup failed for a non-config reason.
pub const FAILURE: u8 = 1;
/// The configuration could not be loaded or is invalid.
pub const CONFIG_ERROR: u8 = 2;
/// Second Ctrl-C while a request was still in flight (128 + SIGINT).
pub const FORCED_INTERRUPT: i32 = 130;

/// Exit code for an error raised before the first stage ran.
pub fn for_startup_error(err: &anyhow::Error) -> u8 {
    if err.chain().any(|cause| cause.is::<ConfigError>()) {
        CONFIG_ERROR
    } else {
        FAILURE
    }
}
