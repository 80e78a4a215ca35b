//! Error types shared by the harness and the stage orchestrator.

use thiserror::Error;

/// Conditions that stop a stage early.
///
/// Expectation mismatches and transport failures are not errors: they are
/// recorded as failed checks and the run continues.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The user pressed Ctrl-C; remaining checks and stages are abandoned.
    #[error("test execution interrupted by user")]
    Interrupted,

    /// The report could not be written to its output.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl HarnessError {
    pub fn is_interrupt(&self) -> bool {
        matches!(self, HarnessError::Interrupted)
    }
}
