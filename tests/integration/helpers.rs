//! Shared setup for integration tests

use taakra_smoke::config::Config;
use taakra_smoke::harness::{Harness, Transport};
use taakra_smoke::session::Session;
use taakra_smoke::stages::{run_all, RunOutcome};

/// Everything a finished run leaves behind.
pub struct Finished {
    pub outcome: RunOutcome,
    pub session: Session,
    pub report: String,
}

pub fn run_against(transport: &dyn Transport) -> Finished {
    run_with(Harness::new(transport, Config::default(), Vec::new()))
}

pub fn run_with(mut harness: Harness<'_, Vec<u8>>) -> Finished {
    let outcome = run_all(&mut harness);
    let (session, _, out) = harness.into_parts();
    Finished {
        outcome,
        session,
        report: String::from_utf8(out).expect("report is UTF-8"),
    }
}
