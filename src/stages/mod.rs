//! Stage orchestration
//!
//! Stages run strictly in [`Stage::ORDER`]. A failed check never stops its
//! stage or the ones after it; a stage whose prerequisites are missing from
//! the session prints a skip notice instead of calling the API. Only an
//! interrupt or a failure to write the report ends the run early, and even
//! then the summary is printed.

mod admin;
mod auth;
mod authorization;
mod categories;
mod chat;
mod chatbot;
mod cleanup;
mod competitions;
mod health;
mod registrations;

use chrono::{Local, Utc};
use std::fmt;
use std::io::Write;
use tracing::{info, warn};

use crate::error::HarnessError;
use crate::exit;
use crate::harness::report;
use crate::harness::{Harness, RunStats};

/// One ordered phase of the run, covering one API area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Health,
    Authentication,
    Categories,
    Competitions,
    Registrations,
    Admin,
    Chat,
    Chatbot,
    Authorization,
    Cleanup,
}

impl Stage {
    pub const ORDER: [Stage; 10] = [
        Stage::Health,
        Stage::Authentication,
        Stage::Categories,
        Stage::Competitions,
        Stage::Registrations,
        Stage::Admin,
        Stage::Chat,
        Stage::Chatbot,
        Stage::Authorization,
        Stage::Cleanup,
    ];

    /// Section header printed before the stage runs.
    pub fn title(&self) -> &'static str {
        match self {
            Stage::Health => "HEALTH CHECK",
            Stage::Authentication => "AUTHENTICATION TESTS",
            Stage::Categories => "CATEGORY TESTS",
            Stage::Competitions => "COMPETITION TESTS",
            Stage::Registrations => "REGISTRATION TESTS",
            Stage::Admin => "ADMIN ENDPOINTS TESTS",
            Stage::Chat => "CHAT ENDPOINTS TESTS",
            Stage::Chatbot => "CHATBOT ENDPOINT TEST",
            Stage::Authorization => "AUTHORIZATION TESTS",
            Stage::Cleanup => "CLEANUP TEST DATA",
        }
    }

    pub fn run<W: Write>(self, h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
        match self {
            Stage::Health => health::run(h),
            Stage::Authentication => auth::run(h),
            Stage::Categories => categories::run(h),
            Stage::Competitions => competitions::run(h),
            Stage::Registrations => registrations::run(h),
            Stage::Admin => admin::run(h),
            Stage::Chat => chat::run(h),
            Stage::Chatbot => chatbot::run(h),
            Stage::Authorization => authorization::run(h),
            Stage::Cleanup => cleanup::run(h),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Why a run ended before the last stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abort {
    Interrupted,
    Unexpected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub stats: RunStats,
    pub aborted: Option<Abort>,
}

impl RunOutcome {
    /// Overall success: nothing failed and every stage ran.
    pub fn succeeded(&self) -> bool {
        self.aborted.is_none() && self.stats.all_passed()
    }

    pub fn exit_code(&self) -> u8 {
        if self.succeeded() {
            exit::SUCCESS
        } else {
            exit::FAILURE
        }
    }
}

/// Run every stage in order, then print the summary.
pub fn run_all<W: Write>(h: &mut Harness<'_, W>) -> RunOutcome {
    let base_url = h.config().base_url.clone();
    if let Err(e) = report::render_banner(h.out(), &base_url, Local::now()) {
        warn!(error = %e, "failed to write banner");
    }

    let aborted = match run_stages(h) {
        Ok(()) => None,
        Err(HarnessError::Interrupted) => {
            let _ = report::render_interrupted(h.out());
            Some(Abort::Interrupted)
        }
        Err(err) => {
            let message = err.to_string();
            let _ = report::render_unexpected(h.out(), &message);
            Some(Abort::Unexpected(message))
        }
    };

    let stats = *h.stats();
    if let Err(e) = report::render_summary(h.out(), &stats) {
        warn!(error = %e, "failed to write summary");
    }
    let _ = h.out().flush();

    RunOutcome { stats, aborted }
}

fn run_stages<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    for stage in Stage::ORDER {
        h.ensure_running()?;
        info!(stage = %stage, "starting stage");
        h.header(stage.title())?;
        stage.run(h)?;
    }
    Ok(())
}

/// Seconds since the epoch, used to make names and emails unique per run.
fn unix_timestamp() -> i64 {
    Utc::now().timestamp()
}
