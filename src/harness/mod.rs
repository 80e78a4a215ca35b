//! Request dispatch, expectation matching and result bookkeeping.
//!
//! A [`Harness`] issues one [`Check`] at a time through a [`Transport`],
//! classifies the outcome, updates [`RunStats`] and writes a report line.
//! Transport failures and status mismatches are recorded as failed checks
//! and never propagate.

pub mod report;
pub mod response;
pub mod stats;
pub mod transport;


use serde_json::Value;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::HarnessError;
use crate::session::{Session, Slot};

pub use response::{Response, ResponseBody};
pub use stats::{RunStats, Verdict};
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport, TransportError};

/// Status expected from a check when none is given.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// One HTTP call plus the outcome that counts as a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    name: String,
    request: ApiRequest,
    expected: u16,
    expect_fail: bool,
}

impl Check {
    pub fn new(method: Method, path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            request: ApiRequest {
                method,
                path: path.into(),
                bearer: None,
                body: None,
                query: Vec::new(),
            },
            expected: DEFAULT_EXPECTED_STATUS,
            expect_fail: false,
        }
    }

    pub fn get(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Method::Get, path, name)
    }

    pub fn post(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Method::Post, path, name)
    }

    pub fn put(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Method::Put, path, name)
    }

    pub fn delete(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, name)
    }

    /// Send `Authorization: Bearer <token>` and a JSON content type.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.request.bearer = Some(token.into());
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.request.body = Some(body);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.request.query.push((key.into(), value.to_string()));
        self
    }

    pub fn expect(mut self, status: u16) -> Self {
        self.expected = status;
        self
    }

    /// Any status >= 400 passes; anything below fails.
    pub fn expect_failure(mut self) -> Self {
        self.expect_fail = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Classify an observed status code.
    pub fn classify(&self, status: u16) -> (Verdict, Option<String>) {
        if self.expect_fail {
            if status >= 400 {
                (Verdict::Pass, None)
            } else {
                (
                    Verdict::Fail,
                    Some(format!("Expected failure status (>=400), got {status}")),
                )
            }
        } else if status == self.expected {
            (Verdict::Pass, None)
        } else {
            (
                Verdict::Fail,
                Some(format!("Expected {}, got {status}", self.expected)),
            )
        }
    }
}

/// Dispatcher plus the mutable run state shared by all stages.
pub struct Harness<'a, W: Write> {
    transport: &'a dyn Transport,
    out: W,
    config: Config,
    session: Session,
    stats: RunStats,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<'a, W: Write> Harness<'a, W> {
    pub fn new(transport: &'a dyn Transport, config: Config, out: W) -> Self {
        Self {
            transport,
            out,
            config,
            session: Session::default(),
            stats: RunStats::default(),
            interrupt: None,
        }
    }

    /// Stop dispatching once `flag` becomes true.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// A session slot, if it is set and non-empty.
    pub fn slot(&self, slot: Slot) -> Option<String> {
        self.session.get(slot).filter(|value| !value.is_empty())
    }

    pub fn into_parts(self) -> (Session, RunStats, W) {
        (self.session, self.stats, self.out)
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    pub fn ensure_running(&self) -> Result<(), HarnessError> {
        if self.is_interrupted() {
            Err(HarnessError::Interrupted)
        } else {
            Ok(())
        }
    }

    /// Perform one check and record its verdict.
    ///
    /// Always returns a [`Response`] for a dispatched check; an `Err` means
    /// the run was interrupted or the report could not be written.
    pub fn check(&mut self, check: Check) -> Result<Response, HarnessError> {
        self.ensure_running()?;

        let request = check.request();
        debug!(
            method = %request.method,
            url = %self.transport.describe(&request.path),
            check = check.name(),
            "dispatching"
        );

        match self.transport.send(request) {
            Ok(raw) => {
                let body = ResponseBody::parse(&raw.body);
                let (verdict, error) = check.classify(raw.status);
                self.stats.record(verdict);
                report::render_check(
                    &mut self.out,
                    check.name(),
                    verdict,
                    Some(raw.status),
                    Some(&body),
                    error.as_deref(),
                )?;
                Ok(Response {
                    body: Some(body),
                    status: Some(raw.status),
                })
            }
            Err(err) => {
                warn!(check = check.name(), error = %err, "transport failure");
                self.stats.record(Verdict::Fail);
                report::render_check(
                    &mut self.out,
                    check.name(),
                    Verdict::Fail,
                    None,
                    None,
                    Some(&err.to_string()),
                )?;
                Ok(Response::failed_transport())
            }
        }
    }

    pub fn header(&mut self, title: &str) -> Result<(), HarnessError> {
        report::render_header(&mut self.out, title)?;
        Ok(())
    }

    /// Note that a check or stage was skipped for a missing prerequisite.
    pub fn skip(&mut self, message: &str) -> Result<(), HarnessError> {
        debug!(notice = message, "skipped");
        report::render_skip(&mut self.out, message)?;
        Ok(())
    }

    pub fn note(&mut self, message: &str) -> Result<(), HarnessError> {
        report::render_note(&mut self.out, message)?;
        Ok(())
    }
}
