//! Human-readable report rendering.
//!
//! Every function writes to a caller-supplied writer so the report can go
//! to stdout in the binary and to a buffer in tests.

use chrono::{DateTime, Local};
use colored::Colorize;
use std::io::{self, Write};

use super::response::ResponseBody;
use super::stats::{RunStats, Verdict};
use crate::utils::{center, preview, PREVIEW_CHARS, REPORT_WIDTH};

/// Boxed title shown once at the start of a run.
pub fn render_banner<W: Write>(
    w: &mut W,
    base_url: &str,
    started_at: DateTime<Local>,
) -> io::Result<()> {
    let inner = REPORT_WIDTH - 2;
    let lines = [
        "TAAKRA BACKEND API - COMPREHENSIVE TEST SUITE".to_string(),
        format!("Base URL: {base_url}"),
        format!("Started at: {}", started_at.format("%Y-%m-%d %H:%M:%S")),
    ];

    writeln!(w)?;
    writeln!(w, "{}", format!("╔{}╗", "=".repeat(inner)).cyan().bold())?;
    for line in &lines {
        writeln!(w, "{}", format!("║{}║", center(line, inner)).cyan().bold())?;
    }
    writeln!(w, "{}", format!("╚{}╝", "=".repeat(inner)).cyan().bold())?;
    writeln!(w)
}

pub fn render_header<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    writeln!(w, "\n{}", "=".repeat(REPORT_WIDTH))?;
    writeln!(w, "{}", center(title, REPORT_WIDTH).cyan().bold())?;
    writeln!(w, "{}\n", "=".repeat(REPORT_WIDTH))
}

/// One check result: status line, then optional code, preview and error.
pub fn render_check<W: Write>(
    w: &mut W,
    name: &str,
    verdict: Verdict,
    status: Option<u16>,
    body: Option<&ResponseBody>,
    error: Option<&str>,
) -> io::Result<()> {
    let label = match verdict {
        Verdict::Pass => verdict.label().green(),
        Verdict::Fail => verdict.label().red(),
    };
    writeln!(w, "{label} {name}")?;

    if let Some(code) = status {
        writeln!(w, "  Status Code: {code}")?;
    }

    if let Some(body) = body.filter(|b| !b.is_empty()) {
        writeln!(
            w,
            "  Response: {}",
            preview(&body.display_text(), PREVIEW_CHARS)
        )?;
    }

    if let Some(message) = error {
        writeln!(w, "  {}", format!("Error: {message}").red())?;
    }

    writeln!(w)
}

/// Notice printed instead of checks whose prerequisites are missing.
pub fn render_skip<W: Write>(w: &mut W, message: &str) -> io::Result<()> {
    writeln!(w, "{}", message.yellow())
}

pub fn render_note<W: Write>(w: &mut W, message: &str) -> io::Result<()> {
    writeln!(w, "{}", message.yellow())
}

pub fn render_interrupted<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "\n\n{}", "Test execution interrupted by user".yellow())
}

pub fn render_unexpected<W: Write>(w: &mut W, message: &str) -> io::Result<()> {
    writeln!(
        w,
        "\n\n{}",
        format!("Unexpected error during test execution: {message}").red()
    )
}

pub fn render_summary<W: Write>(w: &mut W, stats: &RunStats) -> io::Result<()> {
    render_header(w, "TEST SUMMARY")?;

    writeln!(w, "Total Tests: {}", stats.total())?;
    writeln!(w, "{}", format!("Passed: {}", stats.passed()).green())?;
    writeln!(w, "{}", format!("Failed: {}", stats.failed()).red())?;
    writeln!(
        w,
        "\nPass Rate: {}",
        format!("{:.2}%", stats.pass_rate()).cyan()
    )?;

    if stats.all_passed() {
        writeln!(w, "\n{}", "ALL TESTS PASSED!".green().bold())?;
    } else {
        writeln!(
            w,
            "\n{}",
            "Some tests failed. Please review the output above.".yellow()
        )?;
    }

    writeln!(w, "\n{}\n", "=".repeat(REPORT_WIDTH))
}
