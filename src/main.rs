use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taakra_smoke::config::{self, ConfigOverrides};
use taakra_smoke::exit;
use taakra_smoke::harness::{Harness, HttpTransport};
use taakra_smoke::interrupt::{on_interrupt, InterruptAction};
use taakra_smoke::stages::{run_all, RunOutcome};

#[derive(Parser)]
#[command(name = "taakra-smoke")]
#[command(about = "End-to-end smoke tests for the Taakra backend API", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the API under test (default: http://localhost:5000)
    #[arg(long)]
    base_url: Option<String>,

    /// Administrator email used for admin-only checks
    #[arg(long)]
    admin_email: Option<String>,

    /// Administrator password
    #[arg(long)]
    admin_password: Option<String>,

    /// Path to a config.toml (default: <config dir>/taakra-smoke/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds. The first Ctrl-C waits for the
    /// request in flight (at most this long); a second one exits at once.
    #[arg(long)]
    timeout: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            admin_email: self.admin_email.clone(),
            admin_password: self.admin_password.clone(),
            request_timeout_secs: self.timeout,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("taakra_smoke={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<RunOutcome> {
    let config = config::resolve(cli.config.as_deref(), cli.overrides())
        .context("Failed to resolve configuration")?;
    info!(base_url = %config.base_url, "configuration resolved");

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || {
        if on_interrupt(&flag) == InterruptAction::Exit {
            cleanup_terminal();
            std::process::exit(exit::FORCED_INTERRUPT);
        }
    })
    .context("Failed to set Ctrl+C handler")?;

    let transport = HttpTransport::new(&config.base_url, &config.http)?;
    let mut harness = Harness::new(&transport, config, io::stdout()).with_interrupt(interrupted);

    Ok(run_all(&mut harness))
}

/// Reset colors and end the current line before a forced exit.
fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x1B[0m\n");
    let _ = stdout.flush();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(exit::for_startup_error(&e))
        }
    }
}
