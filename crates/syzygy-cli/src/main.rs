//! Command-line report of clock-hand coincidences.
//!
//! Computes, exactly, every instant within the configured number of hours
//! at which two hands of an analog clock are a sixth of a turn apart, for
//! all three hand pairs, then prints the instants and the counts.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing, to stderr)
//! 2. Load configuration from `SYZYGY_*` environment variables
//! 3. Build the six hand-pair generators over `(0, hours)`
//! 4. Run the aggregate computation
//! 5. Write the report to stdout
//! 6. Exit with success iff exact and `f64` deduplication agree
//!
//! # Exit Status
//!
//! - `0` -- report written, cross-check consistent
//! - `1` -- report written, cross-check inconsistent
//! - `2` -- configuration, arithmetic, or output failure

mod clock;
mod config;
mod error;
mod report;

use std::process::ExitCode;

use syzygy_core::{Aggregator, Interval};
use syzygy_rational::Rational;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::CliError;

/// Application entry point.
fn main() -> ExitCode {
    // Stdout is reserved for the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "syzygy failed");
            ExitCode::from(2)
        }
    }
}

/// Compute and report. Returns the outcome of the cross-check.
fn run() -> Result<bool, CliError> {
    let config = CliConfig::from_env()?;
    info!(
        hours = config.hours,
        list = ?config.list,
        output = ?config.output,
        "configuration loaded"
    );

    let interval = Interval::checked(Rational::ZERO, Rational::from_integer(config.hours))?;
    let mut aggregator = Aggregator::new(interval);
    for generator in clock::clock_generators(interval)? {
        aggregator.add_generator(generator);
    }
    aggregator.compute()?;

    let summary = aggregator.summary();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &aggregator, &summary, &config)?;

    info!(
        total = summary.total,
        distinct = summary.distinct,
        duplicates = summary.duplicates,
        consistent = summary.consistent,
        "report written"
    );
    Ok(summary.consistent)
}
