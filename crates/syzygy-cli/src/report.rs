//! Text and JSON rendering of a completed aggregate computation.
//!
//! The text form is an indexed listing (`[1]: 2/11`), a rule, and the
//! counts. The JSON form carries the same content as one document.

use std::io::Write;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use syzygy_core::{Aggregator, Summary};
use syzygy_rational::Rational;

use crate::clock::DIAL_HOURS;
use crate::config::{CliConfig, ListMode, OutputFormat};
use crate::error::CliError;

/// Separator between the listing and the counts.
const RULE: &str = "----------";

const MILLIS_PER_HOUR: u64 = 3_600_000;
const MILLIS_PER_MINUTE: u64 = 60_000;
const MILLIS_PER_SECOND: u64 = 1_000;

/// One entry of the JSON listing.
#[derive(Debug, Serialize)]
struct ListedInstant {
    /// 1-based position in the listing.
    index: usize,
    /// The instant, in hours.
    instant: Rational,
    /// Elapsed time as `hh:mm:ss.fff`, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    clock_time: Option<String>,
}

/// The JSON report document.
#[derive(Debug, Serialize)]
struct JsonReport {
    summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    day_total: Option<usize>,
    instants: Vec<ListedInstant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duplicates: Option<Vec<Rational>>,
}

/// Write the report in the configured format.
pub fn write_report<W: Write>(
    out: &mut W,
    aggregator: &Aggregator,
    summary: &Summary,
    config: &CliConfig,
) -> Result<(), CliError> {
    match config.output {
        OutputFormat::Text => write_text(out, aggregator, summary, config),
        OutputFormat::Json => write_json(out, aggregator, summary, config),
    }
}

/// Number of distinct instants in a full day, when the interval is exactly
/// one dial cycle (the dial repeats twice a day).
pub fn day_total(summary: &Summary, hours: i64) -> Option<usize> {
    (hours == DIAL_HOURS).then(|| summary.distinct.saturating_mul(2))
}

/// Render an instant in hours as elapsed `hh:mm:ss.fff`, rounded to the
/// nearest millisecond.
pub fn clock_time(instant: Rational) -> Result<String, CliError> {
    let unrenderable = || CliError::ClockTime {
        instant: instant.to_string(),
    };
    let total = instant
        .to_decimal()?
        .checked_mul(Decimal::from(MILLIS_PER_HOUR))
        .ok_or_else(unrenderable)?
        .round()
        .to_u64()
        .ok_or_else(unrenderable)?;

    // Divisors are non-zero constants.
    #[allow(clippy::arithmetic_side_effects)]
    let (hours, minutes, seconds, millis) = (
        total / MILLIS_PER_HOUR,
        total % MILLIS_PER_HOUR / MILLIS_PER_MINUTE,
        total % MILLIS_PER_MINUTE / MILLIS_PER_SECOND,
        total % MILLIS_PER_SECOND,
    );
    Ok(format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}"))
}

fn listed(aggregator: &Aggregator, mode: ListMode) -> Vec<Rational> {
    match mode {
        ListMode::Distinct => aggregator.distinct_instants().iter().copied().collect(),
        ListMode::All => aggregator.all_instants().to_vec(),
        ListMode::None => Vec::new(),
    }
}

fn write_text<W: Write>(
    out: &mut W,
    aggregator: &Aggregator,
    summary: &Summary,
    config: &CliConfig,
) -> Result<(), CliError> {
    for (index, instant) in listed(aggregator, config.list).into_iter().enumerate() {
        let position = index.saturating_add(1);
        if config.clock_time {
            writeln!(out, "[{position}]: {instant} ({})", clock_time(instant)?)?;
        } else {
            writeln!(out, "[{position}]: {instant}")?;
        }
    }

    writeln!(out, "{RULE}")?;
    writeln!(out, "All times: {}", summary.total)?;
    writeln!(out, "Without duplication: {}", summary.distinct)?;
    if let Some(day) = day_total(summary, config.hours) {
        writeln!(out, "For 24h: {day}")?;
    }

    if config.show_duplicates {
        writeln!(out, "Duplicates:")?;
        for instant in aggregator.duplicate_report() {
            writeln!(out, "{instant}")?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(
    out: &mut W,
    aggregator: &Aggregator,
    summary: &Summary,
    config: &CliConfig,
) -> Result<(), CliError> {
    let instants = listed(aggregator, config.list)
        .into_iter()
        .enumerate()
        .map(|(index, instant)| {
            let clock_time = if config.clock_time {
                Some(clock_time(instant)?)
            } else {
                None
            };
            Ok(ListedInstant {
                index: index.saturating_add(1),
                instant,
                clock_time,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    let report = JsonReport {
        summary: *summary,
        day_total: day_total(summary, config.hours),
        instants,
        duplicates: config
            .show_duplicates
            .then(|| aggregator.duplicate_report()),
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
