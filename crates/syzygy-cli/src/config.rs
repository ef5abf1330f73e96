//! Configuration for the `syzygy` binary.
//!
//! All configuration is loaded from environment variables. Generator
//! parameters are fixed by the clock model; only the interval length and
//! the shape of the report are configurable.

use crate::error::CliError;

/// Longest accepted interval, in hours. Every instant is held in memory,
/// roughly 240 per hour for the clock model.
pub const MAX_HOURS: i64 = 240;

/// Which collection of instants the report lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Distinct instants, ascending.
    Distinct,
    /// Every instant in generation order, duplicates included.
    All,
    /// No listing, only the counts.
    None,
}

/// Report encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indexed plain-text listing followed by the counts.
    Text,
    /// A single JSON document.
    Json,
}

/// Complete binary configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Upper bound of the working interval `(0, hours)`.
    pub hours: i64,
    /// Which instants to list.
    pub list: ListMode,
    /// Whether to print the duplicate report.
    pub show_duplicates: bool,
    /// Whether to annotate each listed instant with `hh:mm:ss.fff`.
    pub clock_time: bool,
    /// Report encoding.
    pub output: OutputFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `SYZYGY_HOURS` -- interval length in hours, at most [`MAX_HOURS`] (default `12`)
    /// - `SYZYGY_LIST` -- `distinct`, `all`, or `none` (default `distinct`)
    /// - `SYZYGY_SHOW_DUPLICATES` -- print the duplicate report (default `false`)
    /// - `SYZYGY_CLOCK_TIME` -- annotate instants with elapsed time (default `false`)
    /// - `SYZYGY_OUTPUT` -- `text` or `json` (default `text`)
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hours: i64 = lookup("SYZYGY_HOURS")
            .unwrap_or_else(|| "12".to_owned())
            .trim()
            .parse()
            .map_err(|e| CliError::Config(format!("invalid SYZYGY_HOURS: {e}")))?;
        if !(1..=MAX_HOURS).contains(&hours) {
            return Err(CliError::Config(format!(
                "SYZYGY_HOURS must be in 1..={MAX_HOURS}, got {hours}"
            )));
        }

        let list = match lookup("SYZYGY_LIST")
            .unwrap_or_else(|| "distinct".to_owned())
            .to_lowercase()
            .as_str()
        {
            "distinct" => ListMode::Distinct,
            "all" => ListMode::All,
            "none" => ListMode::None,
            other => {
                return Err(CliError::Config(format!("unknown SYZYGY_LIST mode: {other}")));
            }
        };

        let show_duplicates = parse_flag(&lookup, "SYZYGY_SHOW_DUPLICATES")?;
        let clock_time = parse_flag(&lookup, "SYZYGY_CLOCK_TIME")?;

        let output = match lookup("SYZYGY_OUTPUT")
            .unwrap_or_else(|| "text".to_owned())
            .to_lowercase()
            .as_str()
        {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            other => {
                return Err(CliError::Config(format!("unknown SYZYGY_OUTPUT format: {other}")));
            }
        };

        Ok(Self {
            hours,
            list,
            show_duplicates,
            clock_time,
            output,
        })
    }
}

/// Parse an optional boolean variable, defaulting to `false`.
fn parse_flag<F>(lookup: &F, name: &str) -> Result<bool, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .unwrap_or_else(|| "false".to_owned())
        .trim()
        .parse()
        .map_err(|e| CliError::Config(format!("invalid {name}: {e}")))
}
