//! Error types for the `syzygy` binary.
//!
//! [`CliError`] wraps every failure mode between loading configuration and
//! writing the report, so `run` can propagate with `?`.

use syzygy_core::GeneratorError;
use syzygy_rational::RationalError;

/// Top-level error for the `syzygy` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Building or driving a generator failed.
    #[error("generator error: {source}")]
    Generator {
        /// The underlying generator error.
        #[from]
        source: GeneratorError,
    },

    /// Exact arithmetic failed while deriving clock parameters.
    #[error("rational error: {source}")]
    Rational {
        /// The underlying rational error.
        #[from]
        source: RationalError,
    },

    /// An instant could not be rendered as elapsed clock time.
    #[error("cannot render {instant} as clock time")]
    ClockTime {
        /// The instant, in hours.
        instant: String,
    },

    /// Writing the report failed.
    #[error("output error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Encoding the JSON report failed.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
