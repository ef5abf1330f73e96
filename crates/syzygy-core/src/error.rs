//! Error types for the `syzygy-core` crate.
//!
//! All fallible operations in this crate return [`GeneratorError`].

use syzygy_rational::{Rational, RationalError};

/// Errors that can occur while building generators or aggregating instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    /// A generator was given a zero or negative period.
    #[error("generator period must be positive, got {period}")]
    NonPositivePeriod {
        /// The rejected period.
        period: Rational,
    },

    /// An interval was given a lower bound above its upper bound.
    #[error("interval lower bound {lower} exceeds upper bound {upper}")]
    InvertedInterval {
        /// The lower bound.
        lower: Rational,
        /// The upper bound.
        upper: Rational,
    },

    /// The aggregate computation was requested a second time.
    #[error("aggregate computation has already run")]
    AlreadyComputed,

    /// Exact arithmetic failed (overflow or zero denominator).
    #[error("rational arithmetic failed: {source}")]
    Arithmetic {
        /// The underlying rational error.
        #[from]
        source: RationalError,
    },
}
