//! Bounded arithmetic progressions of exact instants.
//!
//! A [`PeriodicGenerator`] enumerates `shift + k * period` for successive
//! integers `k`, keeping only the terms strictly inside its [`Interval`].
//!
//! # Boundary Policy
//!
//! Both interval ends are exclusive. A term exactly equal to either bound
//! is never emitted. Comparisons are exact, so this holds without any
//! epsilon.

use std::collections::BTreeSet;

use serde::Serialize;
use syzygy_rational::{Rational, RationalError};
use tracing::debug;

use crate::GeneratorError;

// ---------------------------------------------------------------------------
// Interval
// ---------------------------------------------------------------------------

/// An open interval `(lower, upper)` of rational instants.
///
/// An interval whose lower bound is not below its upper bound contains no
/// instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    /// Exclusive lower bound.
    lower: Rational,
    /// Exclusive upper bound.
    upper: Rational,
}

impl Interval {
    /// Create an interval from any pair of bounds.
    ///
    /// `lower >= upper` yields the empty interval.
    pub const fn new(lower: Rational, upper: Rational) -> Self {
        Self { lower, upper }
    }

    /// Create an interval, rejecting inverted bounds.
    ///
    /// Equal bounds are accepted and yield the empty interval.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvertedInterval`] if `lower > upper`.
    pub fn checked(lower: Rational, upper: Rational) -> Result<Self, GeneratorError> {
        if lower > upper {
            return Err(GeneratorError::InvertedInterval { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Create the interval `(lower/1, upper/1)`.
    pub const fn from_integers(lower: i64, upper: i64) -> Self {
        Self {
            lower: Rational::from_integer(lower),
            upper: Rational::from_integer(upper),
        }
    }

    /// Return the exclusive lower bound.
    pub const fn lower(&self) -> Rational {
        self.lower
    }

    /// Return the exclusive upper bound.
    pub const fn upper(&self) -> Rational {
        self.upper
    }

    /// Return whether the interval contains no instants.
    pub fn is_empty(&self) -> bool {
        self.lower >= self.upper
    }

    /// Return whether `instant` lies strictly between the bounds.
    pub fn contains(&self, instant: Rational) -> bool {
        instant > self.lower && instant < self.upper
    }
}

// ---------------------------------------------------------------------------
// PeriodicGenerator
// ---------------------------------------------------------------------------

/// An arithmetic progression `shift + k * period` restricted to an open
/// interval.
///
/// The period is strictly positive for every constructed generator, which
/// guarantees that enumeration terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodicGenerator {
    /// Phase of the progression (any term of it).
    shift: Rational,
    /// Distance between consecutive terms.
    period: Rational,
    /// Instants outside this interval are not emitted.
    interval: Interval,
}

impl PeriodicGenerator {
    /// Create a generator from its phase, period, and interval.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::NonPositivePeriod`] if `period <= 0`.
    pub const fn new(
        shift: Rational,
        period: Rational,
        interval: Interval,
    ) -> Result<Self, GeneratorError> {
        if !period.is_positive() {
            return Err(GeneratorError::NonPositivePeriod { period });
        }
        Ok(Self {
            shift,
            period,
            interval,
        })
    }

    /// Return a copy of this generator bound to a different interval.
    #[must_use]
    pub const fn with_interval(&self, interval: Interval) -> Self {
        Self {
            shift: self.shift,
            period: self.period,
            interval,
        }
    }

    /// Return the phase.
    pub const fn shift(&self) -> Rational {
        self.shift
    }

    /// Return the period.
    pub const fn period(&self) -> Rational {
        self.period
    }

    /// Return the interval.
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Enumerate the instants strictly inside the interval, ascending.
    ///
    /// Every emitted instant is in lowest terms.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Arithmetic`] if stepping through the
    /// progression overflows `i64`.
    pub fn instants(&self) -> Result<Vec<Rational>, GeneratorError> {
        let mut terms = Vec::new();

        if !self.interval.is_empty() {
            let upper = self.interval.upper();
            let mut iter = self.first_term()?;
            while iter < upper {
                terms.push(iter);
                iter = iter.checked_add(self.period)?.reduced();
            }
        }

        debug!(
            shift = %self.shift,
            period = %self.period,
            lower = %self.interval.lower(),
            upper = %self.interval.upper(),
            terms = terms.len(),
            "generator pass complete"
        );
        Ok(terms)
    }

    /// Enumerate the instants into a deduplicating set and a flat sequence.
    ///
    /// Nothing is inserted if enumeration fails. Returns the number of
    /// instants emitted.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Arithmetic`] on overflow.
    pub fn generate_into(
        &self,
        distinct: &mut BTreeSet<Rational>,
        all: &mut Vec<Rational>,
    ) -> Result<usize, GeneratorError> {
        let terms = self.instants()?;
        distinct.extend(terms.iter().copied());
        all.extend_from_slice(&terms);
        Ok(terms.len())
    }

    /// Locate the smallest term strictly greater than the lower bound.
    ///
    /// That term has index `floor((lower - shift) / period) + 1`, computed
    /// directly so the cost does not depend on how far the shift lies from
    /// the interval.
    fn first_term(&self) -> Result<Rational, GeneratorError> {
        const OVERFLOW: RationalError = RationalError::Overflow {
            operation: "first term index",
        };

        let shift = self.shift.reduced();
        let period = self.period.reduced();
        let gap = self.interval.lower().checked_sub(shift)?.reduced();

        // Products of two i64 values fit in i128; the divisor is positive.
        let index = i128::from(gap.numerator())
            .checked_mul(i128::from(period.denominator()))
            .zip(i128::from(gap.denominator()).checked_mul(i128::from(period.numerator())))
            .and_then(|(dividend, divisor)| dividend.checked_div_euclid(divisor))
            .and_then(|floor| floor.checked_add(1))
            .and_then(|index| i64::try_from(index).ok())
            .ok_or(OVERFLOW)?;

        Ok(shift.checked_add(period.checked_mul_integer(index)?)?.reduced())
    }
}
