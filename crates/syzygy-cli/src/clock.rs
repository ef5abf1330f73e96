//! Clock-hand generators for a 12-hour analog dial.
//!
//! Two hands making `a` and `b` full turns per dial cycle (`a < b`) close
//! on each other at `b - a` turns per cycle, so their relative position
//! repeats every `DIAL_HOURS / (b - a)` hours. Each hand pair contributes two
//! generators: one for the instants the faster hand trails the slower by a
//! sixth of a turn, and one for the instants it leads by a sixth.
//!
//! All times are in hours from the start of the dial cycle.

use syzygy_core::{Interval, PeriodicGenerator};
use syzygy_rational::Rational;

use crate::error::CliError;

/// Hours in one full turn of the hour hand.
pub const DIAL_HOURS: i64 = 12;

/// The hands are separated by `1 / SEPARATION_DIVISOR` of a turn.
pub const SEPARATION_DIVISOR: i64 = 6;

/// An analog clock hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    /// One turn per dial cycle.
    Hour,
    /// Twelve turns per dial cycle.
    Minute,
    /// 720 turns per dial cycle.
    Second,
}

impl Hand {
    /// Full turns completed in [`DIAL_HOURS`] hours.
    pub const fn turns_per_cycle(self) -> i64 {
        match self {
            Self::Hour => 1,
            Self::Minute => 12,
            Self::Second => 720,
        }
    }
}

/// Hand pairs in report order, slower hand first.
pub const HAND_PAIRS: [(Hand, Hand); 3] = [
    (Hand::Hour, Hand::Minute),
    (Hand::Hour, Hand::Second),
    (Hand::Minute, Hand::Second),
];

/// Build the trailing and leading generators for one hand pair.
pub fn pair_generators(
    slower: Hand,
    faster: Hand,
    interval: Interval,
) -> Result<[PeriodicGenerator; 2], CliError> {
    let closing = faster
        .turns_per_cycle()
        .checked_sub(slower.turns_per_cycle())
        .filter(|turns| *turns > 0)
        .ok_or_else(|| {
            CliError::Config(format!("{faster:?} hand must turn faster than {slower:?} hand"))
        })?;

    let period = Rational::new(DIAL_HOURS, closing)?;
    let offset = period.checked_div_integer(SEPARATION_DIVISOR)?;

    let trailing = PeriodicGenerator::new(offset.checked_neg()?, period, interval)?;
    let leading = PeriodicGenerator::new(offset, period, interval)?;
    Ok([trailing, leading])
}

/// Build all six generators, pair by pair.
pub fn clock_generators(interval: Interval) -> Result<Vec<PeriodicGenerator>, CliError> {
    let mut generators = Vec::with_capacity(HAND_PAIRS.len().saturating_mul(2));
    for (slower, faster) in HAND_PAIRS {
        generators.extend(pair_generators(slower, faster, interval)?);
    }
    Ok(generators)
}
