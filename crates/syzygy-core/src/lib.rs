//! Periodic generators, aggregation, and cross-validation for the Syzygy
//! coincidence solver.
//!
//! Two periodically recurring events coincide at the instants
//! `shift + k * period` for integer `k`. This crate enumerates those
//! instants exactly over an open interval and merges the output of many
//! generators.
//!
//! # Modules
//!
//! - [`error`] -- Error types for generator and aggregator operations.
//! - [`generator`] -- [`Interval`] and [`PeriodicGenerator`]: a bounded
//!   arithmetic progression of [`Rational`] instants.
//! - [`aggregator`] -- [`Aggregator`]: drives every generator over a shared
//!   interval, deduplicates, reports duplicates, and cross-checks exact
//!   deduplication against `f64` deduplication.
//!
//! # Usage
//!
//! ```
//! use syzygy_core::{Aggregator, Interval, PeriodicGenerator};
//! use syzygy_rational::Rational;
//!
//! let interval = Interval::from_integers(0, 5);
//! let unit = PeriodicGenerator::new(Rational::ZERO, Rational::from_integer(1), interval)?;
//!
//! let mut aggregator = Aggregator::new(interval);
//! aggregator.add_generator(unit);
//! aggregator.add_generator(unit);
//! aggregator.compute()?;
//!
//! assert_eq!(aggregator.total_count(), 8);
//! assert_eq!(aggregator.distinct_count(), 4);
//! assert!(aggregator.validate_against_approximation());
//! # Ok::<(), syzygy_core::GeneratorError>(())
//! ```
//!
//! [`Rational`]: syzygy_rational::Rational

pub mod aggregator;
pub mod error;
pub mod generator;

// Re-export primary types at crate root.
pub use aggregator::{Aggregator, Summary};
pub use error::GeneratorError;
pub use generator::{Interval, PeriodicGenerator};
