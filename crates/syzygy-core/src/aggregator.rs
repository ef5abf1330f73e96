//! Multi-generator aggregation, duplicate detection, and cross-validation.
//!
//! The [`Aggregator`] owns a set of [`PeriodicGenerator`]s and a shared
//! working interval. A single [`Aggregator::compute`] pass drives every
//! generator over that interval and fills two collections:
//!
//! - **distinct instants** -- a `BTreeSet`, ascending by value, one entry per
//!   distinct rational.
//! - **all instants** -- a `Vec` in generator order, then ascending within a
//!   generator, duplicates included.
//!
//! Deduplication, duplicate counting, and ordering all rely on the single
//! comparison rule of [`Rational`], so the three can never disagree.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use syzygy_rational::Rational;
use tracing::{debug, info, warn};

use crate::{GeneratorError, Interval, PeriodicGenerator};

/// Headline figures of a completed computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// The shared working interval.
    pub interval: Interval,
    /// Number of generators driven.
    pub generators: usize,
    /// Number of instants produced, duplicates included.
    pub total: usize,
    /// Number of distinct instants.
    pub distinct: usize,
    /// Number of values produced by at least two generator terms.
    pub duplicates: usize,
    /// Whether `f64` deduplication agrees with exact deduplication.
    pub consistent: bool,
}

/// Owns generators and the merged results of driving them.
#[derive(Debug, Clone)]
pub struct Aggregator {
    /// Interval every generator is bound to during computation.
    interval: Interval,
    /// Generators in insertion order.
    generators: Vec<PeriodicGenerator>,
    /// Distinct instants, ascending.
    distinct: BTreeSet<Rational>,
    /// Every instant produced, in generation order.
    all: Vec<Rational>,
    /// Whether [`Aggregator::compute`] has completed.
    computed: bool,
}

impl Aggregator {
    /// Create an empty aggregator over the given working interval.
    pub const fn new(interval: Interval) -> Self {
        Self {
            interval,
            generators: Vec::new(),
            distinct: BTreeSet::new(),
            all: Vec::new(),
            computed: false,
        }
    }

    /// Append a generator. Its own interval is replaced by the working
    /// interval when [`Aggregator::compute`] runs.
    pub fn add_generator(&mut self, generator: PeriodicGenerator) {
        self.generators.push(generator);
    }

    /// Return the working interval.
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Return the generators in insertion order.
    pub fn generators(&self) -> &[PeriodicGenerator] {
        &self.generators
    }

    /// Return whether [`Aggregator::compute`] has completed.
    pub const fn is_computed(&self) -> bool {
        self.computed
    }

    /// Drive every generator over the working interval.
    ///
    /// Results are staged and only committed once every generator has
    /// succeeded, so a failed pass leaves the aggregator empty and
    /// uncomputed.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::AlreadyComputed`] on a second call, or
    /// [`GeneratorError::Arithmetic`] if any generator overflows.
    pub fn compute(&mut self) -> Result<(), GeneratorError> {
        if self.computed {
            return Err(GeneratorError::AlreadyComputed);
        }
        if self.interval.is_empty() {
            warn!(
                lower = %self.interval.lower(),
                upper = %self.interval.upper(),
                "working interval is empty; no instants will be produced"
            );
        }

        let mut distinct = BTreeSet::new();
        let mut all = Vec::new();

        for (index, generator) in self.generators.iter().enumerate() {
            let bound = generator.with_interval(self.interval);
            let emitted = bound.generate_into(&mut distinct, &mut all)?;
            debug!(generator = index, emitted, "generator contributed instants");
        }

        self.distinct = distinct;
        self.all = all;
        self.computed = true;

        info!(
            generators = self.generators.len(),
            total = self.all.len(),
            distinct = self.distinct.len(),
            "aggregate computation complete"
        );
        Ok(())
    }

    /// Return the number of distinct instants.
    pub fn distinct_count(&self) -> usize {
        self.distinct.len()
    }

    /// Return the number of instants produced, duplicates included.
    pub const fn total_count(&self) -> usize {
        self.all.len()
    }

    /// Return the distinct instants, ascending by value.
    pub const fn distinct_instants(&self) -> &BTreeSet<Rational> {
        &self.distinct
    }

    /// Return every instant in generation order.
    pub fn all_instants(&self) -> &[Rational] {
        &self.all
    }

    /// Cross-check exact deduplication against `f64` deduplication.
    ///
    /// Converts every produced instant to `f64`, deduplicates by exact float
    /// value, and compares the count with [`Aggregator::distinct_count`].
    /// A mismatch means either two distinct rationals round to the same
    /// float or the exact path is wrong; it is reported, not raised.
    pub fn validate_against_approximation(&self) -> bool {
        let mut approximate: Vec<f64> = self.all.iter().map(|instant| instant.to_f64()).collect();
        approximate.sort_by(f64::total_cmp);
        approximate.dedup_by(|a, b| a.total_cmp(b).is_eq());

        let consistent = approximate.len() == self.distinct.len();
        if !consistent {
            warn!(
                exact = self.distinct.len(),
                approximate = approximate.len(),
                "exact and approximate deduplication disagree"
            );
        }
        consistent
    }

    /// Return every value produced at least twice, once each, in the order
    /// its second occurrence appears in [`Aggregator::all_instants`].
    pub fn duplicate_report(&self) -> Vec<Rational> {
        let mut counts: BTreeMap<Rational, usize> = BTreeMap::new();
        let mut duplicates = Vec::new();

        for instant in &self.all {
            let count = counts.entry(*instant).or_insert(0);
            *count = count.saturating_add(1);
            if *count == 2 {
                duplicates.push(*instant);
            }
        }
        duplicates
    }

    /// Collect the headline figures of the computation.
    pub fn summary(&self) -> Summary {
        Summary {
            interval: self.interval,
            generators: self.generators.len(),
            total: self.total_count(),
            distinct: self.distinct_count(),
            duplicates: self.duplicate_report().len(),
            consistent: self.validate_against_approximation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    fn unit_generator() -> PeriodicGenerator {
        PeriodicGenerator::new(Rational::ZERO, r(1, 1), Interval::from_integers(0, 1)).unwrap()
    }

    #[test]
    fn reports_are_empty_before_compute() {
        let mut aggregator = Aggregator::new(Interval::from_integers(0, 5));
        aggregator.add_generator(unit_generator());

        assert!(!aggregator.is_computed());
        assert_eq!(aggregator.total_count(), 0);
        assert_eq!(aggregator.distinct_count(), 0);
        assert!(aggregator.duplicate_report().is_empty());
        assert!(aggregator.validate_against_approximation());
    }

    #[test]
    fn working_interval_overrides_generator_interval() {
        let mut aggregator = Aggregator::new(Interval::from_integers(0, 5));
        aggregator.add_generator(unit_generator());
        aggregator.compute().unwrap();

        assert_eq!(aggregator.total_count(), 4);
        assert_eq!(aggregator.generators().len(), 1);
    }

    #[test]
    fn second_compute_is_rejected() {
        let mut aggregator = Aggregator::new(Interval::from_integers(0, 5));
        aggregator.add_generator(unit_generator());
        aggregator.compute().unwrap();

        assert_eq!(aggregator.compute(), Err(GeneratorError::AlreadyComputed));
        assert_eq!(aggregator.total_count(), 4);
    }

    #[test]
    fn failed_compute_leaves_aggregator_untouched() {
        let interval = Interval::new(Rational::ZERO, r(i64::MAX, 1));
        let mut aggregator = Aggregator::new(interval);
        // i64::MAX is divisible by 7, so this one stops exactly on the bound.
        let sevenths = PeriodicGenerator::new(Rational::ZERO, r(i64::MAX / 7, 1), interval).unwrap();
        let halves = PeriodicGenerator::new(Rational::ZERO, r(i64::MAX / 2, 1), interval).unwrap();
        aggregator.add_generator(sevenths);
        aggregator.add_generator(halves);

        assert!(matches!(
            aggregator.compute(),
            Err(GeneratorError::Arithmetic { .. })
        ));
        assert!(!aggregator.is_computed());
        assert_eq!(aggregator.total_count(), 0);
        assert_eq!(aggregator.distinct_count(), 0);
    }

    #[test]
    fn duplicate_report_lists_each_value_once() {
        let mut aggregator = Aggregator::new(Interval::from_integers(0, 7));
        for period in [1, 2, 3] {
            let g = PeriodicGenerator::new(Rational::ZERO, r(period, 1), aggregator.interval())
                .unwrap();
            aggregator.add_generator(g);
        }
        aggregator.compute().unwrap();

        // 1..=6, then 2, 4, 6, then 3, 6
        assert_eq!(aggregator.total_count(), 11);
        assert_eq!(aggregator.distinct_count(), 6);
        assert_eq!(aggregator.duplicate_report(), vec![r(2, 1), r(4, 1), r(6, 1), r(3, 1)]);
    }

    #[test]
    fn duplicates_in_different_representations_are_counted_together() {
        let interval = Interval::from_integers(0, 2);
        let mut aggregator = Aggregator::new(interval);
        aggregator.add_generator(PeriodicGenerator::new(r(2, 4), r(1, 1), interval).unwrap());
        aggregator.add_generator(PeriodicGenerator::new(r(-3, 6), r(2, 2), interval).unwrap());
        aggregator.compute().unwrap();

        assert_eq!(aggregator.all_instants(), &[r(1, 2), r(3, 2), r(1, 2), r(3, 2)]);
        assert_eq!(aggregator.distinct_count(), 2);
        assert_eq!(aggregator.duplicate_report(), vec![r(1, 2), r(3, 2)]);
    }

    #[test]
    fn summary_collects_figures() {
        let mut aggregator = Aggregator::new(Interval::from_integers(0, 5));
        aggregator.add_generator(unit_generator());
        aggregator.add_generator(unit_generator());
        aggregator.compute().unwrap();

        let summary = aggregator.summary();
        assert_eq!(summary.generators, 2);
        assert_eq!(summary.total, 8);
        assert_eq!(summary.distinct, 4);
        assert_eq!(summary.duplicates, 4);
        assert!(summary.consistent);
    }

    #[test]
    fn float_collision_is_reported_as_inconsistent() {
        // Two distinct rationals that both round to 1.0 as f64.
        const SCALE: i64 = 1 << 60;
        let interval = Interval::from_integers(0, 1);
        let period = r(1, 1);
        let a = r(SCALE - 1, SCALE);
        let b = r(SCALE - 2, SCALE - 1);
        assert_ne!(a, b);
        assert!(a.to_f64().total_cmp(&b.to_f64()).is_eq());

        let mut aggregator = Aggregator::new(interval);
        aggregator.add_generator(PeriodicGenerator::new(a, period, interval).unwrap());
        aggregator.add_generator(PeriodicGenerator::new(b, period, interval).unwrap());
        aggregator.compute().unwrap();

        assert_eq!(aggregator.total_count(), 2);
        assert_eq!(aggregator.distinct_count(), 2);
        assert!(aggregator.duplicate_report().is_empty());
        assert!(!aggregator.validate_against_approximation());
    }
}
