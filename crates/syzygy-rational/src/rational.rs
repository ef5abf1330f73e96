//! The [`Rational`] value type.
//!
//! A `Rational` is a numerator/denominator pair plus a flag recording
//! whether the pair is known to be in lowest terms. Construction and
//! arithmetic never reduce; [`Rational::reduce`] does, in place.

use core::cmp::Ordering;
use core::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::RationalError;

/// An exact fraction of two `i64` values.
///
/// The denominator is strictly positive for every constructed value. Two
/// rationals are equal when they represent the same number, whether or not
/// either has been reduced.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Rational {
    /// Signed numerator.
    numerator: i64,
    /// Strictly positive denominator.
    denominator: i64,
    /// Whether `gcd(|numerator|, denominator) == 1` is known to hold.
    #[serde(skip)]
    reduced: bool,
}

impl Rational {
    /// The rational `0/1`.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
        reduced: true,
    };

    /// Create a rational from a numerator and denominator, unreduced.
    ///
    /// A negative denominator is moved onto the numerator so the stored
    /// denominator is always positive.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::ZeroDenominator`] if `denominator` is zero,
    /// or [`RationalError::Overflow`] if the sign cannot be normalized
    /// (either value is `i64::MIN` with a negative denominator).
    pub const fn new(numerator: i64, denominator: i64) -> Result<Self, RationalError> {
        if denominator == 0 {
            return Err(RationalError::ZeroDenominator);
        }
        if denominator > 0 {
            return Ok(Self {
                numerator,
                denominator,
                reduced: false,
            });
        }
        match (numerator.checked_neg(), denominator.checked_neg()) {
            (Some(numerator), Some(denominator)) => Ok(Self {
                numerator,
                denominator,
                reduced: false,
            }),
            _ => Err(RationalError::Overflow {
                operation: "sign normalization",
            }),
        }
    }

    /// Create the rational `value/1`.
    pub const fn from_integer(value: i64) -> Self {
        Self {
            numerator: value,
            denominator: 1,
            reduced: true,
        }
    }

    /// Return the stored numerator (not necessarily in lowest terms).
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Return the stored denominator (always positive).
    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Return whether this value is known to be in lowest terms.
    pub const fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Return whether the value is zero.
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Return whether the value is strictly greater than zero.
    pub const fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    /// Reduce to lowest terms in place.
    ///
    /// Idempotent. Zero becomes `0/1`. The represented value is unchanged.
    pub fn reduce(&mut self) {
        if self.reduced {
            return;
        }
        if self.numerator == 0 {
            self.denominator = 1;
            self.reduced = true;
            return;
        }

        // denominator >= 1, so the gcd is in 1..=denominator and fits in i64.
        let divisor = gcd(self.numerator.unsigned_abs(), self.denominator.unsigned_abs());
        let Ok(divisor) = i64::try_from(divisor) else {
            return;
        };
        if let (Some(numerator), Some(denominator)) = (
            self.numerator.checked_div(divisor),
            self.denominator.checked_div(divisor),
        ) {
            self.numerator = numerator;
            self.denominator = denominator;
            self.reduced = true;
        }
    }

    /// Return this value in lowest terms.
    #[must_use]
    pub fn reduced(mut self) -> Self {
        self.reduce();
        self
    }

    /// Exact addition, unreduced.
    ///
    /// Computes `(a.n * b.d + b.n * a.d) / (a.d * b.d)`. Magnitudes grow with
    /// every unreduced addition; callers that add repeatedly should reduce
    /// between steps.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::Overflow`] if any intermediate leaves the
    /// `i64` range.
    pub const fn checked_add(self, rhs: Self) -> Result<Self, RationalError> {
        const OVERFLOW: RationalError = RationalError::Overflow {
            operation: "addition",
        };

        let Some(left) = self.numerator.checked_mul(rhs.denominator) else {
            return Err(OVERFLOW);
        };
        let Some(right) = rhs.numerator.checked_mul(self.denominator) else {
            return Err(OVERFLOW);
        };
        let Some(numerator) = left.checked_add(right) else {
            return Err(OVERFLOW);
        };
        let Some(denominator) = self.denominator.checked_mul(rhs.denominator) else {
            return Err(OVERFLOW);
        };

        Ok(Self {
            numerator,
            denominator,
            reduced: false,
        })
    }

    /// Exact negation.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::Overflow`] if the numerator is `i64::MIN`.
    pub const fn checked_neg(self) -> Result<Self, RationalError> {
        match self.numerator.checked_neg() {
            Some(numerator) => Ok(Self {
                numerator,
                denominator: self.denominator,
                reduced: self.reduced,
            }),
            None => Err(RationalError::Overflow {
                operation: "negation",
            }),
        }
    }

    /// Exact subtraction, unreduced.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::Overflow`] if any intermediate leaves the
    /// `i64` range.
    pub const fn checked_sub(self, rhs: Self) -> Result<Self, RationalError> {
        match rhs.checked_neg() {
            Ok(negated) => self.checked_add(negated),
            Err(e) => Err(e),
        }
    }

    /// Exact multiplication by an integer, unreduced.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::Overflow`] if the new numerator leaves the
    /// `i64` range.
    pub const fn checked_mul_integer(self, factor: i64) -> Result<Self, RationalError> {
        match self.numerator.checked_mul(factor) {
            Some(numerator) => Ok(Self {
                numerator,
                denominator: self.denominator,
                reduced: false,
            }),
            None => Err(RationalError::Overflow {
                operation: "multiplication",
            }),
        }
    }

    /// Exact division by a non-zero integer, unreduced.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::ZeroDenominator`] if `divisor` is zero, or
    /// [`RationalError::Overflow`] if the new denominator leaves the `i64`
    /// range.
    pub const fn checked_div_integer(self, divisor: i64) -> Result<Self, RationalError> {
        match self.denominator.checked_mul(divisor) {
            Some(denominator) => Self::new(self.numerator, denominator),
            None => Err(RationalError::Overflow {
                operation: "division",
            }),
        }
    }

    /// Lossy conversion to `f64`.
    ///
    /// Only for approximate cross-checks. Never use the result for ordering
    /// or equality of instants.
    pub const fn to_f64(self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let value = self.numerator as f64 / self.denominator as f64;
        value
    }

    /// Decimal approximation, correct to 28 significant digits.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::Overflow`] if the quotient does not fit in a
    /// [`Decimal`].
    pub fn to_decimal(self) -> Result<Decimal, RationalError> {
        Decimal::from(self.numerator)
            .checked_div(Decimal::from(self.denominator))
            .ok_or(RationalError::Overflow {
                operation: "decimal conversion",
            })
    }
}

/// Greatest common divisor by Euclid's algorithm. `gcd(x, 0) == x`.
const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while let Some(r) = a.checked_rem(b) {
        a = b;
        b = r;
    }
    a
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl Ord for Rational {
    /// Compare by the sign of `a.n * b.d - b.n * a.d`.
    ///
    /// Products of two `i64` values always fit in `i128`, so this never
    /// overflows and is valid on unreduced values.
    fn cmp(&self, other: &Self) -> Ordering {
        let left = i128::from(self.numerator).saturating_mul(i128::from(other.denominator));
        let right = i128::from(other.numerator).saturating_mul(i128::from(self.denominator));
        left.cmp(&right)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rational {}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rust_decimal_macros::dec;

    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn zero_denominator_rejected() {
        assert_eq!(Rational::new(1, 0), Err(RationalError::ZeroDenominator));
        assert_eq!(Rational::new(0, 0), Err(RationalError::ZeroDenominator));
    }

    #[test]
    fn construction_keeps_pair_unreduced() {
        let x = r(6, 8);
        assert_eq!(x.numerator(), 6);
        assert_eq!(x.denominator(), 8);
        assert!(!x.is_reduced());
    }

    #[test]
    fn negative_denominator_moves_sign() {
        let x = r(3, -4);
        assert_eq!(x.numerator(), -3);
        assert_eq!(x.denominator(), 4);

        let y = r(-3, -4);
        assert_eq!(y.numerator(), 3);
        assert_eq!(y.denominator(), 4);
    }

    #[test]
    fn sign_normalization_overflow_detected() {
        assert!(matches!(
            Rational::new(1, i64::MIN),
            Err(RationalError::Overflow { .. })
        ));
        assert!(matches!(
            Rational::new(i64::MIN, -1),
            Err(RationalError::Overflow { .. })
        ));
    }

    #[test]
    fn reduce_divides_out_gcd() {
        let mut x = r(-12, 66);
        x.reduce();
        assert_eq!(x.numerator(), -2);
        assert_eq!(x.denominator(), 11);
        assert!(x.is_reduced());
    }

    #[test]
    fn reduce_is_idempotent() {
        let once = r(48, 36).reduced();
        let twice = once.reduced();
        assert_eq!(once.numerator(), twice.numerator());
        assert_eq!(once.denominator(), twice.denominator());
        assert_eq!(twice.to_string(), "4/3");
    }

    #[test]
    fn zero_reduces_to_canonical_form() {
        let x = r(0, 17).reduced();
        assert_eq!(x.numerator(), 0);
        assert_eq!(x.denominator(), 1);
        assert!(x.is_zero());
        assert_eq!(x, Rational::ZERO);
    }

    #[test]
    fn equality_ignores_representation() {
        assert_eq!(r(1, 2), r(2, 4));
        assert_eq!(r(-3, 9), r(1, -3));
        assert_ne!(r(1, 2), r(1, 3));
    }

    #[test]
    fn equality_does_not_reduce_operands() {
        let a = r(2, 4);
        let b = r(3, 6);
        assert_eq!(a, b);
        assert!(!a.is_reduced());
        assert!(!b.is_reduced());
        assert_eq!(a.numerator(), 2);
    }

    #[test]
    fn ordering_uses_cross_products() {
        assert!(r(1, 3) < r(1, 2));
        assert!(r(-1, 2) < r(-1, 3));
        assert!(r(7, 2) > r(3, 1));
        assert_eq!(r(10, 20).cmp(&r(1, 2)), Ordering::Equal);
    }

    #[test]
    fn ordering_on_extreme_values_does_not_overflow() {
        let big = r(i64::MAX, 1);
        let small = r(i64::MIN, 1);
        let tiny = r(1, i64::MAX);
        assert!(small < big);
        assert!(tiny < r(1, 2));
        assert!(Rational::ZERO < tiny);
    }

    #[test]
    fn addition_is_exact_and_unreduced() {
        let sum = r(1, 6).checked_add(r(1, 3)).unwrap();
        assert_eq!(sum.numerator(), 9);
        assert_eq!(sum.denominator(), 18);
        assert!(!sum.is_reduced());
        assert_eq!(sum, r(1, 2));
    }

    #[test]
    fn add_then_reduce_independent_of_prereduction() {
        let pairs = [((2, 4), (6, 9)), ((-10, 66), (24, 22)), ((0, 5), (7, 14))];
        for ((n1, d1), (n2, d2)) in pairs {
            let raw = r(n1, d1).checked_add(r(n2, d2)).unwrap().reduced();
            let pre = r(n1, d1)
                .reduced()
                .checked_add(r(n2, d2).reduced())
                .unwrap()
                .reduced();
            assert_eq!(raw.numerator(), pre.numerator());
            assert_eq!(raw.denominator(), pre.denominator());
        }
    }

    #[test]
    fn addition_overflow_detected() {
        let a = r(i64::MAX, 1);
        assert_eq!(
            a.checked_add(r(1, 1)),
            Err(RationalError::Overflow {
                operation: "addition"
            })
        );

        let b = r(1, i64::MAX);
        assert!(b.checked_add(r(1, 2)).is_err());
    }

    #[test]
    fn subtraction_and_negation() {
        assert_eq!(r(1, 2).checked_sub(r(1, 3)).unwrap(), r(1, 6));
        assert_eq!(r(2, 5).checked_neg().unwrap(), r(-2, 5));
        assert!(r(i64::MIN, 1).checked_neg().is_err());
    }

    #[test]
    fn multiplication_by_integer() {
        assert_eq!(r(12, 11).checked_mul_integer(3).unwrap(), r(36, 11));
        assert_eq!(r(1, 2).checked_mul_integer(-4).unwrap(), r(-2, 1));
        assert_eq!(r(5, 7).checked_mul_integer(0).unwrap(), Rational::ZERO);
        assert_eq!(
            r(i64::MAX, 3).checked_mul_integer(2),
            Err(RationalError::Overflow {
                operation: "multiplication"
            })
        );
    }

    #[test]
    fn division_by_integer() {
        assert_eq!(r(12, 11).checked_div_integer(6).unwrap(), r(2, 11));
        assert_eq!(r(1, 2).checked_div_integer(-2).unwrap(), r(-1, 4));
        assert_eq!(
            r(1, 2).checked_div_integer(0),
            Err(RationalError::ZeroDenominator)
        );
    }

    #[test]
    fn sign_predicates() {
        assert!(r(1, 7).is_positive());
        assert!(!r(-1, 7).is_positive());
        assert!(!Rational::ZERO.is_positive());
        assert!(r(0, 3).is_zero());
    }

    #[test]
    fn float_conversion_is_approximate() {
        assert!((r(1, 4).to_f64() - 0.25).abs() < f64::EPSILON);
        assert!((r(-10, 11).to_f64() + 0.909_090_909).abs() < 1e-9);
    }

    #[test]
    fn decimal_conversion() {
        assert_eq!(r(3, 4).to_decimal().unwrap(), dec!(0.75));
        assert_eq!(r(-12, 1).to_decimal().unwrap(), dec!(-12));
    }

    #[test]
    fn from_integer_is_reduced() {
        let x = Rational::from(5);
        assert!(x.is_reduced());
        assert_eq!(x.to_string(), "5/1");
    }

    #[test]
    fn btree_set_deduplicates_by_value() {
        let set: BTreeSet<Rational> = [r(1, 2), r(2, 4), r(3, 6), r(1, 3)].into_iter().collect();
        assert_eq!(set.len(), 2);
        let ordered: Vec<String> = set.iter().map(ToString::to_string).collect();
        assert_eq!(ordered, vec!["1/3", "1/2"]);
    }

    #[test]
    fn serializes_numerator_and_denominator() {
        let json = serde_json::to_value(r(-2, 11)).unwrap();
        assert_eq!(json["numerator"], -2);
        assert_eq!(json["denominator"], 11);
        assert!(json.get("reduced").is_none());
    }
}
