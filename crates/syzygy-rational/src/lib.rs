//! Exact rational arithmetic for the Syzygy coincidence solver.
//!
//! Every instant the solver produces is a [`Rational`]: a fraction of two
//! `i64` values. Floating point never participates in generation, ordering,
//! or deduplication -- it is only used for the approximate cross-check at
//! the end of a run.
//!
//! # Arithmetic Model
//!
//! - **Fixed width**: numerator and denominator are `i64`. Every operation
//!   that can grow them is checked and returns [`RationalError::Overflow`]
//!   instead of wrapping.
//! - **Sign on the numerator**: the denominator is always strictly positive
//!   after construction.
//! - **Lazy reduction**: values are stored as given and reduced on demand
//!   with [`Rational::reduce`]. Reduction never changes the represented value.
//! - **One comparison rule**: ordering and equality both compare
//!   cross-products in `i128`, so `2/4 == 1/2` and sets keyed on
//!   [`Rational`] deduplicate by value regardless of representation.
//!
//! # Usage
//!
//! ```
//! use syzygy_rational::Rational;
//!
//! let a = Rational::new(1, 3)?;
//! let b = Rational::new(1, 6)?;
//!
//! let sum = a.checked_add(b)?;
//! assert_eq!(sum, Rational::new(1, 2)?);
//! assert_eq!(sum.reduced().to_string(), "1/2");
//! # Ok::<(), syzygy_rational::RationalError>(())
//! ```

pub mod rational;

// Re-export primary types at crate root.
pub use rational::Rational;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when constructing or combining rationals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RationalError {
    /// A rational was constructed with a zero denominator.
    #[error("rational denominator must be non-zero")]
    ZeroDenominator,

    /// An intermediate product or sum left the `i64` range.
    #[error("arithmetic overflow during rational {operation}")]
    Overflow {
        /// The operation that overflowed (e.g. "addition").
        operation: &'static str,
    },
}
