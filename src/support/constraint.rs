//! Type-level numeric constraints.
//!
//! Equilibrium correlations are only meaningful on part of the real line:
//! absolute temperatures and pressures are positive, mole fractions live in
//! `[0, 1]`, and solver settings such as tolerances must be strictly positive.
//! This module expresses those ranges as marker types:
//!
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//! - [`UnitInterval`]: Closed unit interval `0 ≤ x ≤ 1`
//!
//! Each marker implements [`Constraint<T>`], checked as
//! `NonNegative::check(&x)`.
//!
//! The Newton-Raphson repair policies in [`crate::support::numeric`] use these
//! checks to decide when an iterate has left its physical range.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::UnitInterval;

/// A trait for enforcing numeric invariants.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}
