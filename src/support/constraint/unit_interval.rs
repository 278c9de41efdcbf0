use std::cmp::Ordering;

use num_traits::{One, Zero};

use super::{Constraint, ConstraintError};

/// Marker type enforcing that a value lies in the closed unit interval: `0 ≤ x ≤ 1`.
///
/// Mole fractions in activity-coefficient correlations are checked against
/// this constraint.
///
/// # Examples
///
/// ```
/// use sorption_props::support::constraint::{Constraint, ConstraintError, UnitInterval};
///
/// assert!(UnitInterval::check(&0.25).is_ok());
/// assert_eq!(UnitInterval::check(&-0.1), Err(ConstraintError::BelowMinimum));
/// assert_eq!(UnitInterval::check(&1.1), Err(ConstraintError::AboveMaximum));
/// assert!(UnitInterval::check(&f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

impl<T: PartialOrd + Zero + One> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}
