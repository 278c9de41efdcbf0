use crate::support::constraint::{Constraint, ConstraintError, NonNegative, UnitInterval};

use super::{NewtonConfig, NumericError};

/// Rule applied to every Newton iterate after the update step.
///
/// Correlations are often undefined outside a physical range (a negative
/// absolute temperature, a mole fraction above one). Each correlation names
/// its own rule, so the heuristic stays visible and testable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Repair {
    /// Iterates are used as computed.
    None,

    /// Negative or `NaN` iterates are replaced by `fallback`.
    Negative { fallback: f64 },

    /// Iterates below `lower` are replaced by `below`, and iterates above
    /// `upper` are replaced by `above`.
    Outside {
        lower: f64,
        upper: f64,
        below: f64,
        above: f64,
    },

    /// Iterates are clamped into `[0, 1]`.
    UnitInterval,
}

impl Repair {
    /// Applies the rule to a freshly updated iterate.
    #[must_use]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::None => x,
            Self::Negative { fallback } => match NonNegative::check(&x) {
                Ok(()) => x,
                Err(_) => fallback,
            },
            Self::Outside {
                lower,
                upper,
                below,
                above,
            } => {
                if x < lower {
                    below
                } else if x > upper {
                    above
                } else {
                    x
                }
            }
            Self::UnitInterval => match UnitInterval::check(&x) {
                Err(ConstraintError::BelowMinimum) => 0.0,
                Err(ConstraintError::AboveMaximum) => 1.0,
                _ => x,
            },
        }
    }
}

/// Initial guess and repair rule for one Newton-Raphson inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessPolicy {
    pub initial: f64,
    pub repair: Repair,
}

impl GuessPolicy {
    #[must_use]
    pub const fn new(initial: f64, repair: Repair) -> Self {
        Self { initial, repair }
    }

    /// Starts at `initial` and replaces negative iterates by `fallback`.
    #[must_use]
    pub const fn non_negative(initial: f64, fallback: f64) -> Self {
        Self::new(initial, Repair::Negative { fallback })
    }

    /// Starts at `initial` and clamps iterates into `[0, 1]`.
    #[must_use]
    pub const fn unit_interval(initial: f64) -> Self {
        Self::new(initial, Repair::UnitInterval)
    }
}

/// Solves `value(x) = target` with Newton-Raphson.
///
/// Iterates `x ← repair(x − (value(x) − target) / slope(x))` starting from
/// `policy.initial` until `|value(x) − target| ≤ config.tolerance`.
///
/// # Errors
///
/// Errors from `value` or `slope` are returned unchanged. Otherwise returns
/// [`NumericError::MaxIters`] when the iteration budget is exhausted,
/// [`NumericError::ZeroSlope`] when the slope vanishes, and
/// [`NumericError::NonFinite`] when an iterate or residual is `NaN` or infinite.
pub fn newton<E, F, D>(
    mut value: F,
    mut slope: D,
    target: f64,
    policy: GuessPolicy,
    config: &NewtonConfig,
) -> Result<f64, E>
where
    E: From<NumericError>,
    F: FnMut(f64) -> Result<f64, E>,
    D: FnMut(f64) -> Result<f64, E>,
{
    let mut x = policy.initial;
    let mut residual = f64::NAN;

    for iters in 0..config.max_iters {
        residual = value(x)? - target;
        if !residual.is_finite() {
            return Err(NumericError::NonFinite { iters }.into());
        }
        if residual.abs() <= config.tolerance {
            return Ok(x);
        }

        let dfdx = slope(x)?;
        if dfdx == 0.0 {
            return Err(NumericError::ZeroSlope { x }.into());
        }

        x = policy.repair.apply(x - residual / dfdx);
        if !x.is_finite() {
            return Err(NumericError::NonFinite { iters: iters + 1 }.into());
        }
    }

    Err(NumericError::MaxIters {
        residual,
        iters: config.max_iters,
    }
    .into())
}
