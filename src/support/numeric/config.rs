use crate::support::constraint::{Constraint, ConstraintError, StrictlyPositive};

/// Solver configuration for Newton-Raphson iterations.
///
/// The defaults (`1e-8` absolute tolerance on the residual, 50 iterations) are
/// shared by every correlation so that results stay comparable with published
/// reference values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig {
    /// Absolute tolerance on `|f(x) − target|`.
    pub tolerance: f64,

    /// Maximum iteration count before reporting non-convergence.
    pub max_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iters: 50,
        }
    }
}

impl NewtonConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `tolerance` is not strictly positive or
    /// if `max_iters` is zero.
    pub fn new(tolerance: f64, max_iters: usize) -> Result<Self, ConstraintError> {
        StrictlyPositive::check(&tolerance)?;
        StrictlyPositive::check(&max_iters)?;
        Ok(Self {
            tolerance,
            max_iters,
        })
    }
}

/// Fixed step sizes for symmetric differences, one per variable kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferenceSteps {
    /// Step for pressures, in Pa.
    pub pressure: f64,

    /// Step for temperatures, in K.
    pub temperature: f64,

    /// Step for loadings and mass-based concentrations, in kg/kg.
    pub loading: f64,

    /// Step for mole fractions, in mol/mol.
    pub mole_fraction: f64,

    /// Step for temperatures inside cubic equation-of-state saturation
    /// solves, in K.
    pub saturation_temperature: f64,
}

impl Default for DifferenceSteps {
    fn default() -> Self {
        Self {
            pressure: 1e-3,
            temperature: 1e-3,
            loading: 1e-5,
            mole_fraction: 1e-5,
            saturation_temperature: 1e-4,
        }
    }
}

/// Configuration for fixed-step quadrature.
///
/// The spreading pressure integrates over `ln p`, where `10⁴` steps already
/// reach a relative error near `10⁻⁸` for the stock isotherms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadratureConfig {
    /// Number of trapezoids over the integration interval.
    pub steps: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self { steps: 100_000 }
    }
}

impl QuadratureConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `steps` is zero.
    pub fn new(steps: usize) -> Result<Self, ConstraintError> {
        StrictlyPositive::check(&steps)?;
        Ok(Self { steps })
    }
}
