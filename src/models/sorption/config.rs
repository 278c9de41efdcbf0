use crate::support::numeric::{DifferenceSteps, NewtonConfig, QuadratureConfig};

/// Ideal gas constant in J/(mol·K), as used by the reference correlations.
pub const IDEAL_GAS_CONSTANT: f64 = 8.314_462_618;

/// Engine-wide numeric settings.
///
/// Every [`WorkingPair`](super::WorkingPair) carries one of these. The
/// defaults reproduce the published reference values; changing them is mostly
/// useful for studying the sensitivity of a result to the numeric fallbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumConfig {
    /// Newton-Raphson tolerance and iteration cap.
    pub newton: NewtonConfig,

    /// Symmetric-difference steps per variable kind.
    pub steps: DifferenceSteps,

    /// Trapezoid count for the numeric spreading pressure.
    pub quadrature: QuadratureConfig,

    /// Ideal gas constant in J/(mol·K).
    pub gas_constant: f64,
}

impl Default for EquilibriumConfig {
    fn default() -> Self {
        Self {
            newton: NewtonConfig::default(),
            steps: DifferenceSteps::default(),
            quadrature: QuadratureConfig::default(),
            gas_constant: IDEAL_GAS_CONSTANT,
        }
    }
}
