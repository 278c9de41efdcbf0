use super::super::{SorptionError, coefficients::take};
use super::{AbsorptionFamily, ActivityModel, volume_ratios};

/// Heil activity-coefficient model.
///
/// Extends Wilson's local composition with an enthalpic term:
///
/// `ln γ₁ = −ln a₁ + x₂·(Λ₂₁/a₁ − Λ₁₂/a₂) + x₂²·(τ₂₁·(Λ₂₁/a₁)² + τ₁₂·Λ₁₂/a₂²)`
///
/// where `a₁ = x₁ + x₂·Λ₂₁`, `a₂ = x₂ + x₁·Λ₁₂`, `τᵢⱼ = Δλᵢⱼ/(R·T)`,
/// `Λ₁₂ = v₂/v₁·exp(−τ₁₂)` and `Λ₂₁ = v₁/v₂·exp(−τ₂₁)`.
///
/// Coefficients are `[Δλ₁₂, Δλ₂₁, v₁, v₂]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heil {
    d_lambda: [f64; 2],
    volumes: (f64, f64),
    r: f64,
}

impl Heil {
    /// Binds coefficients, with `r` the gas constant in J/(mol·K).
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than four values.
    pub fn new(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [d_lambda_12, d_lambda_21, v1, v2] = take::<4>(values, AbsorptionFamily::Heil.name())?;
        Ok(Self {
            d_lambda: [d_lambda_12, d_lambda_21],
            volumes: (v1, v2),
            r,
        })
    }
}

impl ActivityModel for Heil {
    fn family(&self) -> AbsorptionFamily {
        AbsorptionFamily::Heil
    }

    fn gamma(&self, t: f64, x: f64, v1: f64, v2: f64) -> f64 {
        let x2 = 1.0 - x;
        let tau_12 = self.d_lambda[0] / (self.r * t);
        let tau_21 = self.d_lambda[1] / (self.r * t);

        let (rho_21, rho_12) = volume_ratios(v1, v2, self.volumes);
        let lambda_12 = rho_21 * (-tau_12).exp();
        let lambda_21 = rho_12 * (-tau_21).exp();

        let a1 = x + x2 * lambda_21;
        let a2 = x2 + x * lambda_12;
        let a3 = lambda_21 / a1;
        let a4 = lambda_12 / a2;

        (-a1.ln() + x2 * (a3 - a4) + x2 * x2 * (tau_21 * a3 * a3 + tau_12 * a4 / a2)).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::sorption::IDEAL_GAS_CONSTANT;

    #[test]
    fn reference_activity() -> Result<(), SorptionError> {
        let heil = Heil::new(&[1_667.0, -4_626.0, 1.0, 1.0], IDEAL_GAS_CONSTANT)?;
        assert_relative_eq!(
            heil.gamma(323.07, 0.5864, -1.0, -1.0),
            0.209_879_985_413,
            max_relative = 1e-10
        );
        Ok(())
    }

    #[test]
    fn caller_volumes_replace_stored_ones() -> Result<(), SorptionError> {
        let heil = Heil::new(&[1_667.0, -4_626.0, 1.0, 1.0], IDEAL_GAS_CONSTANT)?;
        assert_relative_eq!(
            heil.gamma(353.15, 0.525, 1e-4, 3e-4),
            0.501_560_693_129,
            max_relative = 1e-10
        );
        Ok(())
    }

    #[test]
    fn ideal_without_interaction() -> Result<(), SorptionError> {
        let heil = Heil::new(&[0.0, 0.0, 1.0, 1.0], IDEAL_GAS_CONSTANT)?;
        assert_relative_eq!(heil.gamma(353.15, 0.3, -1.0, -1.0), 1.0, epsilon = 1e-14);
        Ok(())
    }
}
