use super::super::{SorptionError, coefficients::take};
use super::{AbsorptionFamily, ActivityModel, volume_ratios};

/// Tsuboka-Katayama activity-coefficient model.
///
/// Wilson's expression corrected by the same expression evaluated with the
/// pure volume ratios `ρ₁₂ = v₂/v₁` and `ρ₂₁ = v₁/v₂`:
///
/// `ln γ₁ = −ln(x₁ + x₂·Λ₂₁) + x₂·(Λ₂₁/(x₁ + x₂·Λ₂₁) − Λ₁₂/(x₂ + x₁·Λ₁₂))
///        + ln(x₁ + x₂·ρ₂₁) − x₂·(ρ₂₁/(x₁ + x₂·ρ₂₁) − ρ₁₂/(x₂ + x₁·ρ₁₂))`
///
/// with `Λᵢⱼ = ρᵢⱼ·exp(−Δλᵢⱼ/(R·T))`. Coefficients are `[Δλ₁₂, Δλ₂₁, v₁, v₂]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TsubokaKatayama {
    d_lambda: [f64; 2],
    volumes: (f64, f64),
    r: f64,
}

impl TsubokaKatayama {
    /// Binds coefficients, with `r` the gas constant in J/(mol·K).
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than four values.
    pub fn new(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [d_lambda_12, d_lambda_21, v1, v2] =
            take::<4>(values, AbsorptionFamily::TsubokaKatayama.name())?;
        Ok(Self {
            d_lambda: [d_lambda_12, d_lambda_21],
            volumes: (v1, v2),
            r,
        })
    }
}

impl ActivityModel for TsubokaKatayama {
    fn family(&self) -> AbsorptionFamily {
        AbsorptionFamily::TsubokaKatayama
    }

    fn gamma(&self, t: f64, x: f64, v1: f64, v2: f64) -> f64 {
        let x2 = 1.0 - x;
        let (rho_12, rho_21) = volume_ratios(v1, v2, self.volumes);
        let lambda_12 = rho_12 * (-self.d_lambda[0] / (self.r * t)).exp();
        let lambda_21 = rho_21 * (-self.d_lambda[1] / (self.r * t)).exp();

        let a1 = x + x2 * lambda_21;
        let a2 = x2 + x * lambda_12;
        let a3 = x + x2 * rho_21;
        let a4 = x2 + x * rho_12;

        (-a1.ln() + x2 * (lambda_21 / a1 - lambda_12 / a2) + a3.ln()
            - x2 * (rho_21 / a3 - rho_12 / a4))
            .exp()
    }
}
