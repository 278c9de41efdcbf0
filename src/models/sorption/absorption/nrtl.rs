use super::super::{SorptionError, coefficients::take};
use super::{AbsorptionFamily, ActivityModel};

/// Non-random two-liquid (NRTL) activity-coefficient model.
///
/// `ln γ₁ = x₂²·(τ₂₁·(G₂₁/(x₁ + x₂·G₂₁))² + τ₁₂·G₁₂/(x₂ + x₁·G₁₂)²)` with
/// `τᵢⱼ = Δgᵢⱼ/(R·T)` and `Gᵢⱼ = exp(−α·τᵢⱼ)`.
///
/// Layouts: `nrtl-fixeddg` is `[Δg₁₂, Δg₂₁, α]`; `nrtl-dg-t` is
/// `[g₁₂, g₂₁, dg₁₂/dT, dg₂₁/dT, α]` with `Δg = g + dg/dT·T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nrtl {
    dg: [f64; 2],
    slope: Option<[f64; 2]>,
    alpha: f64,
    r: f64,
}

impl Nrtl {
    /// Binds the `nrtl-fixeddg` layout.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than three values.
    pub fn fixed(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [dg_12, dg_21, alpha] = take::<3>(values, AbsorptionFamily::NrtlFixed.name())?;
        Ok(Self {
            dg: [dg_12, dg_21],
            slope: None,
            alpha,
            r,
        })
    }

    /// Binds the `nrtl-dg-t` layout.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than five values.
    pub fn temperature_dependent(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [g_12, g_21, slope_12, slope_21, alpha] =
            take::<5>(values, AbsorptionFamily::NrtlTemperatureDependent.name())?;
        Ok(Self {
            dg: [g_12, g_21],
            slope: Some([slope_12, slope_21]),
            alpha,
            r,
        })
    }
}

impl ActivityModel for Nrtl {
    fn family(&self) -> AbsorptionFamily {
        if self.slope.is_some() {
            AbsorptionFamily::NrtlTemperatureDependent
        } else {
            AbsorptionFamily::NrtlFixed
        }
    }

    fn gamma(&self, t: f64, x: f64, _: f64, _: f64) -> f64 {
        let [slope_12, slope_21] = self.slope.unwrap_or_default();
        let tau_12 = (self.dg[0] + slope_12 * t) / (self.r * t);
        let tau_21 = (self.dg[1] + slope_21 * t) / (self.r * t);
        let g_12 = (-self.alpha * tau_12).exp();
        let g_21 = (-self.alpha * tau_21).exp();

        let x2 = 1.0 - x;
        (x2 * x2
            * (tau_21 * (g_21 / (x + x2 * g_21)).powi(2) + tau_12 * g_12 / (x2 + x * g_12).powi(2)))
        .exp()
    }
}
