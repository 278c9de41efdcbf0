use super::super::{SorptionError, coefficients::take};
use super::{AbsorptionFamily, ActivityModel, volume_ratios};

/// Wilson activity-coefficient model.
///
/// `ln γ₁ = −ln(x₁ + Λ₁₂·x₂) + x₂·(Λ₁₂/(x₁ + Λ₁₂·x₂) − Λ₂₁/(x₂ + Λ₂₁·x₁))`
/// with `Λ₁₂ = v₂/v₁·exp(−Δλ₁₂/(R·T))` and `Λ₂₁ = v₁/v₂·exp(−Δλ₂₁/(R·T))`.
///
/// Two coefficient layouts are registered:
///
/// - `wilson`: `[Λ₁₂, Λ₂₁, Δλ₁₂, Δλ₂₁, v₁, v₂]`. A non-zero `Λ₁₂` means
///   both `Λ` are taken as constants.
/// - `wilson-dl-t`: `[Δλ₁₂⁰, dΔλ₁₂/dT, Δλ₂₁⁰, dΔλ₂₁/dT, T_ref, v₁, v₂]`,
///   with `Δλ = Δλ⁰ + dΔλ/dT·(T − T_ref)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wilson {
    interaction: Interaction,
    volumes: (f64, f64),
    r: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Interaction {
    Constant {
        lambda_12: f64,
        lambda_21: f64,
    },
    Fixed {
        d_lambda_12: f64,
        d_lambda_21: f64,
    },
    Linear {
        d_lambda_12: f64,
        slope_12: f64,
        d_lambda_21: f64,
        slope_21: f64,
        t_ref: f64,
    },
}

impl Wilson {
    /// Binds the `wilson` layout, with `r` the gas constant in J/(mol·K).
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than six values.
    pub fn fixed(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [lambda_12, lambda_21, d_lambda_12, d_lambda_21, v1, v2] =
            take::<6>(values, AbsorptionFamily::Wilson.name())?;
        let interaction = if lambda_12 * lambda_12 == 0.0 {
            Interaction::Fixed {
                d_lambda_12,
                d_lambda_21,
            }
        } else {
            Interaction::Constant {
                lambda_12,
                lambda_21,
            }
        };
        Ok(Self {
            interaction,
            volumes: (v1, v2),
            r,
        })
    }

    /// Binds the `wilson-dl-t` layout.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than seven values.
    pub fn temperature_dependent(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [d_lambda_12, slope_12, d_lambda_21, slope_21, t_ref, v1, v2] =
            take::<7>(values, AbsorptionFamily::WilsonTemperatureDependent.name())?;
        Ok(Self {
            interaction: Interaction::Linear {
                d_lambda_12,
                slope_12,
                d_lambda_21,
                slope_21,
                t_ref,
            },
            volumes: (v1, v2),
            r,
        })
    }

    fn lambdas(&self, t: f64, v1: f64, v2: f64) -> (f64, f64) {
        let (d_lambda_12, d_lambda_21) = match self.interaction {
            Interaction::Constant {
                lambda_12,
                lambda_21,
            } => return (lambda_12, lambda_21),
            Interaction::Fixed {
                d_lambda_12,
                d_lambda_21,
            } => (d_lambda_12, d_lambda_21),
            Interaction::Linear {
                d_lambda_12,
                slope_12,
                d_lambda_21,
                slope_21,
                t_ref,
            } => (
                d_lambda_12 + slope_12 * (t - t_ref),
                d_lambda_21 + slope_21 * (t - t_ref),
            ),
        };

        let (rho_21, rho_12) = volume_ratios(v1, v2, self.volumes);
        let rt = self.r * t;
        (
            rho_21 * (-d_lambda_12 / rt).exp(),
            rho_12 * (-d_lambda_21 / rt).exp(),
        )
    }
}

impl ActivityModel for Wilson {
    fn family(&self) -> AbsorptionFamily {
        match self.interaction {
            Interaction::Linear { .. } => AbsorptionFamily::WilsonTemperatureDependent,
            Interaction::Constant { .. } | Interaction::Fixed { .. } => AbsorptionFamily::Wilson,
        }
    }

    fn gamma(&self, t: f64, x: f64, v1: f64, v2: f64) -> f64 {
        let (a_12, a_21) = self.lambdas(t, v1, v2);
        let x2 = 1.0 - x;
        (-(x + a_12 * x2).ln() + x2 * (a_12 / (x + a_12 * x2) - a_21 / (x2 + a_21 * x))).exp()
    }
}
