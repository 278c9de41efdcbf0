use crate::support::numeric::{GuessPolicy, Repair, newton};

use super::super::{
    EquilibriumConfig, SorptionError,
    coefficients::{Term, head_and_terms, take},
};
use super::cubic::Cubic;

/// Vapor-pressure correlations, keyed by their coefficient-store names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaporPressureEquation {
    /// `ln(p/pc) = Tc/T · Σ aᵢ·(1 − T/Tc)^eᵢ`.
    Eos1,
    /// `ln(p/pc) = p₂/θ + Σ pₖ·θ^pₖ₊₁ + p₁₁·(1 − θ)^p₁₂` with `θ = T/Tc`.
    Eos2,
    /// `ln(p/pc) = p₂/T + p₃·T^p₄ + p₅·T^p₆ + p₇·(1 − T/Tc)^p₈`.
    Eos3,
    /// `p = 10^(a − b/(T + c))` in bar.
    Antoine,
    /// Saturation from the equal-fugacity condition of a cubic equation of state.
    Cubic,
}

impl VaporPressureEquation {
    /// Every supported equation, in registry order.
    pub const ALL: [Self; 5] = [Self::Eos1, Self::Eos2, Self::Eos3, Self::Antoine, Self::Cubic];

    /// Looks up an equation by its case-sensitive store name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|equation| equation.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Eos1 => "VaporPressure_EoS1",
            Self::Eos2 => "VaporPressure_EoS2",
            Self::Eos3 => "VaporPressure_EoS3",
            Self::Antoine => "VaporPressure_Antoine",
            Self::Cubic => "VaporPressure_EoSCubic",
        }
    }
}

/// A vapor-pressure correlation bound to its coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct VaporPressure {
    form: Form,
}

#[derive(Debug, Clone, PartialEq)]
enum Form {
    Eos1 {
        critical_temperature: f64,
        critical_pressure: f64,
        terms: Vec<Term>,
    },
    Eos2 {
        critical_temperature: f64,
        critical_pressure: f64,
        p: [f64; 11],
    },
    Eos3 {
        critical_temperature: f64,
        critical_pressure: f64,
        p: [f64; 7],
    },
    Antoine {
        a: f64,
        b: f64,
        c: f64,
    },
    Cubic(Cubic),
}

impl VaporPressure {
    /// Binds `equation` to a coefficient vector.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] if `values` is too short.
    pub fn new(equation: VaporPressureEquation, values: &[f64]) -> Result<Self, SorptionError> {
        let name = equation.name();
        let form = match equation {
            VaporPressureEquation::Eos1 => {
                let ([critical_temperature, critical_pressure], terms) =
                    head_and_terms::<2>(values, name)?;
                Form::Eos1 {
                    critical_temperature,
                    critical_pressure,
                    terms,
                }
            }
            VaporPressureEquation::Eos2 => {
                let [tc, pc, p @ ..] = take::<13>(values, name)?;
                Form::Eos2 {
                    critical_temperature: tc,
                    critical_pressure: pc,
                    p,
                }
            }
            VaporPressureEquation::Eos3 => {
                let [tc, pc, p @ ..] = take::<9>(values, name)?;
                Form::Eos3 {
                    critical_temperature: tc,
                    critical_pressure: pc,
                    p,
                }
            }
            VaporPressureEquation::Antoine => {
                let [a, b, c] = take::<3>(values, name)?;
                Form::Antoine { a, b, c }
            }
            VaporPressureEquation::Cubic => Form::Cubic(Cubic::new(take::<9>(values, name)?)),
        };
        Ok(Self { form })
    }

    #[must_use]
    pub fn equation(&self) -> VaporPressureEquation {
        match self.form {
            Form::Eos1 { .. } => VaporPressureEquation::Eos1,
            Form::Eos2 { .. } => VaporPressureEquation::Eos2,
            Form::Eos3 { .. } => VaporPressureEquation::Eos3,
            Form::Antoine { .. } => VaporPressureEquation::Antoine,
            Form::Cubic(_) => VaporPressureEquation::Cubic,
        }
    }

    /// Returns the saturation pressure in Pa at temperature `t` in K.
    ///
    /// # Errors
    ///
    /// Only the cubic form fails, when `t` is at or above the critical
    /// temperature or the fugacity iteration does not settle.
    pub fn p_sat(&self, t: f64, config: &EquilibriumConfig) -> Result<f64, SorptionError> {
        match &self.form {
            Form::Eos1 {
                critical_temperature,
                critical_pressure,
                terms,
            } => {
                let theta = t / critical_temperature;
                let sum: f64 = terms.iter().map(|term| term.value(1.0 - theta)).sum();
                Ok(critical_pressure * (sum / theta).exp())
            }
            Form::Eos2 {
                critical_temperature,
                critical_pressure,
                p,
            } => {
                let theta = t / critical_temperature;
                let series: f64 = [0, 2, 4, 6]
                    .into_iter()
                    .map(|k| p[k + 1] * theta.powf(p[k + 2]))
                    .sum();
                let exponent = p[0] / theta + series + p[9] * (1.0 - theta).powf(p[10]);
                Ok(critical_pressure * exponent.exp())
            }
            Form::Eos3 {
                critical_temperature,
                critical_pressure,
                p,
            } => {
                let exponent = p[0] / t
                    + p[1] * t.powf(p[2])
                    + p[3] * t.powf(p[4])
                    + p[5] * (1.0 - t / critical_temperature).powf(p[6]);
                Ok(critical_pressure * exponent.exp())
            }
            Form::Antoine { a, b, c } => Ok(10f64.powf(a - b / (t + c)) * 1e5),
            Form::Cubic(cubic) => cubic.p_sat(t, config),
        }
    }

    /// Returns `dp_sat/dT` in Pa/K at temperature `t` in K.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`VaporPressure::p_sat`].
    pub fn dp_sat_dt(&self, t: f64, config: &EquilibriumConfig) -> Result<f64, SorptionError> {
        match &self.form {
            Form::Eos1 {
                critical_temperature,
                terms,
                ..
            } => {
                let theta = t / critical_temperature;
                let reduced = 1.0 - theta;
                let sum: f64 = terms.iter().map(|term| term.value(reduced)).sum();
                let slope: f64 = terms.iter().map(|term| term.slope(reduced)).sum();
                let p = self.p_sat(t, config)?;
                Ok(-p / t * (sum / theta + slope))
            }
            Form::Eos2 {
                critical_temperature: tc,
                p,
                ..
            } => {
                let theta = t / tc;
                let series: f64 = [0, 2, 4, 6]
                    .into_iter()
                    .map(|k| p[k + 2] * p[k + 1] * theta.powf(p[k + 2] - 1.0) / tc)
                    .sum();
                let bracket = -p[0] * tc / (t * t) + series
                    - p[10] * p[9] / tc * (1.0 - theta).powf(p[10] - 1.0);
                Ok(self.p_sat(t, config)? * bracket)
            }
            Form::Eos3 {
                critical_temperature: tc,
                p,
                ..
            } => {
                let bracket = -p[0] / (t * t)
                    + p[1] * p[2] * t.powf(p[2] - 1.0)
                    + p[3] * p[4] * t.powf(p[4] - 1.0)
                    - p[5] * p[6] / tc * (1.0 - t / tc).powf(p[6] - 1.0);
                Ok(self.p_sat(t, config)? * bracket)
            }
            Form::Antoine { b, c, .. } => {
                Ok(b * std::f64::consts::LN_10 / (c + t).powi(2) * self.p_sat(t, config)?)
            }
            Form::Cubic(cubic) => cubic.dp_sat_dt(t, config),
        }
    }

    /// Returns the saturation temperature in K at pressure `p` in Pa.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::Numeric`] if the inversion does not converge.
    pub fn t_sat(&self, p: f64, config: &EquilibriumConfig) -> Result<f64, SorptionError> {
        let policy = match &self.form {
            Form::Antoine { a, b, c } => return Ok(-b / ((p / 1e5).log10() - a) - c),
            Form::Cubic(cubic) => return cubic.t_sat(p, config),
            Form::Eos1 {
                critical_temperature,
                ..
            }
            | Form::Eos3 {
                critical_temperature,
                ..
            } => saturation_policy(253.15, *critical_temperature),
            Form::Eos2 {
                critical_temperature,
                ..
            } => saturation_policy(313.15, *critical_temperature),
        };

        newton(
            |t| self.p_sat(t, config),
            |t| self.dp_sat_dt(t, config),
            p,
            policy,
            &config.newton,
        )
    }
}

/// Keeps saturation-temperature iterates between absolute zero and the critical point.
fn saturation_policy(initial: f64, critical_temperature: f64) -> GuessPolicy {
    GuessPolicy::new(
        initial,
        Repair::Outside {
            lower: 0.0,
            upper: critical_temperature,
            below: 5.0,
            above: critical_temperature - 5.0,
        },
    )
}
