use super::super::{
    SorptionError,
    coefficients::{Term, head_and_terms},
};

/// Saturated-liquid-density correlations, keyed by their coefficient-store names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiquidDensityEquation {
    /// `X = Σ aᵢ·(1 − T/Tc)^eᵢ`, with `ρ = ρc·exp(X)` or `ρ = ρc·X`.
    Eos1,
}

impl LiquidDensityEquation {
    pub const ALL: [Self; 1] = [Self::Eos1];

    /// Looks up an equation by its case-sensitive store name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|equation| equation.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Eos1 => "SaturatedLiquidDensity_EoS1",
        }
    }
}

/// A saturated-liquid-density correlation bound to its coefficients.
///
/// Coefficients are `[Tc, ρc, flag, (aᵢ, eᵢ)…]`. A negative flag selects the
/// exponential form.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidDensity {
    critical_temperature: f64,
    critical_density: f64,
    exponential: bool,
    terms: Vec<Term>,
}

impl LiquidDensity {
    /// Binds `equation` to a coefficient vector.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] if `values` is too short.
    pub fn new(equation: LiquidDensityEquation, values: &[f64]) -> Result<Self, SorptionError> {
        match equation {
            LiquidDensityEquation::Eos1 => {
                let ([critical_temperature, critical_density, flag], terms) =
                    head_and_terms::<3>(values, equation.name())?;
                Ok(Self {
                    critical_temperature,
                    critical_density,
                    exponential: flag < 0.0,
                    terms,
                })
            }
        }
    }

    #[must_use]
    pub fn equation(&self) -> LiquidDensityEquation {
        LiquidDensityEquation::Eos1
    }

    fn reduced(&self, t: f64) -> f64 {
        1.0 - t / self.critical_temperature
    }

    /// Returns the saturated liquid density in kg/m³ at `t` in K.
    #[must_use]
    pub fn rho_l(&self, t: f64) -> f64 {
        let x: f64 = self.terms.iter().map(|term| term.value(self.reduced(t))).sum();
        if self.exponential {
            self.critical_density * x.exp()
        } else {
            self.critical_density * x
        }
    }

    /// Returns `dρ/dT` in kg/(m³·K) at `t` in K.
    #[must_use]
    pub fn drho_l_dt(&self, t: f64) -> f64 {
        let slope: f64 = self.terms.iter().map(|term| term.slope(self.reduced(t))).sum();
        let scale = if self.exponential {
            self.rho_l(t)
        } else {
            self.critical_density
        };
        -scale * slope / self.critical_temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::sorption::test_support::R134A_LIQUID_DENSITY,
        support::numeric::symmetric_difference,
    };

    #[test]
    fn r134a_reference_density() -> Result<(), SorptionError> {
        let density = LiquidDensity::new(LiquidDensityEquation::Eos1, &R134A_LIQUID_DENSITY)?;
        assert_relative_eq!(density.rho_l(258.0), 1343.577, max_relative = 1e-6);

        let numeric = symmetric_difference(|t| Ok::<_, ()>(density.rho_l(t)), 258.0, 1e-3)
            .unwrap_or(f64::NAN);
        assert_relative_eq!(density.drho_l_dt(258.0), numeric, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn exponential_form_slope() -> Result<(), SorptionError> {
        let density = LiquidDensity::new(
            LiquidDensityEquation::Eos1,
            &[500.0, 300.0, -1.0, 1.2, 0.35, -0.4, 1.0],
        )?;
        let numeric = symmetric_difference(|t| Ok::<_, ()>(density.rho_l(t)), 320.0, 1e-3)
            .unwrap_or(f64::NAN);
        assert_relative_eq!(density.drho_l_dt(320.0), numeric, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn name_lookup_is_case_sensitive() {
        assert_eq!(
            LiquidDensityEquation::from_name("SaturatedLiquidDensity_EoS1"),
            Some(LiquidDensityEquation::Eos1)
        );
        assert_eq!(LiquidDensityEquation::from_name("saturatedliquiddensity_eos1"), None);
    }
}
