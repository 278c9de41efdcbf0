use tracing::debug;

use crate::support::{
    constraint::{Constraint, StrictlyPositive, UnitInterval},
    numeric::{GuessPolicy, newton, symmetric_difference},
};

use super::super::{EquilibriumConfig, Slot, SorptionError};
use super::{AbsorptionFamily, ActivityModel, BubblePoint, ConventionalCorrelation, OnePvdw};

/// Complete equilibrium of a conventional absorption correlation.
///
/// Operations the correlation leaves out are derived from `p(X, T)`: the
/// inverses by Newton-Raphson, the derivatives by symmetric differences.
#[derive(Debug, Clone, Copy)]
pub struct ConventionalEquilibrium<'a> {
    correlation: &'a dyn ConventionalCorrelation,
    config: &'a EquilibriumConfig,
}

impl<'a> ConventionalEquilibrium<'a> {
    #[must_use]
    pub fn new(correlation: &'a dyn ConventionalCorrelation, config: &'a EquilibriumConfig) -> Self {
        Self {
            correlation,
            config,
        }
    }

    /// Equilibrium pressure in Pa.
    ///
    /// # Errors
    ///
    /// Propagates correlation failures.
    pub fn p_xt(&self, x: f64, t: f64) -> Result<f64, SorptionError> {
        self.correlation.p_xt(x, t)
    }

    /// Equilibrium concentration in kg/kg.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::Numeric`] if the concentration iteration fails.
    pub fn x_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        self.or_fallback(self.correlation.x_pt(p, t), "x_pt", || {
            newton(
                |x| self.p_xt(x, t),
                |x| self.dp_dx_xt(x, t),
                p,
                self.correlation.concentration_policy(),
                &self.config.newton,
            )
        })
    }

    /// Equilibrium temperature in K.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::Numeric`] if the temperature iteration fails.
    pub fn t_px(&self, p: f64, x: f64) -> Result<f64, SorptionError> {
        self.or_fallback(self.correlation.t_px(p, x), "t_px", || {
            newton(
                |t| self.p_xt(x, t),
                |t| self.dp_dt_xt(x, t),
                p,
                self.correlation.temperature_policy(),
                &self.config.newton,
            )
        })
    }

    /// `∂X/∂p` in kg/(kg·Pa).
    ///
    /// # Errors
    ///
    /// Propagates correlation and iteration failures.
    pub fn dx_dp_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        self.or_fallback(self.correlation.dx_dp_pt(p, t), "dx_dp_pt", || {
            symmetric_difference(|p| self.x_pt(p, t), p, self.config.steps.pressure)
        })
    }

    /// `∂X/∂T` in kg/(kg·K).
    ///
    /// # Errors
    ///
    /// Propagates correlation and iteration failures.
    pub fn dx_dt_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        self.or_fallback(self.correlation.dx_dt_pt(p, t), "dx_dt_pt", || {
            symmetric_difference(|t| self.x_pt(p, t), t, self.config.steps.temperature)
        })
    }

    /// `∂p/∂X` in Pa·kg/kg.
    ///
    /// # Errors
    ///
    /// Propagates correlation failures.
    pub fn dp_dx_xt(&self, x: f64, t: f64) -> Result<f64, SorptionError> {
        self.or_fallback(self.correlation.dp_dx_xt(x, t), "dp_dx_xt", || {
            symmetric_difference(|x| self.p_xt(x, t), x, self.config.steps.loading)
        })
    }

    /// `∂p/∂T` in Pa/K.
    ///
    /// # Errors
    ///
    /// Propagates correlation failures.
    pub fn dp_dt_xt(&self, x: f64, t: f64) -> Result<f64, SorptionError> {
        self.or_fallback(self.correlation.dp_dt_xt(x, t), "dp_dt_xt", || {
            symmetric_difference(|t| self.p_xt(x, t), t, self.config.steps.temperature)
        })
    }

    fn or_fallback(
        &self,
        slot: Slot,
        operation: &'static str,
        fallback: impl FnOnce() -> Result<f64, SorptionError>,
    ) -> Result<f64, SorptionError> {
        slot.unwrap_or_else(|| {
            debug!(
                family = %self.correlation.family(),
                operation,
                "no closed form, using numeric fallback"
            );
            fallback()
        })
    }
}

/// Vapor-liquid equilibrium of an activity-coefficient model.
///
/// Applies modified Raoult's law `p = γ·x·p_sat` for the refrigerant.
#[derive(Debug, Clone, Copy)]
pub struct ActivityEquilibrium<'a> {
    model: &'a dyn ActivityModel,
    config: &'a EquilibriumConfig,
}

impl<'a> ActivityEquilibrium<'a> {
    #[must_use]
    pub fn new(model: &'a dyn ActivityModel, config: &'a EquilibriumConfig) -> Self {
        Self { model, config }
    }

    #[must_use]
    pub fn family(&self) -> AbsorptionFamily {
        self.model.family()
    }

    /// Activity coefficient of the refrigerant.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::OutOfDomain`] unless `0 ≤ x ≤ 1`.
    pub fn gamma(&self, t: f64, x: f64, v1: f64, v2: f64) -> Result<f64, SorptionError> {
        check_mole_fraction(x)?;
        Ok(self.model.gamma(t, x, v1, v2))
    }

    /// Equilibrium pressure in Pa for the vapor pressure `p_sat`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::OutOfDomain`] unless `0 ≤ x ≤ 1`.
    pub fn p_txv1v2psat(
        &self,
        t: f64,
        x: f64,
        v1: f64,
        v2: f64,
        p_sat: f64,
    ) -> Result<f64, SorptionError> {
        check_mole_fraction(x)?;
        Ok(self.pressure(t, x, v1, v2, p_sat))
    }

    /// Equilibrium mole fraction for the vapor pressure `p_sat`.
    ///
    /// Newton-Raphson starts at `x = 0.5` and keeps iterates in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::Numeric`] if the iteration fails.
    pub fn x_ptv1v2psat(
        &self,
        p: f64,
        t: f64,
        v1: f64,
        v2: f64,
        p_sat: f64,
    ) -> Result<f64, SorptionError> {
        let value = |x| Ok::<_, SorptionError>(self.pressure(t, x, v1, v2, p_sat));
        newton(
            value,
            |x| symmetric_difference(value, x, self.config.steps.mole_fraction),
            p,
            GuessPolicy::unit_interval(0.5),
            &self.config.newton,
        )
    }

    fn pressure(&self, t: f64, x: f64, v1: f64, v2: f64, p_sat: f64) -> f64 {
        self.model.gamma(t, x, v1, v2) * x * p_sat
    }
}

/// Vapor-liquid equilibrium of the mixing rule.
///
/// `x` is the refrigerant mole fraction of the liquid and `p` its bubble
/// pressure. The inverses run Newton-Raphson on `ln p`, so the tolerance acts
/// as a relative one at the high pressures these mixtures reach. Pressure
/// derivatives are symmetric differences of the bubble pressure; the
/// derivatives of `x` follow from them through the implicit-function rule.
#[derive(Debug, Clone, Copy)]
pub struct MixingEquilibrium<'a> {
    rule: &'a OnePvdw,
    config: &'a EquilibriumConfig,
}

impl<'a> MixingEquilibrium<'a> {
    #[must_use]
    pub fn new(rule: &'a OnePvdw, config: &'a EquilibriumConfig) -> Self {
        Self { rule, config }
    }

    /// Pressure of the mixture in Pa at molar volume `v`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::OutOfDomain`] if `v` does not exceed the
    /// mixture co-volume.
    pub fn p_tvx(&self, t: f64, v: f64, x: f64) -> Result<f64, SorptionError> {
        self.rule.p_tvx(t, v, x)
    }

    /// Bubble pressure and vapor composition.
    ///
    /// # Errors
    ///
    /// As [`OnePvdw::bubble_point`].
    pub fn bubble_point(&self, t: f64, x: f64) -> Result<BubblePoint, SorptionError> {
        self.rule.bubble_point(t, x)
    }

    /// Equilibrium pressure in Pa.
    ///
    /// # Errors
    ///
    /// As [`OnePvdw::bubble_point`].
    pub fn p_tx(&self, t: f64, x: f64) -> Result<f64, SorptionError> {
        Ok(self.rule.bubble_point(t, x)?.pressure)
    }

    /// Equilibrium mole fraction of the liquid.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::OutOfDomain`] for non-positive pressures,
    /// and bubble-point or iteration failures.
    pub fn x_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        check_pressure(p)?;
        newton(
            |x| self.ln_p_tx(t, x),
            |x| symmetric_difference(|x| self.ln_p_tx(t, x), x, self.config.steps.mole_fraction),
            p.ln(),
            self.rule.mole_fraction_policy(p, t),
            &self.config.newton,
        )
    }

    /// Equilibrium temperature in K.
    ///
    /// # Errors
    ///
    /// As [`MixingEquilibrium::x_pt`].
    pub fn t_px(&self, p: f64, x: f64) -> Result<f64, SorptionError> {
        check_pressure(p)?;
        newton(
            |t| self.ln_p_tx(t, x),
            |t| symmetric_difference(|t| self.ln_p_tx(t, x), t, self.config.steps.temperature),
            p.ln(),
            self.rule.temperature_policy(p, x),
            &self.config.newton,
        )
    }

    /// `∂p/∂T` in Pa/K.
    ///
    /// # Errors
    ///
    /// As [`OnePvdw::bubble_point`].
    pub fn dp_dt_tx(&self, t: f64, x: f64) -> Result<f64, SorptionError> {
        symmetric_difference(|t| self.p_tx(t, x), t, self.config.steps.temperature)
    }

    /// `∂p/∂x` in Pa.
    ///
    /// # Errors
    ///
    /// As [`OnePvdw::bubble_point`].
    pub fn dp_dx_tx(&self, t: f64, x: f64) -> Result<f64, SorptionError> {
        symmetric_difference(|x| self.p_tx(t, x), x, self.config.steps.mole_fraction)
    }

    /// `∂x/∂p` in 1/Pa.
    ///
    /// # Errors
    ///
    /// As [`MixingEquilibrium::x_pt`].
    pub fn dx_dp_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        let x = self.x_pt(p, t)?;
        Ok(1.0 / self.dp_dx_tx(t, x)?)
    }

    /// `∂x/∂T` in 1/K.
    ///
    /// # Errors
    ///
    /// As [`MixingEquilibrium::x_pt`].
    pub fn dx_dt_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        let x = self.x_pt(p, t)?;
        Ok(-self.dp_dt_tx(t, x)? / self.dp_dx_tx(t, x)?)
    }

    fn ln_p_tx(&self, t: f64, x: f64) -> Result<f64, SorptionError> {
        Ok(self.p_tx(t, x)?.ln())
    }
}

fn check_pressure(p: f64) -> Result<(), SorptionError> {
    StrictlyPositive::check(&p)
        .map_err(|e| SorptionError::out_of_domain(format!("pressure {p} Pa: {e}")))
}

fn check_mole_fraction(x: f64) -> Result<(), SorptionError> {
    UnitInterval::check(&x)
        .map_err(|e| SorptionError::out_of_domain(format!("mole fraction {x}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::sorption::{
        IDEAL_GAS_CONSTANT,
        absorption::{Antoine, Duehring, Nrtl, Uniquac},
        test_support::{
            ANTOINE_ABSORPTION, DUEHRING_LIBR, NRTL_WATER, ONE_PVDW_CO2_OIL, UNIQUAC_WATER,
        },
    };

    #[test]
    fn duehring_concentration_by_newton() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let duehring = Duehring::new(&DUEHRING_LIBR)?;
        let eq = ConventionalEquilibrium::new(&duehring, &config);

        let x = eq.x_pt(724.659_956_886_7, 323.15)?;
        assert_relative_eq!(x, 0.65, max_relative = 1e-9);

        let dx_dp = eq.dx_dp_pt(724.659_956_886_7, 323.15)?;
        assert_relative_eq!(dx_dp * eq.dp_dx_xt(x, 323.15)?, 1.0, max_relative = 1e-5);

        let dx_dt = eq.dx_dt_pt(724.659_956_886_7, 323.15)?;
        let implicit = -eq.dp_dt_xt(x, 323.15)? / eq.dp_dx_xt(x, 323.15)?;
        assert_relative_eq!(dx_dt, implicit, max_relative = 1e-5);
        Ok(())
    }

    #[test]
    fn antoine_inverses_by_newton() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let antoine = Antoine::new(&ANTOINE_ABSORPTION)?;
        let eq = ConventionalEquilibrium::new(&antoine, &config);

        let x = eq.x_pt(2480.0, 298.15)?;
        assert_relative_eq!(x, 0.191_468_256_398, max_relative = 1e-9);
        assert_relative_eq!(eq.t_px(2480.0, x)?, 298.15, max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn raoult_pressure_and_inverse() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let nrtl = Nrtl::fixed(&NRTL_WATER, IDEAL_GAS_CONSTANT)?;
        let eq = ActivityEquilibrium::new(&nrtl, &config);
        let p_sat = 47_415.784_267_245;

        let p = eq.p_txv1v2psat(353.15, 0.1933, -1.0, -1.0, p_sat)?;
        assert_relative_eq!(p, 2.166_919_575_761 * 0.1933 * p_sat, max_relative = 1e-10);

        let x = eq.x_ptv1v2psat(p, 353.15, -1.0, -1.0, p_sat)?;
        assert_relative_eq!(x, 0.1933, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn uniquac_inverse_round_trips() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let uniquac = Uniquac::fixed(&UNIQUAC_WATER, IDEAL_GAS_CONSTANT)?;
        let eq = ActivityEquilibrium::new(&uniquac, &config);

        let p = eq.p_txv1v2psat(353.15, 0.1933, -1.0, -1.0, 47_415.78)?;
        let x = eq.x_ptv1v2psat(p, 353.15, -1.0, -1.0, 47_415.78)?;
        assert_relative_eq!(x, 0.1933, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn mole_fraction_must_lie_in_unit_interval() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let nrtl = Nrtl::fixed(&NRTL_WATER, IDEAL_GAS_CONSTANT)?;
        let eq = ActivityEquilibrium::new(&nrtl, &config);

        assert!(matches!(
            eq.gamma(353.15, 1.2, -1.0, -1.0),
            Err(SorptionError::OutOfDomain { .. })
        ));
        assert!(matches!(
            eq.p_txv1v2psat(353.15, -0.1, -1.0, -1.0, 1e4),
            Err(SorptionError::OutOfDomain { .. })
        ));
        Ok(())
    }

    #[test]
    fn mixing_rule_inverts_the_bubble_pressure() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let rule = OnePvdw::new(&ONE_PVDW_CO2_OIL, IDEAL_GAS_CONSTANT)?;
        let eq = MixingEquilibrium::new(&rule, &config);

        let p = eq.p_tx(313.2, 0.3)?;
        assert_relative_eq!(p, 1_869_385.081_38, max_relative = 1e-9);
        assert_relative_eq!(eq.x_pt(p, 313.2)?, 0.3, max_relative = 1e-7);
        assert_relative_eq!(eq.t_px(p, 0.3)?, 313.2, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn mixing_rule_slopes() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let rule = OnePvdw::new(&ONE_PVDW_CO2_OIL, IDEAL_GAS_CONSTANT)?;
        let eq = MixingEquilibrium::new(&rule, &config);

        let dp_dx = eq.dp_dx_tx(313.2, 0.3)?;
        let dp_dt = eq.dp_dt_tx(313.2, 0.3)?;
        assert_relative_eq!(dp_dx, 6_995_278.39, max_relative = 1e-6);
        assert_relative_eq!(dp_dt, 29_263.567_5, max_relative = 1e-6);

        let p = eq.p_tx(313.2, 0.3)?;
        assert_relative_eq!(eq.dx_dp_pt(p, 313.2)? * dp_dx, 1.0, max_relative = 1e-5);
        assert_relative_eq!(eq.dx_dt_pt(p, 313.2)?, -dp_dt / dp_dx, max_relative = 1e-5);
        Ok(())
    }

    #[test]
    fn mixing_rule_rejects_non_positive_pressures() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let rule = OnePvdw::new(&ONE_PVDW_CO2_OIL, IDEAL_GAS_CONSTANT)?;
        let eq = MixingEquilibrium::new(&rule, &config);

        assert!(matches!(eq.x_pt(0.0, 313.2), Err(SorptionError::OutOfDomain { .. })));
        assert!(matches!(eq.t_px(-1.0, 0.3), Err(SorptionError::OutOfDomain { .. })));
        Ok(())
    }
}
