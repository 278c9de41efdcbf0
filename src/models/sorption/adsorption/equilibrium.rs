use tracing::debug;

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    numeric::{newton, symmetric_difference, trapezoid},
};

use super::super::{EquilibriumConfig, Refrigerant, Slot, SorptionError};
use super::{AdsorptionFamily, AdsorptionIsotherm, Approach, Saturation, VolumetricIsotherm};

/// Lower cutoff of the numeric spreading-pressure integral, relative to `p0`.
///
/// Below the cutoff the isotherm is taken to follow Henry's law, which
/// contributes `w(p_low)` to the integral.
const CUTOFF_RATIO: f64 = 1e-12;

/// Where an adsorption equilibrium obtains saturation properties.
#[derive(Debug, Clone, Copy)]
pub enum SaturationSource<'a> {
    /// Evaluated from the refrigerant at every temperature.
    Refrigerant(&'a Refrigerant),

    /// Supplied by the caller for a single temperature.
    ///
    /// Fallbacks that vary the temperature are unavailable for isotherms
    /// that need saturation properties.
    Fixed(Saturation),
}

/// Complete adsorption equilibrium for one isotherm.
///
/// Every operation first asks the isotherm for its closed form. If the
/// isotherm does not provide one, the operation is derived from the forward
/// relation `w(p, T)`:
///
/// - `p(w, T)` and `T(p, w)` by Newton-Raphson, starting from the
///   isotherm's guess policy.
/// - Derivatives by symmetric differences with the configured steps.
/// - The spreading pressure by trapezoidal integration of `w` over `ln p`.
#[derive(Debug, Clone, Copy)]
pub struct AdsorptionEquilibrium<'a> {
    isotherm: &'a dyn AdsorptionIsotherm,
    source: SaturationSource<'a>,
    config: &'a EquilibriumConfig,
}

impl<'a> AdsorptionEquilibrium<'a> {
    #[must_use]
    pub fn new(
        isotherm: &'a dyn AdsorptionIsotherm,
        source: SaturationSource<'a>,
        config: &'a EquilibriumConfig,
    ) -> Self {
        Self {
            isotherm,
            source,
            config,
        }
    }

    #[must_use]
    pub fn family(&self) -> AdsorptionFamily {
        self.isotherm.family()
    }

    /// The volumetric capability set.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::NotDefined`] for surface isotherms.
    pub fn volumetric(&self) -> Result<&'a dyn VolumetricIsotherm, SorptionError> {
        self.isotherm.as_volumetric().ok_or(SorptionError::not_defined(
            "volumetric characteristic curve",
            "surface isotherms",
        ))
    }

    /// Saturation properties at `t`, limited to what the isotherm needs.
    ///
    /// Slopes are only evaluated when `slopes` is set.
    ///
    /// # Errors
    ///
    /// Propagates refrigerant failures, including a missing correlation.
    pub fn saturation(&self, t: f64, slopes: bool) -> Result<Saturation, SorptionError> {
        let refrigerant = match self.source {
            SaturationSource::Fixed(saturation) => return Ok(saturation),
            SaturationSource::Refrigerant(refrigerant) => refrigerant,
        };

        let approach = self.family().approach();
        let mut saturation = Saturation::default();
        if approach.needs_vapor_pressure() {
            saturation.p_sat = Some(refrigerant.p_sat(t)?);
            if slopes {
                saturation.dp_sat_dt = Some(refrigerant.dp_sat_dt(t)?);
            }
        }
        if approach.needs_liquid_density() {
            saturation.rho_l = Some(refrigerant.rho_l(t)?);
            if slopes {
                saturation.drho_l_dt = Some(refrigerant.drho_l_dt(t)?);
            }
        }
        Ok(saturation)
    }

    /// Saturation properties at a temperature other than the caller's.
    fn saturation_along(&self, t: f64, operation: &'static str) -> Result<Saturation, SorptionError> {
        match self.source {
            SaturationSource::Fixed(_) if self.family().approach() != Approach::Surface => Err(
                SorptionError::not_defined(operation, "a fixed saturation state"),
            ),
            _ => self.saturation(t, false),
        }
    }

    /// Equilibrium loading in kg/kg.
    ///
    /// # Errors
    ///
    /// Propagates isotherm and refrigerant failures.
    pub fn w_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        self.isotherm.w_pt(p, t, &self.saturation(t, false)?)
    }

    /// Equilibrium pressure in Pa.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::Numeric`] if the pressure iteration fails.
    pub fn p_wt(&self, w: f64, t: f64) -> Result<f64, SorptionError> {
        let saturation = self.saturation(t, false)?;
        self.or_fallback(self.isotherm.p_wt(w, t, &saturation), "p_wt", || {
            newton(
                |p| self.isotherm.w_pt(p, t, &saturation),
                |p| self.loading_pressure_slope(p, t, &saturation),
                w,
                self.isotherm.pressure_policy(),
                &self.config.newton,
            )
        })
    }

    /// Equilibrium temperature in K.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::Numeric`] if the temperature iteration fails,
    /// and [`SorptionError::NotDefined`] if it would need saturation
    /// properties at temperatures a fixed source cannot supply.
    pub fn t_pw(&self, p: f64, w: f64) -> Result<f64, SorptionError> {
        self.or_fallback(self.isotherm.t_pw(p, w), "t_pw", || {
            newton(
                |t| self.isotherm.w_pt(p, t, &self.saturation_along(t, "t_pw")?),
                |t| self.dw_dt_pt(p, t),
                w,
                self.isotherm.temperature_policy(),
                &self.config.newton,
            )
        })
    }

    /// `∂w/∂p` in kg/(kg·Pa).
    ///
    /// # Errors
    ///
    /// Propagates isotherm and refrigerant failures.
    pub fn dw_dp_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        self.loading_pressure_slope(p, t, &self.saturation(t, false)?)
    }

    /// `∂w/∂T` in kg/(kg·K).
    ///
    /// # Errors
    ///
    /// Propagates isotherm and refrigerant failures.
    pub fn dw_dt_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        let saturation = self.saturation(t, true)?;
        self.or_fallback(self.isotherm.dw_dt_pt(p, t, &saturation), "dw_dt_pt", || {
            symmetric_difference(
                |t| self.isotherm.w_pt(p, t, &self.saturation_along(t, "dw_dt_pt")?),
                t,
                self.config.steps.temperature,
            )
        })
    }

    /// `∂p/∂w` in Pa·kg/kg.
    ///
    /// # Errors
    ///
    /// Propagates isotherm, refrigerant and iteration failures.
    pub fn dp_dw_wt(&self, w: f64, t: f64) -> Result<f64, SorptionError> {
        let saturation = self.saturation(t, false)?;
        self.or_fallback(self.isotherm.dp_dw_wt(w, t, &saturation), "dp_dw_wt", || {
            symmetric_difference(|w| self.p_wt(w, t), w, self.config.steps.loading)
        })
    }

    /// `∂p/∂T` in Pa/K.
    ///
    /// # Errors
    ///
    /// Propagates isotherm, refrigerant and iteration failures.
    pub fn dp_dt_wt(&self, w: f64, t: f64) -> Result<f64, SorptionError> {
        let saturation = self.saturation(t, true)?;
        self.or_fallback(self.isotherm.dp_dt_wt(w, t, &saturation), "dp_dt_wt", || {
            // Rejects fixed saturation states that depend on temperature.
            self.saturation_along(t, "dp_dt_wt")?;
            symmetric_difference(|t| self.p_wt(w, t), t, self.config.steps.temperature)
        })
    }

    /// Reduced spreading pressure in mol/kg.
    ///
    /// Integrates `w/p` from zero to `p0 = p_total·y/(x·γ)` and divides by
    /// the molar mass `m` in kg/mol.
    ///
    /// Without a closed form, the integral is taken as `∫ w d(ln p)` with
    /// equal steps in `ln p` between `p0·10⁻¹²` and `p0`. `w/p` is steep near
    /// zero pressure for most isotherms, which equal steps in `p` cannot
    /// resolve.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::OutOfDomain`] unless `p0` is strictly positive.
    pub fn pi_star(
        &self,
        p_total: f64,
        y: f64,
        x: f64,
        gamma: f64,
        t: f64,
        m: f64,
    ) -> Result<f64, SorptionError> {
        let p0 = p_total * y / (x * gamma);
        StrictlyPositive::check(&p0).map_err(|e| {
            SorptionError::out_of_domain(format!("upper integration pressure {p0} Pa: {e}"))
        })?;

        let saturation = self.saturation(t, false)?;
        self.or_fallback(
            self.isotherm.pi_star(p0, t, m, &saturation),
            "pi_star",
            || {
                let cutoff = p0 * CUTOFF_RATIO;
                let integral = trapezoid(
                    |ln_p: f64| self.isotherm.w_pt(ln_p.exp(), t, &saturation),
                    cutoff.ln(),
                    p0.ln(),
                    self.config.quadrature.steps,
                )?;
                let henry_tail = self.isotherm.w_pt(cutoff, t, &saturation)?;
                Ok((integral + henry_tail) / m)
            },
        )
    }

    fn loading_pressure_slope(
        &self,
        p: f64,
        t: f64,
        saturation: &Saturation,
    ) -> Result<f64, SorptionError> {
        self.or_fallback(self.isotherm.dw_dp_pt(p, t, saturation), "dw_dp_pt", || {
            symmetric_difference(
                |p| self.isotherm.w_pt(p, t, saturation),
                p,
                self.config.steps.pressure,
            )
        })
    }

    fn or_fallback(
        &self,
        slot: Slot,
        operation: &'static str,
        fallback: impl FnOnce() -> Result<f64, SorptionError>,
    ) -> Result<f64, SorptionError> {
        slot.unwrap_or_else(|| {
            debug!(family = %self.family(), operation, "no closed form, using numeric fallback");
            fallback()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::sorption::test_support::{DA_R134A, DSS_CO2, LANGMUIR_CO2, TOTH_WATER, r134a},
        support::numeric::QuadratureConfig,
    };

    fn bind(family: AdsorptionFamily, values: &[f64]) -> Box<dyn AdsorptionIsotherm> {
        family
            .bind(values, &EquilibriumConfig::default())
            .expect("valid coefficients")
    }

    #[test]
    fn langmuir_closed_forms_are_used_directly() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let isotherm = bind(AdsorptionFamily::Langmuir, &LANGMUIR_CO2);
        let eq = AdsorptionEquilibrium::new(
            isotherm.as_ref(),
            SaturationSource::Fixed(Saturation::default()),
            &config,
        );

        let w = eq.w_pt(3e5, 303.1)?;
        assert_relative_eq!(w, 0.181_704_521_839_623_16, max_relative = 1e-12);
        assert_relative_eq!(eq.p_wt(w, 303.1)?, 3e5, max_relative = 1e-10);
        assert_relative_eq!(eq.t_pw(3e5, w)?, 303.1, max_relative = 1e-10);
        Ok(())
    }

    #[test]
    fn toth_temperature_and_spreading_pressure_are_numeric() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let isotherm = bind(AdsorptionFamily::Toth, &TOTH_WATER);
        let eq = AdsorptionEquilibrium::new(
            isotherm.as_ref(),
            SaturationSource::Fixed(Saturation::default()),
            &config,
        );

        let w = eq.w_pt(1270.0, 373.15)?;
        assert_relative_eq!(eq.t_pw(1270.0, w)?, 373.15, max_relative = 1e-7);
        assert_relative_eq!(eq.dp_dt_wt(w, 373.15)?, 67.956_309, max_relative = 1e-6);

        // The Langmuir limit of the Toth form has π* = w_mon/M·ln(1 + b·p0).
        let limit = bind(AdsorptionFamily::Toth, &[1e-4, 0.0, 1.0, 1.0, 0.0, -1.0, 0.3]);
        let eq = AdsorptionEquilibrium::new(
            limit.as_ref(),
            SaturationSource::Fixed(Saturation::default()),
            &config,
        );
        let pi = eq.pi_star(5000.0, 1.0, 1.0, 1.0, 300.0, 0.018)?;
        assert_relative_eq!(pi, 0.3 / 0.018 * 1.5_f64.ln(), max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn numeric_spreading_pressure_resolves_steep_isotherms() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let r134a = r134a();

        // Converged values from 2·10⁶ log-spaced trapezoids down to 10⁻²⁰·p0.
        let toth = bind(AdsorptionFamily::Toth, &TOTH_WATER);
        let eq = AdsorptionEquilibrium::new(
            toth.as_ref(),
            SaturationSource::Fixed(Saturation::default()),
            &config,
        );
        let pi = eq.pi_star(3000.0, 1.0, 1.0, 1.0, 303.15, 0.018)?;
        assert_relative_eq!(pi, 77.518_127_49, max_relative = 1e-6);

        let da = bind(AdsorptionFamily::DubininAstakhov, &DA_R134A);
        let eq = AdsorptionEquilibrium::new(
            da.as_ref(),
            SaturationSource::Refrigerant(&r134a),
            &config,
        );
        let pi = eq.pi_star(1e5, 1.0, 1.0, 1.0, 258.15, 0.102)?;
        assert_relative_eq!(pi, 58.400_072_72, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn coarse_quadrature_stays_accurate() -> Result<(), SorptionError> {
        let config = EquilibriumConfig {
            quadrature: QuadratureConfig { steps: 10_000 },
            ..EquilibriumConfig::default()
        };
        let toth = bind(AdsorptionFamily::Toth, &TOTH_WATER);
        let eq = AdsorptionEquilibrium::new(
            toth.as_ref(),
            SaturationSource::Fixed(Saturation::default()),
            &config,
        );
        let pi = eq.pi_star(3000.0, 1.0, 1.0, 1.0, 303.15, 0.018)?;
        assert_relative_eq!(pi, 77.518_127_49, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn dss_inverses_round_trip() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let isotherm = bind(AdsorptionFamily::DualSiteSips, &DSS_CO2);
        let eq = AdsorptionEquilibrium::new(
            isotherm.as_ref(),
            SaturationSource::Fixed(Saturation::default()),
            &config,
        );

        let w = eq.w_pt(40_000.0, 373.0)?;
        assert_relative_eq!(eq.p_wt(w, 373.0)?, 40_000.0, max_relative = 1e-6);
        assert_relative_eq!(eq.t_pw(40_000.0, w)?, 373.0, max_relative = 1e-7);

        let dp_dw = eq.dp_dw_wt(w, 373.0)?;
        assert_relative_eq!(dp_dw * eq.dw_dp_pt(40_000.0, 373.0)?, 1.0, max_relative = 1e-4);

        let dp_dt = eq.dp_dt_wt(w, 373.0)?;
        let implicit = -eq.dw_dt_pt(40_000.0, 373.0)? / eq.dw_dp_pt(40_000.0, 373.0)?;
        assert_relative_eq!(dp_dt, implicit, max_relative = 1e-4);
        Ok(())
    }

    #[test]
    fn unreachable_loading_reports_non_convergence() {
        let config = EquilibriumConfig::default();
        let isotherm = bind(AdsorptionFamily::DualSiteSips, &DSS_CO2);
        let eq = AdsorptionEquilibrium::new(
            isotherm.as_ref(),
            SaturationSource::Fixed(Saturation::default()),
            &config,
        );

        // The two sites saturate well below 1 kg/kg.
        assert!(matches!(eq.p_wt(1.0, 373.0), Err(SorptionError::Numeric(_))));
    }

    #[test]
    fn analytic_and_numeric_slopes_agree() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let r134a = r134a();
        let cases: [(AdsorptionFamily, &[f64], f64, f64); 3] = [
            (AdsorptionFamily::Langmuir, &LANGMUIR_CO2, 3e5, 303.1),
            (AdsorptionFamily::Toth, &TOTH_WATER, 1270.0, 373.15),
            (AdsorptionFamily::DualSiteSips, &DSS_CO2, 40_000.0, 373.0),
        ];

        for (family, values, p, t) in cases {
            let isotherm = bind(family, values);
            let eq = AdsorptionEquilibrium::new(
                isotherm.as_ref(),
                SaturationSource::Refrigerant(&r134a),
                &config,
            );

            let numeric_p = symmetric_difference(|p| eq.w_pt(p, t), p, 1e-2)?;
            assert_relative_eq!(eq.dw_dp_pt(p, t)?, numeric_p, max_relative = 1e-5);

            let numeric_t = symmetric_difference(|t| eq.w_pt(p, t), t, 1e-3)?;
            assert_relative_eq!(eq.dw_dt_pt(p, t)?, numeric_t, max_relative = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn volumetric_temperature_inverse_uses_the_refrigerant() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let r134a = r134a();
        let isotherm = bind(AdsorptionFamily::DubininAstakhov, &DA_R134A);
        let eq = AdsorptionEquilibrium::new(
            isotherm.as_ref(),
            SaturationSource::Refrigerant(&r134a),
            &config,
        );

        let w = eq.w_pt(0.1e6, 258.15)?;
        assert_relative_eq!(eq.t_pw(0.1e6, w)?, 258.15, max_relative = 1e-8);
        assert!(eq.volumetric().is_ok());
        Ok(())
    }

    #[test]
    fn fixed_saturation_cannot_vary_temperature() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let isotherm = bind(AdsorptionFamily::DubininAstakhov, &[7_332.69, 1.29, 2.22, -1.0]);
        let eq = AdsorptionEquilibrium::new(
            isotherm.as_ref(),
            SaturationSource::Fixed(Saturation::with_vapor_pressure_and_density(163_938.5, 1_343.6)),
            &config,
        );

        assert!(eq.w_pt(0.1e6, 258.15).is_ok());
        assert!(matches!(
            eq.t_pw(0.1e6, 2.0),
            Err(SorptionError::NotDefined { operation: "t_pw", .. })
        ));
        Ok(())
    }

    #[test]
    fn spreading_pressure_needs_positive_upper_bound() {
        let config = EquilibriumConfig::default();
        let isotherm = bind(AdsorptionFamily::Langmuir, &LANGMUIR_CO2);
        let eq = AdsorptionEquilibrium::new(
            isotherm.as_ref(),
            SaturationSource::Fixed(Saturation::default()),
            &config,
        );

        assert!(matches!(
            eq.pi_star(1e5, 0.0, 0.5, 1.0, 300.0, 0.044),
            Err(SorptionError::OutOfDomain { .. })
        ));
        assert!(matches!(
            eq.pi_star(1e5, 0.5, 0.5, -1.0, 300.0, 0.044),
            Err(SorptionError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn surface_isotherms_have_no_characteristic_curve() {
        let config = EquilibriumConfig::default();
        let isotherm = bind(AdsorptionFamily::Langmuir, &LANGMUIR_CO2);
        let eq = AdsorptionEquilibrium::new(
            isotherm.as_ref(),
            SaturationSource::Fixed(Saturation::default()),
            &config,
        );
        assert!(matches!(eq.volumetric(), Err(SorptionError::NotDefined { .. })));
    }
}
