use crate::support::numeric::GuessPolicy;

use super::super::{Slot, SorptionError, coefficients::take};
use super::{AdsorptionFamily, AdsorptionIsotherm, Saturation, VolumetricIsotherm};

/// Dubinin-Astakhov characteristic curve `W = W₀·exp(−(A/E)^n)`.
///
/// The adsorption potential is `A = R·T·ln(p_sat/p)`, clamped at zero once
/// the pressure reaches saturation. Loading follows from `w = W·ρ_l`.
///
/// Coefficients are `[E, n, W₀, flag]`. A negative flag means `W₀` is given
/// in kg/kg and is divided by `ρ_l` to obtain a volume; otherwise `W₀` is
/// already in m³/kg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DubininAstakhov {
    energy: f64,
    exponent: f64,
    limiting: f64,
    mass_based: bool,
    r: f64,
}

impl DubininAstakhov {
    /// Binds coefficients, with `r` the gas constant in J/(mol·K).
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than four values.
    pub fn new(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [energy, exponent, limiting, flag] =
            take::<4>(values, AdsorptionFamily::DubininAstakhov.name())?;
        Ok(Self {
            energy,
            exponent,
            limiting,
            mass_based: flag < 0.0,
            r,
        })
    }

    /// Potential at `(p, T)` and whether the zero clamp was applied.
    fn potential(&self, p: f64, t: f64, p_sat: f64) -> (f64, bool) {
        let a = self.r * t * (p_sat / p).ln();
        if a > 0.0 { (a, false) } else { (0.0, true) }
    }

    fn volume(&self, a: f64, rho_l: f64) -> f64 {
        let w = self.limiting * (-(a / self.energy).powf(self.exponent)).exp();
        if self.mass_based { w / rho_l } else { w }
    }

    fn volume_slope(&self, a: f64, rho_l: f64) -> f64 {
        -self.volume(a, rho_l) * self.exponent * (a / self.energy).powf(self.exponent - 1.0)
            / self.energy
    }

    /// Scales a volumetric loading onto the units of `W₀`.
    fn scaled(&self, w: f64, rho_l: f64) -> f64 {
        if self.mass_based { w * rho_l } else { w }
    }

    fn potential_of_volume(&self, w: f64, rho_l: f64) -> Result<f64, SorptionError> {
        let ratio = self.scaled(w, rho_l) / self.limiting;
        if ratio.is_nan() || ratio <= 0.0 || ratio > 1.0 {
            return Err(SorptionError::out_of_domain(format!(
                "volumetric loading {w} m³/kg is outside the characteristic curve"
            )));
        }
        Ok(self.energy * (-ratio.ln()).powf(1.0 / self.exponent))
    }

    fn pressure(&self, w: f64, t: f64, saturation: &Saturation) -> Result<f64, SorptionError> {
        let p_sat = saturation.vapor_pressure()?;
        let rho_l = saturation.liquid_density()?;
        let a = self.potential_of_volume(w / rho_l, rho_l)?;
        Ok(p_sat / (a / (self.r * t)).exp())
    }

    fn loading_pressure_slope(
        &self,
        p: f64,
        t: f64,
        saturation: &Saturation,
    ) -> Result<f64, SorptionError> {
        let rho_l = saturation.liquid_density()?;
        let (a, clamped) = self.potential(p, t, saturation.vapor_pressure()?);
        if clamped {
            return Ok(0.0);
        }
        Ok(rho_l * self.volume_slope(a, rho_l) * (-self.r * t / p))
    }

    fn loading_temperature_slope(
        &self,
        p: f64,
        t: f64,
        saturation: &Saturation,
    ) -> Result<f64, SorptionError> {
        let p_sat = saturation.vapor_pressure()?;
        let rho_l = saturation.liquid_density()?;
        let (a, clamped) = self.potential(p, t, p_sat);

        let da_dt = if clamped {
            0.0
        } else {
            self.r * ((p_sat / p).ln() + t / p_sat * saturation.vapor_pressure_slope()?)
        };
        let mut slope = if da_dt == 0.0 {
            0.0
        } else {
            rho_l * self.volume_slope(a, rho_l) * da_dt
        };
        if !self.mass_based {
            slope += self.volume(a, rho_l) * saturation.liquid_density_slope()?;
        }
        Ok(slope)
    }

    fn pressure_loading_slope(
        &self,
        w: f64,
        t: f64,
        saturation: &Saturation,
    ) -> Result<f64, SorptionError> {
        let rho_l = saturation.liquid_density()?;
        let p = self.pressure(w, t, saturation)?;
        let da_dw = self.da_dw_w_rho(w / rho_l, rho_l)?;
        Ok(-p / (self.r * t) * da_dw / rho_l)
    }

    fn pressure_temperature_slope(
        &self,
        w: f64,
        t: f64,
        saturation: &Saturation,
    ) -> Result<f64, SorptionError> {
        let rho_l = saturation.liquid_density()?;
        let dp_sat = saturation.vapor_pressure_slope()?;
        let p = self.pressure(w, t, saturation)?;
        let a = self.potential_of_volume(w / rho_l, rho_l)?;
        let rt = self.r * t;

        let mut slope = a / (rt * t) * p + dp_sat / (a / rt).exp();
        if !self.mass_based {
            let drho = saturation.liquid_density_slope()?;
            let da_dw = self.da_dw_w_rho(w / rho_l, rho_l)?;
            slope += -p / rt * da_dw * (-w / (rho_l * rho_l)) * drho;
        }
        Ok(slope)
    }
}

impl VolumetricIsotherm for DubininAstakhov {
    fn w_a_rho(&self, a: f64, rho_l: f64) -> Result<f64, SorptionError> {
        check_potential(a)?;
        Ok(self.volume(a, rho_l))
    }

    fn a_w_rho(&self, w: f64, rho_l: f64) -> Result<f64, SorptionError> {
        self.potential_of_volume(w, rho_l)
    }

    fn dw_da_a_rho(&self, a: f64, rho_l: f64) -> Result<f64, SorptionError> {
        check_potential(a)?;
        Ok(self.volume_slope(a, rho_l))
    }

    fn da_dw_w_rho(&self, w: f64, rho_l: f64) -> Result<f64, SorptionError> {
        let ratio = self.scaled(w, rho_l) / self.limiting;
        self.potential_of_volume(w, rho_l)?;

        let slope = -self.energy / (self.exponent * self.scaled(w, rho_l))
            * (-ratio.ln()).powf(1.0 / self.exponent - 1.0);
        Ok(if self.mass_based { slope * rho_l } else { slope })
    }
}

fn check_potential(a: f64) -> Result<(), SorptionError> {
    if a >= 0.0 {
        Ok(())
    } else {
        Err(SorptionError::out_of_domain(format!(
            "adsorption potential {a} J/mol is negative"
        )))
    }
}

impl AdsorptionIsotherm for DubininAstakhov {
    fn family(&self) -> AdsorptionFamily {
        AdsorptionFamily::DubininAstakhov
    }

    fn w_pt(&self, p: f64, t: f64, saturation: &Saturation) -> Result<f64, SorptionError> {
        let rho_l = saturation.liquid_density()?;
        let (a, _) = self.potential(p, t, saturation.vapor_pressure()?);
        Ok(self.volume(a, rho_l) * rho_l)
    }

    fn p_wt(&self, w: f64, t: f64, saturation: &Saturation) -> Slot {
        Some(self.pressure(w, t, saturation))
    }

    fn dw_dp_pt(&self, p: f64, t: f64, saturation: &Saturation) -> Slot {
        Some(self.loading_pressure_slope(p, t, saturation))
    }

    fn dw_dt_pt(&self, p: f64, t: f64, saturation: &Saturation) -> Slot {
        Some(self.loading_temperature_slope(p, t, saturation))
    }

    fn dp_dw_wt(&self, w: f64, t: f64, saturation: &Saturation) -> Slot {
        Some(self.pressure_loading_slope(w, t, saturation))
    }

    fn dp_dt_wt(&self, w: f64, t: f64, saturation: &Saturation) -> Slot {
        Some(self.pressure_temperature_slope(w, t, saturation))
    }

    fn temperature_policy(&self) -> GuessPolicy {
        GuessPolicy::non_negative(273.15, 323.15)
    }

    fn as_volumetric(&self) -> Option<&dyn VolumetricIsotherm> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::sorption::{
        IDEAL_GAS_CONSTANT,
        test_support::{DA_R134A, r134a},
    };

    fn saturation(t: f64) -> Result<Saturation, SorptionError> {
        let r134a = r134a();
        Ok(
            Saturation::with_vapor_pressure_and_density(r134a.p_sat(t)?, r134a.rho_l(t)?)
                .with_slopes(Some(r134a.dp_sat_dt(t)?), Some(r134a.drho_l_dt(t)?)),
        )
    }

    #[test]
    fn reference_loading_and_slopes() -> Result<(), SorptionError> {
        let da = DubininAstakhov::new(&DA_R134A, IDEAL_GAS_CONSTANT)?;
        let sat = saturation(258.15)?;

        let w = da.w_pt(0.1e6, 258.15, &sat)?;
        assert_relative_eq!(w, 2.043_995_7, max_relative = 1e-6);

        let p = da.p_wt(w, 258.15, &sat).expect("closed form")?;
        assert_relative_eq!(p, 0.1e6, max_relative = 1e-9);

        let dw_dp = da.dw_dp_pt(0.1e6, 258.15, &sat).expect("closed form")?;
        assert_relative_eq!(dw_dp, 4.405_993e-6, max_relative = 1e-5);

        let dw_dt = da.dw_dt_pt(0.1e6, 258.15, &sat).expect("closed form")?;
        assert_relative_eq!(dw_dt, -0.019_031_6, max_relative = 1e-4);

        let dp_dw = da.dp_dw_wt(w, 258.15, &sat).expect("closed form")?;
        assert_relative_eq!(dp_dw, 226_963.58, max_relative = 1e-6);

        let dp_dt = da.dp_dt_wt(w, 258.15, &sat).expect("closed form")?;
        assert_relative_eq!(dp_dt, 4_319.476, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn volumetric_relations_invert() -> Result<(), SorptionError> {
        let da = DubininAstakhov::new(&DA_R134A, IDEAL_GAS_CONSTANT)?;
        let rho_l = 1_343.6;

        let w = da.w_a_rho(1_061.0, rho_l)?;
        assert_relative_eq!(da.a_w_rho(w, rho_l)?, 1_061.0, max_relative = 1e-10);

        let dw_da = da.dw_da_a_rho(1_061.0, rho_l)?;
        let da_dw = da.da_dw_w_rho(w, rho_l)?;
        assert_relative_eq!(dw_da * da_dw, 1.0, max_relative = 1e-10);
        Ok(())
    }

    #[test]
    fn volume_based_coefficients_use_density_slope() -> Result<(), SorptionError> {
        let da = DubininAstakhov::new(&[7_332.69, 1.29, 2.22 / 1_300.0, 1.0], IDEAL_GAS_CONSTANT)?;
        let t = 258.15;
        let sat = saturation(t)?;

        let h = 1e-3;
        let numeric = (da.w_pt(0.1e6, t + h, &saturation(t + h)?)?
            - da.w_pt(0.1e6, t - h, &saturation(t - h)?)?)
            / (2.0 * h);
        let analytic = da.dw_dt_pt(0.1e6, t, &sat).expect("closed form")?;
        assert_relative_eq!(analytic, numeric, max_relative = 1e-5);
        Ok(())
    }

    #[test]
    fn potential_is_clamped_above_saturation() -> Result<(), SorptionError> {
        let da = DubininAstakhov::new(&DA_R134A, IDEAL_GAS_CONSTANT)?;
        let sat = saturation(258.15)?;
        let p_sat = sat.p_sat.expect("vapor pressure");

        let w = da.w_pt(2.0 * p_sat, 258.15, &sat)?;
        assert_relative_eq!(w, 2.22, max_relative = 1e-12);
        assert_eq!(da.dw_dp_pt(2.0 * p_sat, 258.15, &sat), Some(Ok(0.0)));
        Ok(())
    }

    #[test]
    fn out_of_range_volumetric_inputs_fail() -> Result<(), SorptionError> {
        let da = DubininAstakhov::new(&DA_R134A, IDEAL_GAS_CONSTANT)?;
        assert!(matches!(
            da.w_a_rho(-1.0, 1_300.0),
            Err(SorptionError::OutOfDomain { .. })
        ));
        assert!(matches!(
            da.a_w_rho(1.0, 1_300.0),
            Err(SorptionError::OutOfDomain { .. })
        ));
        Ok(())
    }
}
