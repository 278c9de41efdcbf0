use super::super::{Slot, SorptionError, coefficients::take};
use super::{AdsorptionFamily, AdsorptionIsotherm, Saturation};

/// Langmuir isotherm `w = w_mon·K·p / (1 + K·p)` with `K = K₀·exp(ΔH/(R·T))`.
///
/// Coefficients are `[ΔH, K₀, w_mon]`. Every operation has a closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Langmuir {
    enthalpy: f64,
    affinity: f64,
    monolayer: f64,
    r: f64,
}

impl Langmuir {
    /// Binds coefficients, with `r` the gas constant in J/(mol·K).
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than three values.
    pub fn new(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [enthalpy, affinity, monolayer] = take::<3>(values, AdsorptionFamily::Langmuir.name())?;
        Ok(Self {
            enthalpy,
            affinity,
            monolayer,
            r,
        })
    }

    fn k(&self, t: f64) -> f64 {
        self.affinity * (self.enthalpy / (self.r * t)).exp()
    }

    fn dk_dt(&self, t: f64) -> f64 {
        -self.enthalpy / (self.r * t * t) * self.k(t)
    }

    /// Loadings at or above the monolayer capacity have no equilibrium pressure.
    fn check_loading(&self, w: f64) -> Result<(), SorptionError> {
        if (0.0..self.monolayer).contains(&w) {
            Ok(())
        } else {
            Err(SorptionError::out_of_domain(format!(
                "loading {w} kg/kg is outside [0, {}) kg/kg",
                self.monolayer
            )))
        }
    }

    fn temperature(&self, p: f64, w: f64) -> Result<f64, SorptionError> {
        self.check_loading(w)?;
        let k = w / ((self.monolayer - w) * p);
        let t = self.enthalpy / (self.r * (k / self.affinity).ln());
        if t.is_finite() && t > 0.0 {
            Ok(t)
        } else {
            Err(SorptionError::out_of_domain(format!(
                "no positive temperature gives {w} kg/kg at {p} Pa"
            )))
        }
    }
}

impl AdsorptionIsotherm for Langmuir {
    fn family(&self) -> AdsorptionFamily {
        AdsorptionFamily::Langmuir
    }

    fn w_pt(&self, p: f64, t: f64, _: &Saturation) -> Result<f64, SorptionError> {
        let k = self.k(t);
        Ok(self.monolayer * k * p / (1.0 + k * p))
    }

    fn p_wt(&self, w: f64, t: f64, _: &Saturation) -> Slot {
        Some(
            self.check_loading(w)
                .map(|()| w / ((self.monolayer - w) * self.k(t))),
        )
    }

    fn t_pw(&self, p: f64, w: f64) -> Slot {
        Some(self.temperature(p, w))
    }

    fn dw_dp_pt(&self, p: f64, t: f64, _: &Saturation) -> Slot {
        let k = self.k(t);
        Some(Ok(self.monolayer * k / (1.0 + k * p).powi(2)))
    }

    fn dw_dt_pt(&self, p: f64, t: f64, _: &Saturation) -> Slot {
        let k = self.k(t);
        Some(Ok(self.monolayer * p / (1.0 + k * p).powi(2) * self.dk_dt(t)))
    }

    fn dp_dw_wt(&self, w: f64, t: f64, _: &Saturation) -> Slot {
        Some(
            self.check_loading(w)
                .map(|()| self.monolayer / (self.k(t) * (w - self.monolayer).powi(2))),
        )
    }

    fn dp_dt_wt(&self, w: f64, t: f64, _: &Saturation) -> Slot {
        let k = self.k(t);
        Some(
            self.check_loading(w)
                .map(|()| -w / ((self.monolayer - w) * k * k) * self.dk_dt(t)),
        )
    }

    fn pi_star(&self, p0: f64, t: f64, molar_mass: f64, _: &Saturation) -> Slot {
        Some(Ok(self.monolayer / molar_mass * (1.0 + self.k(t) * p0).ln()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::sorption::{IDEAL_GAS_CONSTANT, test_support::LANGMUIR_CO2};

    fn isotherm() -> Langmuir {
        Langmuir::new(&LANGMUIR_CO2, IDEAL_GAS_CONSTANT).expect("three coefficients")
    }

    #[test]
    fn closed_form_inverses() -> Result<(), SorptionError> {
        let langmuir = isotherm();
        let none = Saturation::default();

        let w = langmuir.w_pt(3e5, 303.1, &none)?;
        assert_relative_eq!(w, 0.181_704_521_839_623, max_relative = 1e-12);

        let p = langmuir.p_wt(w, 303.1, &none).expect("closed form")?;
        assert_relative_eq!(p, 3e5, max_relative = 1e-10);

        let t = langmuir.t_pw(3e5, w).expect("closed form")?;
        assert_relative_eq!(t, 303.1, max_relative = 1e-10);
        Ok(())
    }

    #[test]
    fn loadings_beyond_the_monolayer_are_rejected() {
        let langmuir = isotherm();
        let none = Saturation::default();

        for w in [0.5, 0.349_431_46, -0.1, f64::NAN] {
            assert!(matches!(
                langmuir.p_wt(w, 303.1, &none),
                Some(Err(SorptionError::OutOfDomain { .. }))
            ));
            assert!(matches!(
                langmuir.dp_dw_wt(w, 303.1, &none),
                Some(Err(SorptionError::OutOfDomain { .. }))
            ));
        }
        assert!(matches!(
            langmuir.t_pw(3e5, 0.5),
            Some(Err(SorptionError::OutOfDomain { .. }))
        ));
        assert!(matches!(
            langmuir.t_pw(3e5, 0.0),
            Some(Err(SorptionError::OutOfDomain { .. }))
        ));
    }

    #[test]
    fn spreading_pressure_is_logarithmic() -> Result<(), SorptionError> {
        let langmuir = isotherm();
        let none = Saturation::default();

        let k = langmuir.k(303.1);
        let pi = langmuir.pi_star(2e5, 303.1, 0.044_01, &none).expect("closed form")?;
        assert_relative_eq!(pi, 0.349_431_46 / 0.044_01 * (1.0 + k * 2e5).ln());
        Ok(())
    }
}
