use super::super::{
    Slot, SorptionError,
    coefficients::{polynomial, polynomial_slope, take},
};
use super::{AdsorptionFamily, AdsorptionIsotherm, Saturation};

/// Freundlich isotherm in relative pressure: `w = A(T)·(p/p_sat)^B(T)`.
///
/// `A` and `B` are cubic polynomials in `T`. Coefficients are
/// `[A0, A1, A2, A3, B0, B1, B2, B3]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Freundlich {
    a: [f64; 4],
    b: [f64; 4],
}

/// Polynomial values and slopes at one temperature.
#[derive(Debug, Clone, Copy)]
struct Exponents {
    a: f64,
    b: f64,
    da: f64,
    db: f64,
}

impl Freundlich {
    /// Binds coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than eight values.
    pub fn new(values: &[f64]) -> Result<Self, SorptionError> {
        let [a0, a1, a2, a3, b0, b1, b2, b3] =
            take::<8>(values, AdsorptionFamily::Freundlich.name())?;
        Ok(Self {
            a: [a0, a1, a2, a3],
            b: [b0, b1, b2, b3],
        })
    }

    fn at(&self, t: f64) -> Exponents {
        Exponents {
            a: polynomial(&self.a, t),
            b: polynomial(&self.b, t),
            da: polynomial_slope(&self.a, t),
            db: polynomial_slope(&self.b, t),
        }
    }

    fn pressure(&self, w: f64, t: f64, p_sat: f64) -> f64 {
        let Exponents { a, b, .. } = self.at(t);
        p_sat * (w / a).powf(1.0 / b)
    }

    fn loading_temperature_slope(
        &self,
        p: f64,
        t: f64,
        saturation: &Saturation,
    ) -> Result<f64, SorptionError> {
        let p_sat = saturation.vapor_pressure()?;
        let dp_sat = saturation.vapor_pressure_slope()?;
        let Exponents { a, b, da, db } = self.at(t);

        let ratio = p / p_sat;
        Ok(ratio.powf(b) * (da + a * db * ratio.ln() - a * b * dp_sat / p_sat))
    }

    fn pressure_temperature_slope(
        &self,
        w: f64,
        t: f64,
        saturation: &Saturation,
    ) -> Result<f64, SorptionError> {
        let p_sat = saturation.vapor_pressure()?;
        let dp_sat = saturation.vapor_pressure_slope()?;
        let Exponents { a, b, da, db } = self.at(t);

        let ratio = w / a;
        Ok(ratio.powf(1.0 / b)
            * (-b * p_sat * da - a * p_sat * db * ratio.ln() + a * b * b * dp_sat)
            / (a * b * b))
    }
}

impl AdsorptionIsotherm for Freundlich {
    fn family(&self) -> AdsorptionFamily {
        AdsorptionFamily::Freundlich
    }

    fn w_pt(&self, p: f64, t: f64, saturation: &Saturation) -> Result<f64, SorptionError> {
        let p_sat = saturation.vapor_pressure()?;
        let Exponents { a, b, .. } = self.at(t);
        Ok(a * (p / p_sat).powf(b))
    }

    fn p_wt(&self, w: f64, t: f64, saturation: &Saturation) -> Slot {
        Some(saturation.vapor_pressure().map(|p_sat| self.pressure(w, t, p_sat)))
    }

    fn dw_dp_pt(&self, p: f64, t: f64, saturation: &Saturation) -> Slot {
        let b = self.at(t).b;
        Some(self.w_pt(p, t, saturation).map(|w| b * w / p))
    }

    fn dw_dt_pt(&self, p: f64, t: f64, saturation: &Saturation) -> Slot {
        Some(self.loading_temperature_slope(p, t, saturation))
    }

    fn dp_dw_wt(&self, w: f64, t: f64, saturation: &Saturation) -> Slot {
        let b = self.at(t).b;
        Some(
            saturation
                .vapor_pressure()
                .map(|p_sat| self.pressure(w, t, p_sat) / (w * b)),
        )
    }

    fn dp_dt_wt(&self, w: f64, t: f64, saturation: &Saturation) -> Slot {
        Some(self.pressure_temperature_slope(w, t, saturation))
    }

    fn pi_star(&self, p0: f64, t: f64, molar_mass: f64, saturation: &Saturation) -> Slot {
        let Exponents { a, b, .. } = self.at(t);
        Some(
            saturation
                .vapor_pressure()
                .map(|p_sat| a / b * (p0 / p_sat).powf(b) / molar_mass),
        )
    }
}
