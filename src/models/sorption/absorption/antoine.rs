use std::f64::consts::LN_10;

use super::super::{
    Slot, SorptionError,
    coefficients::{polynomial, polynomial_slope, take},
};
use super::{AbsorptionFamily, ConventionalCorrelation};

/// Antoine-type absorption correlation.
///
/// `log₁₀(p/p_ref) = Σᵢ (aᵢ + 1000·bᵢ/(T − c))·(100·X)ⁱ` for `i = 0..=4`.
///
/// Coefficients are `[a0..a4, b0..b4, c, p_ref]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Antoine {
    a: [f64; 5],
    b: [f64; 5],
    c: f64,
    p_ref: f64,
}

impl Antoine {
    /// Binds coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than twelve values.
    pub fn new(values: &[f64]) -> Result<Self, SorptionError> {
        let [a0, a1, a2, a3, a4, b0, b1, b2, b3, b4, c, p_ref] =
            take::<12>(values, AbsorptionFamily::Antoine.name())?;
        Ok(Self {
            a: [a0, a1, a2, a3, a4],
            b: [b0, b1, b2, b3, b4],
            c,
            p_ref,
        })
    }

    /// Polynomial coefficients in `100·X` at temperature `t`.
    fn coefficients(&self, t: f64) -> [f64; 5] {
        let scale = 1000.0 / (t - self.c);
        std::array::from_fn(|i| self.a[i] + scale * self.b[i])
    }

    fn pressure(&self, x: f64, t: f64) -> f64 {
        self.p_ref * 10_f64.powf(polynomial(&self.coefficients(t), 100.0 * x))
    }
}

impl ConventionalCorrelation for Antoine {
    fn family(&self) -> AbsorptionFamily {
        AbsorptionFamily::Antoine
    }

    fn p_xt(&self, x: f64, t: f64) -> Result<f64, SorptionError> {
        if t == self.c {
            return Err(SorptionError::out_of_domain(format!(
                "absorption Antoine correlation is singular at T = {t} K"
            )));
        }
        Ok(self.pressure(x, t))
    }

    fn dp_dx_xt(&self, x: f64, t: f64) -> Slot {
        let slope = 100.0 * polynomial_slope(&self.coefficients(t), 100.0 * x);
        Some(self.p_xt(x, t).map(|p| LN_10 * p * slope))
    }

    fn dp_dt_xt(&self, x: f64, t: f64) -> Slot {
        let slope = -1000.0 / (t - self.c).powi(2) * polynomial(&self.b, 100.0 * x);
        Some(self.p_xt(x, t).map(|p| LN_10 * p * slope))
    }
}
