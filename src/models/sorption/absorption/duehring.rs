use crate::support::numeric::GuessPolicy;

use super::super::{
    Slot, SorptionError,
    coefficients::{polynomial, polynomial_slope, take},
};
use super::{AbsorptionFamily, ConventionalCorrelation};

/// Dühring correlation.
///
/// The solution at temperature `T` and concentration `X` has the vapor
/// pressure of the pure refrigerant at the reference temperature
/// `T_ref = (n·(T − 273.15) + m − B(X))/A(X) + q`. That vapor pressure is
/// `p = exp(C + D/T_ref + E/T_ref²)/r`, with `A` and `B` cubic polynomials in
/// the concentration in percent.
///
/// Coefficients are `[a0, a1, a2, a3, b0, b1, b2, b3, C, D, E, m, n, q, r]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duehring {
    a: [f64; 4],
    b: [f64; 4],
    c: f64,
    d: f64,
    e: f64,
    m: f64,
    n: f64,
    q: f64,
    r: f64,
}

impl Duehring {
    /// Binds coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than fifteen values.
    pub fn new(values: &[f64]) -> Result<Self, SorptionError> {
        let [a0, a1, a2, a3, b0, b1, b2, b3, c, d, e, m, n, q, r] =
            take::<15>(values, AbsorptionFamily::Duehring.name())?;
        Ok(Self {
            a: [a0, a1, a2, a3],
            b: [b0, b1, b2, b3],
            c,
            d,
            e,
            m,
            n,
            q,
            r,
        })
    }

    fn reference_temperature(&self, x: f64, t: f64) -> f64 {
        let percent = 100.0 * x;
        (self.n * (t - 273.15) + self.m - polynomial(&self.b, percent)) / polynomial(&self.a, percent)
            + self.q
    }

    fn pressure(&self, t_ref: f64) -> f64 {
        (self.c + self.d / t_ref + self.e / (t_ref * t_ref)).exp() / self.r
    }

    /// `dp/dT_ref`.
    fn pressure_slope(&self, t_ref: f64) -> f64 {
        -self.pressure(t_ref) * (self.d * t_ref + 2.0 * self.e) / t_ref.powi(3)
    }
}

impl ConventionalCorrelation for Duehring {
    fn family(&self) -> AbsorptionFamily {
        AbsorptionFamily::Duehring
    }

    fn p_xt(&self, x: f64, t: f64) -> Result<f64, SorptionError> {
        Ok(self.pressure(self.reference_temperature(x, t)))
    }

    fn t_px(&self, p: f64, x: f64) -> Slot {
        // Positive root of E/T_ref² + D/T_ref + C − ln(p·r) = 0.
        let aux1 = (p * self.r).ln() - self.c;
        let aux2 = self.d / aux1;
        let discriminant = aux2 * aux2 / 4.0 + self.e / aux1;
        if discriminant.is_nan() || discriminant < 0.0 {
            return Some(Err(SorptionError::out_of_domain(format!(
                "no Dühring reference temperature for p = {p} Pa"
            ))));
        }
        let t_ref = aux2 / 2.0 + discriminant.sqrt();

        let percent = 100.0 * x;
        let a = polynomial(&self.a, percent);
        let b = polynomial(&self.b, percent);
        Some(Ok(((t_ref - self.q) * a + b - self.m) / self.n + 273.15))
    }

    fn dp_dx_xt(&self, x: f64, t: f64) -> Slot {
        let percent = 100.0 * x;
        let a = polynomial(&self.a, percent);
        let b = polynomial(&self.b, percent);
        let da = polynomial_slope(&self.a, percent);
        let db = polynomial_slope(&self.b, percent);

        let dt_ref_dx =
            -100.0 * (da * (self.n * (t - 273.15) + self.m - b) + a * db) / (a * a);
        Some(Ok(self.pressure_slope(self.reference_temperature(x, t)) * dt_ref_dx))
    }

    fn dp_dt_xt(&self, x: f64, t: f64) -> Slot {
        let a = polynomial(&self.a, 100.0 * x);
        Some(Ok(self.pressure_slope(self.reference_temperature(x, t)) * self.n / a))
    }

    fn concentration_policy(&self) -> GuessPolicy {
        GuessPolicy::non_negative(0.5, 0.001)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::sorption::test_support::DUEHRING_LIBR;

    #[test]
    fn reference_pressure_and_slopes() -> Result<(), SorptionError> {
        let duehring = Duehring::new(&DUEHRING_LIBR)?;

        let p = duehring.p_xt(0.65, 323.15)?;
        assert_relative_eq!(p, 724.659_956_886_7, max_relative = 1e-10);

        let dp_dx = duehring.dp_dx_xt(0.65, 323.15).expect("closed form")?;
        assert_relative_eq!(dp_dx, -5_758.365_049_35, max_relative = 1e-9);

        let dp_dt = duehring.dp_dt_xt(0.65, 323.15).expect("closed form")?;
        assert_relative_eq!(dp_dt, 19.686_863_650_07, max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn temperature_inverse_takes_the_physical_root() -> Result<(), SorptionError> {
        let duehring = Duehring::new(&DUEHRING_LIBR)?;
        let p = duehring.p_xt(0.65, 323.15)?;
        let t = duehring.t_px(p, 0.65).expect("closed form")?;
        assert_relative_eq!(t, 323.15, max_relative = 1e-10);
        Ok(())
    }

    #[test]
    fn concentration_is_left_to_the_wrapper() -> Result<(), SorptionError> {
        let duehring = Duehring::new(&DUEHRING_LIBR)?;
        assert!(duehring.x_pt(724.66, 323.15).is_none());
        assert!(duehring.dx_dp_pt(724.66, 323.15).is_none());
        Ok(())
    }
}
