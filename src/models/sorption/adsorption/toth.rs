use super::super::{Slot, SorptionError, coefficients::take};
use super::{AdsorptionFamily, AdsorptionIsotherm, Saturation};

/// Toth isotherm.
///
/// `w = w_s·b^m·p / (1 + b^r·p^n)^(1/n)` with `b = b₀·exp(q/T)` and
/// `n = n₀ + c/T`. Coefficients are `[b₀, c, m, n₀, q, r, w_s]`; a negative
/// `r` means `r = n`.
///
/// The temperature inverse and the spreading pressure have no closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Toth {
    b0: f64,
    c: f64,
    m: f64,
    n0: f64,
    q: f64,
    r: Option<f64>,
    capacity: f64,
}

/// Temperature-dependent parameters at one temperature.
#[derive(Debug, Clone, Copy)]
struct Parameters {
    b: f64,
    n: f64,
    r: f64,
}

impl Toth {
    /// Binds coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than seven values.
    pub fn new(values: &[f64]) -> Result<Self, SorptionError> {
        let [b0, c, m, n0, q, r, capacity] = take::<7>(values, AdsorptionFamily::Toth.name())?;
        Ok(Self {
            b0,
            c,
            m,
            n0,
            q,
            r: (r >= 0.0).then_some(r),
            capacity,
        })
    }

    fn parameters(&self, t: f64) -> Parameters {
        let n = self.n0 + self.c / t;
        Parameters {
            b: self.b0 * (self.q / t).exp(),
            n,
            r: self.r.unwrap_or(n),
        }
    }

    /// `w = w_s·b^m·p / (1 + u)^(1/n)` with `u = b^r·p^n`.
    fn loading(&self, p: f64, t: f64) -> f64 {
        let Parameters { b, n, r } = self.parameters(t);
        self.capacity * b.powf(self.m) * p / (1.0 + b.powf(r) * p.powf(n)).powf(1.0 / n)
    }

    fn slope_p(&self, p: f64, t: f64) -> f64 {
        let Parameters { b, n, r } = self.parameters(t);
        self.capacity * b.powf(self.m) * (1.0 + b.powf(r) * p.powf(n)).powf(-1.0 / n - 1.0)
    }

    fn slope_t(&self, p: f64, t: f64) -> f64 {
        let Parameters { b, n, r } = self.parameters(t);
        let u = b.powf(r) * p.powf(n);

        let dln_b = -self.q / (t * t);
        let dn = -self.c / (t * t);
        let dr = if self.r.is_none() { dn } else { 0.0 };
        let du = u * (dr * b.ln() + r * dln_b + dn * p.ln());

        let dln_w = self.m * dln_b + dn / (n * n) * (1.0 + u).ln() - du / (n * (1.0 + u));
        self.loading(p, t) * dln_w
    }

    /// `(a, d)` with `a = w_s^n·b^(m·n)` and `d = a − b^r·w^n`, which must be positive.
    fn saturation_gap(&self, w: f64, t: f64) -> Result<(f64, f64), SorptionError> {
        let Parameters { b, n, r } = self.parameters(t);
        let a = self.capacity.powf(n) * b.powf(self.m * n);
        let gap = a - w.powf(n) * b.powf(r);
        if w >= 0.0 && gap > 0.0 {
            Ok((a, gap))
        } else {
            Err(SorptionError::out_of_domain(format!(
                "loading {w} kg/kg is outside the Toth capacity at {t} K"
            )))
        }
    }

    fn pressure(&self, w: f64, t: f64) -> Result<f64, SorptionError> {
        let n = self.parameters(t).n;
        let (_, gap) = self.saturation_gap(w, t)?;
        Ok(w / gap.powf(1.0 / n))
    }
}

impl AdsorptionIsotherm for Toth {
    fn family(&self) -> AdsorptionFamily {
        AdsorptionFamily::Toth
    }

    fn w_pt(&self, p: f64, t: f64, _: &Saturation) -> Result<f64, SorptionError> {
        Ok(self.loading(p, t))
    }

    fn p_wt(&self, w: f64, t: f64, _: &Saturation) -> Slot {
        Some(self.pressure(w, t))
    }

    fn dw_dp_pt(&self, p: f64, t: f64, _: &Saturation) -> Slot {
        Some(Ok(self.slope_p(p, t)))
    }

    fn dw_dt_pt(&self, p: f64, t: f64, _: &Saturation) -> Slot {
        Some(Ok(self.slope_t(p, t)))
    }

    fn dp_dw_wt(&self, w: f64, t: f64, _: &Saturation) -> Slot {
        let n = self.parameters(t).n;
        Some(
            self.saturation_gap(w, t)
                .map(|(a, gap)| a * gap.powf(-1.0 / n - 1.0)),
        )
    }

    fn dp_dt_wt(&self, w: f64, t: f64, _: &Saturation) -> Slot {
        // Implicit differentiation of w(p, T) = const.
        Some(
            self.pressure(w, t)
                .map(|p| -self.slope_t(p, t) / self.slope_p(p, t)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::sorption::test_support::TOTH_WATER;

    #[test]
    fn reference_loading_and_inverse() -> Result<(), SorptionError> {
        let toth = Toth::new(&TOTH_WATER)?;
        let none = Saturation::default();

        let w = toth.w_pt(1270.0, 373.15, &none)?;
        assert_relative_eq!(w, 0.124_245_400_921, max_relative = 1e-9);

        let p = toth.p_wt(w, 373.15, &none).expect("closed form")?;
        assert_relative_eq!(p, 1270.0, max_relative = 1e-10);
        Ok(())
    }

    #[test]
    fn loadings_beyond_capacity_have_no_pressure() -> Result<(), SorptionError> {
        let toth = Toth::new(&TOTH_WATER)?;
        let none = Saturation::default();

        for w in [10.0, 0.422_675_081_243_106, -0.01] {
            assert!(matches!(
                toth.p_wt(w, 373.15, &none),
                Some(Err(SorptionError::OutOfDomain { .. }))
            ));
            assert!(matches!(
                toth.dp_dw_wt(w, 373.15, &none),
                Some(Err(SorptionError::OutOfDomain { .. }))
            ));
            assert!(matches!(
                toth.dp_dt_wt(w, 373.15, &none),
                Some(Err(SorptionError::OutOfDomain { .. }))
            ));
        }
        Ok(())
    }

    #[test]
    fn no_closed_form_temperature_or_spreading_pressure() -> Result<(), SorptionError> {
        let toth = Toth::new(&TOTH_WATER)?;
        assert!(toth.t_pw(1270.0, 0.12).is_none());
        assert!(toth.pi_star(1270.0, 373.15, 0.018, &Saturation::default()).is_none());
        Ok(())
    }

    #[test]
    fn reduces_to_langmuir_for_unit_exponents() -> Result<(), SorptionError> {
        let toth = Toth::new(&[1e-4, 0.0, 1.0, 1.0, 0.0, -1.0, 0.3])?;
        let w = toth.w_pt(5000.0, 300.0, &Saturation::default())?;
        assert_relative_eq!(w, 0.3 * 0.5 / 1.5, max_relative = 1e-12);
        Ok(())
    }
}
