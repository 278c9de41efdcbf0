//! Saturation pressure from a cubic equation of state.
//!
//! Coefficients are `[EoS, pc, Tc, ω, κ₁, β₀, β₁, β₂, β₃]`. The `EoS` code
//! selects the form:
//!
//! | code            | form                                   |
//! |-----------------|----------------------------------------|
//! | `< −7`          | Soave-Redlich-Kwong, custom α          |
//! | `−7 ≤ · < −2`   | Soave-Redlich-Kwong                    |
//! | `−2 ≤ · < 7`    | Peng-Robinson, custom α                |
//! | `7 ≤ · < 12`    | Peng-Robinson                          |
//! | `≥ 12`          | Peng-Robinson-Stryjek-Vera (uses `κ₁`) |
//!
//! The custom α is the cubic `β₀ + β₁·τ + β₂·τ² + β₃·τ³` in
//! `τ = Tc/T − T/Tc`.

use std::f64::consts::{LN_10, PI, SQRT_2};

use crate::support::numeric::{GuessPolicy, NumericError, newton, symmetric_difference};

use super::super::{EquilibriumConfig, SorptionError};

const INITIAL_STEP: f64 = 25_000.0;
const FUGACITY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CubicForm {
    SoaveRedlichKwong,
    PengRobinson,
    PengRobinsonStryjekVera,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Cubic {
    form: CubicForm,
    custom_alpha: bool,
    critical_pressure: f64,
    critical_temperature: f64,
    acentric_factor: f64,
    kappa_1: f64,
    beta: [f64; 4],
}

/// Liquid and vapor fugacity coefficients at one `(p, T)`.
#[derive(Debug, Clone, Copy)]
struct Fugacities {
    liquid: Option<f64>,
    vapor: Option<f64>,
}

impl Cubic {
    pub(super) fn new(values: [f64; 9]) -> Self {
        let [code, pc, tc, omega, kappa_1, b0, b1, b2, b3] = values;
        let (form, custom_alpha) = if code < -7.0 {
            (CubicForm::SoaveRedlichKwong, true)
        } else if code < -2.0 {
            (CubicForm::SoaveRedlichKwong, false)
        } else if code < 7.0 {
            (CubicForm::PengRobinson, true)
        } else if code < 12.0 {
            (CubicForm::PengRobinson, false)
        } else {
            (CubicForm::PengRobinsonStryjekVera, false)
        };

        Self {
            form,
            custom_alpha,
            critical_pressure: pc,
            critical_temperature: tc,
            acentric_factor: omega,
            kappa_1,
            beta: [b0, b1, b2, b3],
        }
    }

    /// Returns the attraction and covolume parameters `(a, b)` at `t`.
    fn parameters(&self, t: f64, r: f64) -> (f64, f64) {
        let tc = self.critical_temperature;
        let pc = self.critical_pressure;
        let omega = self.acentric_factor;
        let reduced = t / tc;

        let (a_factor, b_factor, kappa) = match self.form {
            CubicForm::SoaveRedlichKwong => (
                1.0 / (9.0 * (2f64.cbrt() - 1.0)),
                0.08664,
                0.480 + 1.574 * omega - 0.176 * omega.powi(2),
            ),
            CubicForm::PengRobinson => (
                0.45724,
                0.077796,
                0.37464 + 1.54226 * omega - 0.269992 * omega.powi(2),
            ),
            CubicForm::PengRobinsonStryjekVera => {
                let kappa_0 = 0.378893 + 1.4897153 * omega - 0.17131848 * omega.powi(2)
                    + 0.0196554 * omega.powi(3);
                (
                    0.457235,
                    0.077796,
                    kappa_0 + self.kappa_1 * (1.0 + reduced.sqrt()) * (0.7 - reduced),
                )
            }
        };

        let alpha = if self.custom_alpha {
            let tau = tc / t - reduced;
            let [b0, b1, b2, b3] = self.beta;
            b0 + tau * (b1 + tau * (b2 + tau * b3))
        } else {
            (1.0 + kappa * (1.0 - reduced.sqrt())).powi(2)
        };

        (
            a_factor * (r * tc).powi(2) / pc * alpha,
            b_factor * r * tc / pc,
        )
    }

    fn fugacities(&self, p: f64, t: f64, r: f64) -> Fugacities {
        let (a, b) = self.parameters(t, r);
        let big_a = a * p / (r * t).powi(2);
        let big_b = b * p / (r * t);

        let (e1, e2, e3) = match self.form {
            CubicForm::SoaveRedlichKwong => (-1.0, big_a - big_b - big_b.powi(2), -big_a * big_b),
            CubicForm::PengRobinson | CubicForm::PengRobinsonStryjekVera => (
                -(1.0 - big_b),
                big_a - 3.0 * big_b.powi(2) - 2.0 * big_b,
                -(big_a * big_b - big_b.powi(2) - big_b.powi(3)),
            ),
        };
        let (z_liquid, z_vapor) = solve_cubic(e1, e2, e3);

        Fugacities {
            liquid: self.fugacity(z_liquid, big_a, big_b),
            vapor: self.fugacity(z_vapor, big_a, big_b),
        }
    }

    /// Fugacity coefficient for compressibility `z`, or `None` where it is undefined.
    fn fugacity(&self, z: f64, big_a: f64, big_b: f64) -> Option<f64> {
        if z - big_b <= 0.0 || big_b <= 1e-50 {
            return None;
        }

        let attraction = match self.form {
            CubicForm::SoaveRedlichKwong => big_a / big_b * (1.0 + big_b / z).ln(),
            CubicForm::PengRobinson | CubicForm::PengRobinsonStryjekVera => {
                big_a / (2.0 * SQRT_2 * big_b)
                    * ((z + (1.0 + SQRT_2) * big_b) / (z + (1.0 - SQRT_2) * big_b)).ln()
            }
        };
        let phi = (z - 1.0 - (z - big_b).ln() - attraction).exp();
        phi.is_finite().then_some(phi)
    }

    /// Wilson-type estimate `ln(p/pc) = 7/3·ln10·(1 + ω)·(1 − Tc/T)`.
    fn pressure_estimate(&self, t: f64) -> f64 {
        self.critical_pressure
            * (LN_10 * 7.0 / 3.0 * (1.0 + self.acentric_factor) * (1.0 - self.critical_temperature / t))
                .exp()
    }

    pub(super) fn p_sat(&self, t: f64, config: &EquilibriumConfig) -> Result<f64, SorptionError> {
        if t >= self.critical_temperature {
            return Err(SorptionError::out_of_domain(format!(
                "no vapor-liquid equilibrium at T = {t} K above Tc = {} K",
                self.critical_temperature
            )));
        }
        self.p_sat_from(t, self.pressure_estimate(t), config)
    }

    /// Steps `p` until the liquid and vapor fugacities agree.
    ///
    /// The step halves on every sign change of `ln φv − ln φl`, and `p` halves
    /// whenever either root has no fugacity.
    fn p_sat_from(
        &self,
        t: f64,
        guess: f64,
        config: &EquilibriumConfig,
    ) -> Result<f64, SorptionError> {
        let r = config.gas_constant;
        let mut p = guess;
        let mut step = INITIAL_STEP;
        let mut delta = 0.0;

        for _ in 0..config.newton.max_iters {
            let Fugacities {
                liquid: Some(phi_l),
                vapor: Some(phi_v),
            } = self.fugacities(p, t, r)
            else {
                p *= 0.5;
                continue;
            };

            let delta_old = delta;
            delta = phi_v.ln() - phi_l.ln();
            if delta.abs() <= (FUGACITY_TOLERANCE * phi_v.ln()).abs() {
                return Ok(p);
            }

            if delta_old * delta <= 0.0 {
                step *= 0.5;
            }
            let next = if delta <= 0.0 { p + step } else { p - step };
            p = if next > 0.0 { next } else { 0.5 * p };
        }

        Err(NumericError::MaxIters {
            residual: delta,
            iters: config.newton.max_iters,
        }
        .into())
    }

    pub(super) fn dp_sat_dt(&self, t: f64, config: &EquilibriumConfig) -> Result<f64, SorptionError> {
        symmetric_difference(
            |t| self.p_sat(t, config),
            t,
            config.steps.saturation_temperature,
        )
    }

    pub(super) fn t_sat(&self, p: f64, config: &EquilibriumConfig) -> Result<f64, SorptionError> {
        if p >= self.critical_pressure {
            return Err(SorptionError::out_of_domain(format!(
                "no vapor-liquid equilibrium at p = {p} Pa above pc = {} Pa",
                self.critical_pressure
            )));
        }

        let initial = self.critical_temperature
            / (1.0
                - (p.ln() - self.critical_pressure.ln())
                    / (LN_10 * 7.0 / 3.0 * (1.0 + self.acentric_factor)));

        newton(
            |t| self.p_sat(t, config),
            |t| self.dp_sat_dt(t, config),
            p,
            GuessPolicy::non_negative(initial, 5.0),
            &config.newton,
        )
    }
}

/// Solves `Z³ + e1·Z² + e2·Z + e3 = 0` and returns the smallest and largest
/// real roots.
pub(in crate::models::sorption) fn solve_cubic(e1: f64, e2: f64, e3: f64) -> (f64, f64) {
    let q = e1 * e2 / 6.0 - e3 / 2.0 - e1.powi(3) / 27.0;
    let p = e1.powi(2) / 9.0 - e2 / 3.0;
    let discriminant = q.powi(2) - p.powi(3);

    if discriminant >= 0.0 {
        let root = (q + discriminant.sqrt()).cbrt() + (q - discriminant.sqrt()).cbrt() - e1 / 3.0;
        return (root, root);
    }

    // Three real roots; here p > 0 because q² < p³.
    let theta = (q / p.powf(1.5)).clamp(-1.0, 1.0).acos();
    let roots = [0.0, 2.0, 4.0].map(|k| 2.0 * p.sqrt() * ((theta + k * PI) / 3.0).cos() - e1 / 3.0);
    let smallest = roots.iter().copied().fold(f64::INFINITY, f64::min);
    let largest = roots.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (smallest, largest)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::sorption::test_support::R134A_PENG_ROBINSON;

    fn peng_robinson() -> Cubic {
        Cubic::new(R134A_PENG_ROBINSON)
    }

    #[test]
    fn cubic_roots_are_ordered() {
        // (Z − 0.1)(Z − 0.5)(Z − 0.9)
        let (low, high) = solve_cubic(-1.5, 0.59, -0.045);
        assert_relative_eq!(low, 0.1, epsilon = 1e-12);
        assert_relative_eq!(high, 0.9, epsilon = 1e-12);

        // (Z − 2)(Z² + 1) has a single real root.
        let (low, high) = solve_cubic(-2.0, 1.0, -2.0);
        assert_relative_eq!(low, 2.0, epsilon = 1e-12);
        assert_eq!(low, high);
    }

    #[test]
    fn selector_follows_code_ranges() {
        let mut values = R134A_PENG_ROBINSON;
        for (code, form, custom) in [
            (-10.0, CubicForm::SoaveRedlichKwong, true),
            (-5.0, CubicForm::SoaveRedlichKwong, false),
            (0.0, CubicForm::PengRobinson, true),
            (10.0, CubicForm::PengRobinson, false),
            (15.0, CubicForm::PengRobinsonStryjekVera, false),
        ] {
            values[0] = code;
            let cubic = Cubic::new(values);
            assert_eq!(cubic.form, form);
            assert_eq!(cubic.custom_alpha, custom);
        }
    }

    #[test]
    fn saturation_close_to_reference_correlation() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let cubic = peng_robinson();

        // The R-134a reference equation gives 163.9 kPa at 258.15 K.
        assert_relative_eq!(cubic.p_sat(258.15, &config)?, 163_939.0, max_relative = 5e-3);
        assert_relative_eq!(cubic.p_sat(300.0, &config)?, 701_553.0, max_relative = 1e-4);
        Ok(())
    }

    #[test]
    fn every_form_settles() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let mut values = R134A_PENG_ROBINSON;
        for code in [-5.0, 10.0, 15.0] {
            values[0] = code;
            let p = Cubic::new(values).p_sat(300.0, &config)?;
            assert_relative_eq!(p, 705_000.0, max_relative = 0.02);
        }
        Ok(())
    }

    #[test]
    fn saturation_temperature_round_trips() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let cubic = peng_robinson();

        let p = cubic.p_sat(258.15, &config)?;
        assert_relative_eq!(cubic.t_sat(p, &config)?, 258.15, epsilon = 1e-2);
        Ok(())
    }

    #[test]
    fn slope_is_close_to_wide_difference() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        let cubic = peng_robinson();

        let slope = cubic.dp_sat_dt(258.15, &config)?;
        let wide = symmetric_difference(|t| cubic.p_sat(t, &config), 258.15, 0.01)?;
        assert_relative_eq!(slope, wide, max_relative = 0.01);
        Ok(())
    }

    #[test]
    fn supercritical_states_are_rejected() {
        let config = EquilibriumConfig::default();
        let cubic = peng_robinson();

        assert!(matches!(
            cubic.p_sat(380.0, &config),
            Err(SorptionError::OutOfDomain { .. })
        ));
        assert!(matches!(
            cubic.t_sat(5e6, &config),
            Err(SorptionError::OutOfDomain { .. })
        ));
    }
}
