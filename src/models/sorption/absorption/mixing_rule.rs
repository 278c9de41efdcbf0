use std::f64::consts::LN_10;

use crate::support::numeric::{GuessPolicy, NumericError, Repair};

use super::super::{SorptionError, coefficients::take, refrigerant::solve_cubic};
use super::AbsorptionFamily;

const BUBBLE_TOLERANCE: f64 = 1e-12;
const BUBBLE_MAX_ITERS: usize = 100;
const VAPOR_MAX_ITERS: usize = 50;
const PRESSURE_CUT: f64 = 0.85;
const UNDAMPED_ITERS: usize = 5;
const MAX_PRESSURE_STEP: f64 = 0.25;
const TRIVIAL_GAP: f64 = 1e-9;
const MIN_MOLE_FRACTION: f64 = 1e-3;

/// Cubic equation of state for a binary mixture with the one-parameter
/// van der Waals mixing rule.
///
/// `p = R·T/(v − b) − a/(v² + m·v·b + n·b²)` with
/// `a = x₁²·a₁ + x₂²·a₂ + 2·x₁·x₂·√(a₁·a₂)·(1 − k₁₂)` and
/// `b = x₁·b₁ + x₂·b₂`.
///
/// Component 1 is the refrigerant, and `x` is always its mole fraction in
/// the liquid.
///
/// Coefficients are `[EoS, ω₁, ω₂, k₁₂, Tc₁, Tc₂, pc₁, pc₂]`. An `EoS`
/// selector above 5 picks Peng-Robinson, one below −5 picks
/// Soave-Redlich-Kwong.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnePvdw {
    form: Form,
    components: [Component; 2],
    k_12: f64,
    r: f64,
}

/// Liquid at its bubble point together with the first bubble of vapor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubblePoint {
    /// Equilibrium pressure in Pa.
    pub pressure: f64,

    /// Refrigerant mole fraction of the vapor.
    pub vapor_mole_fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    PengRobinson,
    SoaveRedlichKwong,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Component {
    acentric_factor: f64,
    critical_temperature: f64,
    critical_pressure: f64,
}

/// Constants of one cubic form.
struct Constants {
    m: f64,
    n: f64,
    a0: f64,
    kappa: [f64; 3],
    b0: f64,
}

impl Form {
    fn constants(self) -> Constants {
        match self {
            Self::PengRobinson => Constants {
                m: 2.0,
                n: -1.0,
                a0: 0.457_24,
                kappa: [0.374_64, 1.542_26, -0.269_92],
                b0: 0.077_796,
            },
            Self::SoaveRedlichKwong => Constants {
                m: 1.0,
                n: 0.0,
                a0: 1.0 / (9.0 * (2_f64.cbrt() - 1.0)),
                kappa: [0.480, 1.574, -0.176],
                b0: 0.086_64,
            },
        }
    }
}

impl OnePvdw {
    /// Binds coefficients, with `r` the gas constant in J/(mol·K).
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than eight
    /// values, and [`SorptionError::OutOfDomain`] if the selector lies in
    /// `[−5, 5]`.
    pub fn new(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [selector, omega_1, omega_2, k_12, tc_1, tc_2, pc_1, pc_2] =
            take::<8>(values, AbsorptionFamily::OnePvdw.name())?;

        let form = if selector > 5.0 {
            Form::PengRobinson
        } else if selector < -5.0 {
            Form::SoaveRedlichKwong
        } else {
            return Err(SorptionError::out_of_domain(format!(
                "equation-of-state selector {selector} is neither Peng-Robinson (> 5) \
                 nor Soave-Redlich-Kwong (< -5)"
            )));
        };

        Ok(Self {
            form,
            components: [
                Component {
                    acentric_factor: omega_1,
                    critical_temperature: tc_1,
                    critical_pressure: pc_1,
                },
                Component {
                    acentric_factor: omega_2,
                    critical_temperature: tc_2,
                    critical_pressure: pc_2,
                },
            ],
            k_12,
            r,
        })
    }

    /// Pressure in Pa at temperature `t`, molar volume `v` in m³/mol and
    /// refrigerant mole fraction `x`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::OutOfDomain`] if `v` does not exceed the
    /// mixture co-volume.
    pub fn p_tvx(&self, t: f64, v: f64, x: f64) -> Result<f64, SorptionError> {
        let Constants { m, n, .. } = self.form.constants();
        let Mixture { a, b, .. } = self.pure(t).mix(x);

        if v <= b {
            return Err(SorptionError::out_of_domain(format!(
                "molar volume {v} m³/mol is below the mixture co-volume {b} m³/mol"
            )));
        }
        Ok(self.r * t / (v - b) - a / (v * v + m * v * b + n * b * b))
    }

    /// Bubble point of a liquid with refrigerant mole fraction `x` at `t`.
    ///
    /// Starts from Raoult's law with Wilson-type vapor pressures and scales
    /// the pressure by `Σy` until the vapor mole fractions
    /// `yᵢ = xᵢ·φᵢ(liquid)/φᵢ(vapor)` sum to one. The vapor composition is
    /// found by successive substitution at every pressure step. Pressures
    /// where a phase has no fugacity coefficient, or where the vapor
    /// collapses onto the liquid composition, are cut by 15 %.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::OutOfDomain`] unless `t > 0` and `0 < x < 1`,
    /// and [`SorptionError::Numeric`] if the pressure does not settle.
    pub fn bubble_point(&self, t: f64, x: f64) -> Result<BubblePoint, SorptionError> {
        if t.is_nan() || t <= 0.0 {
            return Err(SorptionError::out_of_domain(format!(
                "bubble point needs a positive temperature, got T = {t} K"
            )));
        }
        if x.is_nan() || x <= 0.0 || x >= 1.0 {
            return Err(SorptionError::out_of_domain(format!(
                "bubble point needs a binary liquid with 0 < x < 1, got x = {x}"
            )));
        }

        let pure = self.pure(t);
        let liquid = [x, 1.0 - x];
        let liquid_mixture = pure.mix(x);
        let estimates = self.pressure_estimates(t);
        let mut p = x * estimates[0] + (1.0 - x) * estimates[1];
        let mut residual = f64::NAN;

        for iters in 0..BUBBLE_MAX_ITERS {
            let Some(phi_liquid) =
                self.fugacity_coefficients(&pure, &liquid_mixture, p, t, Phase::Liquid)
            else {
                p *= PRESSURE_CUT;
                continue;
            };

            let vapor = self.vapor_composition(&pure, liquid, phi_liquid, estimates, p, t);
            let sum = vapor[0] + vapor[1];
            residual = 1.0 - sum;

            if residual.abs() <= BUBBLE_TOLERANCE {
                let y = vapor[0] / sum;
                if (y - x).abs() <= TRIVIAL_GAP {
                    p *= PRESSURE_CUT;
                    continue;
                }
                return Ok(BubblePoint {
                    pressure: p,
                    vapor_mole_fraction: y,
                });
            }

            p *= if iters < UNDAMPED_ITERS {
                sum
            } else {
                sum.clamp(1.0 - MAX_PRESSURE_STEP, 1.0 + MAX_PRESSURE_STEP)
            };
        }

        Err(NumericError::MaxIters {
            residual,
            iters: BUBBLE_MAX_ITERS,
        }
        .into())
    }

    /// Initial guess for the liquid mole fraction in equilibrium with `p`.
    pub(super) fn mole_fraction_policy(&self, p: f64, t: f64) -> GuessPolicy {
        let [p_1, p_2] = self.pressure_estimates(t);
        let raoult = (p - p_2) / (p_1 - p_2);
        let initial = if raoult.is_finite() {
            raoult.clamp(MIN_MOLE_FRACTION, 1.0 - MIN_MOLE_FRACTION)
        } else {
            0.5
        };
        GuessPolicy::new(
            initial,
            Repair::Outside {
                lower: MIN_MOLE_FRACTION,
                upper: 1.0 - MIN_MOLE_FRACTION,
                below: MIN_MOLE_FRACTION,
                above: 1.0 - MIN_MOLE_FRACTION,
            },
        )
    }

    /// Initial guess for the temperature at which a liquid of mole fraction
    /// `x` boils at `p`, from Raoult's law for the refrigerant alone.
    pub(super) fn temperature_policy(&self, p: f64, x: f64) -> GuessPolicy {
        let [refrigerant, _] = self.components;
        let tc = refrigerant.critical_temperature;
        let initial = tc
            / (1.0
                - (p / (x * refrigerant.critical_pressure)).ln()
                    / (LN_10 * 7.0 / 3.0 * (1.0 + refrigerant.acentric_factor)));
        let initial = if initial.is_finite() && initial > 0.0 { initial } else { tc };
        GuessPolicy::non_negative(initial, tc)
    }

    fn pure(&self, t: f64) -> Pure {
        let Constants { a0, kappa, b0, .. } = self.form.constants();

        let a = self.components.map(|c| {
            let slope = kappa[0] + kappa[1] * c.acentric_factor + kappa[2] * c.acentric_factor.powi(2);
            let alpha = (1.0 + slope * (1.0 - (t / c.critical_temperature).sqrt())).powi(2);
            a0 * (self.r * c.critical_temperature).powi(2) / c.critical_pressure * alpha
        });
        let b = self
            .components
            .map(|c| b0 * self.r * c.critical_temperature / c.critical_pressure);

        Pure {
            a,
            b,
            a_12: (a[0] * a[1]).sqrt() * (1.0 - self.k_12),
        }
    }

    /// Wilson-type vapor pressures `pc·10^(7/3·(1 + ω)·(1 − Tc/T))`.
    fn pressure_estimates(&self, t: f64) -> [f64; 2] {
        self.components.map(|c| {
            c.critical_pressure
                * (LN_10 * 7.0 / 3.0 * (1.0 + c.acentric_factor) * (1.0 - c.critical_temperature / t))
                    .exp()
        })
    }

    /// Unnormalized vapor mole fractions in equilibrium with the liquid at `p`.
    fn vapor_composition(
        &self,
        pure: &Pure,
        liquid: [f64; 2],
        phi_liquid: [f64; 2],
        estimates: [f64; 2],
        p: f64,
        t: f64,
    ) -> [f64; 2] {
        let mut vapor = [0, 1].map(|i| liquid[i] * estimates[i] / p);

        for _ in 0..VAPOR_MAX_ITERS {
            let y = vapor[0] / (vapor[0] + vapor[1]);
            let Some(phi_vapor) = self.fugacity_coefficients(pure, &pure.mix(y), p, t, Phase::Vapor)
            else {
                vapor = [0.95 * vapor[0], 0.5 * vapor[1]];
                continue;
            };

            let next = [0, 1].map(|i| liquid[i] * phi_liquid[i] / phi_vapor[i]);
            let change = (next[0] - vapor[0]).abs().max((next[1] - vapor[1]).abs());
            vapor = next;
            if change <= BUBBLE_TOLERANCE {
                break;
            }
        }
        vapor
    }

    /// Fugacity coefficients of both components in one phase, or `None` if
    /// the chosen root leaves no free volume.
    fn fugacity_coefficients(
        &self,
        pure: &Pure,
        mixture: &Mixture,
        p: f64,
        t: f64,
        phase: Phase,
    ) -> Option<[f64; 2]> {
        let Constants { m, n, .. } = self.form.constants();
        let rt = self.r * t;
        let big_a = mixture.a * p / rt.powi(2);
        let big_b = mixture.b * p / rt;

        let (z_liquid, z_vapor) = solve_cubic(
            -(1.0 - (m - 1.0) * big_b),
            big_a + (n - m) * big_b.powi(2) - m * big_b,
            -(big_a * big_b + n * big_b.powi(2) + n * big_b.powi(3)),
        );
        let z = match phase {
            Phase::Liquid => z_liquid,
            Phase::Vapor => z_vapor,
        };
        if z - big_b <= 0.0 || big_b <= 0.0 {
            return None;
        }

        // Roots of u² + m·u + n.
        let root = (m * m - 4.0 * n).sqrt();
        let (delta_1, delta_2) = (0.5 * (m + root), 0.5 * (m - root));
        let log_ratio = ((z + delta_1 * big_b) / (z + delta_2 * big_b)).ln();

        let phi = [0, 1].map(|i| {
            let covolume = pure.b[i] / mixture.b;
            let attraction = 2.0 * mixture.partial_a[i] / mixture.a - covolume;
            (covolume * (z - 1.0) - (z - big_b).ln()
                - big_a / (big_b * (delta_1 - delta_2)) * attraction * log_ratio)
                .exp()
        });
        phi.iter().all(|value| value.is_finite()).then_some(phi)
    }
}

/// Pure-component parameters at one temperature.
#[derive(Debug, Clone, Copy)]
struct Pure {
    a: [f64; 2],
    b: [f64; 2],
    a_12: f64,
}

/// Mixture parameters at one composition.
#[derive(Debug, Clone, Copy)]
struct Mixture {
    a: f64,
    b: f64,
    /// `Σⱼ xⱼ·aᵢⱼ` per component.
    partial_a: [f64; 2],
}

impl Pure {
    fn mix(&self, x: f64) -> Mixture {
        let [a_1, a_2] = self.a;
        let x2 = 1.0 - x;
        let partial_a = [x * a_1 + x2 * self.a_12, x * self.a_12 + x2 * a_2];
        Mixture {
            a: x * partial_a[0] + x2 * partial_a[1],
            b: x * self.b[0] + x2 * self.b[1],
            partial_a,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Liquid,
    Vapor,
}
