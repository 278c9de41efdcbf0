use crate::support::numeric::GuessPolicy;

use super::super::{Slot, SorptionError, coefficients::take};
use super::{AdsorptionFamily, AdsorptionIsotherm, Saturation};

/// Dual-site Sips isotherm.
///
/// Two Sips sites add up: `w = Σ w_i·x_i/(1 + x_i)` with `x_i = (b_i·p)^(1/η_i)`
/// and `b_i = b_i0·exp(Q_i/(R·T)·(1 − T/T₀))`.
///
/// Coefficients are `[b_A0, b_B0, Q_A, Q_B, η_A, η_B, w_A, w_B, T₀]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualSiteSips {
    sites: [Site; 2],
    reference_temperature: f64,
    r: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Site {
    affinity: f64,
    heat: f64,
    heterogeneity: f64,
    capacity: f64,
}

impl DualSiteSips {
    /// Binds coefficients, with `r` the gas constant in J/(mol·K).
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than nine values.
    pub fn new(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [b_a, b_b, q_a, q_b, eta_a, eta_b, w_a, w_b, t0] =
            take::<9>(values, AdsorptionFamily::DualSiteSips.name())?;
        Ok(Self {
            sites: [
                Site {
                    affinity: b_a,
                    heat: q_a,
                    heterogeneity: eta_a,
                    capacity: w_a,
                },
                Site {
                    affinity: b_b,
                    heat: q_b,
                    heterogeneity: eta_b,
                    capacity: w_b,
                },
            ],
            reference_temperature: t0,
            r,
        })
    }

    fn b(&self, site: &Site, t: f64) -> f64 {
        site.affinity * (site.heat / (self.r * t) * (1.0 - t / self.reference_temperature)).exp()
    }

    /// Sums `f(site, b, x)` over both sites.
    fn sum(&self, p: f64, t: f64, f: impl Fn(&Site, f64, f64) -> f64) -> f64 {
        self.sites
            .iter()
            .map(|site| {
                let b = self.b(site, t);
                let x = (b * p).powf(1.0 / site.heterogeneity);
                f(site, b, x)
            })
            .sum()
    }
}

impl AdsorptionIsotherm for DualSiteSips {
    fn family(&self) -> AdsorptionFamily {
        AdsorptionFamily::DualSiteSips
    }

    fn w_pt(&self, p: f64, t: f64, _: &Saturation) -> Result<f64, SorptionError> {
        Ok(self.sum(p, t, |site, _, x| site.capacity * x / (1.0 + x)))
    }

    fn dw_dp_pt(&self, p: f64, t: f64, _: &Saturation) -> Slot {
        // Unbounded at zero pressure for heterogeneities below one.
        if p.is_nan() || p <= 0.0 {
            return Some(Err(SorptionError::out_of_domain(format!(
                "pressure slope needs a positive pressure, got {p} Pa"
            ))));
        }
        Some(Ok(self.sum(p, t, |site, _, x| {
            site.capacity * x / (site.heterogeneity * p * (1.0 + x).powi(2))
        })))
    }

    fn dw_dt_pt(&self, p: f64, t: f64, _: &Saturation) -> Slot {
        let r = self.r;
        Some(Ok(self.sum(p, t, |site, b, x| {
            let db_dt = -site.heat / (r * t * t) * b;
            site.capacity * x / (site.heterogeneity * b * (1.0 + x).powi(2)) * db_dt
        })))
    }

    fn pi_star(&self, p0: f64, t: f64, molar_mass: f64, _: &Saturation) -> Slot {
        let integral = self.sum(p0, t, |site, _, x| {
            site.heterogeneity * site.capacity * (1.0 + x).ln()
        });
        Some(Ok(integral / molar_mass))
    }

    fn pressure_policy(&self) -> GuessPolicy {
        GuessPolicy::non_negative(1e4, 1e3)
    }

    fn temperature_policy(&self) -> GuessPolicy {
        GuessPolicy::non_negative(303.15, 323.15)
    }
}
