use super::super::{SorptionError, coefficients::take};
use super::{AbsorptionFamily, ActivityModel};

/// UNIQUAC activity-coefficient model.
///
/// The activity coefficient splits into a combinatorial part from the
/// segment fraction `V₁ = r₁/(r₁·x₁ + r₂·x₂)` and area fraction
/// `F₁ = q₁/(q₁·x₁ + q₂·x₂)`, and a residual part from
/// `τᵢⱼ = exp(−Δuᵢⱼ/(R·T))`.
///
/// Layouts: `uniquac-fixeddu` is `[Δu₁₂, Δu₂₁, q₁, q₂, r₁, r₂, z]`;
/// `uniquac-du-t` is `[u₁₂, u₂₁, du₁₂/dT, du₂₁/dT, q₁, q₂, r₁, r₂, z]` with
/// `Δu = u + du/dT·T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniquac {
    du: [f64; 2],
    slope: Option<[f64; 2]>,
    q: [f64; 2],
    size: [f64; 2],
    coordination: f64,
    r: f64,
}

impl Uniquac {
    /// Binds the `uniquac-fixeddu` layout.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than seven values.
    pub fn fixed(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [du_12, du_21, q1, q2, r1, r2, z] =
            take::<7>(values, AbsorptionFamily::UniquacFixed.name())?;
        Ok(Self {
            du: [du_12, du_21],
            slope: None,
            q: [q1, q2],
            size: [r1, r2],
            coordination: z,
            r,
        })
    }

    /// Binds the `uniquac-du-t` layout.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than nine values.
    pub fn temperature_dependent(values: &[f64], r: f64) -> Result<Self, SorptionError> {
        let [u_12, u_21, slope_12, slope_21, q1, q2, r1, r2, z] =
            take::<9>(values, AbsorptionFamily::UniquacTemperatureDependent.name())?;
        Ok(Self {
            du: [u_12, u_21],
            slope: Some([slope_12, slope_21]),
            q: [q1, q2],
            size: [r1, r2],
            coordination: z,
            r,
        })
    }
}

impl ActivityModel for Uniquac {
    fn family(&self) -> AbsorptionFamily {
        if self.slope.is_some() {
            AbsorptionFamily::UniquacTemperatureDependent
        } else {
            AbsorptionFamily::UniquacFixed
        }
    }

    fn gamma(&self, t: f64, x: f64, _: f64, _: f64) -> f64 {
        let [q1, q2] = self.q;
        let [r1, r2] = self.size;
        let [slope_12, slope_21] = self.slope.unwrap_or_default();
        let x2 = 1.0 - x;

        let v1 = r1 / (r1 * x + r2 * x2);
        let f1 = q1 / (q1 * x + q2 * x2);
        let tau_12 = (-(self.du[0] + slope_12 * t) / (self.r * t)).exp();
        let tau_21 = (-(self.du[1] + slope_21 * t) / (self.r * t)).exp();

        let combinatorial = 1.0 - v1 + v1.ln()
            - self.coordination / 2.0 * q1 * (1.0 - v1 / f1 + (v1 / f1).ln());
        let residual = q1
            * (1.0
                - ((q1 * x + q2 * x2 * tau_21) / (q1 * x + q2 * x2)).ln()
                - (q1 * x / (q1 * x + q2 * x2 * tau_21)
                    + q2 * x2 * tau_12 / (q1 * x * tau_12 + q2 * x2)));

        (combinatorial + residual).exp()
    }
}
