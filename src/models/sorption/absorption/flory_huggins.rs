use super::super::{SorptionError, coefficients::take};
use super::{AbsorptionFamily, ActivityModel};

/// Flory-Huggins activity-coefficient model for polymer-like absorbents.
///
/// `ln γ₁ = ln(1 − (1 − 1/r)·Φ₂) + (1 − 1/r)·Φ₂ + χ·Φ₂²` with the segment
/// fraction `Φ₂ = r·x₂/(x₁ + r·x₂)` and `χ = w₀/T·(1 + w₁/T)`.
///
/// Coefficients are `[r, w₀, w₁]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloryHuggins {
    segments: f64,
    w0: f64,
    w1: f64,
}

impl FloryHuggins {
    /// Binds coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] for fewer than three values.
    pub fn new(values: &[f64]) -> Result<Self, SorptionError> {
        let [segments, w0, w1] = take::<3>(values, AbsorptionFamily::FloryHuggins.name())?;
        Ok(Self { segments, w0, w1 })
    }
}

impl ActivityModel for FloryHuggins {
    fn family(&self) -> AbsorptionFamily {
        AbsorptionFamily::FloryHuggins
    }

    fn gamma(&self, t: f64, x: f64, _: f64, _: f64) -> f64 {
        let x2 = 1.0 - x;
        let phi_2 = self.segments * x2 / (x + self.segments * x2);
        let chi = self.w0 / t * (1.0 + self.w1 / t);
        let shape = 1.0 - 1.0 / self.segments;

        ((1.0 - shape * phi_2).ln() + shape * phi_2 + chi * phi_2 * phi_2).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn reference_activity() -> Result<(), SorptionError> {
        let model = FloryHuggins::new(&[10.41, 938.0, -176.0])?;
        assert_relative_eq!(
            model.gamma(323.07, 0.5864, -1.0, -1.0),
            1.260_888_468_861,
            max_relative = 1e-10
        );
        Ok(())
    }

    #[test]
    fn equal_segments_without_interaction_are_ideal() -> Result<(), SorptionError> {
        let model = FloryHuggins::new(&[1.0, 0.0, 0.0])?;
        assert_relative_eq!(model.gamma(300.0, 0.3, -1.0, -1.0), 1.0, epsilon = 1e-14);
        Ok(())
    }
}
