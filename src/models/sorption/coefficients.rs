//! Length-checked access to coefficient vectors.

use super::SorptionError;

/// Returns the first `N` coefficients of `values`.
///
/// Stored vectors may carry trailing padding, so longer inputs are accepted.
pub(super) fn take<const N: usize>(
    values: &[f64],
    family: &'static str,
) -> Result<[f64; N], SorptionError> {
    values
        .get(..N)
        .and_then(|head| <[f64; N]>::try_from(head).ok())
        .ok_or(SorptionError::InvalidCoefficients {
            family,
            expected: N,
            actual: values.len(),
        })
}

/// Splits `values` into a fixed `N`-element head and `(a, e)` term pairs.
///
/// A trailing unpaired value is ignored.
pub(super) fn head_and_terms<const N: usize>(
    values: &[f64],
    family: &'static str,
) -> Result<([f64; N], Vec<Term>), SorptionError> {
    let head = take::<N>(values, family)?;
    let terms = values
        .get(N..)
        .unwrap_or_default()
        .chunks_exact(2)
        .map(|pair| Term {
            coefficient: pair[0],
            exponent: pair[1],
        })
        .collect();
    Ok((head, terms))
}

/// One `a·θ^e` term of a power series in a reduced temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Term {
    pub coefficient: f64,
    pub exponent: f64,
}

impl Term {
    /// Exponents below this magnitude are treated as zero when differentiating.
    const ZERO_EXPONENT: f64 = 1e-10;

    pub fn value(self, theta: f64) -> f64 {
        self.coefficient * theta.powf(self.exponent)
    }

    /// Returns `d(a·θ^e)/dθ`, which vanishes for constant terms.
    pub fn slope(self, theta: f64) -> f64 {
        if self.exponent.abs() < Self::ZERO_EXPONENT {
            0.0
        } else {
            self.exponent * self.coefficient * theta.powf(self.exponent - 1.0)
        }
    }
}

/// Evaluates `Σ c_i·x^i`.
pub(super) fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Evaluates `d/dx Σ c_i·x^i`.
pub(super) fn polynomial_slope(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .fold(0.0, |acc, (i, c)| {
            #[allow(clippy::cast_precision_loss)]
            let power = i as f64;
            acc * x + power * c
        })
}
