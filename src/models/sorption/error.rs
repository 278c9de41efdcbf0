use thiserror::Error;

use crate::support::numeric::NumericError;

/// Errors raised by the sorption equilibrium engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SorptionError {
    /// The selected family or provider does not implement the operation.
    #[error("`{operation}` is not defined for {owner}")]
    NotDefined {
        operation: &'static str,
        owner: &'static str,
    },

    /// The coefficient store has no record for a required lookup.
    #[error("missing coefficients: {context}")]
    MissingCoefficients { context: String },

    /// A coefficient vector is too short for the selected family.
    #[error("`{family}` needs at least {expected} coefficients, got {actual}")]
    InvalidCoefficients {
        family: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No family is registered under the given name.
    #[error("unknown correlation family `{name}`")]
    UnknownFamily { name: String },

    /// The query belongs to the other sorption domain.
    #[error("`{operation}` is not available for {domain} working pairs")]
    WrongDomain {
        operation: &'static str,
        domain: &'static str,
    },

    /// The inputs lie outside the range where the correlation has a solution.
    ///
    /// For example, a saturation pressure above the critical temperature.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// A numeric method failed, usually Newton-Raphson running out of iterations.
    #[error(transparent)]
    Numeric(#[from] NumericError),
}

impl SorptionError {
    pub(crate) fn not_defined(operation: &'static str, owner: &'static str) -> Self {
        Self::NotDefined { operation, owner }
    }

    pub(crate) fn out_of_domain(context: impl Into<String>) -> Self {
        Self::OutOfDomain {
            context: context.into(),
        }
    }
}
