//! Sorption equilibrium engine.
//!
//! A [`WorkingPair`] binds one isotherm family, its coefficients, and a
//! [`Refrigerant`] property provider into a single object that answers
//! equilibrium queries: loading or concentration from pressure and
//! temperature, the inverse relations, their first partial derivatives, and
//! the reduced spreading pressure.
//!
//! # Families
//!
//! Isotherm families are selected by name, exactly as they are keyed in the
//! coefficient store:
//!
//! - [`adsorption`]: surface isotherms (`langmuir`, `toth`, `dss`), surface
//!   isotherms that need the vapor pressure (`freundlich`), and the volumetric
//!   `dubinin-astakov` isotherm that also needs the saturated liquid density.
//! - [`absorption`]: conventional concentration correlations (`duhring`,
//!   `antoine`), activity-coefficient models (`wilson`, `nrtl-fixeddg`,
//!   `uniquac-fixeddu`, `flory-huggins`, `heil`, `tsuboka-katayama`, and their
//!   temperature-dependent variants), and the `mixingrule-1pvdw` cubic mixing
//!   rule.
//! - [`refrigerant`]: vapor-pressure and saturated-liquid-density
//!   correlations.
//!
//! Each family implements only the operations it has a closed form for.
//! Missing inverses and derivatives are supplied by the equilibrium wrappers
//! from the forward relation, through Newton-Raphson or a symmetric
//! difference. Operations a family cannot answer at all report
//! [`SorptionError::NotDefined`].
//!
//! # Failure boundary
//!
//! All operations return `Result<f64, SorptionError>`. Callers that need the
//! flat `−1` convention of the coefficient-store tooling use
//! [`SentinelExt::or_sentinel`] or the one-shot [`direct`] entry point.

pub mod absorption;
pub mod adsorption;
pub mod refrigerant;
pub mod store;

mod coefficients;
mod config;
mod error;
mod sentinel;
mod working_pair;

#[cfg(test)]
mod test_support;

pub use config::{EquilibriumConfig, IDEAL_GAS_CONSTANT};
pub use error::SorptionError;
pub use refrigerant::Refrigerant;
pub use sentinel::{SENTINEL, SentinelExt, direct};
pub use working_pair::{Domain, WorkingPair, WorkingPairSpec};

/// Result of an optional operation.
///
/// `None` means the family does not provide the operation. `Some(Err(_))`
/// means it does, but the evaluation failed.
pub type Slot = Option<Result<f64, SorptionError>>;
