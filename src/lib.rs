//! # Sorption Props
//!
//! Equilibrium properties of sorption working pairs: a sorbent (solid
//! adsorbent or liquid absorbent) combined with a refrigerant.
//!
//! ## Crate layout
//!
//! - [`models`]: The equilibrium engine. Correlation families, refrigerant
//!   property providers, and the [`models::sorption::WorkingPair`] that binds
//!   them to coefficients from a [`models::sorption::store::CoefficientStore`].
//! - [`support`]: Numeric utilities, numeric constraints, and unit extensions
//!   used by the models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! ## Units
//!
//! The core engine works in plain `f64` SI values: pressures in Pa,
//! temperatures in K, loadings and concentrations in kg/kg, mole fractions in
//! mol/mol, densities in kg/m³ and molar volumes in m³/mol. A [`uom`]-typed
//! facade is available on [`models::sorption::WorkingPair`] for callers that
//! prefer checked quantities.

pub mod models;
pub mod support;
