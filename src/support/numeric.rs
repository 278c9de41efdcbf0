//! Numeric utilities for scalar equilibrium functions.
//!
//! Every correlation in this crate is a scalar function of one unknown once the
//! other state variables are fixed. This module supplies the three operations
//! the engine needs when a correlation has no closed form:
//!
//! - [`newton`]: Newton-Raphson root finding toward a target value, with an
//!   explicit [`GuessPolicy`] that supplies the initial guess and repairs
//!   iterates that leave the physical range.
//! - [`symmetric_difference`]: Central finite difference `(f(x+h) − f(x−h)) / 2h`.
//! - [`trapezoid`]: Fixed-step trapezoidal quadrature.
//!
//! All three accept fallible closures (`FnMut(f64) -> Result<f64, E>`) so that
//! errors raised by the evaluated correlation propagate unchanged. Failures of
//! the numeric method itself are reported as [`NumericError`] and converted
//! into the caller's error type through `E: From<NumericError>`.

mod config;
mod derivative;
mod error;
mod newton;
mod quadrature;

pub use config::{DifferenceSteps, NewtonConfig, QuadratureConfig};
pub use derivative::symmetric_difference;
pub use error::NumericError;
pub use newton::{GuessPolicy, Repair, newton};
pub use quadrature::trapezoid;
