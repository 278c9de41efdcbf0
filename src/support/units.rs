//! Extensions to [`uom`].
//!
//! The engine core works in plain SI `f64` values. The typed facade on
//! [`crate::models::sorption::WorkingPair`] uses [`uom`] quantities, and this
//! module names the derivative quantities that [`uom`] does not provide:
//!
//! - [`InversePressure`]: `∂w/∂p` of a dimensionless loading, 1/Pa
//! - [`PressureTemperatureSlope`]: `∂p/∂T` and `dp_sat/dT`, Pa/K
//! - [`DensityTemperatureSlope`]: `dρ_l/dT`, kg/m³·K
//!
//! `∂w/∂T` of a dimensionless loading is a
//! [`uom::si::f64::TemperatureCoefficient`] and `∂p/∂w` is a plain
//! [`uom::si::f64::Pressure`].

mod quantities;

pub use quantities::{DensityTemperatureSlope, InversePressure, PressureTemperatureSlope};
