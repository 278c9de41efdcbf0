//! Supporting utilities used by models.
//!
//! - [`numeric`]: Newton-Raphson, symmetric differences, and trapezoidal
//!   quadrature over scalar functions.
//! - [`constraint`]: Type-level numeric constraints.
//! - [`units`]: Extensions to [`uom`] for derivative quantities.

pub mod constraint;
pub mod numeric;
pub mod units;
