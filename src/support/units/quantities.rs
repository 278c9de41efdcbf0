use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, N3, P1, P2, Z0},
};

/// Inverse pressure, 1/Pa in SI.
pub type InversePressure = Quantity<ISQ<P1, N1, P2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Pressure change per kelvin, Pa/K in SI.
pub type PressureTemperatureSlope = Quantity<ISQ<N1, P1, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Mass density change per kelvin, kg/(m³·K) in SI.
pub type DensityTemperatureSlope = Quantity<ISQ<N3, P1, Z0, Z0, N1, Z0, Z0>, SI<f64>, f64>;
