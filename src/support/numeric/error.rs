use thiserror::Error;

/// Errors raised by the numeric methods themselves.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NumericError {
    /// Newton-Raphson reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:e}, iters={iters}")]
    MaxIters {
        /// Residual `f(x) − target` at the last evaluated iterate.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },

    /// An iterate, residual, or slope became NaN or infinite.
    #[error("non-finite value encountered after {iters} iterations")]
    NonFinite { iters: usize },

    /// The slope vanished, so no Newton step can be taken.
    #[error("zero slope at x={x}")]
    ZeroSlope { x: f64 },
}
