//! Flat `−1` failure convention for callers outside the `Result` world.

use tracing::warn;

use super::{SorptionError, WorkingPair, WorkingPairSpec, store::CoefficientStore};

/// Value returned in place of a result by the sentinel boundary.
pub const SENTINEL: f64 = -1.0;

/// Collapses a query result into a bare `f64`.
pub trait SentinelExt {
    /// Returns the value, or [`SENTINEL`] after logging the error as a warning.
    ///
    /// NaN and infinite values are failures too.
    fn or_sentinel(self, operation: &str) -> f64;
}

impl SentinelExt for Result<f64, SorptionError> {
    fn or_sentinel(self, operation: &str) -> f64 {
        match self {
            Ok(value) if value.is_finite() => value,
            Ok(value) => {
                warn!(operation, value, "query produced a non-finite value, returning sentinel");
                SENTINEL
            }
            Err(error) => {
                warn!(operation, %error, "query failed, returning sentinel");
                SENTINEL
            }
        }
    }
}

/// Builds a working pair, runs one query, and drops the pair.
///
/// Construction failures and query failures both yield [`SENTINEL`].
///
/// ```
/// use sorption_props::models::sorption::{
///     SENTINEL, WorkingPairSpec, direct,
///     store::{CoefficientRecord, MemoryStore, PairId, RecordKind},
/// };
///
/// let store = MemoryStore::new().with(
///     PairId::new("carbon", "norit-rb1", "co2"),
///     "langmuir",
///     0,
///     CoefficientRecord::new(RecordKind::Adsorption, [23_500.0, 3.22e-10, 0.349_431_46]),
/// );
/// let spec = WorkingPairSpec::new("carbon", "norit-rb1", "co2", "langmuir");
///
/// let w = direct(&store, &spec, |pair| pair.ads_w_pt(3e5, 303.1));
/// assert!((w - 0.181_704_5).abs() < 1e-6);
///
/// let missing = direct(&store, &spec.clone().with_isotherm("toth", 0), |pair| {
///     pair.ads_w_pt(3e5, 303.1)
/// });
/// assert_eq!(missing, SENTINEL);
/// ```
pub fn direct<S: CoefficientStore + ?Sized>(
    store: &S,
    spec: &WorkingPairSpec,
    query: impl FnOnce(&WorkingPair) -> Result<f64, SorptionError>,
) -> f64 {
    WorkingPair::new(store, spec)
        .and_then(|pair| query(&pair))
        .or_sentinel("direct")
}
