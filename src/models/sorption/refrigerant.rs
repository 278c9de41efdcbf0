//! Refrigerant property providers.
//!
//! A [`Refrigerant`] combines one vapor-pressure correlation and one
//! saturated-liquid-density correlation. Either half may be absent: a working
//! pair stays usable for every query that does not need the missing property,
//! and queries that do need it report [`SorptionError::NotDefined`].

mod cubic;
mod liquid_density;
mod vapor_pressure;

pub(super) use cubic::solve_cubic;
pub use liquid_density::{LiquidDensity, LiquidDensityEquation};
pub use vapor_pressure::{VaporPressure, VaporPressureEquation};

use tracing::warn;

use super::{
    EquilibriumConfig, SorptionError,
    store::{CoefficientStore, PairId, RecordKind},
};

const VAPOR_PRESSURE: &str = "the refrigerant vapor-pressure correlation";
const LIQUID_DENSITY: &str = "the refrigerant liquid-density correlation";

/// Vapor-pressure and liquid-density properties of one refrigerant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Refrigerant {
    vapor_pressure: Option<VaporPressure>,
    liquid_density: Option<LiquidDensity>,
    config: EquilibriumConfig,
}

impl Refrigerant {
    #[must_use]
    pub fn new(
        vapor_pressure: Option<VaporPressure>,
        liquid_density: Option<LiquidDensity>,
    ) -> Self {
        Self {
            vapor_pressure,
            liquid_density,
            config: EquilibriumConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EquilibriumConfig) -> Self {
        self.config = config;
        self
    }

    /// Looks up both correlations for `refrigerant` in `store`.
    ///
    /// Each half is resolved independently, and a `None` selection leaves it
    /// absent. An unknown equation name, a missing record, or a vector that
    /// is too short also leaves that half absent and emits a warning; it
    /// never fails the whole provider.
    pub fn from_store<S: CoefficientStore + ?Sized>(
        store: &S,
        refrigerant: &str,
        vapor_pressure: Option<(&str, usize)>,
        liquid_density: Option<(&str, usize)>,
        config: EquilibriumConfig,
    ) -> Self {
        let id = PairId::refrigerant(refrigerant);

        let vapor_pressure = vapor_pressure.and_then(|selection| {
            lookup(
                store,
                &id,
                selection,
                VaporPressureEquation::from_name,
                VaporPressure::new,
            )
        });
        let liquid_density = liquid_density.and_then(|selection| {
            lookup(
                store,
                &id,
                selection,
                LiquidDensityEquation::from_name,
                LiquidDensity::new,
            )
        });

        Self {
            vapor_pressure,
            liquid_density,
            config,
        }
    }

    #[must_use]
    pub fn vapor_pressure(&self) -> Option<&VaporPressure> {
        self.vapor_pressure.as_ref()
    }

    #[must_use]
    pub fn liquid_density(&self) -> Option<&LiquidDensity> {
        self.liquid_density.as_ref()
    }

    fn require_vapor_pressure(
        &self,
        operation: &'static str,
    ) -> Result<&VaporPressure, SorptionError> {
        self.vapor_pressure
            .as_ref()
            .ok_or(SorptionError::not_defined(operation, VAPOR_PRESSURE))
    }

    fn require_liquid_density(
        &self,
        operation: &'static str,
    ) -> Result<&LiquidDensity, SorptionError> {
        self.liquid_density
            .as_ref()
            .ok_or(SorptionError::not_defined(operation, LIQUID_DENSITY))
    }

    /// Saturation pressure in Pa at `t` in K.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::NotDefined`] without a vapor-pressure
    /// correlation, or the correlation's own error.
    pub fn p_sat(&self, t: f64) -> Result<f64, SorptionError> {
        self.require_vapor_pressure("p_sat")?.p_sat(t, &self.config)
    }

    /// Saturation temperature in K at `p` in Pa.
    ///
    /// # Errors
    ///
    /// As [`Refrigerant::p_sat`], plus non-convergence of the inversion.
    pub fn t_sat(&self, p: f64) -> Result<f64, SorptionError> {
        self.require_vapor_pressure("t_sat")?.t_sat(p, &self.config)
    }

    /// `dp_sat/dT` in Pa/K at `t` in K.
    ///
    /// # Errors
    ///
    /// As [`Refrigerant::p_sat`].
    pub fn dp_sat_dt(&self, t: f64) -> Result<f64, SorptionError> {
        self.require_vapor_pressure("dp_sat_dt")?
            .dp_sat_dt(t, &self.config)
    }

    /// Saturated liquid density in kg/m³ at `t` in K.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::NotDefined`] without a liquid-density correlation.
    pub fn rho_l(&self, t: f64) -> Result<f64, SorptionError> {
        Ok(self.require_liquid_density("rho_l")?.rho_l(t))
    }

    /// `dρ_l/dT` in kg/(m³·K) at `t` in K.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::NotDefined`] without a liquid-density correlation.
    pub fn drho_l_dt(&self, t: f64) -> Result<f64, SorptionError> {
        Ok(self.require_liquid_density("drho_l_dt")?.drho_l_dt(t))
    }
}

fn lookup<S, E, T>(
    store: &S,
    id: &PairId,
    (name, variant): (&str, usize),
    from_name: impl FnOnce(&str) -> Option<E>,
    bind: impl FnOnce(E, &[f64]) -> Result<T, SorptionError>,
) -> Option<T>
where
    S: CoefficientStore + ?Sized,
{
    let Some(equation) = from_name(name) else {
        warn!(
            refrigerant = %id.refrigerant,
            equation = name,
            "unknown refrigerant equation, property left undefined"
        );
        return None;
    };

    let record = match store.coefficients(id, name, variant) {
        Some(record) if record.kind == RecordKind::Refrigerant => record,
        _ => {
            warn!(
                refrigerant = %id.refrigerant,
                equation = name,
                variant,
                "no refrigerant coefficients, property left undefined"
            );
            return None;
        }
    };

    bind(equation, &record.values)
        .inspect_err(|error| {
            warn!(
                refrigerant = %id.refrigerant,
                equation = name,
                %error,
                "unusable refrigerant coefficients, property left undefined"
            );
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::sorption::{
        store::MemoryStore,
        test_support::{R134A_LIQUID_DENSITY, R134A_VAPOR_PRESSURE, r134a},
    };

    #[test]
    fn complete_provider_answers_everything() -> Result<(), SorptionError> {
        let refrigerant = r134a();

        let p = refrigerant.p_sat(258.15)?;
        assert_relative_eq!(refrigerant.t_sat(p)?, 258.15, epsilon = 1e-8);
        assert!(refrigerant.dp_sat_dt(258.15)? > 0.0);
        assert_relative_eq!(refrigerant.rho_l(258.0)?, 1343.577, max_relative = 1e-6);
        assert!(refrigerant.drho_l_dt(258.0)? < 0.0);
        Ok(())
    }

    #[test]
    fn missing_halves_are_not_defined() {
        let refrigerant = Refrigerant::default();

        for result in [
            refrigerant.p_sat(300.0),
            refrigerant.t_sat(1e5),
            refrigerant.dp_sat_dt(300.0),
            refrigerant.rho_l(300.0),
            refrigerant.drho_l_dt(300.0),
        ] {
            assert!(matches!(result, Err(SorptionError::NotDefined { .. })));
        }
    }

    #[test]
    fn store_resolution_degrades_per_half() {
        let store = MemoryStore::new()
            .with_refrigerant("r-134a", "VaporPressure_EoS1", 1, R134A_VAPOR_PRESSURE)
            .with_refrigerant("r-134a", "SaturatedLiquidDensity_EoS1", 1, R134A_LIQUID_DENSITY);
        let config = EquilibriumConfig::default();

        let both = Refrigerant::from_store(
            &store,
            "r-134a",
            Some(("VaporPressure_EoS1", 1)),
            Some(("SaturatedLiquidDensity_EoS1", 1)),
            config,
        );
        assert!(both.vapor_pressure().is_some());
        assert!(both.liquid_density().is_some());

        let unknown_name = Refrigerant::from_store(
            &store,
            "r-134a",
            Some(("VaporPressure_EoS9", 1)),
            Some(("SaturatedLiquidDensity_EoS1", 1)),
            config,
        );
        assert!(unknown_name.vapor_pressure().is_none());
        assert!(unknown_name.liquid_density().is_some());

        let missing_variant = Refrigerant::from_store(
            &store,
            "r-134a",
            Some(("VaporPressure_EoS1", 1)),
            Some(("SaturatedLiquidDensity_EoS1", 2)),
            config,
        );
        assert!(missing_variant.vapor_pressure().is_some());
        assert!(missing_variant.liquid_density().is_none());

        let unselected = Refrigerant::from_store(
            &store,
            "r-134a",
            Some(("VaporPressure_EoS1", 1)),
            None,
            config,
        );
        assert!(unselected.vapor_pressure().is_some());
        assert!(unselected.liquid_density().is_none());
    }
}
