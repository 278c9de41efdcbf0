//! Adsorption isotherm families.
//!
//! Every family relates pressure `p` (Pa), temperature `T` (K) and loading
//! `w` (kg/kg). Families differ in what else they need:
//!
//! - [`Approach::Surface`] isotherms need nothing beyond `p`, `T` and `w`.
//! - [`Approach::SurfaceSaturation`] isotherms also need the refrigerant's
//!   vapor pressure.
//! - [`Approach::Volumetric`] isotherms relate an adsorption potential to a
//!   volumetric loading, and need both the vapor pressure and the saturated
//!   liquid density.
//!
//! An isotherm receives those extra inputs through a [`Saturation`] value.
//! [`AdsorptionEquilibrium`] fills it from a refrigerant provider and adds
//! numeric fallbacks for every operation a family leaves out.

mod dual_site_sips;
mod dubinin_astakhov;
mod equilibrium;
mod freundlich;
mod langmuir;
mod toth;

pub use dual_site_sips::DualSiteSips;
pub use dubinin_astakhov::DubininAstakhov;
pub use equilibrium::{AdsorptionEquilibrium, SaturationSource};
pub use freundlich::Freundlich;
pub use langmuir::Langmuir;
pub use toth::Toth;

use std::fmt;

use crate::support::numeric::GuessPolicy;

use super::{EquilibriumConfig, Slot, SorptionError};

/// Modelling approach of an adsorption isotherm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Approach {
    Surface,
    SurfaceSaturation,
    Volumetric,
}

impl Approach {
    /// Whether the isotherm needs the refrigerant vapor pressure.
    #[must_use]
    pub fn needs_vapor_pressure(self) -> bool {
        matches!(self, Self::SurfaceSaturation | Self::Volumetric)
    }

    /// Whether the isotherm needs the saturated liquid density.
    #[must_use]
    pub fn needs_liquid_density(self) -> bool {
        matches!(self, Self::Volumetric)
    }
}

/// Refrigerant saturation properties at one temperature.
///
/// Only the fields an isotherm's [`Approach`] needs are filled in. Slopes are
/// filled in only for temperature derivatives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Saturation {
    /// Vapor pressure in Pa.
    pub p_sat: Option<f64>,

    /// `dp_sat/dT` in Pa/K.
    pub dp_sat_dt: Option<f64>,

    /// Saturated liquid density in kg/m³.
    pub rho_l: Option<f64>,

    /// `dρ_l/dT` in kg/(m³·K).
    pub drho_l_dt: Option<f64>,
}

impl Saturation {
    const OWNER: &'static str = "the supplied saturation state";

    /// Saturation state with only the vapor pressure.
    #[must_use]
    pub fn with_vapor_pressure(p_sat: f64) -> Self {
        Self {
            p_sat: Some(p_sat),
            ..Self::default()
        }
    }

    /// Saturation state with the vapor pressure and liquid density.
    #[must_use]
    pub fn with_vapor_pressure_and_density(p_sat: f64, rho_l: f64) -> Self {
        Self {
            p_sat: Some(p_sat),
            rho_l: Some(rho_l),
            ..Self::default()
        }
    }

    /// Adds temperature slopes to an existing state.
    #[must_use]
    pub fn with_slopes(mut self, dp_sat_dt: Option<f64>, drho_l_dt: Option<f64>) -> Self {
        self.dp_sat_dt = dp_sat_dt;
        self.drho_l_dt = drho_l_dt;
        self
    }

    pub(crate) fn vapor_pressure(&self) -> Result<f64, SorptionError> {
        self.p_sat
            .ok_or(SorptionError::not_defined("p_sat", Self::OWNER))
    }

    pub(crate) fn vapor_pressure_slope(&self) -> Result<f64, SorptionError> {
        self.dp_sat_dt
            .ok_or(SorptionError::not_defined("dp_sat_dt", Self::OWNER))
    }

    pub(crate) fn liquid_density(&self) -> Result<f64, SorptionError> {
        self.rho_l
            .ok_or(SorptionError::not_defined("rho_l", Self::OWNER))
    }

    pub(crate) fn liquid_density_slope(&self) -> Result<f64, SorptionError> {
        self.drho_l_dt
            .ok_or(SorptionError::not_defined("drho_l_dt", Self::OWNER))
    }
}

/// Capability set of an adsorption isotherm.
///
/// Only [`AdsorptionIsotherm::w_pt`] is required. Every other operation
/// returns a [`Slot`]; the default `None` marks it as not provided, and
/// [`AdsorptionEquilibrium`] then derives it from the forward relation.
pub trait AdsorptionIsotherm: fmt::Debug + Send + Sync {
    fn family(&self) -> AdsorptionFamily;

    /// Loading in kg/kg at pressure `p` and temperature `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError`] if a required saturation property is missing.
    fn w_pt(&self, p: f64, t: f64, saturation: &Saturation) -> Result<f64, SorptionError>;

    /// Pressure in Pa at loading `w` and temperature `t`.
    fn p_wt(&self, _w: f64, _t: f64, _saturation: &Saturation) -> Slot {
        None
    }

    /// Temperature in K at pressure `p` and loading `w`.
    ///
    /// Only families whose inverse needs no saturation properties provide this.
    fn t_pw(&self, _p: f64, _w: f64) -> Slot {
        None
    }

    /// `∂w/∂p` in kg/(kg·Pa).
    fn dw_dp_pt(&self, _p: f64, _t: f64, _saturation: &Saturation) -> Slot {
        None
    }

    /// `∂w/∂T` in kg/(kg·K). Uses the saturation slopes.
    fn dw_dt_pt(&self, _p: f64, _t: f64, _saturation: &Saturation) -> Slot {
        None
    }

    /// `∂p/∂w` in Pa·kg/kg.
    fn dp_dw_wt(&self, _w: f64, _t: f64, _saturation: &Saturation) -> Slot {
        None
    }

    /// `∂p/∂T` in Pa/K. Uses the saturation slopes.
    fn dp_dt_wt(&self, _w: f64, _t: f64, _saturation: &Saturation) -> Slot {
        None
    }

    /// Reduced spreading pressure `1/M·∫₀^p0 w/p dp` in mol/kg.
    fn pi_star(&self, _p0: f64, _t: f64, _molar_mass: f64, _saturation: &Saturation) -> Slot {
        None
    }

    /// Initial guess and repair rule when pressure is found by Newton-Raphson.
    fn pressure_policy(&self) -> GuessPolicy {
        GuessPolicy::non_negative(1e4, 1e3)
    }

    /// Initial guess and repair rule when temperature is found by Newton-Raphson.
    fn temperature_policy(&self) -> GuessPolicy {
        GuessPolicy::non_negative(353.15, 323.15)
    }

    /// The volumetric capability set, for potential-theory isotherms.
    fn as_volumetric(&self) -> Option<&dyn VolumetricIsotherm> {
        None
    }
}

/// Operations in the native variables of a potential-theory isotherm.
///
/// `W` is the volumetric loading in m³/kg and `A` the adsorption potential in
/// J/mol; `rho_l` converts between mass and volume where the coefficients
/// require it.
pub trait VolumetricIsotherm {
    /// `W(A)`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::OutOfDomain`] for a negative potential.
    fn w_a_rho(&self, a: f64, rho_l: f64) -> Result<f64, SorptionError>;

    /// `A(W)`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::OutOfDomain`] if `w` exceeds the limiting
    /// volume, where no potential exists.
    fn a_w_rho(&self, w: f64, rho_l: f64) -> Result<f64, SorptionError>;

    /// `dW/dA`.
    ///
    /// # Errors
    ///
    /// As [`VolumetricIsotherm::w_a_rho`].
    fn dw_da_a_rho(&self, a: f64, rho_l: f64) -> Result<f64, SorptionError>;

    /// `dA/dW`.
    ///
    /// # Errors
    ///
    /// As [`VolumetricIsotherm::a_w_rho`].
    fn da_dw_w_rho(&self, w: f64, rho_l: f64) -> Result<f64, SorptionError>;
}

/// Registered adsorption isotherm families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdsorptionFamily {
    Langmuir,
    Toth,
    DualSiteSips,
    Freundlich,
    DubininAstakhov,
}

impl AdsorptionFamily {
    pub const ALL: [Self; 5] = [
        Self::Langmuir,
        Self::Toth,
        Self::DualSiteSips,
        Self::Freundlich,
        Self::DubininAstakhov,
    ];

    /// Looks up a family by its case-sensitive store name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|family| family.name() == name)
    }

    /// Store name of the family.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Langmuir => "langmuir",
            Self::Toth => "toth",
            Self::DualSiteSips => "dss",
            Self::Freundlich => "freundlich",
            Self::DubininAstakhov => "dubinin-astakov",
        }
    }

    #[must_use]
    pub fn approach(self) -> Approach {
        match self {
            Self::Langmuir | Self::Toth | Self::DualSiteSips => Approach::Surface,
            Self::Freundlich => Approach::SurfaceSaturation,
            Self::DubininAstakhov => Approach::Volumetric,
        }
    }

    /// Binds the family to a coefficient vector.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] if `values` is too short.
    pub fn bind(
        self,
        values: &[f64],
        config: &EquilibriumConfig,
    ) -> Result<Box<dyn AdsorptionIsotherm>, SorptionError> {
        let r = config.gas_constant;
        Ok(match self {
            Self::Langmuir => Box::new(Langmuir::new(values, r)?),
            Self::Toth => Box::new(Toth::new(values)?),
            Self::DualSiteSips => Box::new(DualSiteSips::new(values, r)?),
            Self::Freundlich => Box::new(Freundlich::new(values)?),
            Self::DubininAstakhov => Box::new(DubininAstakhov::new(values, r)?),
        })
    }
}

impl fmt::Display for AdsorptionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_stable() {
        for family in AdsorptionFamily::ALL {
            assert_eq!(AdsorptionFamily::from_name(family.name()), Some(family));
        }
        assert_eq!(
            AdsorptionFamily::from_name("dubinin-astakov"),
            Some(AdsorptionFamily::DubininAstakhov)
        );
        assert_eq!(AdsorptionFamily::from_name("Langmuir"), None);
    }

    #[test]
    fn bound_isotherms_report_their_family() -> Result<(), SorptionError> {
        let config = EquilibriumConfig::default();
        for family in AdsorptionFamily::ALL {
            let isotherm = family.bind(&[1.0; 9], &config)?;
            assert_eq!(isotherm.family(), family);
            assert_eq!(
                isotherm.as_volumetric().is_some(),
                family.approach() == Approach::Volumetric
            );
        }
        Ok(())
    }

    #[test]
    fn short_vectors_fail_to_bind() {
        let config = EquilibriumConfig::default();
        let result = AdsorptionFamily::DualSiteSips.bind(&[1.0; 8], &config);
        assert!(matches!(
            result,
            Err(SorptionError::InvalidCoefficients {
                family: "dss",
                expected: 9,
                actual: 8,
            })
        ));
    }

    #[test]
    fn missing_saturation_inputs_are_not_defined() {
        let empty = Saturation::default();
        assert!(matches!(
            empty.vapor_pressure(),
            Err(SorptionError::NotDefined { operation: "p_sat", .. })
        ));
        assert!(Saturation::with_vapor_pressure(1e3).liquid_density().is_err());
        assert_eq!(
            Saturation::with_vapor_pressure_and_density(1e3, 900.0).liquid_density(),
            Ok(900.0)
        );
    }
}
