//! Absorption equilibrium families.
//!
//! Absorption correlations come in three kinds:
//!
//! - [`ConventionalCorrelation`]: pressure as a function of the mass
//!   concentration `X` (kg/kg) and temperature.
//! - [`ActivityModel`]: the activity coefficient `γ` of the refrigerant in
//!   the liquid phase, with pressure from modified Raoult's law
//!   `p = γ·x·p_sat` in terms of the mole fraction `x`.
//! - [`OnePvdw`]: a cubic equation of state for the mixture, combined with
//!   the one-parameter van der Waals mixing rule. Equilibrium is the bubble
//!   point of the liquid, see [`MixingEquilibrium`].

mod antoine;
mod duehring;
mod equilibrium;
mod flory_huggins;
mod heil;
mod mixing_rule;
mod nrtl;
mod tsuboka_katayama;
mod uniquac;
mod wilson;

pub use antoine::Antoine;
pub use duehring::Duehring;
pub use equilibrium::{ActivityEquilibrium, ConventionalEquilibrium, MixingEquilibrium};
pub use flory_huggins::FloryHuggins;
pub use heil::Heil;
pub use mixing_rule::{BubblePoint, OnePvdw};
pub use nrtl::Nrtl;
pub use tsuboka_katayama::TsubokaKatayama;
pub use uniquac::Uniquac;
pub use wilson::Wilson;

use std::fmt;

use crate::support::numeric::GuessPolicy;

use super::{EquilibriumConfig, Slot, SorptionError};

/// Kind of an absorption family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsorptionApproach {
    Conventional,
    Activity,
    Mixing,
}

impl AbsorptionApproach {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Conventional => "conventional",
            Self::Activity => "activity-coefficient",
            Self::Mixing => "mixing-rule",
        }
    }
}

/// Capability set of a conventional absorption correlation.
///
/// Only [`ConventionalCorrelation::p_xt`] is required. Missing operations are
/// derived by [`ConventionalEquilibrium`].
pub trait ConventionalCorrelation: fmt::Debug + Send + Sync {
    fn family(&self) -> AbsorptionFamily;

    /// Equilibrium pressure in Pa at concentration `x` and temperature `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::OutOfDomain`] if the correlation is singular at
    /// the given state.
    fn p_xt(&self, x: f64, t: f64) -> Result<f64, SorptionError>;

    fn x_pt(&self, _p: f64, _t: f64) -> Slot {
        None
    }

    fn t_px(&self, _p: f64, _x: f64) -> Slot {
        None
    }

    fn dx_dp_pt(&self, _p: f64, _t: f64) -> Slot {
        None
    }

    fn dx_dt_pt(&self, _p: f64, _t: f64) -> Slot {
        None
    }

    fn dp_dx_xt(&self, _x: f64, _t: f64) -> Slot {
        None
    }

    fn dp_dt_xt(&self, _x: f64, _t: f64) -> Slot {
        None
    }

    /// Initial guess and repair rule when concentration is found by Newton-Raphson.
    fn concentration_policy(&self) -> GuessPolicy {
        GuessPolicy::unit_interval(0.5)
    }

    /// Initial guess and repair rule when temperature is found by Newton-Raphson.
    fn temperature_policy(&self) -> GuessPolicy {
        GuessPolicy::non_negative(353.15, 253.15)
    }
}

/// Activity-coefficient model of a binary liquid mixture.
///
/// Component 1 is the refrigerant.
pub trait ActivityModel: fmt::Debug + Send + Sync {
    fn family(&self) -> AbsorptionFamily;

    /// Activity coefficient of the refrigerant at temperature `t` and mole
    /// fraction `x`.
    ///
    /// `v1` and `v2` are the molar volumes in m³/mol. Models without volume
    /// dependence ignore them; the others fall back to the volumes in their
    /// coefficient vector when either is negative.
    fn gamma(&self, t: f64, x: f64, v1: f64, v2: f64) -> f64;
}

/// Molar-volume ratios `(v2/v1, v1/v2)`.
///
/// Uses the caller's volumes unless either is negative.
pub(super) fn volume_ratios(v1: f64, v2: f64, stored: (f64, f64)) -> (f64, f64) {
    let (v1, v2) = if v1 < 0.0 || v2 < 0.0 { stored } else { (v1, v2) };
    (v2 / v1, v1 / v2)
}

/// An absorption family bound to its coefficients.
#[derive(Debug)]
pub enum Absorption {
    Conventional(Box<dyn ConventionalCorrelation>),
    Activity(Box<dyn ActivityModel>),
    Mixing(OnePvdw),
}

impl Absorption {
    #[must_use]
    pub fn family(&self) -> AbsorptionFamily {
        match self {
            Self::Conventional(correlation) => correlation.family(),
            Self::Activity(model) => model.family(),
            Self::Mixing(_) => AbsorptionFamily::OnePvdw,
        }
    }

    #[must_use]
    pub fn approach(&self) -> AbsorptionApproach {
        self.family().approach()
    }
}

/// Registered absorption families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsorptionFamily {
    Duehring,
    Antoine,
    Wilson,
    WilsonTemperatureDependent,
    NrtlFixed,
    NrtlTemperatureDependent,
    UniquacFixed,
    UniquacTemperatureDependent,
    FloryHuggins,
    Heil,
    TsubokaKatayama,
    OnePvdw,
}

impl AbsorptionFamily {
    pub const ALL: [Self; 12] = [
        Self::Duehring,
        Self::Antoine,
        Self::Wilson,
        Self::WilsonTemperatureDependent,
        Self::NrtlFixed,
        Self::NrtlTemperatureDependent,
        Self::UniquacFixed,
        Self::UniquacTemperatureDependent,
        Self::FloryHuggins,
        Self::Heil,
        Self::TsubokaKatayama,
        Self::OnePvdw,
    ];

    /// Looks up a family by its case-sensitive store name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|family| family.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Duehring => "duhring",
            Self::Antoine => "antoine",
            Self::Wilson => "wilson",
            Self::WilsonTemperatureDependent => "wilson-dl-t",
            Self::NrtlFixed => "nrtl-fixeddg",
            Self::NrtlTemperatureDependent => "nrtl-dg-t",
            Self::UniquacFixed => "uniquac-fixeddu",
            Self::UniquacTemperatureDependent => "uniquac-du-t",
            Self::FloryHuggins => "flory-huggins",
            Self::Heil => "heil",
            Self::TsubokaKatayama => "tsuboka-katayama",
            Self::OnePvdw => "mixingrule-1pvdw",
        }
    }

    #[must_use]
    pub fn approach(self) -> AbsorptionApproach {
        match self {
            Self::Duehring | Self::Antoine => AbsorptionApproach::Conventional,
            Self::OnePvdw => AbsorptionApproach::Mixing,
            _ => AbsorptionApproach::Activity,
        }
    }

    /// Binds the family to a coefficient vector.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::InvalidCoefficients`] if `values` is too short,
    /// and [`SorptionError::OutOfDomain`] for an unknown equation-of-state
    /// selector of the mixing rule.
    pub fn bind(self, values: &[f64], config: &EquilibriumConfig) -> Result<Absorption, SorptionError> {
        let r = config.gas_constant;
        Ok(match self {
            Self::Duehring => Absorption::Conventional(Box::new(Duehring::new(values)?)),
            Self::Antoine => Absorption::Conventional(Box::new(Antoine::new(values)?)),
            Self::Wilson => Absorption::Activity(Box::new(Wilson::fixed(values, r)?)),
            Self::WilsonTemperatureDependent => {
                Absorption::Activity(Box::new(Wilson::temperature_dependent(values, r)?))
            }
            Self::NrtlFixed => Absorption::Activity(Box::new(Nrtl::fixed(values, r)?)),
            Self::NrtlTemperatureDependent => {
                Absorption::Activity(Box::new(Nrtl::temperature_dependent(values, r)?))
            }
            Self::UniquacFixed => Absorption::Activity(Box::new(Uniquac::fixed(values, r)?)),
            Self::UniquacTemperatureDependent => {
                Absorption::Activity(Box::new(Uniquac::temperature_dependent(values, r)?))
            }
            Self::FloryHuggins => Absorption::Activity(Box::new(FloryHuggins::new(values)?)),
            Self::Heil => Absorption::Activity(Box::new(Heil::new(values, r)?)),
            Self::TsubokaKatayama => {
                Absorption::Activity(Box::new(TsubokaKatayama::new(values, r)?))
            }
            Self::OnePvdw => Absorption::Mixing(OnePvdw::new(values, r)?),
        })
    }
}

impl fmt::Display for AbsorptionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
