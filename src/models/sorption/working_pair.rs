mod quantities;

use tracing::debug;

use super::{
    EquilibriumConfig, Refrigerant, SorptionError,
    absorption::{
        Absorption, AbsorptionApproach, AbsorptionFamily, ActivityEquilibrium,
        ConventionalEquilibrium, MixingEquilibrium,
    },
    adsorption::{
        AdsorptionEquilibrium, AdsorptionFamily, AdsorptionIsotherm, Saturation, SaturationSource,
        VolumetricIsotherm,
    },
    store::{CoefficientStore, PairId, RecordKind},
};

/// Names everything a [`WorkingPair`] is built from.
///
/// The isotherm name and variant select the equilibrium record stored under
/// the pair. The refrigerant correlations are optional; without them, only
/// queries that need no refrigerant property are answerable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingPairSpec {
    pub sorbent: String,
    pub subtype: String,
    pub refrigerant: String,
    pub isotherm: String,
    pub isotherm_variant: usize,
    pub vapor_pressure: Option<(String, usize)>,
    pub liquid_density: Option<(String, usize)>,
}

impl WorkingPairSpec {
    /// Selects variant 0 of `isotherm` and no refrigerant correlations.
    #[must_use]
    pub fn new(
        sorbent: impl Into<String>,
        subtype: impl Into<String>,
        refrigerant: impl Into<String>,
        isotherm: impl Into<String>,
    ) -> Self {
        Self {
            sorbent: sorbent.into(),
            subtype: subtype.into(),
            refrigerant: refrigerant.into(),
            isotherm: isotherm.into(),
            isotherm_variant: 0,
            vapor_pressure: None,
            liquid_density: None,
        }
    }

    #[must_use]
    pub fn with_isotherm(mut self, name: impl Into<String>, variant: usize) -> Self {
        self.isotherm = name.into();
        self.isotherm_variant = variant;
        self
    }

    #[must_use]
    pub fn with_vapor_pressure(mut self, name: impl Into<String>, variant: usize) -> Self {
        self.vapor_pressure = Some((name.into(), variant));
        self
    }

    #[must_use]
    pub fn with_liquid_density(mut self, name: impl Into<String>, variant: usize) -> Self {
        self.liquid_density = Some((name.into(), variant));
        self
    }

    fn pair_id(&self) -> PairId {
        PairId::new(&self.sorbent, &self.subtype, &self.refrigerant)
    }
}

/// Sorption domain of a working pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Adsorption,
    Absorption,
}

impl Domain {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Adsorption => "adsorption",
            Self::Absorption => "absorption",
        }
    }

    fn record_kind(self) -> RecordKind {
        match self {
            Self::Adsorption => RecordKind::Adsorption,
            Self::Absorption => RecordKind::Absorption,
        }
    }
}

/// A family name resolved against both registries.
#[derive(Debug, Clone, Copy)]
enum Family {
    Adsorption(AdsorptionFamily),
    Absorption(AbsorptionFamily),
}

impl Family {
    /// Adsorption names take precedence over absorption names.
    fn from_name(name: &str) -> Option<Self> {
        AdsorptionFamily::from_name(name)
            .map(Self::Adsorption)
            .or_else(|| AbsorptionFamily::from_name(name).map(Self::Absorption))
    }

    fn domain(self) -> Domain {
        match self {
            Self::Adsorption(_) => Domain::Adsorption,
            Self::Absorption(_) => Domain::Absorption,
        }
    }

    fn bind(self, values: &[f64], config: &EquilibriumConfig) -> Result<Bound, SorptionError> {
        Ok(match self {
            Self::Adsorption(family) => Bound::Adsorption(family.bind(values, config)?),
            Self::Absorption(family) => Bound::Absorption(family.bind(values, config)?),
        })
    }
}

#[derive(Debug)]
enum Bound {
    Adsorption(Box<dyn AdsorptionIsotherm>),
    Absorption(Absorption),
}

/// An isotherm family, its coefficients and a refrigerant, ready for queries.
///
/// Construction either succeeds completely or fails with the first error.
/// Once built, a working pair is immutable and every query is a pure
/// function of its arguments, so a pair may be shared across threads.
///
/// Queries are grouped by prefix:
///
/// - `ads_*` need an adsorption pair and report
///   [`SorptionError::WrongDomain`] otherwise.
/// - `abs_*` need an absorption pair of the matching kind. Conventional,
///   activity-coefficient and mixing-rule queries report
///   [`SorptionError::NotDefined`] for the other two kinds.
/// - `ref_*` ask the refrigerant directly.
///
/// Pressures are in Pa, temperatures in K, loadings and concentrations in
/// kg/kg, densities in kg/m³, molar volumes in m³/mol and molar masses in
/// kg/mol.
#[derive(Debug)]
pub struct WorkingPair {
    id: PairId,
    bound: Bound,
    refrigerant: Refrigerant,
    config: EquilibriumConfig,
}

impl WorkingPair {
    /// Builds a working pair with the default numeric configuration.
    ///
    /// # Errors
    ///
    /// See [`WorkingPair::with_config`].
    pub fn new<S: CoefficientStore + ?Sized>(
        store: &S,
        spec: &WorkingPairSpec,
    ) -> Result<Self, SorptionError> {
        Self::with_config(store, spec, EquilibriumConfig::default())
    }

    /// Builds a working pair.
    ///
    /// The isotherm name is resolved first, then its coefficients are read
    /// from `store` and bound. Refrigerant correlations are resolved last and
    /// never fail construction: a missing one leaves the dependent queries
    /// undefined.
    ///
    /// # Errors
    ///
    /// - [`SorptionError::UnknownFamily`] if no family has the isotherm name.
    /// - [`SorptionError::MissingCoefficients`] if the store has no record
    ///   for the pair, name and variant, or the record belongs to another
    ///   domain.
    /// - Any binding error of the family, such as
    ///   [`SorptionError::InvalidCoefficients`].
    pub fn with_config<S: CoefficientStore + ?Sized>(
        store: &S,
        spec: &WorkingPairSpec,
        config: EquilibriumConfig,
    ) -> Result<Self, SorptionError> {
        let family = Family::from_name(&spec.isotherm).ok_or_else(|| SorptionError::UnknownFamily {
            name: spec.isotherm.clone(),
        })?;
        let domain = family.domain();
        debug!(isotherm = %spec.isotherm, domain = domain.name(), "resolved isotherm family");

        let id = spec.pair_id();
        let record = store
            .coefficients(&id, &spec.isotherm, spec.isotherm_variant)
            .ok_or_else(|| SorptionError::MissingCoefficients {
                context: format!(
                    "no `{}` record (variant {}) for {}/{}/{}",
                    spec.isotherm, spec.isotherm_variant, id.sorbent, id.subtype, id.refrigerant
                ),
            })?;
        if record.kind != domain.record_kind() {
            return Err(SorptionError::MissingCoefficients {
                context: format!(
                    "`{}` record for {}/{}/{} is tagged {:?}, expected {:?}",
                    spec.isotherm,
                    id.sorbent,
                    id.subtype,
                    id.refrigerant,
                    record.kind,
                    domain.record_kind()
                ),
            });
        }

        let bound = family.bind(&record.values, &config)?;
        debug!(
            isotherm = %spec.isotherm,
            coefficients = record.values.len(),
            "bound isotherm coefficients"
        );

        let refrigerant = Refrigerant::from_store(
            store,
            &spec.refrigerant,
            spec.vapor_pressure
                .as_ref()
                .map(|(name, variant)| (name.as_str(), *variant)),
            spec.liquid_density
                .as_ref()
                .map(|(name, variant)| (name.as_str(), *variant)),
            config,
        );
        debug!(
            refrigerant = %spec.refrigerant,
            vapor_pressure = refrigerant.vapor_pressure().is_some(),
            liquid_density = refrigerant.liquid_density().is_some(),
            "working pair ready"
        );

        Ok(Self {
            id,
            bound,
            refrigerant,
            config,
        })
    }

    #[must_use]
    pub fn id(&self) -> &PairId {
        &self.id
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        match self.bound {
            Bound::Adsorption(_) => Domain::Adsorption,
            Bound::Absorption(_) => Domain::Absorption,
        }
    }

    /// Store name of the bound isotherm family.
    #[must_use]
    pub fn family_name(&self) -> &'static str {
        match &self.bound {
            Bound::Adsorption(isotherm) => isotherm.family().name(),
            Bound::Absorption(absorption) => absorption.family().name(),
        }
    }

    #[must_use]
    pub fn refrigerant(&self) -> &Refrigerant {
        &self.refrigerant
    }

    #[must_use]
    pub fn config(&self) -> &EquilibriumConfig {
        &self.config
    }

    fn isotherm(&self, operation: &'static str) -> Result<&dyn AdsorptionIsotherm, SorptionError> {
        match &self.bound {
            Bound::Adsorption(isotherm) => Ok(isotherm.as_ref()),
            Bound::Absorption(_) => Err(SorptionError::WrongDomain {
                operation,
                domain: Domain::Absorption.name(),
            }),
        }
    }

    fn adsorption(&self, operation: &'static str) -> Result<AdsorptionEquilibrium<'_>, SorptionError> {
        Ok(AdsorptionEquilibrium::new(
            self.isotherm(operation)?,
            SaturationSource::Refrigerant(&self.refrigerant),
            &self.config,
        ))
    }

    fn adsorption_at(
        &self,
        operation: &'static str,
        saturation: Saturation,
    ) -> Result<AdsorptionEquilibrium<'_>, SorptionError> {
        Ok(AdsorptionEquilibrium::new(
            self.isotherm(operation)?,
            SaturationSource::Fixed(saturation),
            &self.config,
        ))
    }

    fn volumetric(&self, operation: &'static str) -> Result<&dyn VolumetricIsotherm, SorptionError> {
        self.adsorption(operation)?.volumetric()
    }

    fn absorption(&self, operation: &'static str) -> Result<&Absorption, SorptionError> {
        match &self.bound {
            Bound::Absorption(absorption) => Ok(absorption),
            Bound::Adsorption(_) => Err(SorptionError::WrongDomain {
                operation,
                domain: Domain::Adsorption.name(),
            }),
        }
    }

    fn activity(&self, operation: &'static str) -> Result<ActivityEquilibrium<'_>, SorptionError> {
        match self.absorption(operation)? {
            Absorption::Activity(model) => Ok(ActivityEquilibrium::new(model.as_ref(), &self.config)),
            other => Err(not_defined_for(operation, other.approach())),
        }
    }

    fn mixing(&self, operation: &'static str) -> Result<MixingEquilibrium<'_>, SorptionError> {
        match self.absorption(operation)? {
            Absorption::Mixing(rule) => Ok(MixingEquilibrium::new(rule, &self.config)),
            other => Err(not_defined_for(operation, other.approach())),
        }
    }

    /// Conventional or mixing-rule equilibrium, for queries both kinds answer.
    fn vapor_liquid(&self, operation: &'static str) -> Result<VaporLiquid<'_>, SorptionError> {
        match self.absorption(operation)? {
            Absorption::Conventional(correlation) => Ok(VaporLiquid::Conventional(
                ConventionalEquilibrium::new(correlation.as_ref(), &self.config),
            )),
            Absorption::Mixing(rule) => {
                Ok(VaporLiquid::Mixing(MixingEquilibrium::new(rule, &self.config)))
            }
            other => Err(not_defined_for(operation, other.approach())),
        }
    }

    // Adsorption, saturation properties from the refrigerant.

    /// Equilibrium loading at `p` and `t`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::WrongDomain`] for absorption pairs, and
    /// propagates isotherm and refrigerant failures.
    pub fn ads_w_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        self.adsorption("ads_w_pt")?.w_pt(p, t)
    }

    /// Equilibrium pressure at loading `w` and `t`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_pt`], plus non-convergence of the inversion.
    pub fn ads_p_wt(&self, w: f64, t: f64) -> Result<f64, SorptionError> {
        self.adsorption("ads_p_wt")?.p_wt(w, t)
    }

    /// Equilibrium temperature at `p` and loading `w`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_p_wt`].
    pub fn ads_t_pw(&self, p: f64, w: f64) -> Result<f64, SorptionError> {
        self.adsorption("ads_t_pw")?.t_pw(p, w)
    }

    /// `∂w/∂p` at `p` and `t`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_pt`].
    pub fn ads_dw_dp_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        self.adsorption("ads_dw_dp_pt")?.dw_dp_pt(p, t)
    }

    /// `∂w/∂T` at `p` and `t`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_pt`].
    pub fn ads_dw_dt_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        self.adsorption("ads_dw_dt_pt")?.dw_dt_pt(p, t)
    }

    /// `∂p/∂w` at loading `w` and `t`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_p_wt`].
    pub fn ads_dp_dw_wt(&self, w: f64, t: f64) -> Result<f64, SorptionError> {
        self.adsorption("ads_dp_dw_wt")?.dp_dw_wt(w, t)
    }

    /// `∂p/∂T` at loading `w` and `t`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_p_wt`].
    pub fn ads_dp_dt_wt(&self, w: f64, t: f64) -> Result<f64, SorptionError> {
        self.adsorption("ads_dp_dt_wt")?.dp_dt_wt(w, t)
    }

    /// Reduced spreading pressure in mol/kg.
    ///
    /// `p_total` is the total gas pressure, `y` and `x` the gas- and
    /// adsorbed-phase mole fractions, `gamma` the adsorbed-phase activity
    /// coefficient and `m` the refrigerant molar mass.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_pt`], plus [`SorptionError::OutOfDomain`]
    /// unless `p_total·y/(x·γ)` is strictly positive.
    pub fn ads_pi_star_pyxgtm(
        &self,
        p_total: f64,
        y: f64,
        x: f64,
        gamma: f64,
        t: f64,
        m: f64,
    ) -> Result<f64, SorptionError> {
        self.adsorption("ads_pi_star_pyxgtm")?
            .pi_star(p_total, y, x, gamma, t, m)
    }

    // Adsorption, saturation properties supplied by the caller.

    /// [`WorkingPair::ads_w_pt`] with a given vapor pressure and liquid density.
    ///
    /// Surface isotherms ignore both.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::WrongDomain`] for absorption pairs, and
    /// propagates isotherm failures.
    pub fn ads_w_pt_psat_rho(
        &self,
        p: f64,
        t: f64,
        p_sat: f64,
        rho_l: f64,
    ) -> Result<f64, SorptionError> {
        self.adsorption_at("ads_w_pt_psat_rho", fixed(p_sat, rho_l))?
            .w_pt(p, t)
    }

    /// [`WorkingPair::ads_p_wt`] with a given vapor pressure and liquid density.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_pt_psat_rho`], plus non-convergence.
    pub fn ads_p_wt_psat_rho(
        &self,
        w: f64,
        t: f64,
        p_sat: f64,
        rho_l: f64,
    ) -> Result<f64, SorptionError> {
        self.adsorption_at("ads_p_wt_psat_rho", fixed(p_sat, rho_l))?
            .p_wt(w, t)
    }

    /// [`WorkingPair::ads_dw_dp_pt`] with a given vapor pressure and liquid density.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_pt_psat_rho`].
    pub fn ads_dw_dp_pt_psat_rho(
        &self,
        p: f64,
        t: f64,
        p_sat: f64,
        rho_l: f64,
    ) -> Result<f64, SorptionError> {
        self.adsorption_at("ads_dw_dp_pt_psat_rho", fixed(p_sat, rho_l))?
            .dw_dp_pt(p, t)
    }

    /// [`WorkingPair::ads_dw_dt_pt`] with given saturation properties and slopes.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_pt_psat_rho`]. Isotherms without an analytic
    /// `∂w/∂T` that need saturation properties report
    /// [`SorptionError::NotDefined`], since one state cannot be varied in
    /// temperature.
    pub fn ads_dw_dt_pt_psat_rho(
        &self,
        p: f64,
        t: f64,
        p_sat: f64,
        rho_l: f64,
        dp_sat_dt: f64,
        drho_l_dt: f64,
    ) -> Result<f64, SorptionError> {
        let saturation = fixed(p_sat, rho_l).with_slopes(Some(dp_sat_dt), Some(drho_l_dt));
        self.adsorption_at("ads_dw_dt_pt_psat_rho", saturation)?
            .dw_dt_pt(p, t)
    }

    /// [`WorkingPair::ads_dp_dw_wt`] with a given vapor pressure and liquid density.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_p_wt_psat_rho`].
    pub fn ads_dp_dw_wt_psat_rho(
        &self,
        w: f64,
        t: f64,
        p_sat: f64,
        rho_l: f64,
    ) -> Result<f64, SorptionError> {
        self.adsorption_at("ads_dp_dw_wt_psat_rho", fixed(p_sat, rho_l))?
            .dp_dw_wt(w, t)
    }

    /// [`WorkingPair::ads_dp_dt_wt`] with given saturation properties and slopes.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_dw_dt_pt_psat_rho`].
    pub fn ads_dp_dt_wt_psat_rho(
        &self,
        w: f64,
        t: f64,
        p_sat: f64,
        rho_l: f64,
        dp_sat_dt: f64,
        drho_l_dt: f64,
    ) -> Result<f64, SorptionError> {
        let saturation = fixed(p_sat, rho_l).with_slopes(Some(dp_sat_dt), Some(drho_l_dt));
        self.adsorption_at("ads_dp_dt_wt_psat_rho", saturation)?
            .dp_dt_wt(w, t)
    }

    /// [`WorkingPair::ads_pi_star_pyxgtm`] with a given vapor pressure and liquid density.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_pi_star_pyxgtm`].
    #[allow(clippy::too_many_arguments)]
    pub fn ads_pi_star_pyxgtpsatrhom(
        &self,
        p_total: f64,
        y: f64,
        x: f64,
        gamma: f64,
        t: f64,
        p_sat: f64,
        rho_l: f64,
        m: f64,
    ) -> Result<f64, SorptionError> {
        self.adsorption_at("ads_pi_star_pyxgtpsatrhom", fixed(p_sat, rho_l))?
            .pi_star(p_total, y, x, gamma, t, m)
    }

    // Adsorption, characteristic curve of volumetric isotherms.

    /// Volumetric loading in m³/kg at adsorption potential `a` in J/mol.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::NotDefined`] for surface isotherms.
    pub fn ads_w_a_rho(&self, a: f64, rho_l: f64) -> Result<f64, SorptionError> {
        self.volumetric("ads_w_a_rho")?.w_a_rho(a, rho_l)
    }

    /// Adsorption potential in J/mol at volumetric loading `w` in m³/kg.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_a_rho`].
    pub fn ads_a_w_rho(&self, w: f64, rho_l: f64) -> Result<f64, SorptionError> {
        self.volumetric("ads_a_w_rho")?.a_w_rho(w, rho_l)
    }

    /// `dW/dA`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_a_rho`].
    pub fn ads_dw_da_a_rho(&self, a: f64, rho_l: f64) -> Result<f64, SorptionError> {
        self.volumetric("ads_dw_da_a_rho")?.dw_da_a_rho(a, rho_l)
    }

    /// `dA/dW`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_a_rho`].
    pub fn ads_da_dw_w_rho(&self, w: f64, rho_l: f64) -> Result<f64, SorptionError> {
        self.volumetric("ads_da_dw_w_rho")?.da_dw_w_rho(w, rho_l)
    }

    // Absorption, conventional correlations and the mixing rule.

    /// Equilibrium concentration at `p` and `t`.
    ///
    /// Conventional families return the mass concentration in kg/kg, the
    /// mixing rule the refrigerant mole fraction of the liquid.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::WrongDomain`] for adsorption pairs,
    /// [`SorptionError::NotDefined`] for activity-coefficient families, and
    /// non-convergence of the inversion.
    pub fn abs_x_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        match self.vapor_liquid("abs_x_pt")? {
            VaporLiquid::Conventional(eq) => eq.x_pt(p, t),
            VaporLiquid::Mixing(eq) => eq.x_pt(p, t),
        }
    }

    /// Equilibrium pressure at concentration `x` and `t`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_x_pt`].
    pub fn abs_p_xt(&self, x: f64, t: f64) -> Result<f64, SorptionError> {
        match self.vapor_liquid("abs_p_xt")? {
            VaporLiquid::Conventional(eq) => eq.p_xt(x, t),
            VaporLiquid::Mixing(eq) => eq.p_tx(t, x),
        }
    }

    /// Equilibrium temperature at `p` and concentration `x`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_x_pt`].
    pub fn abs_t_px(&self, p: f64, x: f64) -> Result<f64, SorptionError> {
        match self.vapor_liquid("abs_t_px")? {
            VaporLiquid::Conventional(eq) => eq.t_px(p, x),
            VaporLiquid::Mixing(eq) => eq.t_px(p, x),
        }
    }

    /// `∂X/∂p` at `p` and `t`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_x_pt`].
    pub fn abs_dx_dp_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        match self.vapor_liquid("abs_dx_dp_pt")? {
            VaporLiquid::Conventional(eq) => eq.dx_dp_pt(p, t),
            VaporLiquid::Mixing(eq) => eq.dx_dp_pt(p, t),
        }
    }

    /// `∂X/∂T` at `p` and `t`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_x_pt`].
    pub fn abs_dx_dt_pt(&self, p: f64, t: f64) -> Result<f64, SorptionError> {
        match self.vapor_liquid("abs_dx_dt_pt")? {
            VaporLiquid::Conventional(eq) => eq.dx_dt_pt(p, t),
            VaporLiquid::Mixing(eq) => eq.dx_dt_pt(p, t),
        }
    }

    /// `∂p/∂X` at concentration `x` and `t`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_x_pt`].
    pub fn abs_dp_dx_xt(&self, x: f64, t: f64) -> Result<f64, SorptionError> {
        match self.vapor_liquid("abs_dp_dx_xt")? {
            VaporLiquid::Conventional(eq) => eq.dp_dx_xt(x, t),
            VaporLiquid::Mixing(eq) => eq.dp_dx_tx(t, x),
        }
    }

    /// `∂p/∂T` at concentration `x` and `t`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_x_pt`].
    pub fn abs_dp_dt_xt(&self, x: f64, t: f64) -> Result<f64, SorptionError> {
        match self.vapor_liquid("abs_dp_dt_xt")? {
            VaporLiquid::Conventional(eq) => eq.dp_dt_xt(x, t),
            VaporLiquid::Mixing(eq) => eq.dp_dt_tx(t, x),
        }
    }

    // Absorption, activity-coefficient models.

    /// Activity coefficient of the refrigerant at mole fraction `x`.
    ///
    /// `v1` and `v2` are the molar volumes of refrigerant and sorbent. A
    /// negative value of either selects the volumes stored with the
    /// coefficients; models that do not use volumes ignore them.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::WrongDomain`] for adsorption pairs,
    /// [`SorptionError::NotDefined`] for other absorption kinds, and
    /// [`SorptionError::OutOfDomain`] unless `0 ≤ x ≤ 1`.
    pub fn abs_g_txv1v2(&self, t: f64, x: f64, v1: f64, v2: f64) -> Result<f64, SorptionError> {
        self.activity("abs_g_txv1v2")?.gamma(t, x, v1, v2)
    }

    /// Equilibrium pressure `γ·x·p_sat` for a given vapor pressure.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_g_txv1v2`].
    pub fn abs_p_txv1v2psat(
        &self,
        t: f64,
        x: f64,
        v1: f64,
        v2: f64,
        p_sat: f64,
    ) -> Result<f64, SorptionError> {
        self.activity("abs_p_txv1v2psat")?
            .p_txv1v2psat(t, x, v1, v2, p_sat)
    }

    /// Equilibrium pressure with the vapor pressure of the refrigerant.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_p_txv1v2psat`], plus refrigerant failures.
    pub fn abs_p_txv1v2(&self, t: f64, x: f64, v1: f64, v2: f64) -> Result<f64, SorptionError> {
        let activity = self.activity("abs_p_txv1v2")?;
        activity.p_txv1v2psat(t, x, v1, v2, self.refrigerant.p_sat(t)?)
    }

    /// Equilibrium mole fraction for a given vapor pressure.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_g_txv1v2`], plus non-convergence.
    pub fn abs_x_ptv1v2psat(
        &self,
        p: f64,
        t: f64,
        v1: f64,
        v2: f64,
        p_sat: f64,
    ) -> Result<f64, SorptionError> {
        self.activity("abs_x_ptv1v2psat")?
            .x_ptv1v2psat(p, t, v1, v2, p_sat)
    }

    /// Equilibrium mole fraction with the vapor pressure of the refrigerant.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_x_ptv1v2psat`], plus refrigerant failures.
    pub fn abs_x_ptv1v2(&self, p: f64, t: f64, v1: f64, v2: f64) -> Result<f64, SorptionError> {
        let activity = self.activity("abs_x_ptv1v2")?;
        activity.x_ptv1v2psat(p, t, v1, v2, self.refrigerant.p_sat(t)?)
    }

    // Absorption, mixing rule.

    /// Pressure of the mixture at `t`, molar volume `v` and mole fraction `x`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::WrongDomain`] for adsorption pairs,
    /// [`SorptionError::NotDefined`] for other absorption kinds, and
    /// [`SorptionError::OutOfDomain`] if `v` does not exceed the co-volume.
    pub fn abs_p_tvx(&self, t: f64, v: f64, x: f64) -> Result<f64, SorptionError> {
        self.mixing("abs_p_tvx")?.p_tvx(t, v, x)
    }

    /// Bubble pressure at `t` and refrigerant mole fraction `x`.
    ///
    /// # Errors
    ///
    /// Returns [`SorptionError::WrongDomain`] for adsorption pairs,
    /// [`SorptionError::NotDefined`] for other absorption kinds,
    /// [`SorptionError::OutOfDomain`] unless `0 < x < 1`, and
    /// non-convergence of the bubble-point iteration.
    pub fn abs_p_tx(&self, t: f64, x: f64) -> Result<f64, SorptionError> {
        self.mixing("abs_p_tx")?.p_tx(t, x)
    }

    /// Refrigerant mole fraction of the first vapor bubble at `t` and `x`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_p_tx`].
    pub fn abs_y_tx(&self, t: f64, x: f64) -> Result<f64, SorptionError> {
        Ok(self.mixing("abs_y_tx")?.bubble_point(t, x)?.vapor_mole_fraction)
    }

    // Refrigerant.

    /// # Errors
    ///
    /// Returns [`SorptionError::NotDefined`] without a vapor-pressure correlation.
    pub fn ref_p_sat_t(&self, t: f64) -> Result<f64, SorptionError> {
        self.refrigerant.p_sat(t)
    }

    /// # Errors
    ///
    /// As [`WorkingPair::ref_p_sat_t`], plus non-convergence.
    pub fn ref_t_sat_p(&self, p: f64) -> Result<f64, SorptionError> {
        self.refrigerant.t_sat(p)
    }

    /// # Errors
    ///
    /// As [`WorkingPair::ref_p_sat_t`].
    pub fn ref_dp_sat_dt_t(&self, t: f64) -> Result<f64, SorptionError> {
        self.refrigerant.dp_sat_dt(t)
    }

    /// # Errors
    ///
    /// Returns [`SorptionError::NotDefined`] without a liquid-density correlation.
    pub fn ref_rho_l_t(&self, t: f64) -> Result<f64, SorptionError> {
        self.refrigerant.rho_l(t)
    }

    /// # Errors
    ///
    /// As [`WorkingPair::ref_rho_l_t`].
    pub fn ref_drho_l_dt_t(&self, t: f64) -> Result<f64, SorptionError> {
        self.refrigerant.drho_l_dt(t)
    }
}

#[derive(Debug, Clone, Copy)]
enum VaporLiquid<'a> {
    Conventional(ConventionalEquilibrium<'a>),
    Mixing(MixingEquilibrium<'a>),
}

fn fixed(p_sat: f64, rho_l: f64) -> Saturation {
    Saturation::with_vapor_pressure_and_density(p_sat, rho_l)
}

fn not_defined_for(operation: &'static str, approach: AbsorptionApproach) -> SorptionError {
    let owner = match approach {
        AbsorptionApproach::Conventional => "conventional absorption families",
        AbsorptionApproach::Activity => "activity-coefficient absorption families",
        AbsorptionApproach::Mixing => "mixing-rule absorption families",
    };
    SorptionError::not_defined(operation, owner)
}
