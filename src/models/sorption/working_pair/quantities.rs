//! Unit-checked facade over the SI `f64` queries.

use uom::si::{
    f64::{
        MassDensity, Pressure, Ratio, TemperatureCoefficient, TemperatureInterval,
        ThermodynamicTemperature,
    },
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    temperature_coefficient::per_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::{DensityTemperatureSlope, InversePressure, PressureTemperatureSlope};

use super::{SorptionError, WorkingPair};

fn per_pascal(value: f64) -> InversePressure {
    Ratio::new::<ratio>(value) / Pressure::new::<pascal>(1.0)
}

impl WorkingPair {
    /// Adsorbed loading, as a mass ratio.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_w_pt`].
    pub fn loading(&self, p: Pressure, t: ThermodynamicTemperature) -> Result<Ratio, SorptionError> {
        self.ads_w_pt(p.get::<pascal>(), t.get::<kelvin>())
            .map(Ratio::new::<ratio>)
    }

    /// Equilibrium pressure over an adsorbent at loading `w`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_p_wt`].
    pub fn equilibrium_pressure(
        &self,
        w: Ratio,
        t: ThermodynamicTemperature,
    ) -> Result<Pressure, SorptionError> {
        self.ads_p_wt(w.get::<ratio>(), t.get::<kelvin>())
            .map(Pressure::new::<pascal>)
    }

    /// Equilibrium temperature of an adsorbent at loading `w`.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_t_pw`].
    pub fn equilibrium_temperature(
        &self,
        p: Pressure,
        w: Ratio,
    ) -> Result<ThermodynamicTemperature, SorptionError> {
        self.ads_t_pw(p.get::<pascal>(), w.get::<ratio>())
            .map(ThermodynamicTemperature::new::<kelvin>)
    }

    /// `∂w/∂p` of the adsorbed loading.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_dw_dp_pt`].
    pub fn loading_pressure_derivative(
        &self,
        p: Pressure,
        t: ThermodynamicTemperature,
    ) -> Result<InversePressure, SorptionError> {
        self.ads_dw_dp_pt(p.get::<pascal>(), t.get::<kelvin>())
            .map(per_pascal)
    }

    /// `∂w/∂T` of the adsorbed loading.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_dw_dt_pt`].
    pub fn loading_temperature_derivative(
        &self,
        p: Pressure,
        t: ThermodynamicTemperature,
    ) -> Result<TemperatureCoefficient, SorptionError> {
        self.ads_dw_dt_pt(p.get::<pascal>(), t.get::<kelvin>())
            .map(TemperatureCoefficient::new::<per_kelvin>)
    }

    /// `∂p/∂T` at constant adsorbed loading.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::ads_dp_dt_wt`].
    pub fn pressure_temperature_derivative(
        &self,
        w: Ratio,
        t: ThermodynamicTemperature,
    ) -> Result<PressureTemperatureSlope, SorptionError> {
        self.ads_dp_dt_wt(w.get::<ratio>(), t.get::<kelvin>())
            .map(|slope| {
                Pressure::new::<pascal>(slope) / TemperatureInterval::new::<delta_kelvin>(1.0)
            })
    }

    /// Equilibrium concentration of a conventional absorbent.
    ///
    /// # Errors
    ///
    /// As [`WorkingPair::abs_x_pt`].
    pub fn concentration(
        &self,
        p: Pressure,
        t: ThermodynamicTemperature,
    ) -> Result<Ratio, SorptionError> {
        self.abs_x_pt(p.get::<pascal>(), t.get::<kelvin>())
            .map(Ratio::new::<ratio>)
    }

    /// # Errors
    ///
    /// As [`WorkingPair::ref_p_sat_t`].
    pub fn vapor_pressure(&self, t: ThermodynamicTemperature) -> Result<Pressure, SorptionError> {
        self.ref_p_sat_t(t.get::<kelvin>())
            .map(Pressure::new::<pascal>)
    }

    /// # Errors
    ///
    /// As [`WorkingPair::ref_dp_sat_dt_t`].
    pub fn vapor_pressure_slope(
        &self,
        t: ThermodynamicTemperature,
    ) -> Result<PressureTemperatureSlope, SorptionError> {
        self.ref_dp_sat_dt_t(t.get::<kelvin>()).map(|slope| {
            Pressure::new::<pascal>(slope) / TemperatureInterval::new::<delta_kelvin>(1.0)
        })
    }

    /// # Errors
    ///
    /// As [`WorkingPair::ref_t_sat_p`].
    pub fn saturation_temperature(
        &self,
        p: Pressure,
    ) -> Result<ThermodynamicTemperature, SorptionError> {
        self.ref_t_sat_p(p.get::<pascal>())
            .map(ThermodynamicTemperature::new::<kelvin>)
    }

    /// # Errors
    ///
    /// As [`WorkingPair::ref_rho_l_t`].
    pub fn liquid_density(&self, t: ThermodynamicTemperature) -> Result<MassDensity, SorptionError> {
        self.ref_rho_l_t(t.get::<kelvin>())
            .map(MassDensity::new::<kilogram_per_cubic_meter>)
    }

    /// # Errors
    ///
    /// As [`WorkingPair::ref_drho_l_dt_t`].
    pub fn liquid_density_slope(
        &self,
        t: ThermodynamicTemperature,
    ) -> Result<DensityTemperatureSlope, SorptionError> {
        self.ref_drho_l_dt_t(t.get::<kelvin>()).map(|slope| {
            MassDensity::new::<kilogram_per_cubic_meter>(slope)
                / TemperatureInterval::new::<delta_kelvin>(1.0)
        })
    }
}
