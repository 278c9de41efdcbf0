//! Literature coefficient sets shared by the unit tests.

use super::{
    refrigerant::{
        LiquidDensity, LiquidDensityEquation, Refrigerant, VaporPressure, VaporPressureEquation,
    },
    store::{CoefficientRecord, MemoryStore, PairId, RecordKind},
};

/// Langmuir, CO2 on Norit RB1 activated carbon: `[ΔH, b0, w_max]`.
pub(crate) const LANGMUIR_CO2: [f64; 3] = [23_500.0, 3.22e-10, 0.349_431_46];

/// Toth, water on silica gel. Negative `r` means `r = n`.
pub(crate) const TOTH_WATER: [f64; 7] = [
    4.714e-13, -51.114, 1.0, 0.3548, 9955.0, -1.0, 0.422_675_081_243_106,
];

/// Dual-site Sips, CO2 on a zeolite.
pub(crate) const DSS_CO2: [f64; 9] = [
    0.000_07,
    0.000_16,
    28_700.0,
    34_100.0,
    0.82,
    0.32,
    0.273_842_37,
    0.050_270_58,
    323.0,
];

/// Freundlich, water on silica gel: `A = 0.346 + 0.001·T`, `B = 0.625 + 0.0002·T`.
pub(crate) const FREUNDLICH_WATER: [f64; 8] = [0.346, 0.001, 0.0, 0.0, 0.625, 0.000_2, 0.0, 0.0];

/// Dubinin-Astakhov, R-134a on activated carbon, mass-based limiting loading.
pub(crate) const DA_R134A: [f64; 4] = [7332.69, 1.29, 2.22, -1.0];

/// Dühring, aqueous lithium bromide.
pub(crate) const DUEHRING_LIBR: [f64; 15] = [
    6.164_233_723,
    -0.274_666_502_6,
    0.004_916_023_734,
    -0.000_028_590_982_59,
    -53.803_431_63,
    5.004_848_451,
    -0.122_827_302_8,
    0.001_096_142_234_1,
    6.427_154_896,
    -1208.919_437,
    -166_159.963,
    0.0,
    1.0,
    273.15,
    0.001,
];

/// Antoine-type absorption correlation in `T` and `100·X`.
pub(crate) const ANTOINE_ABSORPTION: [f64; 12] = [
    6.95, -1.33e-2, -9.02e-6, 0.0, 0.0, -1.64, 1.83e-3, -2.52e-6, 0.0, 0.0, 43.15, 1000.0,
];

/// NRTL with fixed interaction energies, water in an ionic liquid: `[Δg12, Δg21, α]`.
pub(crate) const NRTL_WATER: [f64; 3] = [19_435.5168, -348.983_256, 0.3];

/// UNIQUAC with fixed interaction energies, water in an ionic liquid.
pub(crate) const UNIQUAC_WATER: [f64; 7] = [345.305_52, 3057.123_28, 1.4, 10.2, 0.92, 11.16, 10.0];

/// Cubic mixing rule, CO2 in a lubricant oil, Peng-Robinson form.
pub(crate) const ONE_PVDW_CO2_OIL: [f64; 8] = [10.0, 0.2236, 0.5741, 0.0056, 304.2, 800.0, 7.38e6, 1.867e6];

pub(crate) const R134A_VAPOR_PRESSURE: [f64; 14] = [
    374.18, 4.056_29e6, -7.686_556, 1.0, 2.311_791, 1.5, -2.039_554, 2.0, -3.583_758, 4.0, 0.0,
    0.0, 0.0, 0.0,
];

pub(crate) const R134A_LIQUID_DENSITY: [f64; 17] = [
    374.18,
    1.0,
    1.0,
    518.20,
    0.0,
    884.13,
    1.0 / 3.0,
    485.84,
    2.0 / 3.0,
    193.29,
    10.0 / 3.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
    0.0,
];

/// Peng-Robinson, R-134a.
pub(crate) const R134A_PENG_ROBINSON: [f64; 9] =
    [10.0, 4.059_29e6, 374.21, 0.3268, 0.0, 0.0, 0.0, 0.0, 0.0];

pub(crate) const WATER_VAPOR_PRESSURE: [f64; 14] = [
    647.096,
    22_064_000.0,
    -7.859_517_83,
    1.0,
    1.844_082_59,
    1.5,
    -11.786_649_7,
    3.0,
    22.680_741_1,
    3.5,
    -15.961_871_9,
    4.0,
    1.801_225_02,
    7.5,
];

pub(crate) const BENZENE_EOS2: [f64; 13] = [
    561.75,
    100_000.0,
    -10.655_375_280,
    23.941_912_372,
    0.0,
    -22.388_714_756,
    1.0,
    20.208_593_271,
    2.0,
    -7.219_556_515,
    3.0,
    4.847_283_265,
    1.7,
];

pub(crate) const BENZENE_ANTOINE: [f64; 3] = [4.725_83, 1660.652, -1.461];

pub(crate) const R142B_EOS3: [f64; 9] = [
    410.25,
    1000.0,
    -3382.422,
    17.013_84,
    0.0,
    -0.001_012_149,
    1.0,
    3.224_924,
    1.5,
];

pub(crate) fn water_vapor_pressure() -> VaporPressure {
    VaporPressure::new(VaporPressureEquation::Eos1, &WATER_VAPOR_PRESSURE)
        .expect("fixture coefficients are complete")
}

/// R-134a with both property correlations.
pub(crate) fn r134a() -> Refrigerant {
    let vapor_pressure = VaporPressure::new(VaporPressureEquation::Eos1, &R134A_VAPOR_PRESSURE)
        .expect("fixture coefficients are complete");
    let liquid_density = LiquidDensity::new(LiquidDensityEquation::Eos1, &R134A_LIQUID_DENSITY)
        .expect("fixture coefficients are complete");
    Refrigerant::new(Some(vapor_pressure), Some(liquid_density))
}

pub(crate) const CARBON_CO2: (&str, &str, &str) = ("activated carbon", "norit-rb1", "co2");
pub(crate) const ZEOLITE_CO2: (&str, &str, &str) = ("zeolite", "13x", "co2");
pub(crate) const SILICA_GEL_WATER: (&str, &str, &str) = ("silica gel", "pore-type-a", "water");
pub(crate) const CARBON_R134A: (&str, &str, &str) = ("activated carbon", "maxsorb-iii", "r-134a");
pub(crate) const LIBR_WATER: (&str, &str, &str) = ("lithium bromide", "aqueous", "water");
pub(crate) const IONIC_LIQUID_WATER: (&str, &str, &str) = ("ionic liquid", "emim-etso4", "water");
pub(crate) const OIL_CO2: (&str, &str, &str) = ("lubricant", "pag", "co2");

fn pair((sorbent, subtype, refrigerant): (&str, &str, &str)) -> PairId {
    PairId::new(sorbent, subtype, refrigerant)
}

/// A store holding one record per domain, keyed under variant 1.
pub(crate) fn store() -> MemoryStore {
    let adsorption = |values: &[f64]| CoefficientRecord::new(RecordKind::Adsorption, values);
    let absorption = |values: &[f64]| CoefficientRecord::new(RecordKind::Absorption, values);

    MemoryStore::new()
        .with(pair(CARBON_CO2), "langmuir", 1, adsorption(&LANGMUIR_CO2))
        .with(pair(ZEOLITE_CO2), "dss", 1, adsorption(&DSS_CO2))
        .with(pair(SILICA_GEL_WATER), "toth", 1, adsorption(&TOTH_WATER))
        .with(pair(SILICA_GEL_WATER), "freundlich", 1, adsorption(&FREUNDLICH_WATER))
        .with(pair(CARBON_R134A), "dubinin-astakov", 1, adsorption(&DA_R134A))
        .with(pair(LIBR_WATER), "duhring", 1, absorption(&DUEHRING_LIBR))
        .with(pair(IONIC_LIQUID_WATER), "nrtl-fixeddg", 1, absorption(&NRTL_WATER))
        .with(pair(OIL_CO2), "mixingrule-1pvdw", 1, absorption(&ONE_PVDW_CO2_OIL))
        .with_refrigerant("water", "VaporPressure_EoS1", 1, WATER_VAPOR_PRESSURE)
        .with_refrigerant("r-134a", "VaporPressure_EoS1", 1, R134A_VAPOR_PRESSURE)
        .with_refrigerant("r-134a", "SaturatedLiquidDensity_EoS1", 1, R134A_LIQUID_DENSITY)
}
