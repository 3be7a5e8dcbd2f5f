/// Numerical constants and the power-curve parameter contract.
///
/// Centralises the fixed values shared by the model, the dataset contract
/// and the capacity-matching sweep.

// -- Dataset contract --

/// Hours in the annual series (365 days, leap day dropped by the preprocessor).
pub const HOURS_PER_YEAR: usize = 8760;

/// Height at which the reanalysis wind speed is measured [m].
pub const REFERENCE_HEIGHT_M: f64 = 100.0;

/// Wind shear exponent used when a record does not carry one [-].
pub const DEFAULT_SHEAR_EXPONENT: f64 = 0.14;

// -- Model contract constants --

/// Parameter names in order.
pub const PARAM_NAMES: &[&str] = &[
    "exponent",
    "cutIn",
    "ratedSpeed",
    "cutOut",
    "maxCf",
    "hubHeight",
];

/// Number of power-curve parameters.
pub const N_PARAMS: usize = 6;

// -- Parameter bounds --

/// Valid range for one parameter: (min, max), inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Ramp-curve shape exponent [-].
pub const EXPONENT_BOUNDS: Bounds = Bounds { min: 1.5, max: 3.5 };

/// Cut-in wind speed [m/s].
pub const CUT_IN_BOUNDS: Bounds = Bounds { min: 1.0, max: 5.0 };

/// Rated wind speed [m/s].
pub const RATED_SPEED_BOUNDS: Bounds = Bounds {
    min: 7.0,
    max: 15.0,
};

/// Cut-out wind speed [m/s].
pub const CUT_OUT_BOUNDS: Bounds = Bounds {
    min: 20.0,
    max: 30.0,
};

/// Capacity-factor ceiling [-].
pub const MAX_CF_BOUNDS: Bounds = Bounds { min: 0.7, max: 1.0 };

/// Hub height [m].
pub const HUB_HEIGHT_BOUNDS: Bounds = Bounds {
    min: 80.0,
    max: 150.0,
};

/// All bounds in PARAM_NAMES order.
pub const ALL_BOUNDS: [Bounds; N_PARAMS] = [
    EXPONENT_BOUNDS,
    CUT_IN_BOUNDS,
    RATED_SPEED_BOUNDS,
    CUT_OUT_BOUNDS,
    MAX_CF_BOUNDS,
    HUB_HEIGHT_BOUNDS,
];

/// Parameter bounds as (min, max) tuples, in PARAM_NAMES order.
pub const PARAM_BOUNDS: &[(f64, f64)] = &[
    (1.5, 3.5),    // exponent
    (1.0, 5.0),    // cutIn
    (7.0, 15.0),   // ratedSpeed
    (20.0, 30.0),  // cutOut
    (0.7, 1.0),    // maxCf
    (80.0, 150.0), // hubHeight
];

// -- Capacity-matching sweep --

/// Default sweep range, percent of the reference annual load.
pub const DEFAULT_SWEEP_MIN_PCT: f64 = 0.0;
pub const DEFAULT_SWEEP_MAX_PCT: f64 = 200.0;

/// Default number of sweep points (5% steps over the default range).
pub const DEFAULT_SWEEP_POINTS: usize = 41;

/// Generation levels at which actual and modeled sweeps are compared.
pub const SWEEP_GAP_LEVELS_PCT: &[f64] = &[0.0, 25.0, 50.0, 75.0, 100.0, 125.0, 150.0];

/// Most resources a blended portfolio may combine.
pub const MAX_BLEND_RESOURCES: usize = 3;

// -- Exploration session --

/// Upper limit on the parameter-edit coalescing interval [ms].
pub const MAX_DEBOUNCE_MS: u64 = 150;
