/// Power-curve parameters.
///
/// Six parameters that define model behavior:
/// - `exponent`: ramp-curve shape exponent [-]
/// - `cut_in`: wind speed below which output is zero [m/s]
/// - `rated_speed`: wind speed at which output saturates [m/s]
/// - `cut_out`: wind speed above which the turbine shuts down [m/s]
/// - `max_cf`: capacity-factor ceiling [-]
/// - `hub_height`: height the 100 m wind speed is extrapolated to [m]
///
/// Plain construction does not check bounds or ordering: degenerate sets
/// (e.g. `rated_speed <= cut_in`) are valid inputs to the model.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ALL_BOUNDS, N_PARAMS, PARAM_BOUNDS, PARAM_NAMES};
use crate::traits::ModelParams;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerCurveParams {
    pub exponent: f64,
    pub cut_in: f64,
    pub rated_speed: f64,
    pub cut_out: f64,
    pub max_cf: f64,
    pub hub_height: f64,
}

impl PowerCurveParams {
    /// Generic utility-scale curve: cubic ramp, 3 m/s cut-in, 12 m/s rated.
    pub const DEFAULT: Self = Self {
        exponent: 3.0,
        cut_in: 3.0,
        rated_speed: 12.0,
        cut_out: 25.0,
        max_cf: 1.0,
        hub_height: 100.0,
    };

    /// Hand-tuned fit for the bundled South Dakota 2024 dataset.
    pub const OPTIMAL: Self = Self {
        exponent: 2.5,
        cut_in: 1.5,
        rated_speed: 8.9,
        cut_out: 25.0,
        max_cf: 0.84,
        hub_height: 100.0,
    };

    /// Create new Parameters without validation.
    pub fn new(
        exponent: f64,
        cut_in: f64,
        rated_speed: f64,
        cut_out: f64,
        max_cf: f64,
        hub_height: f64,
    ) -> Self {
        Self {
            exponent,
            cut_in,
            rated_speed,
            cut_out,
            max_cf,
            hub_height,
        }
    }

    /// Create new Parameters, returning an error if any value is out of bounds.
    pub fn checked(
        exponent: f64,
        cut_in: f64,
        rated_speed: f64,
        cut_out: f64,
        max_cf: f64,
        hub_height: f64,
    ) -> Result<Self> {
        let p = Self::new(exponent, cut_in, rated_speed, cut_out, max_cf, hub_height);
        p.validate()?;
        Ok(p)
    }

    /// Check every value against its documented range.
    pub fn validate(&self) -> Result<()> {
        for (i, (&value, bounds)) in self.to_fixed().iter().zip(ALL_BOUNDS.iter()).enumerate() {
            if !bounds.contains(value) {
                return Err(Error::ParamOutOfBounds {
                    name: PARAM_NAMES[i],
                    value,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        Ok(())
    }

    /// `cut_in < rated_speed < cut_out`. Callers assume it; the model does not need it.
    pub fn is_well_ordered(&self) -> bool {
        self.cut_in < self.rated_speed && self.rated_speed < self.cut_out
    }

    /// Convert to a 6-element array in `PARAM_NAMES` order.
    pub fn to_fixed(&self) -> [f64; N_PARAMS] {
        [
            self.exponent,
            self.cut_in,
            self.rated_speed,
            self.cut_out,
            self.max_cf,
            self.hub_height,
        ]
    }
}

impl Default for PowerCurveParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ModelParams for PowerCurveParams {
    const N_PARAMS: usize = N_PARAMS;
    const PARAM_NAMES: &'static [&'static str] = PARAM_NAMES;
    const PARAM_BOUNDS: &'static [(f64, f64)] = PARAM_BOUNDS;

    fn from_array(arr: &[f64]) -> Result<Self> {
        if arr.len() != N_PARAMS {
            return Err(Error::ParamCount {
                expected: N_PARAMS,
                got: arr.len(),
            });
        }
        Ok(Self::new(arr[0], arr[1], arr[2], arr[3], arr[4], arr[5]))
    }

    fn to_array(&self) -> Vec<f64> {
        self.to_fixed().to_vec()
    }
}

/// Named parameter presets a caller may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Default,
    Optimal,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Default, Preset::Optimal];

    pub fn params(self) -> PowerCurveParams {
        match self {
            Preset::Default => PowerCurveParams::DEFAULT,
            Preset::Optimal => PowerCurveParams::OPTIMAL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Optimal => "optimal",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Preset::Default),
            "optimal" => Ok(Preset::Optimal),
            other => Err(format!("unknown preset '{other}' (expected default or optimal)")),
        }
    }
}
