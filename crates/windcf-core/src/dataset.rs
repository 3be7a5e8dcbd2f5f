//! Hourly dataset contract.
//!
//! The preprocessor writes one JSON document per site-year: descriptive
//! metadata plus 8760 hourly records, and optionally a second document with
//! secondary resources (a solar CF column, a second wind site). Everything is
//! validated once on load; the rest of the crate assumes finite, aligned data.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{DEFAULT_SHEAR_EXPONENT, HOURS_PER_YEAR};
use crate::series::average_cf;
use crate::{Error, Result};

fn default_shear() -> f64 {
    DEFAULT_SHEAR_EXPONENT
}

/// One hour of observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Reanalysis wind speed at 100 m [m/s].
    pub wind_speed_100m: f64,
    /// Wind shear exponent [-].
    #[serde(default = "default_shear")]
    pub shear_exponent: f64,
    /// Observed capacity factor [-].
    pub actual_cf: f64,
}

impl HourlyRecord {
    pub fn new(wind_speed_100m: f64, shear_exponent: f64, actual_cf: f64) -> Self {
        Self {
            wind_speed_100m,
            shear_exponent,
            actual_cf,
        }
    }
}

/// Descriptive site metadata. Not used in any computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub location: String,
    pub year: i32,
    pub nameplate_mw: f64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, alias = "timezone_shift")]
    pub timezone_shift_hours: i32,
}

/// A validated annual hourly dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub metadata: Metadata,
    hourly: Vec<HourlyRecord>,
}

#[derive(Deserialize)]
struct RawDataset {
    metadata: Metadata,
    hourly: Vec<HourlyRecord>,
}

impl Dataset {
    /// Create a Dataset, validating length and finiteness.
    pub fn new(metadata: Metadata, hourly: Vec<HourlyRecord>) -> Result<Self> {
        check_len("hourly", hourly.len(), HOURS_PER_YEAR)?;
        check_finite("wind_speed_100m", hourly.iter().map(|r| r.wind_speed_100m))?;
        check_finite("shear_exponent", hourly.iter().map(|r| r.shear_exponent))?;
        check_finite("actual_cf", hourly.iter().map(|r| r.actual_cf))?;
        Ok(Self { metadata, hourly })
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(s)?;
        Self::new(raw.metadata, raw.hourly)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: RawDataset = serde_json::from_reader(reader)?;
        Self::new(raw.metadata, raw.hourly)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let ds = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.as_ref().display(),
            location = %ds.metadata.location,
            year = ds.metadata.year,
            actual_avg_cf = ds.actual_avg_cf(),
            "loaded hourly dataset"
        );
        Ok(ds)
    }

    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    /// Observed capacity factors, in hour order.
    pub fn actual_cf(&self) -> Vec<f64> {
        self.hourly.iter().map(|r| r.actual_cf).collect()
    }

    pub fn wind_speeds(&self) -> Vec<f64> {
        self.hourly.iter().map(|r| r.wind_speed_100m).collect()
    }

    pub fn actual_avg_cf(&self) -> f64 {
        average_cf(&self.actual_cf())
    }

    /// Number of hours.
    pub fn len(&self) -> usize {
        self.hourly.len()
    }

    /// Returns `true` if there are no hours.
    pub fn is_empty(&self) -> bool {
        self.hourly.is_empty()
    }
}

/// Solar resource given directly as a capacity-factor column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarResource {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    pub avg_cf: f64,
    pub cf: Vec<f64>,
}

/// Secondary wind site given as raw 100 m speeds; converted with the live params.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindResource {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    pub wind_speed_100m: Vec<f64>,
    #[serde(default)]
    pub shear_exponent: Option<Vec<f64>>,
}

/// Optional secondary resources for the blended capacity sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiResource {
    #[serde(default)]
    pub solar: Option<SolarResource>,
    #[serde(default)]
    pub wind2: Option<WindResource>,
}

impl MultiResource {
    /// Validate every present series against the primary dataset length.
    pub fn validate(&self, hours: usize) -> Result<()> {
        if let Some(solar) = &self.solar {
            check_len("solar.cf", solar.cf.len(), hours)?;
            check_finite("solar.cf", solar.cf.iter().copied())?;
            check_finite("solar.avg_cf", std::iter::once(solar.avg_cf))?;
        }
        if let Some(wind2) = &self.wind2 {
            check_len("wind2.wind_speed_100m", wind2.wind_speed_100m.len(), hours)?;
            check_finite("wind2.wind_speed_100m", wind2.wind_speed_100m.iter().copied())?;
            if let Some(shear) = &wind2.shear_exponent {
                check_len("wind2.shear_exponent", shear.len(), hours)?;
                check_finite("wind2.shear_exponent", shear.iter().copied())?;
            }
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let mr: Self = serde_json::from_str(s)?;
        mr.validate(HOURS_PER_YEAR)?;
        Ok(mr)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mr: Self = serde_json::from_reader(BufReader::new(file))?;
        mr.validate(HOURS_PER_YEAR)?;
        info!(
            path = %path.as_ref().display(),
            solar = mr.solar.is_some(),
            wind2 = mr.wind2.is_some(),
            "loaded secondary resources"
        );
        Ok(mr)
    }
}

fn check_len(series: &str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(Error::LengthMismatch {
            series: series.to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

fn check_finite(series: &str, values: impl Iterator<Item = f64>) -> Result<()> {
    for (hour, v) in values.enumerate() {
        if !v.is_finite() {
            return Err(Error::NonFinite {
                series: series.to_string(),
                hour,
            });
        }
    }
    Ok(())
}
