/// windcf: wind power-curve validation against observed production.
///
/// Turns hourly 100 m wind speeds and a six-parameter power curve into a
/// capacity-factor series, then scores it against observed CF with
/// correlation, regression, duration curves and a zero-storage
/// capacity-matching sweep.
pub mod constants;
pub mod dataset;
pub mod debounce;
pub mod error;
pub mod explorer;
pub mod metrics;
pub mod power_curve;
pub mod series;
pub mod sweep;
pub mod traits;

pub use error::{Error, Result};
