/// Parametric wind turbine power curve.
///
/// Six tunable parameters turn an hourly 100 m wind speed into a capacity
/// factor: shear extrapolation to hub height, then a cut-in / ramp / rated /
/// cut-out piecewise curve.
pub mod params;
pub mod processes;

pub use params::{PowerCurveParams, Preset};
pub use processes::{apply, extrapolate};
