use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::convert::{checked_slice, contiguous_slice, params_from_array};

use windcf_core::constants::{DEFAULT_SHEAR_EXPONENT, PARAM_BOUNDS, PARAM_NAMES};
use windcf_core::dataset::HourlyRecord;
use windcf_core::power_curve::{self, Preset};
use windcf_core::series;

define_timeseries_result! {
    /// Hourly model output with typed numpy array attributes.
    pub struct HourlyResult from windcf_core::series::HourOutputTimeseries {
        hub_speed, cf,
    }
}

/// Assemble records from parallel numpy columns; observed CF is not needed here.
fn records_from<'py>(
    wind_speed_100m: &'py PyReadonlyArray1<'py, f64>,
    shear_exponent: Option<&'py PyReadonlyArray1<'py, f64>>,
) -> PyResult<Vec<HourlyRecord>> {
    let speeds = contiguous_slice(wind_speed_100m)?;
    let records = match shear_exponent {
        Some(shear) => {
            let shears = checked_slice(shear, speeds.len(), "shear_exponent")?;
            speeds
                .iter()
                .zip(shears)
                .map(|(&v, &s)| HourlyRecord::new(v, s, 0.0))
                .collect()
        }
        None => speeds
            .iter()
            .map(|&v| HourlyRecord::new(v, DEFAULT_SHEAR_EXPONENT, 0.0))
            .collect(),
    };
    Ok(records)
}

#[pyfunction]
#[pyo3(signature = (params, wind_speed_100m, shear_exponent=None))]
fn compute_model_series<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    wind_speed_100m: PyReadonlyArray1<'py, f64>,
    shear_exponent: Option<PyReadonlyArray1<'py, f64>>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let p = params_from_array(&params)?;
    let records = records_from(&wind_speed_100m, shear_exponent.as_ref())?;
    let cf = py.allow_threads(|| series::compute_model_series(&records, &p));
    Ok(PyArray1::from_vec(py, cf))
}

#[pyfunction]
#[pyo3(signature = (params, wind_speed_100m, shear_exponent=None))]
fn run(
    py: Python<'_>,
    params: PyReadonlyArray1<'_, f64>,
    wind_speed_100m: PyReadonlyArray1<'_, f64>,
    shear_exponent: Option<PyReadonlyArray1<'_, f64>>,
) -> PyResult<HourlyResult> {
    let p = params_from_array(&params)?;
    let records = records_from(&wind_speed_100m, shear_exponent.as_ref())?;
    let result = py.allow_threads(|| series::run(&records, &p));
    Ok(HourlyResult::from_timeseries(py, result))
}

#[pyfunction]
#[pyo3(signature = (speed_100m, hub_height, shear=DEFAULT_SHEAR_EXPONENT))]
fn extrapolate(speed_100m: f64, hub_height: f64, shear: f64) -> f64 {
    power_curve::extrapolate(speed_100m, hub_height, shear)
}

#[pyfunction]
fn apply(speed_at_hub: f64, params: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let p = params_from_array(&params)?;
    Ok(power_curve::apply(speed_at_hub, &p))
}

/// Preset parameters as a 6-element array in `PARAM_NAMES` order.
#[pyfunction]
fn preset<'py>(py: Python<'py>, name: &str) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let preset: Preset = name.parse().map_err(PyValueError::new_err)?;
    Ok(PyArray1::from_vec(py, preset.params().to_fixed().to_vec()))
}

/// Parameter names mapped to their (min, max) ranges.
#[pyfunction]
fn param_bounds(py: Python<'_>) -> PyResult<Bound<'_, PyDict>> {
    let dict = PyDict::new(py);
    for (name, bounds) in PARAM_NAMES.iter().zip(PARAM_BOUNDS) {
        dict.set_item(*name, *bounds)?;
    }
    Ok(dict)
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "model")?;
    m.add_function(wrap_pyfunction!(compute_model_series, &m)?)?;
    m.add_function(wrap_pyfunction!(run, &m)?)?;
    m.add_function(wrap_pyfunction!(extrapolate, &m)?)?;
    m.add_function(wrap_pyfunction!(apply, &m)?)?;
    m.add_function(wrap_pyfunction!(preset, &m)?)?;
    m.add_function(wrap_pyfunction!(param_bounds, &m)?)?;
    m.add_class::<HourlyResult>()?;
    parent.add_submodule(&m)?;
    Ok(())
}
