use numpy::PyReadonlyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use windcf_core::power_curve::PowerCurveParams;
use windcf_core::traits::ModelParams;

/// Validate that a numpy array is C-contiguous and return its slice.
pub fn contiguous_slice<'py>(arr: &'py PyReadonlyArray1<'py, f64>) -> PyResult<&'py [f64]> {
    arr.as_slice()
        .map_err(|_| PyValueError::new_err("array must be C-contiguous"))
}

/// Validate length + contiguity of a numpy array.
pub fn checked_slice<'py>(
    arr: &'py PyReadonlyArray1<'py, f64>,
    expected_len: usize,
    name: &str,
) -> PyResult<&'py [f64]> {
    let slice = contiguous_slice(arr)?;
    if slice.len() != expected_len {
        return Err(PyValueError::new_err(format!(
            "{} must have {} elements, got {}",
            name,
            expected_len,
            slice.len()
        )));
    }
    Ok(slice)
}

/// Build power-curve parameters from a 6-element array in `PARAM_NAMES` order.
pub fn params_from_array(arr: &PyReadonlyArray1<'_, f64>) -> PyResult<PowerCurveParams> {
    let slice = checked_slice(arr, PowerCurveParams::N_PARAMS, "params")?;
    PowerCurveParams::from_array(slice).map_err(to_py_err)
}

pub fn to_py_err(e: windcf_core::Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}
