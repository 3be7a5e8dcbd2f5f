use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::convert::contiguous_slice;

use windcf_core::metrics;

define_scalar_result! {
    /// Least-squares fit of modeled on actual CF.
    pub struct RegressionResult from windcf_core::metrics::Regression {
        slope, intercept, r, r2,
    }
}

#[pyfunction]
fn pearson_correlation(x: PyReadonlyArray1<'_, f64>, y: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    Ok(metrics::pearson_correlation(contiguous_slice(&x)?, contiguous_slice(&y)?))
}

#[pyfunction]
fn coefficient_of_determination(
    actual: PyReadonlyArray1<'_, f64>,
    predicted: PyReadonlyArray1<'_, f64>,
) -> PyResult<f64> {
    Ok(metrics::coefficient_of_determination(
        contiguous_slice(&actual)?,
        contiguous_slice(&predicted)?,
    ))
}

#[pyfunction]
fn linear_regression(
    x: PyReadonlyArray1<'_, f64>,
    y: PyReadonlyArray1<'_, f64>,
) -> PyResult<RegressionResult> {
    let fit = metrics::linear_regression(contiguous_slice(&x)?, contiguous_slice(&y)?);
    Ok(RegressionResult::from_core(&fit))
}

#[pyfunction]
fn duration_curve<'py>(
    py: Python<'py>,
    series: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    Ok(PyArray1::from_vec(py, metrics::duration_curve(contiguous_slice(&series)?)))
}

#[pyfunction]
fn cf_error(actual: PyReadonlyArray1<'_, f64>, modeled: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    Ok(metrics::cf_error(contiguous_slice(&actual)?, contiguous_slice(&modeled)?))
}

#[pyfunction]
fn rmse(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    Ok(metrics::rmse(contiguous_slice(&observed)?, contiguous_slice(&simulated)?))
}

#[pyfunction]
fn mae(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    Ok(metrics::mae(contiguous_slice(&observed)?, contiguous_slice(&simulated)?))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "metrics")?;
    m.add_function(wrap_pyfunction!(pearson_correlation, &m)?)?;
    m.add_function(wrap_pyfunction!(coefficient_of_determination, &m)?)?;
    m.add_function(wrap_pyfunction!(linear_regression, &m)?)?;
    m.add_function(wrap_pyfunction!(duration_curve, &m)?)?;
    m.add_function(wrap_pyfunction!(cf_error, &m)?)?;
    m.add_function(wrap_pyfunction!(rmse, &m)?)?;
    m.add_function(wrap_pyfunction!(mae, &m)?)?;
    m.add_class::<RegressionResult>()?;
    parent.add_submodule(&m)?;
    Ok(())
}
