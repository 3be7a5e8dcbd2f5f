use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::convert::{contiguous_slice, to_py_err};

use windcf_core::constants::{
    DEFAULT_SWEEP_MAX_PCT, DEFAULT_SWEEP_MIN_PCT, DEFAULT_SWEEP_POINTS, SWEEP_GAP_LEVELS_PCT,
};
use windcf_core::series::average_cf;
use windcf_core::sweep::{self, BlendComponent};

type SweepArrays<'py> = (Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>);

#[pyfunction]
#[pyo3(signature = (cf, gen_pct, avg_cf=None))]
fn match_at_generation_pct(
    cf: PyReadonlyArray1<'_, f64>,
    gen_pct: f64,
    avg_cf: Option<f64>,
) -> PyResult<f64> {
    let cf = contiguous_slice(&cf)?;
    let avg = avg_cf.unwrap_or_else(|| average_cf(cf));
    Ok(sweep::match_at_generation_pct(cf, avg, gen_pct))
}

/// Returns `(generation_pct, match_pct)` arrays.
#[pyfunction(name = "sweep")]
#[pyo3(signature = (
    cf,
    avg_cf=None,
    points=DEFAULT_SWEEP_POINTS,
    min_pct=DEFAULT_SWEEP_MIN_PCT,
    max_pct=DEFAULT_SWEEP_MAX_PCT,
))]
fn sweep_single<'py>(
    py: Python<'py>,
    cf: PyReadonlyArray1<'py, f64>,
    avg_cf: Option<f64>,
    points: usize,
    min_pct: f64,
    max_pct: f64,
) -> PyResult<SweepArrays<'py>> {
    let cf = contiguous_slice(&cf)?;
    let avg = avg_cf.unwrap_or_else(|| average_cf(cf));
    let curve = sweep::sweep(cf, avg, points, min_pct, max_pct).map_err(to_py_err)?;
    Ok(sweep_to_arrays!(py, curve))
}

/// Blended sweep. `avg_cfs` defaults to each series' own mean.
#[pyfunction]
#[pyo3(signature = (
    cfs,
    weights,
    avg_cfs=None,
    points=DEFAULT_SWEEP_POINTS,
    min_pct=DEFAULT_SWEEP_MIN_PCT,
    max_pct=DEFAULT_SWEEP_MAX_PCT,
))]
fn sweep_blend<'py>(
    py: Python<'py>,
    cfs: Vec<PyReadonlyArray1<'py, f64>>,
    weights: Vec<f64>,
    avg_cfs: Option<Vec<f64>>,
    points: usize,
    min_pct: f64,
    max_pct: f64,
) -> PyResult<SweepArrays<'py>> {
    if weights.len() != cfs.len() {
        return Err(PyValueError::new_err(format!(
            "weights must have {} elements, got {}",
            cfs.len(),
            weights.len()
        )));
    }
    if let Some(avgs) = &avg_cfs {
        if avgs.len() != cfs.len() {
            return Err(PyValueError::new_err(format!(
                "avg_cfs must have {} elements, got {}",
                cfs.len(),
                avgs.len()
            )));
        }
    }

    let mut components = Vec::with_capacity(cfs.len());
    for (k, arr) in cfs.iter().enumerate() {
        let cf = contiguous_slice(arr)?;
        let avg_cf = avg_cfs.as_ref().map_or_else(|| average_cf(cf), |a| a[k]);
        components.push(BlendComponent {
            cf,
            avg_cf,
            weight: weights[k],
        });
    }

    let curve =
        sweep::sweep_blend(&components, points, min_pct, max_pct).map_err(to_py_err)?;
    Ok(sweep_to_arrays!(py, curve))
}

#[pyfunction]
#[pyo3(signature = (actual, modeled, levels_pct=None))]
fn sweep_gap(
    actual: PyReadonlyArray1<'_, f64>,
    modeled: PyReadonlyArray1<'_, f64>,
    levels_pct: Option<Vec<f64>>,
) -> PyResult<f64> {
    let levels = levels_pct.as_deref().unwrap_or(SWEEP_GAP_LEVELS_PCT);
    Ok(sweep::sweep_gap(
        contiguous_slice(&actual)?,
        contiguous_slice(&modeled)?,
        levels,
    ))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "sweep")?;
    m.add_function(wrap_pyfunction!(match_at_generation_pct, &m)?)?;
    m.add_function(wrap_pyfunction!(sweep_single, &m)?)?;
    m.add_function(wrap_pyfunction!(sweep_blend, &m)?)?;
    m.add_function(wrap_pyfunction!(sweep_gap, &m)?)?;
    parent.add_submodule(&m)?;
    Ok(())
}
