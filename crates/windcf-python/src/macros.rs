/// Generate a frozen `#[pyclass]` struct where each field is a `Py<PyArray1<f64>>`.
///
/// Also generates a `from_timeseries()` method that moves the columns out of
/// a core `*Timeseries` struct.
macro_rules! define_timeseries_result {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident from $core_type:ty {
            $($field:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[pyo3::pyclass(frozen)]
        $vis struct $name {
            $(
                #[pyo3(get)]
                pub $field: Py<numpy::PyArray1<f64>>,
            )+
        }

        impl $name {
            pub fn from_timeseries(py: pyo3::Python<'_>, ts: $core_type) -> Self {
                Self {
                    $(
                        $field: numpy::PyArray1::from_vec(py, ts.$field).unbind(),
                    )+
                }
            }
        }
    };
}

/// Generate a frozen `#[pyclass]` struct where each field is `f64`.
///
/// Also generates a `from_core()` method that copies values from the
/// corresponding core struct.
macro_rules! define_scalar_result {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident from $core_type:ty {
            $($field:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[pyo3::pyclass(frozen)]
        $vis struct $name {
            $(
                #[pyo3(get)]
                pub $field: f64,
            )+
        }

        impl $name {
            pub fn from_core(v: &$core_type) -> Self {
                Self {
                    $(
                        $field: v.$field,
                    )+
                }
            }
        }
    };
}

/// Convert a list of sweep points into `(generation_pct, match_pct)` numpy arrays.
macro_rules! sweep_to_arrays {
    ($py:expr, $curve:expr) => {{
        let curve = $curve;
        let generation: Vec<f64> = curve.iter().map(|p| p.generation_pct).collect();
        let matched: Vec<f64> = curve.iter().map(|p| p.match_pct).collect();
        (
            numpy::PyArray1::from_vec($py, generation),
            numpy::PyArray1::from_vec($py, matched),
        )
    }};
}
