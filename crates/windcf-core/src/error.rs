//! Error type for the boundaries of the core: dataset loading, parameter
//! validation and sweep configuration. Numeric degeneracies inside the
//! computations never surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected {expected} parameters, got {got}")]
    ParamCount { expected: usize, got: usize },

    #[error("{name} = {value} is out of bounds [{min}, {max}]")]
    ParamOutOfBounds {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("sweep needs at least 2 points, got {0}")]
    TooFewSweepPoints(usize),

    #[error("blend supports at most {max} resources, got {got}")]
    TooManyResources { max: usize, got: usize },

    #[error("{series} has {got} hourly values, expected {expected}")]
    LengthMismatch {
        series: String,
        expected: usize,
        got: usize,
    },

    #[error("{series} contains a non-finite value at hour {hour}")]
    NonFinite { series: String, hour: usize },

    #[error("failed to decode dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
