//! Fit statistics between observed and modeled CF series.
//!
//! All metrics take two aligned slices and return a scalar or a small
//! struct. Degenerate input (empty, mismatched lengths, zero variance)
//! yields the neutral value instead of an error or NaN.

use serde::{Deserialize, Serialize};

use crate::series::average_cf;

/// Ordinary least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r: f64,
    pub r2: f64,
}

/// Deviation sums shared by correlation and regression.
struct Moments {
    mean_x: f64,
    mean_y: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

fn moments(x: &[f64], y: &[f64]) -> Option<Moments> {
    if x.is_empty() || x.len() != y.len() {
        return None;
    }
    let mean_x = average_cf(x);
    let mean_y = average_cf(y);
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    // Rounding in the mean leaves tiny deviations for a constant series.
    if is_constant(x) {
        sxx = 0.0;
        sxy = 0.0;
    }
    if is_constant(y) {
        syy = 0.0;
        sxy = 0.0;
    }
    Some(Moments {
        mean_x,
        mean_y,
        sxx,
        syy,
        sxy,
    })
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

fn correlation_from(m: &Moments) -> f64 {
    let denominator = (m.sxx * m.syy).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    (m.sxy / denominator).clamp(-1.0, 1.0)
}

/// Pearson correlation coefficient. Range: [-1, 1].
///
/// 0 when lengths differ, either series is empty, or either has zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    moments(x, y).map_or(0.0, |m| correlation_from(&m))
}

/// Coefficient of determination, computed as the squared Pearson r.
///
/// This is not the residual-based `1 - SS_res / SS_tot`; the two agree only
/// for the least-squares line through the data, not for the raw model series.
pub fn coefficient_of_determination(actual: &[f64], predicted: &[f64]) -> f64 {
    let r = pearson_correlation(actual, predicted);
    r * r
}

/// Least-squares regression of `y` on `x`.
///
/// Zero variance in `x` gives a flat line through the mean of `y`;
/// mismatched or empty input gives the all-zero result.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Regression {
    let Some(m) = moments(x, y) else {
        return Regression::default();
    };
    let slope = if m.sxx == 0.0 { 0.0 } else { m.sxy / m.sxx };
    let r = correlation_from(&m);
    Regression {
        slope,
        intercept: m.mean_y - slope * m.mean_x,
        r,
        r2: r * r,
    }
}

/// Values sorted from high to low.
///
/// Stable sort over `f64::total_cmp`, so equal inputs always produce
/// identical output.
pub fn duration_curve(series: &[f64]) -> Vec<f64> {
    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted
}

/// Absolute difference between the mean CFs. Range: [0, 1].
pub fn cf_error(actual: &[f64], modeled: &[f64]) -> f64 {
    (average_cf(actual) - average_cf(modeled)).abs()
}

/// Root Mean Square Error. Range: [0, inf), 0 = perfect.
pub fn rmse(observed: &[f64], simulated: &[f64]) -> f64 {
    if observed.is_empty() || observed.len() != simulated.len() {
        return 0.0;
    }
    let n = observed.len() as f64;
    let mse: f64 = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s).powi(2))
        .sum::<f64>()
        / n;
    mse.sqrt()
}

/// Mean Absolute Error. Range: [0, inf), 0 = perfect.
pub fn mae(observed: &[f64], simulated: &[f64]) -> f64 {
    if observed.is_empty() || observed.len() != simulated.len() {
        return 0.0;
    }
    let n = observed.len() as f64;
    observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s).abs())
        .sum::<f64>()
        / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // --- Correlation tests ---

    #[test]
    fn correlation_of_series_with_itself_is_one() {
        let x = [0.1, 0.5, 0.3, 0.9, 0.0];
        assert_eq!(pearson_correlation(&x, &x), 1.0);
    }

    #[test]
    fn correlation_of_reversed_line_is_minus_one() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(pearson_correlation(&x, &y), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn correlation_known_value() {
        // x = [1,2,3,4,5], y = [2,4,5,4,5]
        // sxy = 6, sxx = 10, syy = 6 → r = 6 / sqrt(60)
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        assert_relative_eq!(pearson_correlation(&x, &y), 6.0 / 60f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn correlation_zero_variance_returns_zero() {
        let x = [0.4; 6];
        let y = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        assert_eq!(pearson_correlation(&x, &y), 0.0);
        assert_eq!(pearson_correlation(&y, &x), 0.0);
    }

    #[test]
    fn correlation_mismatched_or_empty_returns_zero() {
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
    }

    #[test]
    fn identical_annual_series_fit_perfectly() {
        let x: Vec<f64> = (0..8760).map(|i| ((i * 37) % 101) as f64 / 100.0).collect();
        assert_eq!(pearson_correlation(&x, &x), 1.0);
        assert_eq!(coefficient_of_determination(&x, &x), 1.0);
    }

    // --- R² tests ---

    #[test]
    fn r2_is_squared_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        assert_relative_eq!(coefficient_of_determination(&x, &y), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn r2_ignores_bias() {
        // A constant offset leaves r unchanged even though residuals are large.
        let x = [0.1, 0.2, 0.3, 0.4];
        let y = [0.6, 0.7, 0.8, 0.9];
        assert_relative_eq!(coefficient_of_determination(&x, &y), 1.0, epsilon = 1e-12);
    }

    // --- Regression tests ---

    #[test]
    fn regression_recovers_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 0.5 * v + 0.1).collect();
        let fit = linear_regression(&x, &y);
        assert_relative_eq!(fit.slope, 0.5, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 0.1, epsilon = 1e-12);
        assert_relative_eq!(fit.r, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r2, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn regression_flat_x_is_zero_slope_through_mean() {
        let fit = linear_regression(&[2.0; 4], &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(fit.slope, 0.0);
        assert_relative_eq!(fit.intercept, 2.5);
        assert_eq!(fit.r, 0.0);
    }

    #[test]
    fn regression_mismatched_is_default() {
        assert_eq!(linear_regression(&[1.0, 2.0], &[1.0]), Regression::default());
    }

    // --- Duration curve tests ---

    #[test]
    fn duration_curve_sorts_descending() {
        let dc = duration_curve(&[0.2, 0.9, 0.0, 0.5, 0.9]);
        assert_eq!(dc, vec![0.9, 0.9, 0.5, 0.2, 0.0]);
    }

    #[test]
    fn duration_curve_is_permutation() {
        let s = [0.3, 0.1, 0.7, 0.1, 0.0, 1.0];
        let mut dc = duration_curve(&s);
        dc.reverse();
        let mut expected = s.to_vec();
        expected.sort_by(f64::total_cmp);
        assert_eq!(dc, expected);
    }

    #[test]
    fn duration_curve_empty() {
        assert!(duration_curve(&[]).is_empty());
    }

    // --- Error tests ---

    #[test]
    fn cf_error_known_value() {
        assert_relative_eq!(cf_error(&[0.4, 0.4], &[0.3, 0.35]), 0.075, epsilon = 1e-12);
    }

    #[test]
    fn rmse_known_value() {
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sim = [1.1, 2.2, 2.8, 4.1, 4.9];
        assert_relative_eq!(rmse(&obs, &sim), (0.11f64 / 5.0).sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn mae_known_value() {
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sim = [1.1, 2.2, 2.8, 4.1, 4.9];
        assert_relative_eq!(mae(&obs, &sim), 0.14, epsilon = 1e-10);
    }

    #[test]
    fn errors_on_mismatched_input_are_zero() {
        assert_eq!(rmse(&[1.0], &[]), 0.0);
        assert_eq!(mae(&[], &[]), 0.0);
    }
}
