/// Series transform: the power curve applied across an hourly dataset.
///
/// - `step()`: one hour → `HourOutput`
/// - `run()`: full year → `HourOutputTimeseries` (hub speed and CF columns)
/// - `compute_model_series()`: the CF column only, the per-edit hot path
use windcf_macros::Timeseries;

use crate::constants::DEFAULT_SHEAR_EXPONENT;
use crate::dataset::HourlyRecord;
use crate::power_curve::{apply, extrapolate, PowerCurveParams};

/// Modeled output for a single hour.
#[derive(Debug, Clone, Copy, PartialEq, Timeseries)]
pub struct HourOutput {
    /// Wind speed extrapolated to hub height [m/s].
    pub hub_speed: f64,
    /// Modeled capacity factor [-].
    pub cf: f64,
}

/// Model one hour: extrapolate to hub height, then apply the curve.
#[inline]
pub fn step(record: &HourlyRecord, params: &PowerCurveParams) -> HourOutput {
    let hub_speed = extrapolate(record.wind_speed_100m, params.hub_height, record.shear_exponent);
    HourOutput {
        hub_speed,
        cf: apply(hub_speed, params),
    }
}

/// Model every hour, keeping the intermediate hub-height speed.
pub fn run(records: &[HourlyRecord], params: &PowerCurveParams) -> HourOutputTimeseries {
    let mut outputs = HourOutputTimeseries::with_capacity(records.len());
    for record in records {
        outputs.push(&step(record, params));
    }
    outputs
}

/// Modeled CF series aligned with `records`.
pub fn compute_model_series(records: &[HourlyRecord], params: &PowerCurveParams) -> Vec<f64> {
    records.iter().map(|r| step(r, params).cf).collect()
}

/// Modeled CF for a wind resource given as parallel columns.
///
/// A missing shear column means every hour uses the default exponent.
pub fn compute_wind_cf(
    speeds_100m: &[f64],
    shears: Option<&[f64]>,
    params: &PowerCurveParams,
) -> Vec<f64> {
    match shears {
        Some(shears) => {
            assert_eq!(
                speeds_100m.len(),
                shears.len(),
                "speed and shear columns must have the same length"
            );
            speeds_100m
                .iter()
                .zip(shears)
                .map(|(&v, &s)| apply(extrapolate(v, params.hub_height, s), params))
                .collect()
        }
        None => speeds_100m
            .iter()
            .map(|&v| apply(extrapolate(v, params.hub_height, DEFAULT_SHEAR_EXPONENT), params))
            .collect(),
    }
}

/// Time-averaged capacity factor. 0 for an empty series.
pub fn average_cf(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.iter().sum::<f64>() / series.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn records() -> Vec<HourlyRecord> {
        vec![
            HourlyRecord::new(1.0, 0.14, 0.0),
            HourlyRecord::new(5.2, 0.14, 0.1),
            HourlyRecord::new(8.9, 0.14, 0.8),
            HourlyRecord::new(30.0, 0.14, 0.0),
        ]
    }

    #[test]
    fn model_series_matches_scenario() {
        let cf = compute_model_series(&records(), &PowerCurveParams::OPTIMAL);
        assert_eq!(cf.len(), 4);
        assert_eq!(cf[0], 0.0);
        assert_relative_eq!(cf[1], 0.5f64.powf(2.5) * 0.84, epsilon = 1e-12);
        assert_eq!(cf[2], 0.84);
        assert_eq!(cf[3], 0.0);
    }

    #[test]
    fn run_keeps_hub_speed_column() {
        let mut p = PowerCurveParams::OPTIMAL;
        p.hub_height = 120.0;
        let out = run(&records(), &p);
        assert_eq!(out.len(), 4);
        assert_relative_eq!(out.hub_speed[1], 5.2 * 1.2f64.powf(0.14), epsilon = 1e-12);
        assert_eq!(out.cf, compute_model_series(&records(), &p));
    }

    #[test]
    fn run_on_empty_input() {
        let out = run(&[], &PowerCurveParams::DEFAULT);
        assert!(out.is_empty());
    }

    #[test]
    fn per_record_shear_is_used() {
        let mut p = PowerCurveParams::DEFAULT;
        p.hub_height = 150.0;
        let low = step(&HourlyRecord::new(6.0, 0.05, 0.0), &p);
        let high = step(&HourlyRecord::new(6.0, 0.30, 0.0), &p);
        assert!(high.hub_speed > low.hub_speed);
        assert!(high.cf > low.cf);
    }

    #[test]
    fn wind_cf_without_shear_uses_default() {
        let mut p = PowerCurveParams::DEFAULT;
        p.hub_height = 130.0;
        let speeds = [4.0, 7.0, 11.0];
        let with_default = compute_wind_cf(&speeds, Some(&[DEFAULT_SHEAR_EXPONENT; 3]), &p);
        assert_eq!(compute_wind_cf(&speeds, None, &p), with_default);
    }

    #[test]
    fn average_cf_of_empty_is_zero() {
        assert_eq!(average_cf(&[]), 0.0);
        assert_relative_eq!(average_cf(&[0.2, 0.4]), 0.3);
    }

    #[test]
    fn output_field_names() {
        assert_eq!(HourOutput::field_names(), &["hub_speed", "cf"]);
    }
}
