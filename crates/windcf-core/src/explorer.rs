//! Exploration session over one site-year.
//!
//! `Explorer` owns the dataset and everything that does not depend on the
//! power-curve parameters (actual CF, its duration curve and sweep). Each
//! `evaluate()` recomputes the model series and every derived output for
//! one parameter tuple; the last result is kept and reused while the
//! parameters stay the same.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::constants::{
    DEFAULT_SWEEP_MAX_PCT, DEFAULT_SWEEP_MIN_PCT, DEFAULT_SWEEP_POINTS, MAX_BLEND_RESOURCES,
    SWEEP_GAP_LEVELS_PCT,
};
use crate::dataset::{Dataset, MultiResource};
use crate::metrics::{self, Regression};
use crate::power_curve::PowerCurveParams;
use crate::series::{self, average_cf};
use crate::sweep::{self, BlendComponent, CapacitySweepPoint};
use crate::Result;

/// Range and resolution of the capacity-matching sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepConfig {
    pub points: usize,
    pub min_pct: f64,
    pub max_pct: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_SWEEP_POINTS,
            min_pct: DEFAULT_SWEEP_MIN_PCT,
            max_pct: DEFAULT_SWEEP_MAX_PCT,
        }
    }
}

/// Share of total generation given to each resource in the blended sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub wind: f64,
    pub wind2: f64,
    pub solar: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            wind: 1.0,
            wind2: 0.0,
            solar: 0.0,
        }
    }
}

/// Every output derived from one parameter tuple.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub params: PowerCurveParams,
    pub model_cf: Vec<f64>,
    pub actual_avg_cf: f64,
    pub model_avg_cf: f64,
    /// Regression of modeled CF on actual CF.
    pub regression: Regression,
    pub cf_error: f64,
    pub rmse: f64,
    pub mae: f64,
    pub sweep_gap: f64,
    pub actual_duration: Vec<f64>,
    pub model_duration: Vec<f64>,
    pub actual_sweep: Vec<CapacitySweepPoint>,
    pub model_sweep: Vec<CapacitySweepPoint>,
    pub blend_sweep: Option<Vec<CapacitySweepPoint>>,
}

impl Evaluation {
    pub fn r(&self) -> f64 {
        self.regression.r
    }

    pub fn r2(&self) -> f64 {
        self.regression.r2
    }
}

#[derive(Debug, Clone)]
pub struct Explorer {
    dataset: Dataset,
    resources: Option<MultiResource>,
    blend: Option<BlendWeights>,
    sweep: SweepConfig,
    actual_cf: Vec<f64>,
    actual_avg_cf: f64,
    actual_duration: Vec<f64>,
    actual_sweep: Vec<CapacitySweepPoint>,
    last: Option<Evaluation>,
}

impl Explorer {
    /// Fails only if the sweep configuration is unusable.
    pub fn new(dataset: Dataset, config: SweepConfig) -> Result<Self> {
        let actual_cf = dataset.actual_cf();
        let actual_avg_cf = average_cf(&actual_cf);
        let actual_duration = metrics::duration_curve(&actual_cf);
        let actual_sweep = sweep::sweep(
            &actual_cf,
            actual_avg_cf,
            config.points,
            config.min_pct,
            config.max_pct,
        )?;
        Ok(Self {
            dataset,
            resources: None,
            blend: None,
            sweep: config,
            actual_cf,
            actual_avg_cf,
            actual_duration,
            actual_sweep,
            last: None,
        })
    }

    /// Attach secondary resources, validated against the dataset length.
    pub fn with_resources(mut self, resources: MultiResource) -> Result<Self> {
        resources.validate(self.dataset.len())?;
        self.resources = Some(resources);
        self.last = None;
        Ok(self)
    }

    /// Enable the blended sweep with the given weights.
    pub fn with_blend(mut self, weights: BlendWeights) -> Self {
        self.blend = Some(weights);
        self.last = None;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn actual_cf(&self) -> &[f64] {
        &self.actual_cf
    }

    pub fn sweep_config(&self) -> SweepConfig {
        self.sweep
    }

    /// Evaluate a parameter tuple, reusing the previous result if unchanged.
    pub fn evaluate(&mut self, params: &PowerCurveParams) -> Result<&Evaluation> {
        let evaluation = match self.last.take() {
            Some(cached) if cached.params == *params => {
                debug!("parameters unchanged, reusing evaluation");
                cached
            }
            _ => self.compute(params)?,
        };
        Ok(&*self.last.insert(evaluation))
    }

    fn compute(&self, params: &PowerCurveParams) -> Result<Evaluation> {
        let start = Instant::now();
        if !params.is_well_ordered() {
            warn!(
                cut_in = params.cut_in,
                rated_speed = params.rated_speed,
                cut_out = params.cut_out,
                "power curve speeds are not ordered cut-in < rated < cut-out"
            );
        }

        let model_cf = series::compute_model_series(self.dataset.hourly(), params);
        let model_avg_cf = average_cf(&model_cf);
        let cfg = self.sweep;

        let model_sweep =
            sweep::sweep(&model_cf, model_avg_cf, cfg.points, cfg.min_pct, cfg.max_pct)?;
        let blend_sweep = match self.blend {
            Some(weights) => Some(self.blend_sweep(&model_cf, model_avg_cf, weights, params)?),
            None => None,
        };

        let evaluation = Evaluation {
            params: *params,
            actual_avg_cf: self.actual_avg_cf,
            model_avg_cf,
            regression: metrics::linear_regression(&self.actual_cf, &model_cf),
            cf_error: metrics::cf_error(&self.actual_cf, &model_cf),
            rmse: metrics::rmse(&self.actual_cf, &model_cf),
            mae: metrics::mae(&self.actual_cf, &model_cf),
            sweep_gap: sweep::sweep_gap(&self.actual_cf, &model_cf, SWEEP_GAP_LEVELS_PCT),
            actual_duration: self.actual_duration.clone(),
            model_duration: metrics::duration_curve(&model_cf),
            actual_sweep: self.actual_sweep.clone(),
            model_sweep,
            blend_sweep,
            model_cf,
        };

        debug!(
            elapsed_us = start.elapsed().as_micros() as u64,
            r = evaluation.regression.r,
            model_avg_cf,
            "evaluated power curve"
        );
        Ok(evaluation)
    }

    fn blend_sweep(
        &self,
        model_cf: &[f64],
        model_avg_cf: f64,
        weights: BlendWeights,
        params: &PowerCurveParams,
    ) -> Result<Vec<CapacitySweepPoint>> {
        // Secondary wind follows the same turbine parameters as the primary site.
        let wind2_cf = self
            .resources
            .as_ref()
            .and_then(|r| r.wind2.as_ref())
            .map(|w| {
                series::compute_wind_cf(&w.wind_speed_100m, w.shear_exponent.as_deref(), params)
            });

        let mut components: SmallVec<[BlendComponent<'_>; MAX_BLEND_RESOURCES]> =
            SmallVec::new();
        components.push(BlendComponent {
            cf: model_cf,
            avg_cf: model_avg_cf,
            weight: weights.wind,
        });
        if let Some(cf) = &wind2_cf {
            components.push(BlendComponent::new(cf, weights.wind2));
        }
        if let Some(solar) = self.resources.as_ref().and_then(|r| r.solar.as_ref()) {
            components.push(BlendComponent {
                cf: &solar.cf,
                avg_cf: solar.avg_cf,
                weight: weights.solar,
            });
        }

        let cfg = self.sweep;
        sweep::sweep_blend(&components, cfg.points, cfg.min_pct, cfg.max_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HOURS_PER_YEAR;
    use crate::dataset::{HourlyRecord, Metadata, SolarResource, WindResource};
    use approx::assert_relative_eq;

    fn metadata() -> Metadata {
        Metadata {
            location: "Test Site".into(),
            year: 2024,
            nameplate_mw: 100.0,
            lat: 44.3,
            lon: -96.5,
            timezone_shift_hours: 6,
        }
    }

    fn speed_at(hour: usize) -> f64 {
        // Diurnal cycle plus a slow weekly swing, 2-16 m/s.
        let h = hour as f64;
        9.0 + 4.0 * (h * std::f64::consts::TAU / 24.0).sin()
            + 3.0 * (h * std::f64::consts::TAU / 168.0).cos()
    }

    /// Dataset whose observed CF is exactly the optimal-preset model output.
    fn synthetic_dataset() -> Dataset {
        let p = PowerCurveParams::OPTIMAL;
        let hourly = (0..HOURS_PER_YEAR)
            .map(|i| {
                let v = speed_at(i);
                HourlyRecord::new(v, 0.14, crate::power_curve::apply(v, &p))
            })
            .collect();
        Dataset::new(metadata(), hourly).unwrap()
    }

    #[test]
    fn true_parameters_fit_perfectly() {
        let mut ex = Explorer::new(synthetic_dataset(), SweepConfig::default()).unwrap();
        let ev = ex.evaluate(&PowerCurveParams::OPTIMAL).unwrap();
        assert_eq!(ev.model_cf.len(), HOURS_PER_YEAR);
        assert_relative_eq!(ev.r(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(ev.r2(), 1.0, epsilon = 1e-12);
        assert_eq!(ev.cf_error, 0.0);
        assert_eq!(ev.sweep_gap, 0.0);
        assert_eq!(ev.actual_duration, ev.model_duration);
        assert_eq!(ev.actual_sweep, ev.model_sweep);
        assert!(ev.blend_sweep.is_none());
    }

    #[test]
    fn other_parameters_fit_worse() {
        let mut ex = Explorer::new(synthetic_dataset(), SweepConfig::default()).unwrap();
        let ev = ex.evaluate(&PowerCurveParams::DEFAULT).unwrap();
        assert!(ev.r() < 1.0);
        assert!(ev.cf_error > 0.0);
        assert!(ev.rmse > 0.0);
    }

    #[test]
    fn repeated_parameters_reuse_result() {
        let mut ex = Explorer::new(synthetic_dataset(), SweepConfig::default()).unwrap();
        let first = ex.evaluate(&PowerCurveParams::DEFAULT).unwrap().model_cf.as_ptr();
        let second = ex.evaluate(&PowerCurveParams::DEFAULT).unwrap().model_cf.as_ptr();
        assert_eq!(first, second);

        let changed = ex.evaluate(&PowerCurveParams::OPTIMAL).unwrap();
        assert_eq!(changed.params, PowerCurveParams::OPTIMAL);
    }

    #[test]
    fn rejects_bad_sweep_config() {
        let cfg = SweepConfig {
            points: 1,
            ..SweepConfig::default()
        };
        assert!(Explorer::new(synthetic_dataset(), cfg).is_err());
    }

    #[test]
    fn degenerate_parameters_still_evaluate() {
        let mut ex = Explorer::new(synthetic_dataset(), SweepConfig::default()).unwrap();
        // Cut-out below cut-in: every hour is zero.
        let p = PowerCurveParams::new(2.0, 5.0, 10.0, 4.0, 0.9, 100.0);
        let ev = ex.evaluate(&p).unwrap();
        assert!(ev.model_cf.iter().all(|&c| c == 0.0));
        assert_eq!(ev.r(), 0.0);
        assert!(ev.model_sweep.iter().all(|pt| pt.match_pct == 0.0));
    }

    #[test]
    fn blend_sweep_uses_secondary_resources() {
        let solar_cf: Vec<f64> = (0..HOURS_PER_YEAR)
            .map(|i| {
                let h = i % 24;
                if (6..18).contains(&h) { 0.5 } else { 0.0 }
            })
            .collect();
        let resources = MultiResource {
            solar: Some(SolarResource {
                location: "Kansas".into(),
                lat: 39.83,
                lon: -98.58,
                avg_cf: average_cf(&solar_cf),
                cf: solar_cf,
            }),
            wind2: Some(WindResource {
                location: "Wyoming".into(),
                lat: 42.16,
                lon: -106.17,
                wind_speed_100m: (0..HOURS_PER_YEAR).map(|i| speed_at(i + 12)).collect(),
                shear_exponent: None,
            }),
        };
        let weights = BlendWeights {
            wind: 0.5,
            wind2: 0.25,
            solar: 0.25,
        };
        let mut ex = Explorer::new(synthetic_dataset(), SweepConfig::default())
            .unwrap()
            .with_resources(resources)
            .unwrap()
            .with_blend(weights);
        let ev = ex.evaluate(&PowerCurveParams::OPTIMAL).unwrap();

        let blend = ev.blend_sweep.as_ref().unwrap();
        assert_eq!(blend.len(), DEFAULT_SWEEP_POINTS);
        assert_eq!(blend[0].match_pct, 0.0);
        for w in blend.windows(2) {
            assert!(w[1].match_pct >= w[0].match_pct);
        }
        assert!(blend.iter().all(|p| p.match_pct <= 100.0));
    }

    #[test]
    fn resources_must_align_with_dataset() {
        let resources = MultiResource {
            solar: Some(SolarResource {
                location: String::new(),
                lat: 0.0,
                lon: 0.0,
                avg_cf: 0.2,
                cf: vec![0.2; 24],
            }),
            wind2: None,
        };
        let ex = Explorer::new(synthetic_dataset(), SweepConfig::default()).unwrap();
        assert!(ex.with_resources(resources).is_err());
    }

    #[test]
    fn evaluation_serializes_camel_case() {
        let mut ex = Explorer::new(synthetic_dataset(), SweepConfig::default()).unwrap();
        let ev = ex.evaluate(&PowerCurveParams::OPTIMAL).unwrap();
        let json = serde_json::to_value(ev).unwrap();
        assert!(json.get("modelAvgCf").is_some());
        assert!(json.get("actualSweep").is_some());
        assert_eq!(json["params"]["maxCf"], 0.84);
    }
}
