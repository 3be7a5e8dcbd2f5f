//! Zero-storage capacity matching against a flat reference load.
//!
//! Annual load is normalised to 1, spread evenly over the hours. A resource
//! sized to produce `gen_pct` percent of that load serves, each hour, the
//! smaller of its output and the hourly load; the sum over the year is the
//! match percentage. Blends add several resources before the hourly clamp.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::MAX_BLEND_RESOURCES;
use crate::series::average_cf;
use crate::{Error, Result};

/// One point of a swept capacity-matching curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySweepPoint {
    /// Annual generation as a percentage of the reference annual load.
    pub generation_pct: f64,
    /// Percentage of the annual load served in the hour it occurred.
    pub match_pct: f64,
}

/// A resource sized to a fixed share of the reference load.
#[derive(Debug, Clone, Copy)]
pub struct ResourceShare<'a> {
    pub cf: &'a [f64],
    pub avg_cf: f64,
    pub gen_pct: f64,
}

/// A resource taking `weight` of the total generation in a blended sweep.
#[derive(Debug, Clone, Copy)]
pub struct BlendComponent<'a> {
    pub cf: &'a [f64],
    pub avg_cf: f64,
    pub weight: f64,
}

impl<'a> BlendComponent<'a> {
    /// Component whose normalisation uses the series' own average CF.
    pub fn new(cf: &'a [f64], weight: f64) -> Self {
        Self {
            cf,
            avg_cf: average_cf(cf),
            weight,
        }
    }
}

/// Per-hour generation multiplier for a resource producing `gen_pct` of load.
///
/// Zero when the resource has no output or no share, so it adds nothing.
#[inline]
fn gen_scale(avg_cf: f64, gen_pct: f64, hours: usize) -> f64 {
    if hours == 0 || !(avg_cf > 0.0) || !(gen_pct > 0.0) {
        return 0.0;
    }
    (gen_pct / 100.0) / (avg_cf * hours as f64)
}

/// Percentage of a flat load served hour-by-hour by one resource.
///
/// At `gen_pct = 100` the resource's annual energy equals the annual load.
/// Range: [0, 100].
pub fn match_at_generation_pct(cf: &[f64], avg_cf: f64, gen_pct: f64) -> f64 {
    let n = cf.len();
    let scale = gen_scale(avg_cf, gen_pct, n);
    if scale == 0.0 {
        return 0.0;
    }
    let hourly_load = 1.0 / n as f64;
    let matched: f64 = cf.iter().map(|&c| (c * scale).min(hourly_load)).sum();
    (matched * 100.0).min(100.0)
}

/// Percentage of a flat load served by the summed output of several resources.
///
/// Each share is normalised by its own average CF; the hourly clamp applies
/// to the sum.
pub fn match_at_generation_mix(shares: &[ResourceShare<'_>]) -> Result<f64> {
    if shares.len() > MAX_BLEND_RESOURCES {
        return Err(Error::TooManyResources {
            max: MAX_BLEND_RESOURCES,
            got: shares.len(),
        });
    }
    let Some(first) = shares.first() else {
        return Ok(0.0);
    };
    let n = first.cf.len();
    for (k, share) in shares.iter().enumerate() {
        if share.cf.len() != n {
            return Err(Error::LengthMismatch {
                series: format!("blend resource {k}"),
                expected: n,
                got: share.cf.len(),
            });
        }
    }
    if n == 0 {
        return Ok(0.0);
    }

    let scales: SmallVec<[f64; MAX_BLEND_RESOURCES]> = shares
        .iter()
        .map(|s| gen_scale(s.avg_cf, s.gen_pct, n))
        .collect();
    let hourly_load = 1.0 / n as f64;

    let mut matched = 0.0;
    for i in 0..n {
        let generation: f64 = shares
            .iter()
            .zip(&scales)
            .map(|(s, &scale)| s.cf[i] * scale)
            .sum();
        matched += generation.min(hourly_load);
    }
    Ok((matched * 100.0).min(100.0))
}

/// `points` evenly spaced generation percentages from `min_pct` to `max_pct` inclusive.
pub fn sweep_levels(points: usize, min_pct: f64, max_pct: f64) -> Result<Vec<f64>> {
    if points < 2 {
        return Err(Error::TooFewSweepPoints(points));
    }
    let step = (max_pct - min_pct) / (points - 1) as f64;
    Ok((0..points)
        .map(|i| {
            if i == points - 1 {
                max_pct
            } else {
                min_pct + i as f64 * step
            }
        })
        .collect())
}

/// Capacity-matching curve for one resource.
pub fn sweep(
    cf: &[f64],
    avg_cf: f64,
    points: usize,
    min_pct: f64,
    max_pct: f64,
) -> Result<Vec<CapacitySweepPoint>> {
    Ok(sweep_levels(points, min_pct, max_pct)?
        .into_iter()
        .map(|g| CapacitySweepPoint {
            generation_pct: g,
            match_pct: match_at_generation_pct(cf, avg_cf, g),
        })
        .collect())
}

/// Capacity-matching curve for a weighted portfolio.
///
/// At total generation `g`, component `k` produces `g * weight_k / Σ weight`.
/// Non-positive weights drop a component; if nothing is left every point is 0.
pub fn sweep_blend(
    components: &[BlendComponent<'_>],
    points: usize,
    min_pct: f64,
    max_pct: f64,
) -> Result<Vec<CapacitySweepPoint>> {
    if components.len() > MAX_BLEND_RESOURCES {
        return Err(Error::TooManyResources {
            max: MAX_BLEND_RESOURCES,
            got: components.len(),
        });
    }
    let levels = sweep_levels(points, min_pct, max_pct)?;
    let total_weight: f64 = components.iter().map(|c| c.weight.max(0.0)).sum();

    let mut curve = Vec::with_capacity(levels.len());
    for g in levels {
        let match_pct = if total_weight > 0.0 {
            let shares: SmallVec<[ResourceShare<'_>; MAX_BLEND_RESOURCES]> = components
                .iter()
                .map(|c| ResourceShare {
                    cf: c.cf,
                    avg_cf: c.avg_cf,
                    gen_pct: g * c.weight.max(0.0) / total_weight,
                })
                .collect();
            match_at_generation_mix(&shares)?
        } else {
            0.0
        };
        curve.push(CapacitySweepPoint {
            generation_pct: g,
            match_pct,
        });
    }
    Ok(curve)
}

/// Mean absolute difference between the actual and modeled match curves.
///
/// Both series are sized with the actual series' average CF, so a model that
/// over-produces also shows up as a gap. Range: [0, 100], 0 = identical.
pub fn sweep_gap(actual: &[f64], modeled: &[f64], levels_pct: &[f64]) -> f64 {
    if levels_pct.is_empty() || actual.len() != modeled.len() {
        return 0.0;
    }
    let reference_avg = average_cf(actual);
    let total: f64 = levels_pct
        .iter()
        .map(|&g| {
            (match_at_generation_pct(actual, reference_avg, g)
                - match_at_generation_pct(modeled, reference_avg, g))
            .abs()
        })
        .sum();
    total / levels_pct.len() as f64
}
