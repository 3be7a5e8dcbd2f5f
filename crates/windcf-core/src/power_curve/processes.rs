/// Power-curve process functions.
///
/// Pure functions for one hourly sample: shear extrapolation, then the
/// piecewise capacity-factor curve.
use super::params::PowerCurveParams;
use crate::constants::REFERENCE_HEIGHT_M;

/// Extrapolate a 100 m wind speed to hub height with the power law.
///
/// `v_hub = v_100 * (h / 100)^shear`. At exactly 100 m the input is returned
/// untouched so no-op extrapolation is bit-exact.
#[inline]
pub fn extrapolate(speed_100m: f64, hub_height: f64, shear: f64) -> f64 {
    if hub_height == REFERENCE_HEIGHT_M {
        return speed_100m;
    }
    speed_100m * (hub_height / REFERENCE_HEIGHT_M).powf(shear)
}

/// Capacity factor at a hub-height wind speed.
///
/// - below cut-in or above cut-out: 0 (cut-out wins over everything)
/// - at or above rated speed: `max_cf`
/// - in between: `((v - cut_in) / (rated - cut_in))^exponent * max_cf`, clamped to `max_cf`
///
/// A zero-width ramp (`rated_speed <= cut_in`) saturates immediately.
#[inline]
pub fn apply(speed_at_hub: f64, params: &PowerCurveParams) -> f64 {
    if speed_at_hub < params.cut_in || speed_at_hub > params.cut_out {
        return 0.0;
    }
    if speed_at_hub >= params.rated_speed {
        return params.max_cf;
    }

    let span = params.rated_speed - params.cut_in;
    if span <= 0.0 {
        return params.max_cf;
    }

    let fraction = (speed_at_hub - params.cut_in) / span;
    (fraction.powf(params.exponent) * params.max_cf).min(params.max_cf)
}
