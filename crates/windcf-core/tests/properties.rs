use approx::assert_relative_eq;
use proptest::prelude::*;

use windcf_core::metrics::{coefficient_of_determination, duration_curve, pearson_correlation};
use windcf_core::power_curve::{apply, extrapolate, PowerCurveParams};
use windcf_core::series::average_cf;
use windcf_core::sweep::{match_at_generation_pct, sweep};

/// Parameter sets drawn from the documented ranges, ordering not enforced.
fn any_params() -> impl Strategy<Value = PowerCurveParams> {
    (
        1.5f64..=3.5,
        1.0f64..=5.0,
        7.0f64..=15.0,
        20.0f64..=30.0,
        0.7f64..=1.0,
        80.0f64..=150.0,
    )
        .prop_map(|(e, ci, rs, co, m, h)| PowerCurveParams::new(e, ci, rs, co, m, h))
}

fn cf_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..=1.0, 2..400)
}

proptest! {
    #[test]
    fn outside_operating_band_is_zero(p in any_params(), below in 0.0f64..1.0, above in 0.001f64..50.0) {
        prop_assert_eq!(apply(p.cut_in * below, &p), 0.0);
        prop_assert_eq!(apply(p.cut_out + above, &p), 0.0);
    }

    #[test]
    fn rated_band_is_max_cf(p in any_params(), t in 0.0f64..=1.0) {
        let v = (p.rated_speed + t * (p.cut_out - p.rated_speed)).min(p.cut_out);
        prop_assert_eq!(apply(v, &p), p.max_cf);
    }

    #[test]
    fn output_within_zero_and_max_cf(p in any_params(), v in -5.0f64..60.0) {
        let cf = apply(v, &p);
        prop_assert!(cf >= 0.0 && cf <= p.max_cf);
    }

    #[test]
    fn degenerate_curves_stay_bounded(
        e in 0.5f64..4.0,
        ci in 0.0f64..20.0,
        rs in 0.0f64..20.0,
        co in 0.0f64..30.0,
        m in 0.0f64..=1.0,
        v in 0.0f64..40.0,
    ) {
        let p = PowerCurveParams::new(e, ci, rs, co, m, 100.0);
        let cf = apply(v, &p);
        prop_assert!(cf.is_finite());
        prop_assert!(cf >= 0.0 && cf <= m);
    }

    #[test]
    fn reference_height_is_exact_identity(v in 0.0f64..60.0, shear in -1.0f64..1.0) {
        prop_assert_eq!(extrapolate(v, 100.0, shear), v);
    }

    #[test]
    fn self_correlation_is_one(x in cf_series()) {
        prop_assume!(x.iter().any(|&v| v != x[0]));
        assert_relative_eq!(pearson_correlation(&x, &x), 1.0, epsilon = 1e-12);
        assert_relative_eq!(coefficient_of_determination(&x, &x), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_series_correlates_zero(x in cf_series(), c in 0.0f64..=1.0) {
        let flat = vec![c; x.len()];
        prop_assert_eq!(pearson_correlation(&x, &flat), 0.0);
        prop_assert_eq!(pearson_correlation(&flat, &x), 0.0);
    }

    #[test]
    fn duration_curve_is_sorted_permutation(x in cf_series()) {
        let dc = duration_curve(&x);
        prop_assert_eq!(dc.len(), x.len());
        prop_assert!(dc.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(dc[0] >= dc[dc.len() - 1]);

        let mut a = x.clone();
        a.sort_by(|p, q| q.total_cmp(p));
        prop_assert_eq!(dc, a);
    }

    #[test]
    fn sweep_is_monotonic_and_starts_at_zero(x in cf_series(), max_pct in 10.0f64..400.0) {
        let curve = sweep(&x, average_cf(&x), 17, 0.0, max_pct).unwrap();
        prop_assert_eq!(curve[0].match_pct, 0.0);
        prop_assert!(curve.windows(2).all(|w| w[1].match_pct >= w[0].match_pct));
    }

    #[test]
    fn match_never_exceeds_one_hundred(x in cf_series(), g in 0.0f64..10_000.0) {
        prop_assert!(match_at_generation_pct(&x, average_cf(&x), g) <= 100.0);
    }
}
