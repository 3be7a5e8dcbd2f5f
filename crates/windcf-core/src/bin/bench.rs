/// Timing of the per-edit recomputation path.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for data generation,
/// and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use windcf_core::constants::HOURS_PER_YEAR;
use windcf_core::dataset::{Dataset, HourlyRecord, Metadata};
use windcf_core::explorer::{Explorer, SweepConfig};
use windcf_core::power_curve::PowerCurveParams;
use windcf_core::series::compute_model_series;

const REPEATS: usize = 7;

/// Simple LCG PRNG for deterministic data generation.
fn make_records(seed: u64) -> Vec<HourlyRecord> {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    (0..HOURS_PER_YEAR)
        .map(|_| {
            let speed = next_f64() * 18.0;
            let shear = 0.05 + next_f64() * 0.3;
            let actual = next_f64() * 0.9;
            HourlyRecord::new(speed, shear, actual)
        })
        .collect()
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn main() -> anyhow::Result<()> {
    let records = make_records(42);
    let metadata = Metadata {
        location: "synthetic".into(),
        year: 2024,
        nameplate_mw: 100.0,
        lat: 0.0,
        lon: 0.0,
        timezone_shift_hours: 0,
    };
    let dataset = Dataset::new(metadata, records.clone())?;
    let mut explorer = Explorer::new(dataset, SweepConfig::default())?;

    let mut params = PowerCurveParams::OPTIMAL;
    params.hub_height = 120.0;

    // Warmup
    black_box(compute_model_series(&records, &params));

    let series = median_time(|| {
        black_box(compute_model_series(&records, &params));
    });

    // Nudge max_cf each run so the evaluation cache never hits.
    let mut tick = 0u32;
    let evaluate = median_time(|| {
        tick += 1;
        let p = PowerCurveParams {
            max_cf: 0.8 + f64::from(tick % 10) * 0.01,
            ..params
        };
        black_box(explorer.evaluate(&p).map(|ev| ev.r()).ok());
    });

    println!("Pure Rust Core Benchmarks ({HOURS_PER_YEAR} hours)");
    println!("============================================================");
    println!("{:<24} {:>12}", "Path", "Median (ms)");
    println!("--------------------------------------------");
    for (name, dur) in [("compute_model_series", series), ("explorer.evaluate", evaluate)] {
        println!("{:<24} {:>12.3}", name, dur.as_secs_f64() * 1000.0);
    }
    println!("============================================================");
    Ok(())
}
