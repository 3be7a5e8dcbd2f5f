use windcf_macros::Timeseries;

#[derive(Debug, Clone, Copy, Timeseries)]
#[timeseries(name = "SolarColumns")]
pub struct SolarRow {
    pub ghi: f64,
    pub cf: f64,
}

fn main() {
    let mut cols = SolarColumns::with_capacity(1);
    assert!(cols.is_empty());
    cols.push(&SolarRow { ghi: 850.0, cf: 0.85 });
    assert_eq!(cols.len(), 1);
    assert_eq!(cols.ghi[0], 850.0);
}
