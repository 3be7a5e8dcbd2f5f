use windcf_macros::Timeseries;

#[derive(Debug, Clone, Copy, Timeseries)]
pub struct HourRow {
    pub hub_speed: f64,
    pub cf: f64,
}

fn main() {
    let row = HourRow { hub_speed: 7.5, cf: 0.42 };
    let mut ts = HourRowTimeseries::with_capacity(24);
    ts.push(&row);
    ts.push(&row);
    assert_eq!(ts.len(), 2);
    assert!(!ts.is_empty());
    assert_eq!(ts.cf, vec![0.42, 0.42]);
    assert_eq!(HourRow::field_names(), &["hub_speed", "cf"]);

    let columns = ts.columns();
    assert_eq!(columns[0].0, "hub_speed");
    assert_eq!(columns[1].1, &[0.42, 0.42]);
}
