/// Flat-array view of a parameter set.
///
/// Lets bindings and parameter files exchange a parameter tuple as a plain
/// `[f64]` in `PARAM_NAMES` order.
pub trait ModelParams: Sized {
    const N_PARAMS: usize;
    const PARAM_NAMES: &'static [&'static str];
    const PARAM_BOUNDS: &'static [(f64, f64)];

    /// Build from a slice in `PARAM_NAMES` order, checking the length only.
    fn from_array(arr: &[f64]) -> crate::Result<Self>;

    /// Flatten in `PARAM_NAMES` order.
    fn to_array(&self) -> Vec<f64>;
}
