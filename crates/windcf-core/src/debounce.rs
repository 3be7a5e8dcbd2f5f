//! Coalescing of rapid parameter edits.
//!
//! Slider drags emit edits faster than a full re-evaluation is worth running.
//! Only the most recent edit is kept; it is released once no newer edit has
//! arrived for the configured interval.

use std::time::{Duration, Instant};

use crate::constants::MAX_DEBOUNCE_MS;
use crate::power_curve::PowerCurveParams;

#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    pending: Option<(PowerCurveParams, Instant)>,
}

impl Debouncer {
    /// Interval is clamped to at most 150 ms. A zero interval releases on the next poll.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.min(Duration::from_millis(MAX_DEBOUNCE_MS)),
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record an edit, superseding any edit not yet released.
    pub fn submit(&mut self, params: PowerCurveParams, at: Instant) {
        self.pending = Some((params, at));
    }

    /// Release the latest edit if it has been quiet for the interval.
    pub fn poll(&mut self, now: Instant) -> Option<PowerCurveParams> {
        match self.pending {
            Some((params, at)) if now.saturating_duration_since(at) >= self.interval => {
                self.pending = None;
                Some(params)
            }
            _ => None,
        }
    }

    /// Release the latest edit immediately, e.g. when a drag ends.
    pub fn flush(&mut self) -> Option<PowerCurveParams> {
        self.pending.take().map(|(params, _)| params)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(MAX_DEBOUNCE_MS))
    }
}
