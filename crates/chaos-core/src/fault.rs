//! Latency and failure draws.
//!
//! A `FaultProfile` is built once from config and shared read-only. Bounds
//! and rates are taken as given: an inverted latency range is sampled between
//! its two ends and rates outside `[0, 1]` saturate naturally
//! (`<= 0` never fails, `>= 1` always fails).

use std::time::Duration;

/// Result of a failure draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn is_failure(self) -> bool {
        matches!(self, Outcome::Failure)
    }

    /// HTTP status the stub answers with for this outcome.
    pub fn http_status(self) -> u16 {
        match self {
            Outcome::Success => 200,
            Outcome::Failure => 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultProfile {
    failure_rate: f64,
    min_ms: i64,
    max_ms: i64,
}

impl FaultProfile {
    pub fn new(failure_rate: f64, min_ms: i64, max_ms: i64) -> Self {
        Self { failure_rate, min_ms, max_ms }
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// Configured bounds in millis, ordered low to high. May be negative.
    pub fn latency_bounds_ms(&self) -> (i64, i64) {
        (self.min_ms.min(self.max_ms), self.min_ms.max(self.max_ms))
    }

    /// Uniform latency between the bounds, microsecond resolution.
    ///
    /// Draws below zero mean "no delay".
    pub fn sample_latency(&self) -> Duration {
        let (lo, hi) = self.latency_bounds_ms();
        let lo = lo.saturating_mul(1_000);
        let hi = hi.saturating_mul(1_000);
        let micros = if lo == hi { lo } else { rand::random_range(lo..=hi) };
        Duration::from_micros(micros.max(0).unsigned_abs())
    }

    /// `draw` is expected in `[0, 1)`.
    pub fn outcome_for(&self, draw: f64) -> Outcome {
        if draw < self.failure_rate {
            Outcome::Failure
        } else {
            Outcome::Success
        }
    }

    pub fn roll(&self) -> Outcome {
        self.outcome_for(rand::random::<f64>())
    }
}
