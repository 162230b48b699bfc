#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use chaos_core::{FaultProfile, Outcome};

const TRIALS: usize = 20_000;

#[test]
fn failure_ratio_tracks_rate() {
    let p = FaultProfile::new(0.5, 0, 0);
    let failures = (0..TRIALS).filter(|_| p.roll() == Outcome::Failure).count();
    let ratio = failures as f64 / TRIALS as f64;
    assert!((0.45..=0.55).contains(&ratio), "ratio={ratio}");
}

#[test]
fn low_rate_fails_rarely() {
    let p = FaultProfile::new(0.05, 0, 0);
    let failures = (0..TRIALS).filter(|_| p.roll().is_failure()).count();
    let ratio = failures as f64 / TRIALS as f64;
    assert!((0.02..=0.08).contains(&ratio), "ratio={ratio}");
}

#[test]
fn latency_covers_the_range() {
    let p = FaultProfile::new(0.0, 30, 60);
    let samples: Vec<Duration> = (0..TRIALS).map(|_| p.sample_latency()).collect();
    let min = samples.iter().min().copied().unwrap();
    let max = samples.iter().max().copied().unwrap();

    assert!(min >= Duration::from_millis(30));
    assert!(max <= Duration::from_millis(60));
    // uniform over 30ms: both ends get visited
    assert!(min < Duration::from_millis(32), "min={min:?}");
    assert!(max > Duration::from_millis(58), "max={max:?}");
}
