//! chaos-stub core: error types and fault-sampling primitives.
//!
//! This crate defines the error surface and the latency/failure draws shared
//! by the gateway and its tests. It carries no transport or runtime
//! dependencies so the sampling rules can be checked in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `ChaosError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod fault;

/// Shared result type.
pub use error::{ChaosError, Result};
pub use fault::{FaultProfile, Outcome};
