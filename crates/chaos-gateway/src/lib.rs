//! chaos gateway library entry.
//!
//! Wires config loading, the metrics reporter, and the HTTP surface (health
//! plus the catch-all chaos handler). Consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod reporter;
pub mod router;
pub mod services;
