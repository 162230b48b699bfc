//! Top-level facade crate for chaos-stub.
//!
//! Re-exports the core primitives and the gateway library so users can depend
//! on a single crate.

pub mod core {
    pub use chaos_core::*;
}

pub mod gateway {
    pub use chaos_gateway::*;
}
