//! Request-serving handlers.

pub mod stub;
