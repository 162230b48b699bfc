//! Shared error type across chaos-stub crates.

use thiserror::Error;

/// Stable error codes (used in logs and asserted by tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Config document could not be turned into a usable config.
    InvalidConfig,
    /// Filesystem / socket failure.
    Io,
    /// Metrics backend rejected or never received an event.
    Metrics,
    /// Anything else.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::Io => "IO",
            ErrorCode::Metrics => "METRICS",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ChaosError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum ChaosError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("io: {0}")]
    Io(String),
    #[error("metrics: {0}")]
    Metrics(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ChaosError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ChaosError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            ChaosError::Io(_) => ErrorCode::Io,
            ChaosError::Metrics(_) => ErrorCode::Metrics,
            ChaosError::Internal(_) => ErrorCode::Internal,
        }
    }
}
