//! Zone-subsystem error types.

use std::time::Duration;

use thiserror::Error;

/// Configuration errors: the zone file or an encoded route could not be read.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zone file JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid coordinate {input:?}: {reason}")]
    BadCoordinate { input: String, reason: String },

    #[error("malformed encoded polyline: {0}")]
    Polyline(String),
}

pub type ZoneResult<T> = Result<T, ZoneError>;

/// Failures reported by external route / road-snap collaborators.
///
/// These never reach the rule engine; the helpers in
/// [`provider`][crate::provider] turn them into fallbacks.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("provider returned malformed data: {0}")]
    Malformed(String),

    #[error("provider timed out after {0:?}")]
    Timeout(Duration),
}

impl From<ZoneError> for ProviderError {
    fn from(e: ZoneError) -> Self {
        ProviderError::Malformed(e.to_string())
    }
}
