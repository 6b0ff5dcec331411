use thiserror::Error;

use tg_core::CoreError;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("thresholds JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("threshold {name} must be finite and non-negative, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
}

pub type RulesResult<T> = Result<T, RulesError>;

/// Why an incoming fix was rejected.  A rejected fix never touches track state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FixError {
    #[error("fix has no entity id")]
    MissingEntity,

    #[error("fix for {entity}: {source}")]
    BadTimestamp { entity: String, source: CoreError },
}
