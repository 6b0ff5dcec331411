//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]` where a parse can fail at their boundary.

use thiserror::Error;

/// The top-level error type for `tg-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid timestamp {input:?}: {reason}")]
    Timestamp { input: String, reason: String },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `tg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
