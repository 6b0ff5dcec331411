use thiserror::Error;

use tg_core::CoreError;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("event history line {line}: {source}")]
    Record { line: u64, source: CoreError },
}

pub type ScoreResult<T> = Result<T, ScoreError>;
