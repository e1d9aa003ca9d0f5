use kashi_core::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Invalid ranking month {value:?}: expected YYYYMM")]
    InvalidMonth { value: String },

    #[error("Invalid ranking pattern: {reason}")]
    Pattern { reason: String },

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
