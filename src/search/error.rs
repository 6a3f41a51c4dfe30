//! Error types for search operations

use crate::error::AppError;

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while composing search results
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The backing data store could not serve a fetch
    #[error("Data store unavailable: {0}")]
    Store(String),

    /// A newer search began before this one resolved; its results are
    /// discarded unconditionally
    #[error("Search superseded (generation {stale} < {current})")]
    Superseded { stale: u64, current: u64 },
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Store(msg) => AppError::Database(msg),
            SearchError::Superseded { .. } => AppError::Internal(err.to_string()),
        }
    }
}
