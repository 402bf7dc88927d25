//! Error types for transaction sources

use thiserror::Error;

/// Result type alias for source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors a transaction source can report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Fetch failed (network, backend); the message is user-presentable
    #[error("{0}")]
    FetchFailed(String),

    /// Source configuration is unusable
    #[error("Invalid source configuration: {0}")]
    InvalidConfig(String),
}
