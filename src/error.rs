//! Error types for the imgsearch host.

use image_search::SearchError;

/// Top-level error type for the host process.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration file or environment error.
    #[error("config error: {0}")]
    Config(String),

    /// Retrieval pipeline error that could not be scoped to a single query.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Wire protocol error (serialization, stream framing).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, HostError>;
