//! Error types for the image-search crate.
//!
//! Only query-level failures are errors. A single image that cannot be
//! downloaded is reported as a [`crate::fetcher::FetchOutcome::Skipped`]
//! value instead, so the pipeline can move on to the next candidate.
//! No API keys appear in error messages.

/// Errors that end the retrieval of a single query.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The provider itself reported a failure (quota exceeded, malformed query).
    #[error("provider error: {0}")]
    Provider(String),

    /// Every deduplicated candidate failed to download, or none existed.
    #[error("no image returned for query: {query}")]
    NoResults {
        /// The query text that produced nothing.
        query: String,
    },

    /// The request to the provider failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider reply could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Stable variant name. Never contains query text, so it is safe to log
    /// above debug level.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Provider(_) => "provider",
            Self::NoResults { .. } => "no_results",
            Self::Http(_) => "http",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
        }
    }
}

/// Convenience type alias for image-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
