//! Retrieval configuration with sensible defaults.
//!
//! [`SearchConfig`] carries the provider credential, how many images to
//! keep per query, how far to over-fetch, and request behaviour.

use crate::error::SearchError;

/// Default provider endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";

/// Client identity presented to image hosts. Some hosts reject requests
/// without a User-Agent.
pub const DEFAULT_USER_AGENT: &str = concat!("imgsearch/", env!("CARGO_PKG_VERSION"));

/// Configuration for image retrieval.
///
/// Use [`SearchConfig::new`] with an API key, then override fields as needed.
#[derive(Clone)]
pub struct SearchConfig {
    /// Provider API key. Threaded into the provider at construction.
    pub api_key: String,
    /// Provider endpoint root, without trailing path.
    pub base_url: String,
    /// Maximum number of images kept per query (`k`).
    pub images_per_query: usize,
    /// Candidates requested per kept image. The provider is asked for
    /// `images_per_query * overfetch_factor` results.
    pub overfetch_factor: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl SearchConfig {
    /// Create a configuration with default settings and the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Number of candidates to request from the provider.
    pub fn page_size(&self) -> usize {
        self.images_per_query.saturating_mul(self.overfetch_factor)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `api_key` must not be empty
    /// - `images_per_query` must be greater than 0
    /// - `overfetch_factor` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `user_agent` must not be empty
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::Config("api_key must not be empty".into()));
        }
        if self.images_per_query == 0 {
            return Err(SearchError::Config(
                "images_per_query must be greater than 0".into(),
            ));
        }
        if self.overfetch_factor == 0 {
            return Err(SearchError::Config(
                "overfetch_factor must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user_agent must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            images_per_query: 1,
            overfetch_factor: 3,
            timeout_seconds: 10,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

// Hand-written so the key never reaches logs through `{:?}`.
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("images_per_query", &self.images_per_query)
            .field("overfetch_factor", &self.overfetch_factor)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
