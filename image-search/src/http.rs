//! Shared HTTP client for provider and image-host requests.
//!
//! One [`reqwest::Client`] serves both the provider call and every image
//! download, so the client identity and timeout are set in one place.

use crate::config::SearchConfig;
use crate::error::SearchError;
use std::time::Duration;

/// Build a [`reqwest::Client`] configured for retrieval.
///
/// The client has:
/// - Timeout from config, applied per request
/// - The configured User-Agent on every request
/// - Up to 10 redirects followed (image CDNs commonly redirect)
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
