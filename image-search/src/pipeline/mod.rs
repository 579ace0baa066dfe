//! Retrieval pipeline: provider search, dedup, sequential download.
//!
//! [`ImagePipeline`] binds a provider, a fetcher, and the retrieval
//! settings so callers can run one query at a time without threading
//! the pieces through every call.

pub mod assemble;
pub mod dedup;

use crate::config::SearchConfig;
use crate::engines::SerpApiProvider;
use crate::error::SearchError;
use crate::fetcher::{AssetFetcher, HttpAssetFetcher};
use crate::http::build_client;
use crate::provider::ImageSearchProvider;
use crate::types::{Query, ResultSet};

/// A provider and fetcher paired with retrieval settings.
pub struct ImagePipeline<P, F> {
    provider: P,
    fetcher: F,
    images_per_query: usize,
    overfetch_factor: usize,
}

impl ImagePipeline<SerpApiProvider, HttpAssetFetcher> {
    /// Build the live pipeline: SerpApi provider and HTTP fetcher sharing
    /// one client.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = build_client(config)?;
        Self::new(
            SerpApiProvider::with_client(client.clone(), config),
            HttpAssetFetcher::with_client(client),
            config,
        )
    }
}

impl<P, F> ImagePipeline<P, F>
where
    P: ImageSearchProvider,
    F: AssetFetcher,
{
    /// Pair `provider` and `fetcher` with the limits from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid.
    pub fn new(provider: P, fetcher: F, config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            provider,
            fetcher,
            images_per_query: config.images_per_query,
            overfetch_factor: config.overfetch_factor,
        })
    }

    /// Retrieve up to `images_per_query` assets for `query`.
    ///
    /// # Errors
    ///
    /// See [`assemble::assemble`].
    pub async fn retrieve(&self, query: &Query) -> Result<ResultSet, SearchError> {
        tracing::debug!(query = %query, "retrieving images");
        assemble::assemble(
            &self.provider,
            &self.fetcher,
            query,
            self.images_per_query,
            self.overfetch_factor,
        )
        .await
    }
}
