//! Batch runner: one pipeline run per non-empty text block.
//!
//! Blocks are processed strictly in input order, one at a time. A failing
//! query is recorded as a [`QueryFailure`] scoped to its text and the
//! batch moves on, so assets already retrieved for other blocks are kept.

use image_search::{
    AssetFetcher, FetchedAsset, ImagePipeline, ImageSearchProvider, Query, SearchError,
};
use image_search::engines::SerpApiProvider;
use image_search::fetcher::HttpAssetFetcher;
use serde::{Deserialize, Serialize};

use crate::config::HostConfig;
use crate::error::Result;

/// Suggestion attached to every per-query failure.
pub const RETRY_SUGGESTION: &str = "Please try again if you feel this should have succeeded";

/// One input text block. Empty text is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub text: String,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A query that produced no assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFailure {
    /// The query text as submitted.
    pub query: String,
    /// User-facing summary, naming the query.
    pub message: String,
    /// The underlying cause.
    pub detail: String,
    pub suggestion: String,
}

impl QueryFailure {
    fn new(query: &Query, err: &SearchError) -> Self {
        Self {
            query: query.as_str().to_owned(),
            message: format!("Error executing search for {query}"),
            detail: err.to_string(),
            suggestion: RETRY_SUGGESTION.to_owned(),
        }
    }
}

/// Everything a batch produced.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Assets from all successful queries, in block order.
    pub assets: Vec<FetchedAsset>,
    /// One entry per failed query, in block order.
    pub failures: Vec<QueryFailure>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the retrieval pipeline over a sequence of text blocks.
pub struct QueryBatchRunner<P, F> {
    pipeline: ImagePipeline<P, F>,
}

impl QueryBatchRunner<SerpApiProvider, HttpAssetFetcher> {
    /// Build the live runner from host configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the retrieval settings are invalid or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &HostConfig) -> Result<Self> {
        let pipeline = ImagePipeline::from_config(&config.to_search_config())?;
        Ok(Self::new(pipeline))
    }
}

impl<P, F> QueryBatchRunner<P, F>
where
    P: ImageSearchProvider,
    F: AssetFetcher,
{
    pub fn new(pipeline: ImagePipeline<P, F>) -> Self {
        Self { pipeline }
    }

    /// Run every non-empty block through the pipeline, in order.
    pub async fn run(&self, blocks: &[TextBlock]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for (index, block) in blocks.iter().enumerate() {
            let Some(query) = Query::new(block.text.as_str()) else {
                tracing::trace!(index, "skipping empty block");
                continue;
            };

            match self.pipeline.retrieve(&query).await {
                Ok(set) => {
                    tracing::info!(index, assets = set.len(), "query retrieved");
                    outcome.assets.extend(set.into_assets());
                }
                Err(err) => {
                    // Error text may carry the query, which stays below info.
                    tracing::warn!(index, kind = err.kind(), "query failed");
                    tracing::debug!(index, error = %err, "query failure detail");
                    outcome.failures.push(QueryFailure::new(&query, &err));
                }
            }
        }

        outcome
    }
}
