//! # image-search
//!
//! Turn a short text query into downloaded image content.
//!
//! The search itself is delegated to an image search provider (SerpApi's
//! Google Images engine). The crate then deduplicates the candidate URLs,
//! downloads them one at a time in discovery order, and returns the first
//! `k` that succeed, each tagged for downstream consumption.
//!
//! ## Design
//!
//! - One provider request per query, over-fetching `k * overfetch_factor`
//!   candidates as a buffer against broken links
//! - First-seen deduplication by image URL, order preserved
//! - Sequential downloads that stop as soon as `k` assets are held
//! - A failed download is skipped, not raised; only provider failures and
//!   total exhaustion end a query with an error
//!
//! ## Security
//!
//! - The API key is passed in through [`SearchConfig`], never read from
//!   global state
//! - The key is kept out of error messages and `Debug` output
//! - Query text is logged only at debug/trace level

pub mod config;
pub mod engines;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod pipeline;
pub mod provider;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use fetcher::{AssetFetcher, FetchFailure, FetchFailureReason, FetchOutcome};
pub use pipeline::ImagePipeline;
pub use provider::ImageSearchProvider;
pub use types::{CandidateImage, FetchedAsset, Query, ResultSet, SearchResponse, Tag};

/// Retrieve up to `config.images_per_query` images for `query`.
///
/// Builds the live pipeline from `config` and runs a single query. For
/// batches, build an [`ImagePipeline`] once and call
/// [`ImagePipeline::retrieve`] per query.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration,
/// [`SearchError::Provider`] if the provider reports a failure, and
/// [`SearchError::NoResults`] if no candidate could be downloaded.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> image_search::Result<()> {
/// let config = image_search::SearchConfig::new("serpapi-key");
/// let query = image_search::Query::new("Abraham Lincoln").expect("non-empty");
/// let results = image_search::retrieve_images(&query, &config).await?;
/// for asset in &results.assets {
///     println!("{}: {} bytes", asset.location, asset.content.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn retrieve_images(query: &Query, config: &SearchConfig) -> Result<ResultSet> {
    ImagePipeline::from_config(config)?.retrieve(query).await
}
