//! Trait definition for the image search provider seam.
//!
//! The pipeline talks to the provider only through [`ImageSearchProvider`],
//! so tests can substitute an in-memory provider and a live deployment uses
//! [`crate::engines::SerpApiProvider`].

use crate::error::SearchError;
use crate::types::{Query, SearchResponse};

/// A source of candidate images for a query.
///
/// Implementors handle their own:
///
/// - URL construction with query encoding
/// - Credential handling (passed in at construction, never global)
/// - Parsing the reply into a [`SearchResponse`]
///
/// A reply in which the provider reports its own failure is returned as
/// `Ok(SearchResponse::Error(..))`. `Err` is reserved for transport and
/// parse failures.
pub trait ImageSearchProvider: Send + Sync {
    /// Request up to `page_size` candidates for `query`, first page only.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the request fails or
    /// [`SearchError::Parse`] if the reply is not understood.
    fn search(
        &self,
        query: &Query,
        page_size: usize,
    ) -> impl std::future::Future<Output = Result<SearchResponse, SearchError>> + Send;

    /// Short identifier used in log fields.
    fn name(&self) -> &'static str;
}
