//! Core types for queries, candidates, and downloaded assets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag kind attached to every downloaded asset.
pub const TAG_KIND: &str = "search-result";

/// Tag name attached to every downloaded asset.
pub const TAG_NAME: &str = "google-image-search";

/// Content type recorded on every downloaded asset.
pub const ASSET_MIME_TYPE: &str = "image/png";

/// A non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Wrap `text` as a query. Returns `None` only for empty text;
    /// whitespace is a valid query and is passed to the provider verbatim.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    /// The query text as submitted.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One image reference discovered by the provider, prior to download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateImage {
    /// Resolved URL of the full-size image. Sole deduplication key.
    pub location: String,
    /// Zero-based position in the provider's reply.
    pub rank: usize,
}

impl CandidateImage {
    /// Create a candidate at the given discovery rank.
    pub fn new(location: impl Into<String>, rank: usize) -> Self {
        Self {
            location: location.into(),
            rank,
        }
    }
}

/// The provider's reply for one query: all candidates, or exactly one error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResponse {
    /// Discovered images in provider order.
    Candidates(Vec<CandidateImage>),
    /// The provider reported a failure instead of results.
    Error(String),
}

/// A classification label attached to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub kind: String,
    pub name: String,
}

impl Tag {
    /// The tag every search-result asset carries.
    pub fn search_result() -> Self {
        Self {
            kind: TAG_KIND.to_owned(),
            name: TAG_NAME.to_owned(),
        }
    }
}

/// Binary content downloaded for a candidate, ready to hand to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedAsset {
    /// The URL the content was downloaded from.
    pub location: String,
    /// Raw response body.
    pub content: Vec<u8>,
    /// Content type recorded for the asset. Always [`ASSET_MIME_TYPE`].
    pub mime_type: String,
    /// Exactly one [`Tag::search_result`].
    pub tags: Vec<Tag>,
}

impl FetchedAsset {
    /// Wrap downloaded bytes with the fixed content type and tag.
    pub fn new(location: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            location: location.into(),
            content,
            mime_type: ASSET_MIME_TYPE.to_owned(),
            tags: vec![Tag::search_result()],
        }
    }
}

/// The assets retrieved for one query, in discovery order.
///
/// Holds between 1 and `k` assets; an empty set is reported as
/// [`crate::SearchError::NoResults`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub query: Query,
    pub assets: Vec<FetchedAsset>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Hand the assets over to the caller.
    pub fn into_assets(self) -> Vec<FetchedAsset> {
        self.assets
    }
}
