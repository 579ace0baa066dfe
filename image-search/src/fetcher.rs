//! Image download with per-candidate soft failure.
//!
//! Broken links and access-restricted hosts are common in image search
//! results. A failed download is therefore a [`FetchOutcome::Skipped`]
//! value, never an error: the assembler moves on to the next candidate.

use std::fmt;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::build_client;
use crate::types::{CandidateImage, FetchedAsset};

/// Why a candidate could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailureReason {
    /// The host answered with a non-success status.
    Status(u16),
    /// The request or body read failed before a usable response arrived.
    Transport(String),
}

impl fmt::Display for FetchFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "status {code}"),
            Self::Transport(message) => write!(f, "transport: {message}"),
        }
    }
}

/// A single candidate that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub location: String,
    pub reason: FetchFailureReason,
}

/// Result of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Content retrieved; the asset is ready for the result set.
    Fetched(FetchedAsset),
    /// Download failed; skip this candidate and continue.
    Skipped(FetchFailure),
}

impl FetchOutcome {
    fn skipped(candidate: &CandidateImage, reason: FetchFailureReason) -> Self {
        Self::Skipped(FetchFailure {
            location: candidate.location.clone(),
            reason,
        })
    }
}

/// Retrieves binary content for a candidate.
pub trait AssetFetcher: Send + Sync {
    /// Download `candidate`. Never fails as a whole; failures are
    /// reported as [`FetchOutcome::Skipped`].
    fn fetch(
        &self,
        candidate: &CandidateImage,
    ) -> impl std::future::Future<Output = FetchOutcome> + Send;
}

/// Downloads images over HTTP(S) with the configured client identity.
pub struct HttpAssetFetcher {
    client: reqwest::Client,
}

impl HttpAssetFetcher {
    /// Build a fetcher with its own HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self::with_client(build_client(config)?))
    }

    /// Build a fetcher that shares an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, candidate: &CandidateImage) -> FetchOutcome {
        let response = match self.client.get(&candidate.location).send().await {
            Ok(response) => response,
            Err(e) => {
                return FetchOutcome::skipped(
                    candidate,
                    FetchFailureReason::Transport(e.to_string()),
                );
            }
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::skipped(candidate, FetchFailureReason::Status(status.as_u16()));
        }

        match response.bytes().await {
            Ok(body) => FetchOutcome::Fetched(FetchedAsset::new(
                candidate.location.clone(),
                body.to_vec(),
            )),
            Err(e) => FetchOutcome::skipped(candidate, FetchFailureReason::Transport(e.to_string())),
        }
    }
}
