//! Versioned request/response envelopes for the host JSON protocol.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image_search::{FetchedAsset, Tag};
use serde::{Deserialize, Serialize};

use crate::batch::{BatchOutcome, QueryFailure, TextBlock};

/// Contract version for host envelopes.
pub const CONTRACT_VERSION: u32 = 1;

/// A batch of text blocks to turn into images, frontend -> host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub v: u32,
    pub request_id: String,
    pub blocks: Vec<TextBlock>,
}

impl RequestEnvelope {
    /// Build a v1 request envelope.
    #[must_use]
    pub fn new(request_id: impl Into<String>, blocks: Vec<TextBlock>) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            blocks,
        }
    }

    /// Validate envelope version and required identifiers.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.v != CONTRACT_VERSION {
            return Err(ContractError::new(
                ContractErrorKind::UnsupportedVersion,
                format!(
                    "unsupported contract version {}; expected {}",
                    self.v, CONTRACT_VERSION
                ),
            ));
        }
        if self.request_id.trim().is_empty() {
            return Err(ContractError::new(
                ContractErrorKind::InvalidEnvelope,
                "request_id cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// A downloaded image as carried on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPayload {
    pub location: String,
    pub mime_type: String,
    pub tags: Vec<Tag>,
    /// Standard base64 of the raw image bytes.
    pub content_base64: String,
}

impl From<FetchedAsset> for AssetPayload {
    fn from(asset: FetchedAsset) -> Self {
        Self {
            content_base64: STANDARD.encode(&asset.content),
            location: asset.location,
            mime_type: asset.mime_type,
            tags: asset.tags,
        }
    }
}

/// The host's answer to one [`RequestEnvelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub v: u32,
    pub request_id: String,
    /// `true` when every non-empty block produced at least one asset.
    pub ok: bool,
    pub assets: Vec<AssetPayload>,
    pub failures: Vec<QueryFailure>,
    /// Envelope-level failure (unparseable or invalid request).
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Build a response from a finished batch.
    #[must_use]
    pub fn from_outcome(request_id: impl Into<String>, outcome: BatchOutcome) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            ok: outcome.is_success(),
            assets: outcome.assets.into_iter().map(AssetPayload::from).collect(),
            failures: outcome.failures,
            error: None,
        }
    }

    /// Build an envelope-level error response.
    #[must_use]
    pub fn error(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            ok: false,
            assets: Vec::new(),
            failures: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// Contract validation error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractErrorKind {
    UnsupportedVersion,
    InvalidEnvelope,
}

/// Contract validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractError {
    pub kind: ContractErrorKind,
    pub message: String,
}

impl ContractError {
    #[must_use]
    pub fn new(kind: ContractErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl std::fmt::Display for ContractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ContractError {}
