//! imgsearch: turn blocks of text into downloaded images.
//!
//! This crate is the host around the [`image_search`] pipeline:
//! Text blocks → Query → Provider search → Dedup → Download → Assets
//!
//! # Architecture
//!
//! - **Config**: TOML file plus an environment override for the API key
//! - **Batch runner**: one pipeline run per non-empty block, failures
//!   scoped to the failing block
//! - **Host bridge**: newline-delimited JSON over stdin/stdout

pub mod batch;
pub mod config;
pub mod error;
pub mod host;

pub use batch::{BatchOutcome, QueryBatchRunner, QueryFailure, TextBlock};
pub use config::HostConfig;
pub use error::{HostError, Result};
