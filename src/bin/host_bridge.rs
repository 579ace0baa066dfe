//! Headless host bridge binary for stdin/stdout JSON communication.
//!
//! Reads `RequestEnvelope` messages as newline-delimited JSON from stdin,
//! runs each batch through the image retrieval pipeline, and writes one
//! `ResponseEnvelope` per request to stdout.
//!
//! Usage: `imgsearch-host [CONFIG_PATH]`. Without a path the default
//! config location is used when present.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use imgsearch::host::stdio::run_stdio_bridge;
use imgsearch::{HostConfig, QueryBatchRunner};
use std::path::PathBuf;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = HostConfig::load(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;
    let runner = QueryBatchRunner::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build pipeline: {e}"))?;

    tracing::info!(
        images_per_query = config.images_per_query,
        overfetch_factor = config.overfetch_factor,
        "imgsearch-host starting"
    );

    run_stdio_bridge(&runner).await.map_err(|e| {
        tracing::error!(error = %e, "imgsearch-host exited with error");
        anyhow::anyhow!("imgsearch-host failed: {e}")
    })?;

    tracing::info!("imgsearch-host shut down cleanly");
    Ok(())
}
