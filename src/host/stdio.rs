//! Stdin/stdout JSON bridge for batch requests.
//!
//! Reads newline-delimited JSON [`RequestEnvelope`] messages, runs each
//! batch through the [`QueryBatchRunner`], and writes one
//! [`ResponseEnvelope`] per request as a JSON line. Requests are handled
//! one at a time, in arrival order.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use image_search::{AssetFetcher, ImageSearchProvider};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

use crate::batch::QueryBatchRunner;
use crate::error::{HostError, Result};
use crate::host::contract::{RequestEnvelope, ResponseEnvelope};

/// Serve requests from stdin until EOF, writing responses to stdout.
pub async fn run_stdio_bridge<P, F>(runner: &QueryBatchRunner<P, F>) -> Result<()>
where
    P: ImageSearchProvider,
    F: AssetFetcher,
{
    let reader = BufReader::new(tokio::io::stdin());
    let writer = BufWriter::new(tokio::io::stdout());
    serve(runner, reader, writer).await
}

/// Serve requests from `reader` until EOF, writing responses to `writer`.
pub async fn serve<P, F, R, W>(runner: &QueryBatchRunner<P, F>, mut reader: R, mut writer: W) -> Result<()>
where
    P: ImageSearchProvider,
    F: AssetFetcher,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| HostError::Protocol(format!("failed to read request: {e}")))?;

        // EOF
        if bytes_read == 0 {
            tracing::info!("input closed (EOF); shutting down stdio bridge");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RequestEnvelope>(trimmed) {
            Ok(request) => match request.validate() {
                Ok(()) => {
                    tracing::debug!(
                        request_id = %request.request_id,
                        blocks = request.blocks.len(),
                        "running batch"
                    );
                    let outcome = runner.run(&request.blocks).await;
                    ResponseEnvelope::from_outcome(request.request_id, outcome)
                }
                Err(e) => {
                    tracing::warn!(request_id = %request.request_id, error = %e, "invalid request envelope");
                    ResponseEnvelope::error(request.request_id, e.to_string())
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse request envelope");
                ResponseEnvelope::error(
                    "parse-error",
                    format!("failed to parse request envelope: {e}"),
                )
            }
        };

        let json = serde_json::to_string(&response).map_err(|e| {
            HostError::Protocol(format!("failed to serialize response envelope: {e}"))
        })?;
        write_line(&mut writer, &json).await?;
    }

    Ok(())
}

/// Write a single JSON line and flush.
async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, json: &str) -> Result<()> {
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| HostError::Protocol(format!("failed to write response: {e}")))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| HostError::Protocol(format!("failed to write newline: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| HostError::Protocol(format!("failed to flush output: {e}")))?;
    Ok(())
}
