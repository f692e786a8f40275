//! # Request Wiring
//!
//! Newline-delimited JSON front end for the engine: one
//! `ExecutionPayloadV1` object per input line, one response object per
//! output line. Requests are handled concurrently, so responses carry the
//! 1-based input line number they answer.

use std::sync::Arc;

use qc_18_engine_api::{EngineApi, ExecutePayloadReply, ExecutionPayloadV1};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::container::EngineContainer;

/// One output line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseLine {
    /// Input line number this answers.
    pub request: u64,
    #[serde(flatten)]
    pub reply: Option<ExecutePayloadReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseLine {
    pub fn reply(request: u64, reply: ExecutePayloadReply) -> Self {
        Self {
            request,
            reply: Some(reply),
            error: None,
        }
    }

    pub fn error(request: u64, error: impl Into<String>) -> Self {
        Self {
            request,
            reply: None,
            error: Some(error.into()),
        }
    }
}

/// Handle a single input line.
pub async fn handle_line(container: &EngineContainer, request: u64, line: &str) -> ResponseLine {
    let payload: ExecutionPayloadV1 = match serde_json::from_str(line) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(request, error = %e, "Unparsable request line");
            return ResponseLine::error(request, format!("malformed request: {}", e));
        }
    };

    match container.coordinator.execute_payload(payload).await {
        Ok(reply) => ResponseLine::reply(request, reply),
        Err(e) => ResponseLine::error(request, e.to_string()),
    }
}

/// Serve requests from `input` until EOF, writing responses to `output`.
/// Returns the number of requests read.
pub async fn serve<R, W>(
    container: Arc<EngineContainer>,
    input: R,
    mut output: W,
) -> anyhow::Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let read = async move {
        let mut lines = input.lines();
        let mut count = 0u64;
        let mut in_flight = JoinSet::new();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            count += 1;
            let container = Arc::clone(&container);
            let tx = tx.clone();
            in_flight.spawn(async move {
                let response = handle_line(&container, count, &line).await;
                match serde_json::to_string(&response) {
                    Ok(encoded) => {
                        if tx.send(encoded).is_err() {
                            debug!(request = count, "Writer gone, response dropped");
                        }
                    }
                    Err(e) => warn!(request = count, error = %e, "Failed to encode response"),
                }
            });
        }
        drop(tx);
        // Every task must finish so its container handle is released.
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Request task failed");
            }
        }
        Ok::<u64, std::io::Error>(count)
    };

    let write = async move {
        while let Some(encoded) = rx.recv().await {
            output.write_all(encoded.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        Ok::<(), std::io::Error>(())
    };

    let (read, write) = tokio::join!(read, write);
    write?;
    Ok(read?)
}
