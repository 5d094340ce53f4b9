//! ACP update reader task.
//!
//! Reads newline-delimited JSON notifications from an agent's output stream,
//! parses each `session/update` line into a [`SessionUpdate`], and forwards
//! the updates through a tokio [`mpsc`] channel.
//!
//! The reader is driven by [`FramedRead`] backed by [`UpdateCodec`], which
//! enforces the configured per-line limit before any heap allocation for
//! JSON parsing.
//!
//! Fault handling follows "skip and log": malformed lines, unknown methods,
//! and unknown update tags never terminate the reader; only I/O failure or
//! cancellation does.

use futures_util::StreamExt;
use serde::Deserialize;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_util::codec::FramedRead;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::acp::codec::UpdateCodec;
use crate::stream::SessionUpdate;
use crate::{AppError, Result};

/// Top-level notification envelope (agent → relay).
#[derive(Debug, Deserialize)]
struct UpdateEnvelope {
    /// Method identifier; only `session/update` is translated.
    method: String,
    /// Method-specific payload.
    #[serde(default)]
    params: serde_json::Value,
}

/// Parameters of a `session/update` notification.
#[derive(Debug, Deserialize)]
struct UpdateParams {
    update: serde_json::Value,
}

/// Parse a single NDJSON line from the agent stream into a [`SessionUpdate`].
///
/// # Return value
///
/// - `Ok(Some(update))` — the line is a `session/update` with a recognized
///   update tag.
/// - `Ok(None)` — the line is empty/whitespace, has a method other than
///   `session/update`, or carries an update tag this relay does not know
///   (skipped; logged at `DEBUG`).
/// - `Err(AppError::Acp(...))` — the line is not valid JSON, or the
///   `session/update` params are missing the `update` field.
///
/// # Errors
///
/// - [`AppError::Acp`]`("malformed json: …")` — not valid JSON.
/// - [`AppError::Acp`]`("missing required field: …")` — `session/update`
///   without an `update` payload.
pub fn parse_update_line(line: &str) -> Result<Option<SessionUpdate>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let envelope: UpdateEnvelope =
        serde_json::from_str(line).map_err(|e| AppError::Acp(format!("malformed json: {e}")))?;

    if envelope.method != "session/update" {
        debug!(
            method = envelope.method,
            "update reader: skipping non-update method"
        );
        return Ok(None);
    }

    let params: UpdateParams = serde_json::from_value(envelope.params).map_err(|e| {
        AppError::Acp(format!("missing required field: session/update params: {e}"))
    })?;

    match serde_json::from_value::<SessionUpdate>(params.update) {
        Ok(update) => Ok(Some(update)),
        Err(e) => {
            // Forward compatibility: unknown update tags are valid input
            // that simply produces nothing.
            debug!(error = %e, "update reader: skipping unrecognized session update");
            Ok(None)
        }
    }
}

/// Reader task — frames NDJSON lines from `input` and emits [`SessionUpdate`]s.
///
/// Each decoded line goes through [`parse_update_line`]; any resulting update
/// is sent through `update_tx`. The task ends on clean EOF, cancellation, a
/// closed channel, or an unrecoverable I/O error.
///
/// # Errors
///
/// Returns `Ok(())` on clean EOF or cancellation, and
/// [`AppError::Io`]/[`AppError::Acp`] when the underlying stream fails, so
/// the caller can surface the fault as an `error` chunk.
pub async fn run_reader<R>(
    input: R,
    update_tx: mpsc::Sender<SessionUpdate>,
    max_line_bytes: usize,
    cancel: CancellationToken,
) -> Result<()>
where
    R: AsyncRead + Unpin + Send,
{
    let mut framed = FramedRead::new(input, UpdateCodec::with_max_line_bytes(max_line_bytes));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                debug!("update reader: cancellation received, stopping");
                return Ok(());
            }

            item = framed.next() => {
                match item {
                    None => {
                        // EOF — agent output closed cleanly.
                        debug!("update reader: EOF detected");
                        return Ok(());
                    }

                    Some(Err(AppError::Acp(msg))) => {
                        // Framing fault (line too long) — skip and continue.
                        warn!(error = msg.as_str(), "update reader: framing error, skipping line");
                    }

                    Some(Err(e)) => {
                        // I/O error on the underlying stream — non-recoverable.
                        warn!(error = %e, "update reader: IO error, stopping");
                        return Err(e);
                    }

                    Some(Ok(line)) => {
                        match parse_update_line(&line) {
                            Ok(Some(update)) => {
                                if update_tx.send(update).await.is_err() {
                                    debug!("update reader: update_tx closed, stopping");
                                    return Ok(());
                                }
                            }
                            Ok(None) => {
                                // Blank line, other method, or unknown tag.
                            }
                            Err(e) => {
                                warn!(error = %e, raw_line = %line, "update reader: parse error, skipping line");
                            }
                        }
                    }
                }
            }
        }
    }
}
