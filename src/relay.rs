//! End-to-end relay pump.
//!
//! Wires one inbound agent stream to one outbound SSE stream for a single
//! assistant turn: emits the opening `start` chunk, feeds every parsed
//! [`SessionUpdate`](crate::stream::SessionUpdate) through a
//! [`StreamState`], writes the resulting chunks as SSE frames in order, and
//! closes the turn with `finish` and the `[DONE]` sentinel. If the reader
//! fails mid-turn an `error` chunk is appended before the turn is closed.

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::acp::reader::run_reader;
use crate::config::RelayConfig;
use crate::stream::{StreamChunk, StreamState};
use crate::{sse, AppError, Result};

/// Relay one turn from `input` (NDJSON session updates) to `output` (SSE
/// frames).
///
/// Runs until `input` reaches EOF or `cancel` fires. Chunk order within and
/// across updates is preserved exactly as produced by [`StreamState`].
///
/// # Errors
///
/// Returns [`AppError::Io`] if writing a frame to `output` fails. Reader
/// faults do not fail the relay; they surface to the client as an `error`
/// chunk before the terminal `finish`.
pub async fn run_relay<R, W>(
    input: R,
    mut output: W,
    message_id: String,
    config: &RelayConfig,
    cancel: CancellationToken,
) -> Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    let (update_tx, mut update_rx) = mpsc::channel(config.channel_capacity);
    let max_line_bytes = config.max_line_bytes;
    let reader =
        tokio::spawn(async move { run_reader(input, update_tx, max_line_bytes, cancel).await });

    let mut state = StreamState::new(message_id);
    write_chunk(&mut output, &StreamChunk::start(state.message_id())).await?;

    while let Some(update) = update_rx.recv().await {
        for chunk in state.handle_update(&update) {
            write_chunk(&mut output, &chunk).await?;
        }
    }

    // The channel closed: the reader finished. Surface a reader fault as an
    // error chunk before closing the turn.
    match reader.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            warn!(error = %e, "relay: agent stream failed");
            write_chunk(&mut output, &StreamChunk::error(e.to_string())).await?;
        }
        Err(e) => {
            warn!(error = %e, "relay: reader task panicked");
            write_chunk(&mut output, &StreamChunk::error("agent stream failed")).await?;
        }
    }

    for chunk in state.finish() {
        write_chunk(&mut output, &chunk).await?;
    }

    output
        .write_all(sse::DONE_FRAME.as_bytes())
        .await
        .map_err(|e| AppError::Io(format!("write failed: {e}")))?;
    output
        .flush()
        .await
        .map_err(|e| AppError::Io(format!("flush failed: {e}")))?;

    debug!("relay: turn complete");
    Ok(())
}

/// Serialize one chunk and write its SSE frame to `output`.
async fn write_chunk<W>(output: &mut W, chunk: &StreamChunk) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let frame = sse::frame(chunk)?;
    output
        .write_all(frame.as_bytes())
        .await
        .map_err(|e| AppError::Io(format!("write failed: {e}")))?;
    Ok(())
}
