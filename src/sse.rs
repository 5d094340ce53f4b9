//! Server-Sent Events framing for outbound chunks.
//!
//! Each [`StreamChunk`] becomes one `data: {json}\n\n` frame; the stream is
//! terminated by the conventional `data: [DONE]\n\n` sentinel. Chunk JSON is
//! always a single compact line, so no multi-line `data:` splitting is
//! needed.

use crate::stream::StreamChunk;
use crate::{AppError, Result};

/// Terminal frame signalling the end of the chunk stream.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Serialize one chunk as an SSE frame.
///
/// # Errors
///
/// Returns [`AppError::Acp`] if JSON serialization fails (should not occur
/// for [`StreamChunk`] values).
pub fn frame(chunk: &StreamChunk) -> Result<String> {
    let json = serde_json::to_string(chunk)
        .map_err(|e| AppError::Acp(format!("failed to serialize chunk: {e}")))?;
    Ok(format!("data: {json}\n\n"))
}
