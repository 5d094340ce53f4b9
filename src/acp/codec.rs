//! NDJSON framing for the inbound agent stream.
//!
//! Wraps [`tokio_util::codec::LinesCodec`] with a configurable maximum line
//! length so an unterminated or runaway line from a misbehaving agent cannot
//! exhaust memory. Use as the codec parameter of
//! [`tokio_util::codec::FramedRead`].

use bytes::BytesMut;
use tokio_util::codec::{Decoder, LinesCodec, LinesCodecError};

use crate::{AppError, Result};

/// Default maximum accepted line length: 1 MiB.
pub const DEFAULT_MAX_LINE_BYTES: usize = 1_048_576;

/// NDJSON decoder for the inbound agent stream.
///
/// Each `\n`-terminated UTF-8 line is one complete notification. Lines
/// longer than the configured limit cause [`decode`](Decoder::decode) to
/// return [`AppError::Acp`]`("line too long: …")` rather than allocating.
#[derive(Debug)]
pub struct UpdateCodec {
    inner: LinesCodec,
    max_line_bytes: usize,
}

impl UpdateCodec {
    /// Create a codec with the [`DEFAULT_MAX_LINE_BYTES`] limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_line_bytes(DEFAULT_MAX_LINE_BYTES)
    }

    /// Create a codec accepting lines of at most `max_line_bytes` bytes.
    #[must_use]
    pub fn with_max_line_bytes(max_line_bytes: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_line_bytes),
            max_line_bytes,
        }
    }

    fn map_error(&self, e: LinesCodecError) -> AppError {
        match e {
            LinesCodecError::MaxLineLengthExceeded => AppError::Acp(format!(
                "line too long: exceeded {} bytes",
                self.max_line_bytes
            )),
            LinesCodecError::Io(io_err) => AppError::Io(io_err.to_string()),
        }
    }
}

impl Default for UpdateCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for UpdateCodec {
    type Item = String;
    type Error = AppError;

    /// Decode the next newline-terminated line from `src`.
    ///
    /// Returns `Ok(None)` when `src` holds no complete line yet (buffering).
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        self.inner.decode(src).map_err(|e| self.map_error(e))
    }

    /// Decode the final, possibly unterminated line at EOF.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        self.inner.decode_eof(src).map_err(|e| self.map_error(e))
    }
}
