#![forbid(unsafe_code)]

//! `acp-relay` — streaming translator from ACP session updates to UI
//! message-chunk streams.
//!
//! The crate centers on [`stream::StreamState`], a per-turn state machine that
//! converts Agent Client Protocol `session/update` events into an ordered
//! sequence of incremental message chunks while maintaining strict content
//! block lifecycle ordering. The surrounding modules supply the pipe-level
//! plumbing: NDJSON framing and parsing ([`acp`]), SSE serialization
//! ([`sse`]), and the end-to-end pump ([`relay`]).

pub mod acp;
pub mod config;
pub mod errors;
pub mod relay;
pub mod sse;
pub mod stream;

pub use config::RelayConfig;
pub use errors::{AppError, Result};
