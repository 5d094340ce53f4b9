//! Agent Client Protocol (ACP) inbound stream handling.
//!
//! The relay consumes a newline-delimited JSON stream of `session/update`
//! notifications from an agent process. This module frames that stream and
//! parses each line into a [`SessionUpdate`](crate::stream::SessionUpdate):
//! - `codec`: [`LinesCodec`](tokio_util::codec::LinesCodec)-based NDJSON
//!   framing with a max-line-length guard.
//! - `reader`: async read task that parses notifications and forwards
//!   updates through a channel.

pub mod codec;
pub mod reader;
