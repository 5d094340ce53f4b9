//! Streaming translation core.
//!
//! Converts Agent Client Protocol `session/update` events into an ordered
//! sequence of client-facing message chunks. The translation is a pure
//! in-memory state transition: no I/O, no locking, no async.
//!
//! Submodules:
//! - `update`: inbound `session/update` wire records.
//! - `chunk`: outbound [`StreamChunk`] wire records and constructors.
//! - `tool`: tool lifecycle classification and metadata extraction.
//! - `state`: the per-turn [`StreamState`] machine tying it all together.
//!
//! Callers allocate one [`StreamState`] per assistant turn, feed it every
//! update belonging to that turn in arrival order, and serialize the returned
//! chunks in the order produced. The state is never shared across turns.

pub mod chunk;
pub mod state;
pub mod tool;
pub mod update;

pub use chunk::StreamChunk;
pub use state::StreamState;
pub use tool::ToolLifecycle;
pub use update::{ContentBlock, ExtensionMeta, SessionUpdate, ToolCallFields, ToolCallStatus};
