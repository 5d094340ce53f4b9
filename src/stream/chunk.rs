//! Outbound message-chunk wire records.
//!
//! A [`StreamChunk`] is one element of the client-facing incremental stream.
//! On the wire each chunk is a JSON object tagged by a kebab-case `type`
//! field with camelCase payload fields, e.g.
//! `{"type":"text-delta","id":"msg-1-text-1","delta":"Hi"}`.

use serde::Serialize;
use serde_json::Value;

/// One element of the outbound incremental message stream.
///
/// Block-scoped variants carry the block or tool identifier they apply to.
/// Ordering within and across [`StreamState`](crate::stream::StreamState)
/// calls is significant and must be preserved by the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamChunk {
    /// Opens one assistant turn.
    #[serde(rename_all = "camelCase")]
    Start {
        /// Identifier of the message this turn produces.
        message_id: String,
    },
    /// Opens a text block.
    TextStart {
        /// Block identifier, unique within the owning message.
        id: String,
    },
    /// Appends text to an open text block.
    TextDelta {
        /// Identifier of the open block.
        id: String,
        /// Incremental text payload.
        delta: String,
    },
    /// Closes a text block.
    TextEnd {
        /// Identifier of the block being closed.
        id: String,
    },
    /// Opens a reasoning block.
    ReasoningStart {
        /// Block identifier, unique within the owning message.
        id: String,
    },
    /// Appends text to an open reasoning block.
    ReasoningDelta {
        /// Identifier of the open block.
        id: String,
        /// Incremental reasoning payload.
        delta: String,
    },
    /// Closes a reasoning block.
    ReasoningEnd {
        /// Identifier of the block being closed.
        id: String,
    },
    /// Announces the existence of a tool invocation.
    #[serde(rename_all = "camelCase")]
    ToolInputStart {
        /// Tool invocation identifier.
        tool_call_id: String,
        /// Resolved tool name.
        tool_name: String,
        /// Human-readable title, when the event provided one.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// The tool's input is fully known and execution has begun.
    #[serde(rename_all = "camelCase")]
    ToolInputAvailable {
        /// Tool invocation identifier.
        tool_call_id: String,
        /// Resolved tool name.
        tool_name: String,
        /// Resolved input payload; an empty object when the event carried
        /// none.
        input: Value,
    },
    /// The tool completed and produced output.
    #[serde(rename_all = "camelCase")]
    ToolOutputAvailable {
        /// Tool invocation identifier.
        tool_call_id: String,
        /// Resolved output payload; `null` when nothing was resolvable.
        output: Value,
    },
    /// The tool failed.
    #[serde(rename_all = "camelCase")]
    ToolOutputError {
        /// Tool invocation identifier.
        tool_call_id: String,
        /// Human-readable failure description.
        error_text: String,
    },
    /// Closes the turn. Terminal.
    Finish,
    /// Reports an upstream failure to the client.
    #[serde(rename_all = "camelCase")]
    Error {
        /// Human-readable error description.
        error_text: String,
    },
}

impl StreamChunk {
    /// Construct the `start` chunk opening a turn for `message_id`.
    #[must_use]
    pub fn start(message_id: impl Into<String>) -> Self {
        Self::Start {
            message_id: message_id.into(),
        }
    }

    /// Construct a standalone `error` chunk.
    ///
    /// Stateless: unlike `finish`, constructing an error does not close any
    /// open content blocks. Callers that want closed blocks must call
    /// [`StreamState::finish`](crate::stream::StreamState::finish) separately.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::Error {
            error_text: text.into(),
        }
    }
}
