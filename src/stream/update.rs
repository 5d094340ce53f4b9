//! Inbound `session/update` wire records.
//!
//! One [`SessionUpdate`] is one increment of agent output, tagged by the
//! `sessionUpdate` discriminator on the wire. The enum is closed: variants the
//! relay does not translate are still modeled so that dispatch stays total,
//! and genuinely unknown tags are skipped at parse time by the reader rather
//! than rejected here.

use serde::Deserialize;
use serde_json::Value;

/// One incremental event from the upstream agent describing part of its
/// in-progress response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "sessionUpdate", rename_all = "snake_case")]
pub enum SessionUpdate {
    /// Incremental assistant message content.
    AgentMessageChunk {
        /// Content payload; non-text blocks are ignored.
        content: ContentBlock,
    },
    /// Incremental reasoning/thinking content.
    AgentThoughtChunk {
        /// Content payload; non-text blocks are ignored.
        content: ContentBlock,
    },
    /// Echo of user message content. Produces no outbound chunks.
    UserMessageChunk {
        /// Content payload (unused).
        content: ContentBlock,
    },
    /// First sighting of a tool invocation.
    ToolCall(ToolCallFields),
    /// Subsequent update to a previously seen tool invocation.
    ToolCallUpdate(ToolCallFields),
    /// Agent plan snapshot. Produces no outbound chunks.
    #[serde(rename_all = "camelCase")]
    Plan {
        /// Plan entries (unused).
        #[serde(default)]
        entries: Vec<Value>,
    },
    /// Slash-command availability update. Produces no outbound chunks.
    #[serde(rename_all = "camelCase")]
    AvailableCommandsUpdate {
        /// Available commands (unused).
        #[serde(default)]
        available_commands: Vec<Value>,
    },
    /// Session mode change. Produces no outbound chunks.
    #[serde(rename_all = "camelCase")]
    CurrentModeUpdate {
        /// Identifier of the newly active mode (unused).
        current_mode_id: String,
    },
}

/// A single content block inside a message or thought chunk.
///
/// Only text blocks are translated; every other block type (image, audio,
/// resource, …) deserializes to [`ContentBlock::Other`] and is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content.
    Text {
        /// The text payload.
        text: String,
    },
    /// Any non-text block type.
    #[serde(other)]
    Other,
}

/// Reported status of a tool invocation.
///
/// Unrecognized status strings deserialize to [`ToolCallStatus::Unknown`]
/// and are treated the same as an absent status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallStatus {
    /// Input is still being streamed by the model.
    Pending,
    /// The tool is executing.
    InProgress,
    /// The tool finished successfully.
    Completed,
    /// The tool failed.
    Failed,
    /// Any status string this relay does not recognize.
    #[serde(other)]
    Unknown,
}

/// Shared field set of `tool_call` and `tool_call_update` events.
///
/// Apart from `toolCallId`, every field is optional on the wire: the upstream
/// vendor evolved the format over time and different tool implementations
/// populate different subsets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallFields {
    /// Stable identifier of the tool invocation across updates.
    pub tool_call_id: String,
    /// Human-readable title for the invocation.
    #[serde(default)]
    pub title: Option<String>,
    /// Reported lifecycle status.
    #[serde(default)]
    pub status: Option<ToolCallStatus>,
    /// Raw tool input as provided by the model.
    #[serde(default)]
    pub raw_input: Option<Value>,
    /// Raw tool output, when the tool reports it directly.
    #[serde(default)]
    pub raw_output: Option<Value>,
    /// Structured content entries describing the tool result.
    #[serde(default)]
    pub content: Vec<ToolCallContent>,
    /// Vendor extension metadata carrying richer tool data.
    #[serde(default)]
    pub extension_meta: Option<ExtensionMeta>,
}

/// One entry in a tool call's `content[]` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolCallContent {
    /// A nested content block.
    Content {
        /// The wrapped block; only text-typed blocks contribute to output
        /// resolution.
        content: ContentBlock,
    },
    /// Diff, terminal, or any other entry type (unused).
    #[serde(other)]
    Other,
}

/// Vendor extension metadata attached to tool events (`extensionMeta`).
///
/// Unknown vendor fields are ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionMeta {
    /// Machine-readable tool name, preferred over the display title.
    #[serde(default)]
    pub tool_name: Option<String>,
    /// Structured tool response, used when `rawOutput` is absent.
    #[serde(default)]
    pub raw_response: Option<Value>,
}
