//! Per-turn stream state machine.
//!
//! [`StreamState`] tracks which content block (text or reasoning) is open and
//! which lifecycle state each tool invocation last reported, and turns each
//! inbound [`SessionUpdate`] into an ordered run of [`StreamChunk`]s.
//!
//! One instance exists per assistant turn, owned exclusively by a single
//! writer; there is no interior locking. Events must arrive in upstream
//! order — that guarantee belongs to the transport feeding this machine.

use std::collections::HashMap;

use serde_json::Value;

use crate::stream::chunk::StreamChunk;
use crate::stream::tool::{self, ToolLifecycle};
use crate::stream::update::{ContentBlock, SessionUpdate, ToolCallFields};

/// Mutable translation state for one assistant turn.
///
/// Invariants:
/// - at most one text block and one reasoning block are open at any time,
///   and never both simultaneously;
/// - every emitted `*-start` is eventually paired with exactly one `*-end`
///   for the same block id (callers must invoke [`finish`](Self::finish)
///   once the turn completes);
/// - block identifiers are unique within the owning message and stable for
///   the lifetime of the open block.
#[derive(Debug)]
pub struct StreamState {
    message_id: String,
    open_text_block: Option<String>,
    open_reasoning_block: Option<String>,
    text_seq: u64,
    reasoning_seq: u64,
    tool_states: HashMap<String, ToolLifecycle>,
}

impl StreamState {
    /// Create a fresh state for the turn producing `message_id`.
    #[must_use]
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            open_text_block: None,
            open_reasoning_block: None,
            text_seq: 0,
            reasoning_seq: 0,
            tool_states: HashMap::new(),
        }
    }

    /// Identifier of the message this turn produces.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Identifier of the currently open text block, if any.
    #[must_use]
    pub fn open_text_block(&self) -> Option<&str> {
        self.open_text_block.as_deref()
    }

    /// Identifier of the currently open reasoning block, if any.
    #[must_use]
    pub fn open_reasoning_block(&self) -> Option<&str> {
        self.open_reasoning_block.as_deref()
    }

    /// Last-emitted lifecycle state for `tool_call_id`, if it has been seen.
    #[must_use]
    pub fn tool_lifecycle(&self, tool_call_id: &str) -> Option<ToolLifecycle> {
        self.tool_states.get(tool_call_id).copied()
    }

    /// Translate one session update into zero or more outbound chunks.
    ///
    /// Total over the full update variant space: variants the relay does not
    /// translate return an empty vec and leave the state untouched.
    pub fn handle_update(&mut self, update: &SessionUpdate) -> Vec<StreamChunk> {
        match update {
            SessionUpdate::AgentMessageChunk { content } => self.on_text(content),
            SessionUpdate::AgentThoughtChunk { content } => self.on_reasoning(content),
            SessionUpdate::ToolCall(fields) | SessionUpdate::ToolCallUpdate(fields) => {
                self.on_tool(fields)
            }
            SessionUpdate::UserMessageChunk { .. }
            | SessionUpdate::Plan { .. }
            | SessionUpdate::AvailableCommandsUpdate { .. }
            | SessionUpdate::CurrentModeUpdate { .. } => Vec::new(),
        }
    }

    /// Close any open blocks (text first) and emit the terminal `finish`.
    ///
    /// Safe to call on an already-finished state: both close steps become
    /// no-ops and another `finish` chunk is emitted. Callers are responsible
    /// for calling this exactly once per turn.
    pub fn finish(&mut self) -> Vec<StreamChunk> {
        let mut chunks = self.close_open_blocks();
        chunks.push(StreamChunk::Finish);
        chunks
    }

    /// Handle incremental assistant text.
    fn on_text(&mut self, content: &ContentBlock) -> Vec<StreamChunk> {
        let ContentBlock::Text { text } = content else {
            return Vec::new();
        };

        let mut chunks = Vec::new();

        // Content-type switch: a reasoning block cannot stay open under text.
        if let Some(id) = self.open_reasoning_block.take() {
            chunks.push(StreamChunk::ReasoningEnd { id });
        }

        let id = if let Some(id) = &self.open_text_block {
            id.clone()
        } else {
            self.text_seq += 1;
            let id = format!("{}-text-{}", self.message_id, self.text_seq);
            self.open_text_block = Some(id.clone());
            chunks.push(StreamChunk::TextStart { id: id.clone() });
            id
        };

        chunks.push(StreamChunk::TextDelta {
            id,
            delta: text.clone(),
        });
        chunks
    }

    /// Handle incremental reasoning text. Mirror of [`on_text`](Self::on_text).
    fn on_reasoning(&mut self, content: &ContentBlock) -> Vec<StreamChunk> {
        let ContentBlock::Text { text } = content else {
            return Vec::new();
        };

        let mut chunks = Vec::new();

        if let Some(id) = self.open_text_block.take() {
            chunks.push(StreamChunk::TextEnd { id });
        }

        let id = if let Some(id) = &self.open_reasoning_block {
            id.clone()
        } else {
            self.reasoning_seq += 1;
            let id = format!("{}-reasoning-{}", self.message_id, self.reasoning_seq);
            self.open_reasoning_block = Some(id.clone());
            chunks.push(StreamChunk::ReasoningStart { id: id.clone() });
            id
        };

        chunks.push(StreamChunk::ReasoningDelta {
            id,
            delta: text.clone(),
        });
        chunks
    }

    /// Handle a `tool_call` or `tool_call_update` event.
    ///
    /// Tool chunks never appear inside a content block: both open blocks are
    /// force-closed (text first) before any tool chunk is emitted.
    fn on_tool(&mut self, fields: &ToolCallFields) -> Vec<StreamChunk> {
        let mut chunks = self.close_open_blocks();

        let current = tool::lifecycle_for(fields.status);
        let previous = self.tool_states.get(&fields.tool_call_id).copied();
        let name = tool::tool_name(fields.title.as_deref(), fields.extension_meta.as_ref());

        // First sighting always announces the call, regardless of status.
        if previous.is_none() {
            chunks.push(StreamChunk::ToolInputStart {
                tool_call_id: fields.tool_call_id.clone(),
                tool_name: name.clone(),
                title: tool::title(fields.title.as_deref()),
            });
        }

        // Only the state actually reached gets its chunk; skipped
        // intermediate states emit nothing, and unchanged re-delivery is a
        // no-op.
        match current {
            ToolLifecycle::InputAvailable if previous != Some(ToolLifecycle::InputAvailable) => {
                chunks.push(StreamChunk::ToolInputAvailable {
                    tool_call_id: fields.tool_call_id.clone(),
                    tool_name: name,
                    input: fields
                        .raw_input
                        .clone()
                        .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
                });
            }
            ToolLifecycle::OutputAvailable if previous != Some(ToolLifecycle::OutputAvailable) => {
                let output = tool::output(
                    fields.raw_output.as_ref(),
                    &fields.content,
                    fields.extension_meta.as_ref(),
                );
                chunks.push(StreamChunk::ToolOutputAvailable {
                    tool_call_id: fields.tool_call_id.clone(),
                    output: output.unwrap_or(Value::Null),
                });
            }
            ToolLifecycle::OutputError if previous != Some(ToolLifecycle::OutputError) => {
                let output = tool::output(
                    fields.raw_output.as_ref(),
                    &fields.content,
                    fields.extension_meta.as_ref(),
                );
                chunks.push(StreamChunk::ToolOutputError {
                    tool_call_id: fields.tool_call_id.clone(),
                    error_text: tool::error_text(output),
                });
            }
            _ => {}
        }

        // Record unconditionally so unchanged re-delivery stays a no-op.
        self.tool_states
            .insert(fields.tool_call_id.clone(), current);
        chunks
    }

    /// Emit `text-end` / `reasoning-end` for whichever blocks are open, text
    /// first, and clear both markers.
    fn close_open_blocks(&mut self) -> Vec<StreamChunk> {
        let mut chunks = Vec::new();
        if let Some(id) = self.open_text_block.take() {
            chunks.push(StreamChunk::TextEnd { id });
        }
        if let Some(id) = self.open_reasoning_block.take() {
            chunks.push(StreamChunk::ReasoningEnd { id });
        }
        chunks
    }
}
