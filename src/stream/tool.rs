//! Tool lifecycle classification and metadata extraction.
//!
//! Everything here is a pure function of its inputs. The extraction fallback
//! chains exist because the upstream vendor evolved its wire format over
//! time: older and alternate tool implementations populate different fields
//! for the same semantic payload, and the precedence order below is what
//! downstream consumers depend on.

use serde_json::Value;

use crate::stream::update::{ContentBlock, ExtensionMeta, ToolCallContent, ToolCallStatus};

/// Fallback error text when a failed tool call resolves no output.
pub const TOOL_FAILED_TEXT: &str = "Tool call failed";

/// Canonical lifecycle phase of a tool invocation, from the consumer's
/// perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolLifecycle {
    /// Input is still streaming from the model.
    InputStreaming,
    /// Input is complete and the tool is executing.
    InputAvailable,
    /// The tool completed with output.
    OutputAvailable,
    /// The tool failed.
    OutputError,
}

/// Map a reported status to its canonical lifecycle state.
///
/// Total: absent and unrecognized statuses map to the most conservative
/// state, [`ToolLifecycle::InputStreaming`].
#[must_use]
pub fn lifecycle_for(status: Option<ToolCallStatus>) -> ToolLifecycle {
    match status {
        Some(ToolCallStatus::InProgress) => ToolLifecycle::InputAvailable,
        Some(ToolCallStatus::Completed) => ToolLifecycle::OutputAvailable,
        Some(ToolCallStatus::Failed) => ToolLifecycle::OutputError,
        Some(ToolCallStatus::Pending | ToolCallStatus::Unknown) | None => {
            ToolLifecycle::InputStreaming
        }
    }
}

/// Resolve a stable tool name for a tool event.
///
/// Precedence: extension-provided tool name when present and non-empty, then
/// the human-readable title, then the literal `"unknown"`.
#[must_use]
pub fn tool_name(title: Option<&str>, meta: Option<&ExtensionMeta>) -> String {
    if let Some(name) = meta.and_then(|m| m.tool_name.as_deref()) {
        if !name.is_empty() {
            return name.to_owned();
        }
    }

    title.map_or_else(|| "unknown".to_owned(), ToOwned::to_owned)
}

/// Resolve the display title for a tool event.
///
/// Identity passthrough, kept as its own step so the name/title precedence
/// stays observable in isolation.
#[must_use]
pub fn title(title: Option<&str>) -> Option<String> {
    title.map(ToOwned::to_owned)
}

/// Resolve a tool event's output payload.
///
/// Precedence:
/// 1. `rawOutput`, when present and non-null;
/// 2. the extension's structured `rawResponse`;
/// 3. newline-joined text of all text-typed blocks nested in `content[]`;
/// 4. nothing.
#[must_use]
pub fn output(
    raw_output: Option<&Value>,
    content: &[ToolCallContent],
    meta: Option<&ExtensionMeta>,
) -> Option<Value> {
    if let Some(value) = raw_output {
        if !value.is_null() {
            return Some(value.clone());
        }
    }

    if let Some(response) = meta.and_then(|m| m.raw_response.as_ref()) {
        return Some(response.clone());
    }

    let texts: Vec<&str> = content
        .iter()
        .filter_map(|entry| match entry {
            ToolCallContent::Content {
                content: ContentBlock::Text { text },
            } => Some(text.as_str()),
            _ => None,
        })
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(Value::String(texts.join("\n")))
    }
}

/// Coerce a resolved output value into human-readable error text.
///
/// String values pass through unquoted; any other JSON value is rendered
/// compactly. Falls back to [`TOOL_FAILED_TEXT`] when nothing resolved.
#[must_use]
pub fn error_text(output: Option<Value>) -> String {
    match output {
        Some(Value::String(text)) => text,
        Some(value) => value.to_string(),
        None => TOOL_FAILED_TEXT.to_owned(),
    }
}
