//! Unit tests for tool metadata extraction precedence.
//!
//! The precedence chains here are a wire contract: older and alternate tool
//! implementations populate different fields for the same payload, and
//! reordering the fallbacks silently blanks tool output for a subset of
//! tools.

use serde_json::json;

use acp_relay::stream::tool::{error_text, output, title, tool_name, TOOL_FAILED_TEXT};
use acp_relay::stream::update::ToolCallContent;
use acp_relay::stream::ExtensionMeta;

fn meta(tool_name: Option<&str>, raw_response: Option<serde_json::Value>) -> ExtensionMeta {
    ExtensionMeta {
        tool_name: tool_name.map(ToOwned::to_owned),
        raw_response,
    }
}

fn text_content(text: &str) -> ToolCallContent {
    serde_json::from_value(json!({"type": "content", "content": {"type": "text", "text": text}}))
        .expect("text content entry must deserialize")
}

// ── tool_name ────────────────────────────────────────────────────────────────

/// Extension tool name wins over the title when present and non-empty.
#[test]
fn extension_tool_name_wins_over_title() {
    let m = meta(Some("read_file"), None);
    assert_eq!(tool_name(Some("Reading a file"), Some(&m)), "read_file");
}

/// An empty extension tool name falls through to the title.
#[test]
fn empty_extension_tool_name_falls_through_to_title() {
    let m = meta(Some(""), None);
    assert_eq!(tool_name(Some("Reading a file"), Some(&m)), "Reading a file");
}

/// With neither extension name nor title, the literal `"unknown"` is used.
#[test]
fn missing_name_and_title_yield_unknown() {
    assert_eq!(tool_name(None, None), "unknown");
}

/// `title` is an identity passthrough.
#[test]
fn title_is_identity_passthrough() {
    assert_eq!(title(Some("Reading a file")), Some("Reading a file".into()));
    assert_eq!(title(None), None);
}

// ── output ───────────────────────────────────────────────────────────────────

/// `rawOutput` wins over every other source when present and non-null.
#[test]
fn raw_output_wins_when_non_null() {
    let m = meta(None, Some(json!({"from": "extension"})));
    let content = vec![text_content("from content")];

    let resolved = output(Some(&json!("from rawOutput")), &content, Some(&m));
    assert_eq!(resolved, Some(json!("from rawOutput")));
}

/// A JSON `null` rawOutput counts as absent and falls through to the
/// extension response.
#[test]
fn null_raw_output_falls_through_to_extension_response() {
    let m = meta(None, Some(json!({"from": "extension"})));

    let resolved = output(Some(&json!(null)), &[], Some(&m));
    assert_eq!(resolved, Some(json!({"from": "extension"})));
}

/// Without rawOutput or extension response, text-typed content entries are
/// newline-joined; non-text entries are skipped.
#[test]
fn content_text_segments_are_newline_joined() {
    let content = vec![
        text_content("line one"),
        serde_json::from_value(json!({"type": "diff", "path": "a.rs"}))
            .expect("diff entry must deserialize"),
        text_content("line two"),
    ];

    let resolved = output(None, &content, None);
    assert_eq!(resolved, Some(json!("line one\nline two")));
}

/// With no source populated, resolution yields nothing.
#[test]
fn no_resolvable_output_yields_none() {
    assert_eq!(output(None, &[], None), None);
}

// ── error_text ───────────────────────────────────────────────────────────────

/// String outputs pass through unquoted; structured outputs render as
/// compact JSON; nothing resolvable falls back to the fixed text.
#[test]
fn error_text_coercion() {
    assert_eq!(error_text(Some(json!("boom"))), "boom");
    assert_eq!(error_text(Some(json!({"code": 1}))), "{\"code\":1}");
    assert_eq!(error_text(None), TOOL_FAILED_TEXT);
}
