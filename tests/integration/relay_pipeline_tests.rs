//! End-to-end relay tests: NDJSON update script in, SSE frame sequence out.

use std::io::Cursor;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use acp_relay::relay::run_relay;
use acp_relay::RelayConfig;

/// Run one turn over in-memory buffers and return the parsed `data:` frame
/// payloads, with the trailing `[DONE]` sentinel verified and stripped.
async fn relay_script(script: &'static str) -> Vec<Value> {
    let mut out = Cursor::new(Vec::new());
    run_relay(
        script.as_bytes(),
        &mut out,
        "msg-1".to_owned(),
        &RelayConfig::default(),
        CancellationToken::new(),
    )
    .await
    .expect("relay must complete the turn");

    let text = String::from_utf8(out.into_inner()).expect("output must be UTF-8");
    let mut frames: Vec<&str> = text
        .split("\n\n")
        .filter(|s| !s.is_empty())
        .map(|s| s.strip_prefix("data: ").expect("every frame has data prefix"))
        .collect();

    assert_eq!(frames.pop(), Some("[DONE]"), "stream must end with [DONE]");
    frames
        .into_iter()
        .map(|payload| serde_json::from_str(payload).expect("frame payload must be JSON"))
        .collect()
}

/// A text-only turn produces start, one bracketed block, finish.
#[tokio::test]
async fn text_turn_produces_bracketed_stream() {
    let script = concat!(
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"agent_message_chunk","content":{"type":"text","text":"Hi"}}}}"#,
        "\n",
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"agent_message_chunk","content":{"type":"text","text":" there"}}}}"#,
        "\n",
    );

    let frames = relay_script(script).await;

    assert_eq!(
        frames,
        vec![
            json!({"type": "start", "messageId": "msg-1"}),
            json!({"type": "text-start", "id": "msg-1-text-1"}),
            json!({"type": "text-delta", "id": "msg-1-text-1", "delta": "Hi"}),
            json!({"type": "text-delta", "id": "msg-1-text-1", "delta": " there"}),
            json!({"type": "text-end", "id": "msg-1-text-1"}),
            json!({"type": "finish"}),
        ],
    );
}

/// The full tool lifecycle (pending → in_progress → completed) relays as
/// announce, input, output — with block closes forced around the tool chunks.
#[tokio::test]
async fn tool_lifecycle_relays_end_to_end() {
    let script = concat!(
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"agent_message_chunk","content":{"type":"text","text":"Let me check."}}}}"#,
        "\n",
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"tool_call","toolCallId":"t1","title":"Read a file","status":"pending","extensionMeta":{"toolName":"read_file"}}}}"#,
        "\n",
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"tool_call_update","toolCallId":"t1","status":"in_progress","rawInput":{"x":1}}}}"#,
        "\n",
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"tool_call_update","toolCallId":"t1","status":"completed","rawOutput":"done"}}}"#,
        "\n",
    );

    let frames = relay_script(script).await;

    assert_eq!(
        frames,
        vec![
            json!({"type": "start", "messageId": "msg-1"}),
            json!({"type": "text-start", "id": "msg-1-text-1"}),
            json!({"type": "text-delta", "id": "msg-1-text-1", "delta": "Let me check."}),
            json!({"type": "text-end", "id": "msg-1-text-1"}),
            json!({
                "type": "tool-input-start",
                "toolCallId": "t1",
                "toolName": "read_file",
                "title": "Read a file",
            }),
            json!({
                "type": "tool-input-available",
                "toolCallId": "t1",
                "toolName": "unknown",
                "input": {"x": 1},
            }),
            json!({"type": "tool-output-available", "toolCallId": "t1", "output": "done"}),
            json!({"type": "finish"}),
        ],
    );
}

/// Untranslated updates (plan, mode changes, unknown tags) pass through the
/// pipeline without producing frames.
#[tokio::test]
async fn ignored_updates_produce_no_frames() {
    let script = concat!(
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"plan","entries":[{"content":"step 1"}]}}}"#,
        "\n",
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"current_mode_update","currentModeId":"plan"}}}"#,
        "\n",
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"usage_update","tokens":3}}}"#,
        "\n",
    );

    let frames = relay_script(script).await;

    assert_eq!(
        frames,
        vec![
            json!({"type": "start", "messageId": "msg-1"}),
            json!({"type": "finish"}),
        ],
    );
}

/// An empty input stream still produces a well-formed turn: start, finish,
/// `[DONE]`.
#[tokio::test]
async fn empty_input_still_closes_the_turn() {
    let frames = relay_script("").await;

    assert_eq!(
        frames,
        vec![
            json!({"type": "start", "messageId": "msg-1"}),
            json!({"type": "finish"}),
        ],
    );
}
