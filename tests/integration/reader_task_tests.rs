//! Integration tests for the update reader task over in-memory streams.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use acp_relay::acp::codec::DEFAULT_MAX_LINE_BYTES;
use acp_relay::acp::reader::run_reader;
use acp_relay::stream::SessionUpdate;

/// The reader forwards every recognized update in order and returns `Ok(())`
/// on clean EOF.
#[tokio::test]
async fn reader_forwards_updates_in_order_until_eof() {
    let script = concat!(
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"agent_message_chunk","content":{"type":"text","text":"Hi"}}}}"#,
        "\n",
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"tool_call","toolCallId":"t1","status":"pending"}}}"#,
        "\n",
    );
    let (tx, mut rx) = mpsc::channel(8);

    run_reader(
        script.as_bytes(),
        tx,
        DEFAULT_MAX_LINE_BYTES,
        CancellationToken::new(),
    )
    .await
    .expect("clean EOF must return Ok");

    let first = rx.recv().await.expect("first update must arrive");
    assert!(matches!(first, SessionUpdate::AgentMessageChunk { .. }));

    let second = rx.recv().await.expect("second update must arrive");
    assert!(matches!(second, SessionUpdate::ToolCall(_)));

    assert!(rx.recv().await.is_none(), "channel must close after EOF");
}

/// Malformed lines and unknown methods are skipped without terminating the
/// reader; the updates around them still arrive.
#[tokio::test]
async fn faulty_lines_are_skipped_not_fatal() {
    let script = concat!(
        "not-valid-json{{{\n",
        r#"{"method":"session/ping","params":{}}"#,
        "\n",
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"agent_message_chunk","content":{"type":"text","text":"survived"}}}}"#,
        "\n",
    );
    let (tx, mut rx) = mpsc::channel(8);

    run_reader(
        script.as_bytes(),
        tx,
        DEFAULT_MAX_LINE_BYTES,
        CancellationToken::new(),
    )
    .await
    .expect("skippable faults must not fail the reader");

    let update = rx.recv().await.expect("trailing update must arrive");
    match update {
        SessionUpdate::AgentMessageChunk { content } => {
            assert!(matches!(
                content,
                acp_relay::stream::ContentBlock::Text { ref text } if text == "survived"
            ));
        }
        other => panic!("expected AgentMessageChunk, got: {other:?}"),
    }
}

/// Cancellation stops the reader promptly even with input left unread.
#[tokio::test]
async fn cancellation_stops_the_reader() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let (tx, mut rx) = mpsc::channel(8);

    let script = concat!(
        r#"{"method":"session/update","params":{"update":{"sessionUpdate":"agent_message_chunk","content":{"type":"text","text":"Hi"}}}}"#,
        "\n",
    );

    run_reader(
        script.as_bytes(),
        tx,
        DEFAULT_MAX_LINE_BYTES,
        cancel,
    )
    .await
    .expect("cancellation must return Ok");

    assert!(
        rx.recv().await.is_none(),
        "no updates must be forwarded after pre-cancelled start"
    );
}
