//! Integration tests for the bridge lifecycle and classification contract.
//!
//! These exercise the crate through its public surface only, the way an
//! embedding UI layer would: construct a bridge, attach it to a stream,
//! deliver raw channel events, send outbound messages, and tear down.

use plugin_ui_bridge::infrastructure::event_stream::mock::MockEventStream;
use plugin_ui_bridge::infrastructure::transport::mock::MockTransport;
use plugin_ui_bridge::infrastructure::{run_bridge, ChannelEventStream, ChannelTransport};
use plugin_ui_bridge::{Bridge, BridgeConfig, Message};
use serde_json::json;

/// Installs a fmt subscriber so failing tests print the bridge's logs.
///
/// `try_init` because the subscriber is process-global and tests run in one
/// process; only the first caller wins.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

fn test_bridge() -> Bridge {
    init_tracing();
    Bridge::new(BridgeConfig {
        host_origin: "https://host.test".to_string(),
    })
}

// ── Connection lifecycle ──────────────────────────────────────────────────────

#[test]
fn test_connected_signal_marks_bridge_connected() {
    // Activate first, then the host acknowledges.
    let mut stream = MockEventStream::new();
    let mut bridge = test_bridge();
    bridge.attach(&mut stream);

    bridge.on_event(&json!({"pluginMessage": {"kind": "CONNECTED"}}));

    assert!(bridge.is_connected());
}

#[test]
fn test_connected_signal_alone_marks_bridge_connected() {
    // The host signal sets the flag even without a prior attach; both paths
    // set the same flag.
    let mut bridge = test_bridge();

    bridge.on_event(&json!({"pluginMessage": {"kind": "CONNECTED"}}));

    assert!(bridge.is_connected());
}

#[test]
fn test_teardown_resets_everything_and_is_idempotent() {
    // Detach with a populated queue, twice in a row.
    let mut stream = MockEventStream::new();
    let mut bridge = test_bridge();
    bridge.attach(&mut stream);
    bridge.on_event(&json!({"pluginMessage": {"kind": "A"}}));
    bridge.on_event(&json!({"pluginMessage": {"kind": "B"}}));
    assert!(bridge.is_connected());
    assert_eq!(bridge.pending_len(), 2);

    bridge.detach(&mut stream);
    bridge.detach(&mut stream);

    assert!(!bridge.is_connected());
    assert_eq!(bridge.pending_len(), 0);
    assert_eq!(bridge.last_error(), None);
    // Exactly one listener was ever registered and exactly one released.
    assert_eq!(stream.register_calls(), 1);
    assert_eq!(stream.unregister_calls(), 1);
    assert_eq!(stream.active_count(), 0);
}

#[test]
fn test_attach_detach_attach_registers_a_fresh_listener() {
    let mut stream = MockEventStream::new();
    let mut bridge = test_bridge();

    bridge.attach(&mut stream);
    bridge.detach(&mut stream);
    bridge.attach(&mut stream);

    assert!(bridge.is_connected());
    assert_eq!(stream.register_calls(), 2);
    assert_eq!(stream.active_count(), 1);
}

// ── Classification exclusivity ────────────────────────────────────────────────

#[test]
fn test_each_inbound_message_has_exactly_one_outcome() {
    // Walk one message of each class through a fresh bridge and check
    // that only the expected cell changed.
    let mut bridge = test_bridge();
    bridge.on_event(&json!({"pluginMessage": {"kind": "CONNECTED"}}));
    assert!(bridge.is_connected());
    assert_eq!(bridge.pending_len(), 0);
    assert_eq!(bridge.last_error(), None);

    let mut bridge = test_bridge();
    bridge.on_event(&json!({"pluginMessage": {"kind": "ERROR", "payload": {"message": "e"}}}));
    assert!(!bridge.is_connected());
    assert_eq!(bridge.pending_len(), 0);
    assert_eq!(bridge.last_error(), Some("e"));

    let mut bridge = test_bridge();
    bridge.on_event(&json!({"pluginMessage": {"kind": "APP_EVENT"}}));
    assert!(!bridge.is_connected());
    assert_eq!(bridge.pending_len(), 1);
    assert_eq!(bridge.last_error(), None);

    // Malformed input: no outcome at all.
    let mut bridge = test_bridge();
    bridge.on_event(&json!({}));
    assert!(!bridge.is_connected());
    assert_eq!(bridge.pending_len(), 0);
    assert_eq!(bridge.last_error(), None);
}

#[test]
fn test_mixed_traffic_session() {
    // Reserved signals, application messages, and foreign noise interleaved
    // the way a real shared channel delivers them.
    let mut stream = MockEventStream::new();
    let mut bridge = test_bridge();
    bridge.attach(&mut stream);

    bridge.on_event(&json!({"source": "devtools", "ping": true}));
    bridge.on_event(&json!({"pluginMessage": {"kind": "CONNECTED"}}));
    bridge.on_event(&json!({"pluginMessage": {"kind": "SELECTION_CHANGED", "payload": {"ids": [1]}}}));
    bridge.on_event(&json!({"pluginMessage": {"kind": "ERROR", "payload": {"message": "export failed"}}}));
    bridge.on_event(&json!({"pluginMessage": {"kind": "DOC_CHANGED"}}));
    bridge.on_event(&json!(null));

    assert!(bridge.is_connected());
    assert_eq!(bridge.last_error(), Some("export failed"));
    let kinds: Vec<String> = bridge.drain_pending().into_iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec!["SELECTION_CHANGED", "DOC_CHANGED"]);
}

#[test]
fn test_error_slot_keeps_only_the_latest_error() {
    let mut bridge = test_bridge();

    bridge.on_event(&json!({"pluginMessage": {"kind": "ERROR", "payload": {"message": "first"}}}));
    bridge.on_event(&json!({"pluginMessage": {"kind": "ERROR", "payload": {"message": "second"}}}));

    assert_eq!(bridge.last_error(), Some("second"));

    // Clearing leaves the slot absent.
    bridge.clear_error();
    assert_eq!(bridge.last_error(), None);
}

// ── Send gating and origin pinning ────────────────────────────────────────────

#[test]
fn test_sends_while_disconnected_touch_nothing() {
    let mut transport = MockTransport::new();
    let mut bridge = test_bridge();

    for _ in 0..5 {
        bridge.send(Message::new("PING"), &mut transport);
    }

    assert_eq!(transport.post_count(), 0);
    assert_eq!(bridge.pending_len(), 0);
    assert_eq!(bridge.last_error(), None);
}

#[test]
fn test_every_post_targets_the_configured_origin() {
    let mut stream = MockEventStream::new();
    let mut transport = MockTransport::new();
    let mut bridge = test_bridge();
    bridge.attach(&mut stream);

    bridge.send(Message::new("A"), &mut transport);
    bridge.send(Message::with_payload("B", json!({"n": 1})), &mut transport);
    bridge.send(Message::new("C"), &mut transport);

    assert_eq!(transport.post_count(), 3);
    for (origin, _) in transport.posts() {
        assert_eq!(origin, "https://host.test");
    }
}

// ── End-to-end over the channel-backed infrastructure ─────────────────────────

#[tokio::test]
async fn test_session_over_channel_stream_and_transport() {
    // Arrange: environment side of both channels
    let (mut stream, events_tx) = ChannelEventStream::new();
    let (mut transport, mut host_rx) = ChannelTransport::new();
    let mut bridge = test_bridge();

    bridge.attach(&mut stream);

    // Host acknowledges, then pushes one application message.
    events_tx
        .send(json!({"pluginMessage": {"kind": "CONNECTED"}}))
        .unwrap();
    events_tx
        .send(json!({"pluginMessage": {"kind": "SELECTION_CHANGED", "payload": {"ids": [7]}}}))
        .unwrap();
    for _ in 0..2 {
        let raw = stream.next_event().await.expect("event pending");
        bridge.on_event(&raw);
    }

    // Act: the UI answers with an export request.
    bridge.send(
        Message::with_payload("EXPORT", json!({"format": "png"})),
        &mut transport,
    );

    // Assert: the host side sees one serialised envelope at the pinned origin.
    let posted = host_rx.recv().await.expect("one post delivered");
    assert_eq!(posted.target_origin, "https://host.test");
    let decoded: serde_json::Value = serde_json::from_str(&posted.body).unwrap();
    assert_eq!(decoded["pluginMessage"]["kind"], "EXPORT");
    assert_eq!(decoded["pluginMessage"]["payload"]["format"], "png");

    // And the queued application message is drainable by the UI.
    let queued = bridge.pop_pending().expect("one message queued");
    assert_eq!(queued.kind, "SELECTION_CHANGED");

    bridge.detach(&mut stream);
    assert_eq!(stream.listener_count(), 0);
}

#[tokio::test]
async fn test_send_after_host_side_gone_records_transport_error() {
    let (mut stream, _events_tx) = ChannelEventStream::new();
    let (mut transport, host_rx) = ChannelTransport::new();
    let mut bridge = test_bridge();
    bridge.attach(&mut stream);

    // The host side of the transport disappears mid-session.
    drop(host_rx);
    bridge.send(Message::new("PING"), &mut transport);

    // The failure was swallowed into the error slot, not propagated.
    assert_eq!(bridge.last_error(), Some("host channel is closed"));
    assert!(bridge.is_connected());
}

#[tokio::test]
async fn test_driver_owns_the_bridge_until_the_stream_closes() {
    let (mut stream, events_tx) = ChannelEventStream::new();
    let mut bridge = test_bridge();

    events_tx
        .send(json!({"pluginMessage": {"kind": "CONNECTED"}}))
        .unwrap();
    events_tx
        .send(json!({"pluginMessage": {"kind": "A"}}))
        .unwrap();
    drop(events_tx);

    run_bridge(&mut bridge, &mut stream).await;

    // The driver attached, pumped, and detached: final state is fully reset.
    assert!(!bridge.is_connected());
    assert_eq!(bridge.pending_len(), 0);
    assert_eq!(bridge.last_error(), None);
    assert_eq!(stream.listener_count(), 0);
}
