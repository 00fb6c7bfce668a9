//! The bridge state machine.
//!
//! One [`Bridge`] owns three cells for its attached lifetime: the connection
//! flag, the error slot, and the pending queue.  Nothing else may mutate
//! them.  The full transition diagram is small:
//!
//! ```text
//! {unattached} ──attach──▶ {attached, connected}
//!                               │  ▲
//!        inbound CONNECTED ─────┘  │ (sets the same flag; see attach docs)
//!                                  │
//! {attached, *} ──detach──▶ {unattached, disconnected, queue/error cleared}
//! ```
//!
//! # Single ownership
//!
//! All mutation happens through `&mut self` from whoever owns the bridge —
//! in production, the one task running
//! [`run_bridge`](crate::infrastructure::driver::run_bridge).  That single
//! owner is what makes the three cells correct without a lock; a design that
//! shares a `Bridge` across tasks must wrap it in a mutex or keep it inside
//! one actor.

use std::collections::VecDeque;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::config::BridgeConfig;
use crate::domain::messages::{Envelope, InboundMessage, Message, UNKNOWN_ERROR_FALLBACK};
use crate::infrastructure::event_stream::{EventStream, SubscriptionId};
use crate::infrastructure::transport::HostTransport;

/// The UI-side message bridge.
///
/// Constructible, never a process-wide singleton: a UI layer controls the
/// one lifetime it needs, and tests build as many instances as they like
/// without interference.
///
/// # Example
///
/// ```rust
/// use plugin_ui_bridge::{Bridge, BridgeConfig, Message};
/// use plugin_ui_bridge::infrastructure::event_stream::mock::MockEventStream;
/// use plugin_ui_bridge::infrastructure::transport::mock::MockTransport;
/// use serde_json::json;
///
/// let mut stream = MockEventStream::new();
/// let mut transport = MockTransport::new();
/// let mut bridge = Bridge::new(BridgeConfig::default());
///
/// bridge.attach(&mut stream);
/// bridge.on_event(&json!({"pluginMessage": {"kind": "SELECTION_CHANGED"}}));
/// assert_eq!(bridge.pending_len(), 1);
///
/// bridge.send(Message::new("PING"), &mut transport);
/// assert_eq!(transport.post_count(), 1);
///
/// bridge.detach(&mut stream);
/// assert!(!bridge.is_connected());
/// assert_eq!(bridge.pending_len(), 0);
/// ```
pub struct Bridge {
    config: BridgeConfig,
    /// The live listener registration, present exactly while attached.
    subscription: Option<SubscriptionId>,
    connected: bool,
    /// At most one current error; a new error overwrites the previous one.
    last_error: Option<String>,
    /// Classified application messages awaiting a consumer, in arrival order.
    pending: VecDeque<Message>,
}

impl Bridge {
    /// Creates a detached, disconnected bridge.
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            subscription: None,
            connected: false,
            last_error: None,
            pending: VecDeque::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Attaches the bridge to the ambient stream.
    ///
    /// Registers exactly one listener and sets the connection flag.  Calling
    /// `attach` while already attached is a no-op: no second listener is
    /// registered and no state changes.
    ///
    /// The flag is set optimistically here, before any host acknowledgement;
    /// the inbound `CONNECTED` signal later sets the same flag.  This mirrors
    /// the host contract as shipped — there is no separate "host
    /// acknowledged" state.
    pub fn attach(&mut self, stream: &mut dyn EventStream) {
        if self.subscription.is_some() {
            debug!("attach called while already attached; ignoring");
            return;
        }
        let id = stream.register();
        self.subscription = Some(id);
        self.connected = true;
        info!(subscription = %id, "bridge attached to ambient stream");
    }

    /// Detaches the bridge from the ambient stream and resets all owned
    /// state.
    ///
    /// The listener is released *before* the state is cleared, so an event
    /// delivered concurrently with teardown cannot repopulate a cleared
    /// queue or error slot.  Detaching twice is safe: the second call
    /// releases nothing and leaves state identical to the first.
    pub fn detach(&mut self, stream: &mut dyn EventStream) {
        if let Some(id) = self.subscription.take() {
            stream.unregister(id);
            info!(subscription = %id, "bridge detached from ambient stream");
        }
        self.connected = false;
        self.pending.clear();
        self.last_error = None;
    }

    // ── Inbound path ──────────────────────────────────────────────────────────

    /// Classifies one raw event from the shared channel.
    ///
    /// Exactly one of three outcomes occurs for a message addressed to the
    /// bridge: the connection flag is set (`CONNECTED`), the error slot is
    /// overwritten (`ERROR`), or the message is appended to the pending
    /// queue (any other kind).  Events not addressed to the bridge are
    /// logged at debug level and dropped.
    ///
    /// Never panics and never returns an error: the channel is shared, and
    /// foreign or malformed traffic must not destabilise the bridge.
    pub fn on_event(&mut self, raw: &Value) {
        match InboundMessage::classify(raw) {
            Some(InboundMessage::Connected) => {
                self.connected = true;
                info!("host acknowledged the channel");
            }
            Some(InboundMessage::Error { message }) => {
                let message = message.unwrap_or_else(|| UNKNOWN_ERROR_FALLBACK.to_string());
                warn!(%message, "host reported an error");
                self.last_error = Some(message);
            }
            Some(InboundMessage::Application(message)) => {
                debug!(kind = %message.kind, "queued application message");
                self.pending.push_back(message);
            }
            None => {
                debug!(%raw, "ignoring event not addressed to the bridge");
            }
        }
    }

    // ── Outbound path ─────────────────────────────────────────────────────────

    /// Posts one message to the host, gated on the connection flag.
    ///
    /// While disconnected the message is dropped — not queued, not retried —
    /// with a warning log and no state change.  While connected the message
    /// is wrapped in the channel envelope and posted to the pinned host
    /// origin; a transport failure is recorded in the error slot and never
    /// propagated to the caller.
    pub fn send(&mut self, message: Message, transport: &mut dyn HostTransport) {
        if !self.connected {
            warn!(kind = %message.kind, "not connected to host; dropping outbound message");
            return;
        }

        let envelope = Envelope::new(message);
        if let Err(error) = transport.post(&envelope, &self.config.host_origin) {
            let recorded = error.to_string();
            warn!(error = %recorded, "posting to host failed");
            self.last_error = Some(recorded);
        }
    }

    // ── Consumer-facing surface ───────────────────────────────────────────────

    /// `true` while the bridge considers the host reachable.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The current error, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of application messages awaiting consumption.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns the oldest pending message.
    pub fn pop_pending(&mut self) -> Option<Message> {
        self.pending.pop_front()
    }

    /// Removes and returns all pending messages in arrival order.
    pub fn drain_pending(&mut self) -> Vec<Message> {
        self.pending.drain(..).collect()
    }

    /// Resets the error slot.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Empties the pending queue.
    pub fn clear_queue(&mut self) {
        self.pending.clear();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
