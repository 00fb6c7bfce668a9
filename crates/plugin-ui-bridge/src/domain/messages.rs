//! Wire message types for the host-facing envelope protocol.
//!
//! The host editor and the plugin UI share one untyped message channel, and
//! that channel also carries traffic that has nothing to do with this bridge.
//! Well-formed bridge traffic is a JSON object of the shape:
//!
//! ```json
//! {"pluginMessage":{"kind":"SELECTION_CHANGED","payload":{"node_ids":["1:2"]}}}
//! ```
//!
//! Anything that does not carry a `pluginMessage` envelope with a string
//! `kind` is *foreign traffic*: it is tolerated and dropped, never treated as
//! an error.
//!
//! # Reserved kinds
//!
//! Two kind values have protocol-level meaning to the bridge itself:
//!
//! | Kind        | Meaning                              | Payload contract        |
//! |-------------|--------------------------------------|-------------------------|
//! | `CONNECTED` | Host acknowledged the channel        | none                    |
//! | `ERROR`     | Host reported a failure              | `{ "message"?: string }`|
//!
//! Every other kind is application-defined and opaque to this crate; such
//! messages are queued for a consumer outside the bridge.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Reserved kinds and fallbacks ──────────────────────────────────────────────

/// Reserved kind: the host has acknowledged the channel.
pub const KIND_CONNECTED: &str = "CONNECTED";

/// Reserved kind: the host reported a failure.
pub const KIND_ERROR: &str = "ERROR";

/// Error-slot text used when an `ERROR` message carries no `payload.message`.
pub const UNKNOWN_ERROR_FALLBACK: &str = "Unknown error occurred";

// ── Message and envelope ──────────────────────────────────────────────────────

/// A single bridge message: a string discriminator plus optional structured
/// payload.
///
/// The same shape is used in both directions.  Inbound, the bridge classifies
/// on `kind`; outbound, the caller constructs the message and the bridge
/// wraps it in an [`Envelope`] before posting.
///
/// # Serde representation
///
/// ```json
/// {"kind":"RESIZE","payload":{"width":320,"height":480}}
/// {"kind":"PING"}
/// ```
///
/// `payload` is omitted entirely when absent, matching what the host expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The string discriminator identifying the message's semantic type.
    pub kind: String,

    /// Arbitrary structured data; contents are opaque to the bridge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Message {
    /// Creates a message with no payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    /// Creates a message carrying a structured payload.
    pub fn with_payload(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload: Some(payload),
        }
    }
}

/// The wrapper the shared channel expects around every bridge message.
///
/// The envelope exists because the channel is shared: the `pluginMessage` key
/// is how bridge traffic is told apart from everything else travelling on the
/// same channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// The wrapped bridge message.
    #[serde(rename = "pluginMessage")]
    pub plugin_message: Message,
}

impl Envelope {
    /// Wraps a message in the channel envelope.
    pub fn new(message: Message) -> Self {
        Self {
            plugin_message: message,
        }
    }
}

// ── Inbound classification ────────────────────────────────────────────────────

/// The classification of one inbound event addressed to the bridge.
///
/// Exactly one variant applies to any well-formed inbound message, which is
/// what lets the bridge guarantee the three outcomes (flag set, error slot
/// set, queue appended) are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// The host acknowledged the channel (`kind == "CONNECTED"`).
    Connected,

    /// The host reported a failure (`kind == "ERROR"`).
    Error {
        /// `payload.message` when the host supplied one.
        message: Option<String>,
    },

    /// Any application-defined kind, queued for a consumer outside the bridge.
    Application(Message),
}

impl InboundMessage {
    /// Classifies one raw event from the shared channel.
    ///
    /// Returns `None` when the event is not addressed to the bridge: no
    /// `pluginMessage` envelope, no `kind`, or a non-string `kind`.  That is
    /// expected background noise on a shared channel, not an error.
    ///
    /// A JSON `null` payload is treated the same as an absent payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plugin_ui_bridge::domain::messages::InboundMessage;
    /// use serde_json::json;
    ///
    /// let raw = json!({"pluginMessage": {"kind": "CONNECTED"}});
    /// assert_eq!(InboundMessage::classify(&raw), Some(InboundMessage::Connected));
    ///
    /// // Foreign traffic on the shared channel classifies to None.
    /// assert_eq!(InboundMessage::classify(&json!({"source": "devtools"})), None);
    /// ```
    pub fn classify(raw: &Value) -> Option<InboundMessage> {
        let envelope = raw.get("pluginMessage")?;
        let kind = envelope.get("kind")?.as_str()?;
        let payload = envelope
            .get("payload")
            .filter(|value| !value.is_null())
            .cloned();

        Some(match kind {
            KIND_CONNECTED => InboundMessage::Connected,
            KIND_ERROR => InboundMessage::Error {
                message: payload
                    .as_ref()
                    .and_then(|p| p.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            _ => InboundMessage::Application(Message {
                kind: kind.to_string(),
                payload,
            }),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
