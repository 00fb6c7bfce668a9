//! # plugin-ui-bridge
//!
//! UI-side message bridge for the plugin sandbox.
//!
//! Plugin UIs run inside a sandboxed surface (an iframe-like container) and
//! can reach the host editor only through an asynchronous, untyped message
//! channel that is shared with unrelated traffic.  This crate owns the UI
//! side of that contract: it classifies raw inbound events, tracks the
//! connection state, records host-reported and transport errors, and gates
//! outbound sends on the connection flag.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Host editor (JSON envelopes over the shared message channel)
//!         ↕
//! [plugin-ui-bridge]
//!   ├── domain/           Pure types: Message, Envelope, InboundMessage, BridgeConfig
//!   ├── application/      The Bridge state machine (classification + gated send)
//!   └── infrastructure/
//!         ├── event_stream/ Ambient message stream subscription (tokio mpsc)
//!         ├── transport/    Outbound post to the pinned host origin
//!         └── driver/       Async pump that owns one Bridge for its lifetime
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no external dependencies beyond serde (no I/O, no async).
//! - `application` depends on `domain` and the infrastructure *traits* only.
//! - `infrastructure` depends on all other layers plus `tokio`.
//!
//! # Message classification
//!
//! Every raw event on the shared channel is routed into exactly one of three
//! disjoint outcomes:
//!
//! ```text
//! kind == "CONNECTED"  → connection flag set
//! kind == "ERROR"      → error slot overwritten
//! any other kind       → appended to the pending queue (arrival order)
//! no resolvable kind   → foreign traffic; logged and dropped, never an error
//! ```

/// Domain layer: pure protocol types (no I/O).
pub mod domain;

/// Application layer: the `Bridge` state machine.
pub mod application;

/// Infrastructure layer: event stream, host transport, and the async driver.
pub mod infrastructure;

// Re-export the most-used types at the crate root so callers can write
// `plugin_ui_bridge::Bridge` instead of `plugin_ui_bridge::application::bridge::Bridge`.
pub use application::bridge::Bridge;
pub use domain::config::{BridgeConfig, DEFAULT_HOST_ORIGIN};
pub use domain::messages::{
    Envelope, InboundMessage, Message, KIND_CONNECTED, KIND_ERROR, UNKNOWN_ERROR_FALLBACK,
};
pub use infrastructure::event_stream::{EventStream, SubscriptionId};
pub use infrastructure::transport::{HostTransport, PostedMessage, TransportError};
