//! Infrastructure layer for plugin-ui-bridge.
//!
//! The infrastructure layer owns the two seams between the bridge and the
//! ambient environment, plus the async driver that connects them:
//!
//! - [`event_stream`] — the subscription onto the shared inbound message
//!   stream (and a channel-backed implementation for embedding in a tokio
//!   runtime)
//! - [`transport`] — the outbound post to the pinned host origin
//! - [`driver`] — the pump that gives one task exclusive ownership of a
//!   [`Bridge`](crate::Bridge) for its attached lifetime
//!
//! # What does NOT belong here?
//!
//! - Classification and connection-state rules (application layer)
//! - Message type definitions (domain layer)

pub mod driver;
pub mod event_stream;
pub mod transport;

// Re-export the primary entry points so embedders can call them concisely.
pub use driver::run_bridge;
pub use event_stream::{ChannelEventStream, EventStream, SubscriptionId};
pub use transport::{ChannelTransport, HostTransport, PostedMessage, TransportError};
