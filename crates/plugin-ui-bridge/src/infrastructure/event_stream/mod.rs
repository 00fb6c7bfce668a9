//! The ambient event stream subscription seam.
//!
//! A plugin UI does not own its inbound message stream; the surrounding
//! environment does, and that stream carries traffic for every listener in
//! the surface.  The bridge therefore *subscribes* rather than *reads*: it
//! registers exactly one listener on attach and releases exactly that
//! listener on detach.  Leaked listeners are the classic bug in this kind of
//! code, so the subscription is an explicit handle — every registration must
//! be matched by one release, and tests count both sides through
//! [`mock::MockEventStream`].
//!
//! # Delivery model
//!
//! Delivery is pull-based: the environment (or the
//! [`driver`](crate::infrastructure::driver)) feeds raw events into
//! [`Bridge::on_event`](crate::Bridge::on_event).  Registration does not
//! install a callback; it records that a live listener exists, which is the
//! piece detach must release.

use std::collections::HashSet;

use serde_json::Value;
use tokio::sync::mpsc;
use uuid::Uuid;

pub mod mock;

/// Identifier for one listener registration on the ambient stream.
pub type SubscriptionId = Uuid;

/// The subscription surface of the ambient message stream.
///
/// Implemented by [`ChannelEventStream`] for production-shaped embedding and
/// by [`mock::MockEventStream`] for tests.
pub trait EventStream {
    /// Registers a listener and returns its subscription handle.
    fn register(&mut self) -> SubscriptionId;

    /// Releases a previously registered listener.
    ///
    /// Returns `false` when `id` is not a live subscription (already
    /// released, or never issued by this stream).  Releasing twice is safe
    /// and the second call is a no-op.
    fn unregister(&mut self, id: SubscriptionId) -> bool;
}

// ── Channel-backed implementation ─────────────────────────────────────────────

/// A tokio-channel realisation of the ambient stream.
///
/// The environment holds the [`mpsc::UnboundedSender`] and pushes every raw
/// channel event (as untyped JSON) into it; the owner of the stream pulls
/// events out with [`next_event`](ChannelEventStream::next_event) and hands
/// them to the bridge.  The channel is unbounded because the ambient loop
/// never blocks on delivery.
pub struct ChannelEventStream {
    rx: mpsc::UnboundedReceiver<Value>,
    listeners: HashSet<SubscriptionId>,
}

impl ChannelEventStream {
    /// Creates a stream and returns it together with the event sender the
    /// environment uses to deliver raw events.
    pub fn new() -> (Self, mpsc::UnboundedSender<Value>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let stream = Self {
            rx,
            listeners: HashSet::new(),
        };
        (stream, tx)
    }

    /// Awaits the next raw event.
    ///
    /// Returns `None` once every sender has been dropped, which is how the
    /// environment signals teardown to the
    /// [`driver`](crate::infrastructure::driver).
    pub async fn next_event(&mut self) -> Option<Value> {
        self.rx.recv().await
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl EventStream for ChannelEventStream {
    fn register(&mut self) -> SubscriptionId {
        let id = Uuid::new_v4();
        self.listeners.insert(id);
        id
    }

    fn unregister(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
