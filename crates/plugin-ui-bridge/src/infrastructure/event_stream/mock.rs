//! Mock event stream for unit testing.
//!
//! Lets tests verify the bridge's listener discipline — one registration per
//! attach, one release per detach, no leaks on double-detach — without any
//! ambient environment.

use std::collections::HashSet;

use uuid::Uuid;

use super::{EventStream, SubscriptionId};

/// A mock [`EventStream`] that counts registrations and releases.
#[derive(Debug, Default)]
pub struct MockEventStream {
    active: HashSet<SubscriptionId>,
    register_calls: u32,
    unregister_calls: u32,
}

impl MockEventStream {
    /// Creates a mock stream with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `register` calls observed.
    pub fn register_calls(&self) -> u32 {
        self.register_calls
    }

    /// Total number of `unregister` calls observed, including no-op releases.
    pub fn unregister_calls(&self) -> u32 {
        self.unregister_calls
    }

    /// Number of subscriptions that are currently live.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// `true` if the given subscription is currently live.
    pub fn is_active(&self, id: SubscriptionId) -> bool {
        self.active.contains(&id)
    }
}

impl EventStream for MockEventStream {
    fn register(&mut self) -> SubscriptionId {
        self.register_calls += 1;
        let id = Uuid::new_v4();
        self.active.insert(id);
        id
    }

    fn unregister(&mut self, id: SubscriptionId) -> bool {
        self.unregister_calls += 1;
        self.active.remove(&id)
    }
}
