//! Mock host transport for unit testing.
//!
//! Records every post so tests can assert on gating (zero transport calls
//! while disconnected) and on origin pinning, and can be primed to fail the
//! next post to exercise the error-slot capture path.

use crate::domain::messages::Envelope;

use super::{HostTransport, TransportError};

/// A mock [`HostTransport`] that records posts instead of delivering them.
#[derive(Debug, Default)]
pub struct MockTransport {
    posts: Vec<(String, Envelope)>,
    fail_next: Option<TransportError>,
}

impl MockTransport {
    /// Creates a mock transport that accepts every post.
    pub fn new() -> Self {
        Self::default()
    }

    /// Primes the mock to fail the next post with `error`.
    ///
    /// Only the next post fails; subsequent posts succeed again.
    pub fn fail_next_with(&mut self, error: TransportError) {
        self.fail_next = Some(error);
    }

    /// Number of successful posts recorded.
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// The recorded posts as `(target_origin, envelope)` pairs, in order.
    pub fn posts(&self) -> &[(String, Envelope)] {
        &self.posts
    }
}

impl HostTransport for MockTransport {
    fn post(&mut self, envelope: &Envelope, target_origin: &str) -> Result<(), TransportError> {
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }
        self.posts
            .push((target_origin.to_string(), envelope.clone()));
        Ok(())
    }
}
