//! The outbound transport seam to the host.
//!
//! Sends are fire-and-forget: the bridge serialises the envelope, posts it
//! towards the pinned host origin, and never waits for delivery or a reply.
//! Correlation, where a caller needs it, rides on the `kind` discriminator of
//! later inbound messages — there is no return channel at this layer.
//!
//! A failed post is a [`TransportError`].  The bridge swallows it at the send
//! boundary and records it in the error slot; nothing here is allowed to
//! propagate into the UI layer as a panic or a thrown failure.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::messages::Envelope;

pub mod mock;

/// Errors raised by the environment while posting to the host.
///
/// These are transport-level failures, not protocol errors: a host-reported
/// `ERROR` message travels inbound through classification instead.
#[derive(Debug, Error, PartialEq)]
pub enum TransportError {
    /// The environment rejected the post and said why.
    #[error("{0}")]
    Rejected(String),

    /// The post failed with no further detail.
    #[error("Failed to post message")]
    Failed,
}

/// The outbound posting surface towards the host.
///
/// Implemented by [`ChannelTransport`] for production-shaped embedding and by
/// [`mock::MockTransport`] for tests.
pub trait HostTransport {
    /// Serialises and posts one envelope to `target_origin`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the environment refuses or drops the
    /// post.  Callers must treat the failure as already delivered-or-lost;
    /// there is no retry at this layer.
    fn post(&mut self, envelope: &Envelope, target_origin: &str) -> Result<(), TransportError>;
}

// ── Channel-backed implementation ─────────────────────────────────────────────

/// One post as observed by the host side of the channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    /// The destination origin the envelope was addressed to.
    pub target_origin: String,
    /// The serialised envelope, exactly as it would cross the boundary.
    pub body: String,
}

/// A tokio-channel realisation of the host transport.
///
/// The host side holds the [`mpsc::UnboundedReceiver`]; a dropped receiver
/// means the environment can no longer deliver, which surfaces as
/// [`TransportError::Rejected`].
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<PostedMessage>,
}

impl ChannelTransport {
    /// Creates a transport and returns it together with the receiver the
    /// host side drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PostedMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl HostTransport for ChannelTransport {
    fn post(&mut self, envelope: &Envelope, target_origin: &str) -> Result<(), TransportError> {
        let body = serde_json::to_string(envelope).map_err(|_| TransportError::Failed)?;
        self.tx
            .send(PostedMessage {
                target_origin: target_origin.to_string(),
                body,
            })
            .map_err(|_| TransportError::Rejected("host channel is closed".to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
