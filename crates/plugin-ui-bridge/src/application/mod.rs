//! Application layer for plugin-ui-bridge.
//!
//! The application layer owns the bridge's state machine: it knows *what*
//! happens on every inbound event and outbound send, but delegates *how*
//! messages travel to the infrastructure seams.
//!
//! # Responsibilities
//!
//! - Tracking the connection flag, the error slot, and the pending queue
//! - Classifying raw inbound events into their single outcome
//! - Gating outbound sends on the connection flag
//!
//! # What does NOT belong here?
//!
//! - Channel plumbing, subscriptions, or posting mechanics (infrastructure)
//! - Wire type definitions (domain)

pub mod bridge;

pub use bridge::Bridge;
