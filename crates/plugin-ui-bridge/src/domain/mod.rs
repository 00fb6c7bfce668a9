//! Domain layer for plugin-ui-bridge.
//!
//! The domain layer contains pure protocol types with no dependencies on I/O,
//! channels, or external frameworks.  This makes them easy to test in
//! isolation and portable to any runtime.
//!
//! # What belongs in the domain layer?
//!
//! - The wire message types ([`messages::Message`], [`messages::Envelope`])
//! - The classification result ([`messages::InboundMessage`])
//! - The bridge configuration ([`config::BridgeConfig`])
//!
//! # What does NOT belong here?
//!
//! - Channel plumbing or subscriptions (infrastructure)
//! - The connection state machine (application)

pub mod config;
pub mod messages;

pub use config::BridgeConfig;
pub use messages::{Envelope, InboundMessage, Message};
