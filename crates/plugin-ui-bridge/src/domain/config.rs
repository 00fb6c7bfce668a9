//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for the bridge's runtime
//! settings.  There is deliberately very little to configure: the only value
//! is the host origin, and it is pinned.
//!
//! # Design rationale
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads inside the domain) means a UI layer can construct several
//! independent bridges — tests rely on this — and the origin a bridge posts
//! to is decided once, at construction, never from anything that arrived on
//! the shared channel.

/// The production host origin.
///
/// Outbound envelopes are posted to exactly this origin.  Pinning it is a
/// cross-origin safety constraint: the bridge never posts to a wildcard
/// (`"*"`) origin and never derives the destination from runtime input, so a
/// foreign frame on the shared channel cannot redirect plugin traffic to
/// itself.
pub const DEFAULT_HOST_ORIGIN: &str = "https://app.canvashub.io";

/// All runtime configuration for the bridge.
///
/// Build this struct once when constructing a [`Bridge`](crate::Bridge).
/// The default is the production host origin; tests substitute their own
/// fixed origin string.
///
/// # Example
///
/// ```rust
/// use plugin_ui_bridge::domain::config::{BridgeConfig, DEFAULT_HOST_ORIGIN};
///
/// let cfg = BridgeConfig::default();
/// assert_eq!(cfg.host_origin, DEFAULT_HOST_ORIGIN);
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// The origin all outbound envelopes are posted to.
    ///
    /// Fixed for the life of the bridge.  Must never be a wildcard and must
    /// never be taken from an inbound message.
    pub host_origin: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host_origin: DEFAULT_HOST_ORIGIN.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
