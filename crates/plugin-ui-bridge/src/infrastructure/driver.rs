//! The ambient-loop driver.
//!
//! The bridge's correctness rests on a single-owner execution model: no two
//! inbound classifications may interleave, and nothing else may touch the
//! connection flag, the error slot, or the pending queue while the bridge is
//! attached.  Under tokio that model is realised by giving exactly one task
//! ownership of the `Bridge` and pumping every raw event through it here.

use tracing::info;

use crate::application::Bridge;

use super::event_stream::ChannelEventStream;

/// Drives one bridge for its whole attached lifetime.
///
/// Attaches the bridge, classifies every raw event the ambient stream
/// delivers, and detaches once the stream closes (all senders dropped).
/// The caller keeps ownership of the bridge and can inspect its queue,
/// error slot, and flag after the driver returns; state is reset by the
/// final detach.
///
/// Events are processed strictly in arrival order and run to completion
/// relative to each other — there is no concurrency inside this loop.
pub async fn run_bridge(bridge: &mut Bridge, stream: &mut ChannelEventStream) {
    bridge.attach(stream);

    while let Some(raw) = stream.next_event().await {
        bridge.on_event(&raw);
    }

    info!("ambient stream closed; detaching bridge");
    bridge.detach(stream);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
