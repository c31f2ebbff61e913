//! Delivery helpers shared by the use cases.
//!
//! A failed delivery is never an error for the use case that caused it; the
//! affected session is either gone or too slow, and its own reader will
//! report the disconnect.

use crate::domain::{ClientId, MessagePusher};

/// Push one reply to the originating client.
pub(crate) async fn push_reply(pusher: &dyn MessagePusher, client_id: &ClientId, content: &str) {
    if let Err(e) = pusher.push_to(client_id, content).await {
        tracing::warn!("Failed to reply to client '{}': {}", client_id, e);
    }
}

/// Deliver one line to every target.
pub(crate) async fn broadcast_line(pusher: &dyn MessagePusher, targets: Vec<ClientId>, content: &str) {
    if targets.is_empty() {
        return;
    }
    if let Err(e) = pusher.broadcast(targets, content).await {
        tracing::warn!("Failed to broadcast: {}", e);
    }
}
