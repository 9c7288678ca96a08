#[cfg(test)]
use mockall::automock;

use tokio::sync::mpsc;
use tracing::warn;

use crate::ServerEvent;

/// Fan-out seam to the notification layer. Fire-and-forget: the core never
/// waits for an acknowledgment and never retries a publish.
#[cfg_attr(test, automock)]
pub trait EventBus: Send + Sync + 'static {
    fn publish(
        &self,
        event: ServerEvent,
    );
}

/// In-process bus over an unbounded channel. The transport layer drains the
/// receiver and fans events out to held long-poll connections.
pub struct ChannelEventBus {
    tx: mpsc::UnboundedSender<ServerEvent>,
}

impl ChannelEventBus {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventBus for ChannelEventBus {
    fn publish(
        &self,
        event: ServerEvent,
    ) {
        // Delivery is not guaranteed; with every receiver gone the event is
        // dropped, not an error.
        if let Err(e) = self.tx.send(event) {
            warn!("change event dropped, no live subscribers: {}", e);
        }
    }
}
