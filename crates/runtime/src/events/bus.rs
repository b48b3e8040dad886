//! Single-channel event bus implementation.

use tokio::sync::broadcast;

use battle_core::BattleEvent;

/// Cloneable publisher for battle events.
///
/// Publishing is best-effort: with no subscribers the event is dropped, and a
/// subscriber that falls more than `capacity` events behind observes
/// [`broadcast::error::RecvError::Lagged`].
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<BattleEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: BattleEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for battle events");
        }
    }

    /// Subscribe to every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let bus = EventBus::with_capacity(4);
        bus.publish(BattleEvent::PlayerWon);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn subscribers_only_see_later_events() {
        let bus = EventBus::with_capacity(4);
        bus.publish(BattleEvent::PlayerLost);

        let mut rx = bus.subscribe();
        bus.publish(BattleEvent::PlayerWon);

        assert_eq!(rx.try_recv().ok(), Some(BattleEvent::PlayerWon));
        assert!(rx.try_recv().is_err());
    }
}
