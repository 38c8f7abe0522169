use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::warn;

/// Number of undelivered values a slow listener may fall behind by before it
/// starts skipping the oldest ones.
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// One-to-many event relay.
///
/// Every live [`Subscription`] receives every published value, in publish
/// order. Listeners detach when their subscription is dropped or
/// [`Subscription::unsubscribe`]d, and stop counting toward
/// [`EventBus::listener_count`] at that point.
#[derive(Debug)]
pub struct EventBus<T> {
    sender: broadcast::Sender<T>,
}

impl<T: Clone> EventBus<T> {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes `value` to all current listeners.
    ///
    /// Returns how many listeners the value was queued for. Publishing with
    /// nobody listening is not an error; the value is simply dropped.
    pub fn publish(&self, value: T) -> usize {
        self.sender.send(value).unwrap_or(0)
    }

    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: Clone> Default for EventBus<T> {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}

/// A listener attached to an [`EventBus`].
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: broadcast::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    /// Waits for the next value.
    ///
    /// Returns `None` once the bus has been dropped and every queued value
    /// has been delivered.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            match self.receiver.recv().await {
                Ok(value) => return Some(value),
                Err(RecvError::Closed) => return None,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event bus listener lagged; skipping oldest values");
                }
            }
        }
    }

    /// Returns the next queued value without waiting.
    pub fn try_recv(&mut self) -> Option<T> {
        loop {
            match self.receiver.try_recv() {
                Ok(value) => return Some(value),
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "event bus listener lagged; skipping oldest values");
                }
            }
        }
    }

    /// Detaches this listener from the bus.
    pub fn unsubscribe(self) {
        drop(self.receiver);
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;

    #[tokio::test]
    async fn every_listener_sees_every_value_in_order() {
        let bus = EventBus::new(8);
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        assert_eq!(bus.publish(1), 2);
        assert_eq!(bus.publish(2), 2);

        assert_eq!(a.recv().await, Some(1));
        assert_eq!(a.recv().await, Some(2));
        assert_eq!(b.recv().await, Some(1));
        assert_eq!(b.recv().await, Some(2));
    }

    #[test]
    fn publish_without_listeners_is_dropped() {
        let bus = EventBus::new(4);
        assert_eq!(bus.publish("nobody"), 0);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn unsubscribe_detaches_immediately() {
        let bus: EventBus<u32> = EventBus::default();
        let a = bus.subscribe();
        let b = bus.subscribe();
        assert_eq!(bus.listener_count(), 2);

        a.unsubscribe();
        assert_eq!(bus.listener_count(), 1);
        drop(b);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn values_published_before_subscribing_are_not_replayed() {
        let bus = EventBus::new(4);
        let _early = bus.subscribe();
        bus.publish(1);
        let mut late = bus.subscribe();
        assert_eq!(late.try_recv(), None);
        bus.publish(2);
        assert_eq!(late.try_recv(), Some(2));
    }

    #[test]
    fn lagging_listener_skips_to_oldest_retained() {
        let bus = EventBus::new(2);
        let mut sub = bus.subscribe();
        for v in 0..5 {
            bus.publish(v);
        }
        assert_eq!(sub.try_recv(), Some(3));
        assert_eq!(sub.try_recv(), Some(4));
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn recv_ends_when_bus_dropped() {
        let bus = EventBus::new(4);
        let mut sub = bus.subscribe();
        bus.publish(7);
        drop(bus);
        assert_eq!(sub.recv().await, Some(7));
        assert_eq!(sub.recv().await, None);
    }
}
