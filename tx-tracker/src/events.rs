//! Subscriber fan-out shared by the store change feed and the notifier.

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Per-subscriber channel capacity. A subscriber that falls this far
/// behind starts losing events rather than stalling the writer.
const SUBSCRIBER_BUFFER: usize = 256;

/// Fans events out to any number of subscribers.
///
/// Emitting is non-blocking: events are delivered with `try_send`, a full
/// subscriber drops the event, and a disconnected subscriber is pruned on
/// the next emit.
pub struct SubscriberHub<E: Clone + Send + 'static> {
    subscribers: DashMap<String, mpsc::Sender<E>>,
}

impl<E: Clone + Send + 'static> SubscriberHub<E> {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
        }
    }

    /// Register a new subscriber and return (subscriber_id, receiver).
    pub fn subscribe(&self) -> (String, mpsc::Receiver<E>) {
        let subscriber_id = Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);
        self.subscribers.insert(subscriber_id.clone(), tx);
        log::debug!("[Events] Subscriber {} registered", subscriber_id);
        (subscriber_id, rx)
    }

    /// Remove a subscriber.
    pub fn unsubscribe(&self, subscriber_id: &str) {
        self.subscribers.remove(subscriber_id);
        log::debug!("[Events] Subscriber {} removed", subscriber_id);
    }

    /// Deliver `event` to every current subscriber.
    pub fn emit(&self, event: E) {
        let mut disconnected = Vec::new();

        for entry in self.subscribers.iter() {
            match entry.value().try_send(event.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!(
                        "[Events] Channel full for subscriber {}, dropping event",
                        entry.key()
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    disconnected.push(entry.key().clone());
                }
            }
        }

        for subscriber_id in disconnected {
            self.subscribers.remove(&subscriber_id);
            log::debug!("[Events] Removed disconnected subscriber {}", subscriber_id);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E: Clone + Send + 'static> Default for SubscriberHub<E> {
    fn default() -> Self {
        Self::new()
    }
}
