//! Registry of live real-time subscribers.
//!
//! The registry is the only shared mutable state in the server. All
//! mutation goes through [`SubscriberRegistry::register`] /
//! [`SubscriberRegistry::unregister`]; [`SubscriberRegistry::broadcast`]
//! fans an event out to every current subscriber with per-subscriber
//! failure isolation. A failed send is logged and skipped -- it does not
//! remove the subscriber, since only the connection's own receive loop
//! knows when the peer is actually gone.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::warn;

use drivenest_core::PushEvent;

/// Identifier of a registered subscriber.
pub type SubscriberId = u64;

/// A single push delivery failed.
#[derive(Debug, Error)]
#[error("push failed: {0}")]
pub struct PushError(pub String);

/// One real-time subscriber's send half.
///
/// The WebSocket layer implements this over its sink; tests implement it
/// with in-memory mocks.
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Deliver one event to this subscriber.
    async fn push(&self, event: &PushEvent) -> Result<(), PushError>;
}

/// Process-wide set of live real-time subscribers.
#[derive(Default)]
pub struct SubscriberRegistry {
    next_id: AtomicU64,
    subscribers: RwLock<HashMap<SubscriberId, Arc<dyn PushChannel>>>,
}

impl SubscriberRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a newly opened connection and return its id.
    pub async fn register(&self, channel: Arc<dyn PushChannel>) -> SubscriberId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.write().await.insert(id, channel);
        id
    }

    /// Remove a connection. Returns `false` if it was already gone.
    pub async fn unregister(&self, id: SubscriberId) -> bool {
        self.subscribers.write().await.remove(&id).is_some()
    }

    /// Send an event to every currently registered subscriber and return
    /// the number of successful deliveries.
    ///
    /// The subscriber set is snapshotted up front so the lock is not held
    /// across sends. Every per-subscriber send completes (or fails) before
    /// this returns; failures are logged and do not affect the rest of
    /// the set.
    pub async fn broadcast(&self, event: &PushEvent) -> usize {
        let snapshot: Vec<(SubscriberId, Arc<dyn PushChannel>)> = {
            let subscribers = self.subscribers.read().await;
            subscribers
                .iter()
                .map(|(id, channel)| (*id, Arc::clone(channel)))
                .collect()
        };

        let mut delivered = 0;
        for (id, channel) in snapshot {
            match channel.push(event).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(subscriber = id, error = %e, "push notification failed");
                }
            }
        }
        delivered
    }

    /// Number of currently registered subscribers.
    pub async fn len(&self) -> usize {
        self.subscribers.read().await.len()
    }

    /// Whether no subscribers are registered.
    pub async fn is_empty(&self) -> bool {
        self.subscribers.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    /// Records every event it receives.
    #[derive(Default)]
    struct RecordingChannel {
        events: Mutex<Vec<PushEvent>>,
    }

    #[async_trait]
    impl PushChannel for RecordingChannel {
        async fn push(&self, event: &PushEvent) -> Result<(), PushError> {
            self.events.lock().await.push(event.clone());
            Ok(())
        }
    }

    /// Fails every send.
    struct BrokenChannel;

    #[async_trait]
    impl PushChannel for BrokenChannel {
        async fn push(&self, _event: &PushEvent) -> Result<(), PushError> {
            Err(PushError("connection reset".into()))
        }
    }

    #[tokio::test]
    async fn register_and_unregister_track_membership() {
        let registry = SubscriberRegistry::new();
        assert!(registry.is_empty().await);

        let id = registry.register(Arc::new(RecordingChannel::default())).await;
        assert_eq!(registry.len().await, 1);

        assert!(registry.unregister(id).await);
        assert!(!registry.unregister(id).await);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let registry = SubscriberRegistry::new();
        let a = Arc::new(RecordingChannel::default());
        let b = Arc::new(RecordingChannel::default());
        registry.register(Arc::clone(&a) as Arc<dyn PushChannel>).await;
        registry.register(Arc::clone(&b) as Arc<dyn PushChannel>).await;

        let event = PushEvent::thumbnail(1, "photo.jpg", "http://localhost:8000/media/x.jpg");
        let delivered = registry.broadcast(&event).await;

        assert_eq!(delivered, 2);
        assert_eq!(a.events.lock().await.as_slice(), &[event.clone()]);
        assert_eq!(b.events.lock().await.as_slice(), &[event]);
    }

    #[tokio::test]
    async fn failed_send_does_not_affect_other_subscribers() {
        let registry = SubscriberRegistry::new();
        let broken_id = registry.register(Arc::new(BrokenChannel)).await;
        let healthy = Arc::new(RecordingChannel::default());
        registry
            .register(Arc::clone(&healthy) as Arc<dyn PushChannel>)
            .await;

        let event = PushEvent::echo("hello");
        let delivered = registry.broadcast(&event).await;

        assert_eq!(delivered, 1);
        assert_eq!(healthy.events.lock().await.len(), 1);
        // A failed send never unregisters the subscriber.
        assert_eq!(registry.len().await, 2);
        assert!(registry.unregister(broken_id).await);
    }

    #[tokio::test]
    async fn broadcast_to_empty_registry_delivers_nothing() {
        let registry = SubscriberRegistry::new();
        assert_eq!(registry.broadcast(&PushEvent::echo("x")).await, 0);
    }
}
