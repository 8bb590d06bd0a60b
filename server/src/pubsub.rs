//! Topic-addressed publish/subscribe registry decoupling game logic from
//! transport. A small concurrent map: subscriber handles are collected
//! under the lock, then invoked outside it, so a callback is free to
//! subscribe, unsubscribe, or publish without deadlocking on its own
//! registry.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub type SubscriptionId = u64;

type Callback<M> = Arc<dyn Fn(M) + Send + Sync>;

struct Subscriber<M> {
    id: SubscriptionId,
    callback: Callback<M>,
}

pub struct PubSub<M> {
    topics: Mutex<HashMap<String, Vec<Subscriber<M>>>>,
    next_id: AtomicU64,
}

impl<M> Default for PubSub<M> {
    fn default() -> Self {
        PubSub {
            topics: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<M: Clone> PubSub<M> {
    pub fn new() -> Self {
        PubSub::default()
    }

    /// Registers `callback` on `topic`, returning an id `unsubscribe` uses
    /// to remove exactly this registration.
    pub fn subscribe(
        &self,
        topic: impl Into<String>,
        callback: impl Fn(M) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut topics = self.topics.lock().expect("pubsub registry lock poisoned");
        topics.entry(topic.into()).or_default().push(Subscriber {
            id,
            callback: Arc::new(callback),
        });
        id
    }

    pub fn unsubscribe(&self, topic: &str, id: SubscriptionId) {
        let mut topics = self.topics.lock().expect("pubsub registry lock poisoned");
        if let Some(subscribers) = topics.get_mut(topic) {
            subscribers.retain(|s| s.id != id);
            if subscribers.is_empty() {
                topics.remove(topic);
            }
        }
    }

    /// Removes every subscriber on `topic`, e.g. when a match ends.
    pub fn close_topic(&self, topic: &str) {
        self.topics
            .lock()
            .expect("pubsub registry lock poisoned")
            .remove(topic);
    }

    /// Delivers `message` to every subscriber currently on `topic`.
    /// Callbacks run outside the registry lock. A callback that panics is
    /// caught and logged; it never prevents the remaining callbacks from
    /// running. Delivery order for concurrent publishes on the same topic
    /// is unspecified.
    pub fn publish(&self, topic: &str, message: M) {
        let callbacks: Vec<Callback<M>> = {
            let topics = self.topics.lock().expect("pubsub registry lock poisoned");
            match topics.get(topic) {
                Some(subscribers) => subscribers.iter().map(|s| s.callback.clone()).collect(),
                None => return,
            }
        };
        for callback in callbacks {
            let message = message.clone();
            let result = std::panic::catch_unwind(AssertUnwindSafe(|| callback(message)));
            if let Err(panic) = result {
                tracing::error!(?panic, topic, "pub/sub callback panicked");
            }
        }
    }
}
