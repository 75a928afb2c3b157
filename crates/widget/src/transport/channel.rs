//! Page-wide message channel.
//!
//! Frames post plain data values onto the embedding page; interested parties
//! subscribe with a handler. A subscription is an explicitly owned guard:
//! dropping it removes the handler, so a listener lives exactly as long as
//! the mount that acquired it instead of lingering for the life of the page.
//!
//! Dispatch is synchronous and in subscription order. Handlers must not post
//! back onto the channel from inside dispatch.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::Value;
use tracing::trace;
use uuid::Uuid;

type Handler = Box<dyn Fn(&Value) + Send + Sync>;

struct Subscriber {
    id: Uuid,
    handler: Handler,
}

#[derive(Default)]
struct ChannelInner {
    subscribers: RwLock<Vec<Subscriber>>,
}

/// A process-wide channel for cross-frame messages.
#[derive(Clone, Default)]
pub struct MessageChannel {
    inner: Arc<ChannelInner>,
}

impl MessageChannel {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler and return its owning guard.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4();
        self.inner.subscribers.write().push(Subscriber {
            id,
            handler: Box::new(handler),
        });
        Subscription {
            id,
            channel: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver a value to every subscriber, in subscription order.
    pub fn post(&self, value: &Value) {
        let subscribers = self.inner.subscribers.read();
        trace!(count = subscribers.len(), "dispatching channel message");
        for subscriber in subscribers.iter() {
            (subscriber.handler)(value);
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().len()
    }
}

/// Owning guard for one channel subscription.
///
/// The handler is removed when the guard drops; the channel outliving the
/// guard is fine, and the guard outliving the channel is a no-op.
pub struct Subscription {
    id: Uuid,
    channel: Weak<ChannelInner>,
}

impl Subscription {
    /// This subscription's identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether the handler is still registered.
    pub fn is_active(&self) -> bool {
        match self.channel.upgrade() {
            Some(inner) => inner
                .subscribers
                .read()
                .iter()
                .any(|subscriber| subscriber.id == self.id),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.channel.upgrade() {
            inner
                .subscribers
                .write()
                .retain(|subscriber| subscriber.id != self.id);
        }
    }
}
