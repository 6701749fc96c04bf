//! Change notification with replay-latest semantics.
//!
//! Each [`Topic`] holds the current snapshot of one aggregate. Subscribing
//! queues that snapshot immediately, and every later [`Topic::publish`] is
//! queued to each live subscriber in publish order. Queues are unbounded
//! tokio mpsc channels, so publishing never blocks or drops a snapshot;
//! consumers drain them on whatever task or thread renders for them.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::catalog::FoodItem;
use crate::groups::GroupMap;
use crate::orders::OrderHistory;

/// The three observable aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Groups,
    Favorites,
    Orders,
}

/// A snapshot tagged with the channel it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "channel", content = "snapshot", rename_all = "lowercase")]
pub enum Snapshot {
    Groups(Arc<GroupMap>),
    Favorites(Arc<Vec<FoodItem>>),
    Orders(Arc<OrderHistory>),
}

impl Snapshot {
    pub fn channel(&self) -> Channel {
        match self {
            Snapshot::Groups(_) => Channel::Groups,
            Snapshot::Favorites(_) => Channel::Favorites,
            Snapshot::Orders(_) => Channel::Orders,
        }
    }
}

type Sink<T> = Box<dyn Fn(&Arc<T>) -> bool + Send + Sync>;

/// Current-value cell plus its subscribers.
pub struct Topic<T> {
    current: Arc<T>,
    sinks: Vec<Sink<T>>,
}

impl<T> Topic<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(initial: T) -> Self {
        Self {
            current: Arc::new(initial),
            sinks: Vec::new(),
        }
    }

    /// Replace the current value and queue it to every subscriber. Dropped
    /// subscriptions are pruned here.
    pub fn publish(&mut self, value: T) {
        self.current = Arc::new(value);
        let current = &self.current;
        self.sinks.retain(|sink| sink(current));
    }

    pub fn subscribe(&mut self) -> Subscription<Arc<T>> {
        self.subscribe_with(|snapshot| snapshot)
    }

    /// Subscribe with every delivered snapshot passed through `wrap`.
    pub fn subscribe_with<U>(&mut self, wrap: fn(Arc<T>) -> U) -> Subscription<U>
    where
        U: Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        // the receiver is alive, this cannot fail
        let _ = tx.send(wrap(Arc::clone(&self.current)));
        self.sinks.push(Box::new(move |snapshot: &Arc<T>| {
            tx.send(wrap(Arc::clone(snapshot))).is_ok()
        }));
        Subscription { rx }
    }

    /// Subscribers still attached as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.sinks.len()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Topic<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Topic")
            .field("current", &self.current)
            .field("subscribers", &self.sinks.len())
            .finish()
    }
}

/// Receiving end of a topic. Dropping it (or calling
/// [`Subscription::unsubscribe`]) detaches it on the next publish.
#[derive(Debug)]
pub struct Subscription<U> {
    rx: mpsc::UnboundedReceiver<U>,
}

impl<U> Subscription<U> {
    /// Wait for the next snapshot. `None` once the owning store is gone.
    pub async fn recv(&mut self) -> Option<U> {
        self.rx.recv().await
    }

    /// Next queued snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<U> {
        self.rx.try_recv().ok()
    }

    /// Drain the queue, keeping only the newest snapshot.
    pub fn latest(&mut self) -> Option<U> {
        let mut last = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            last = Some(snapshot);
        }
        last
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}
