// src/resize.rs

//! Resize notification: a thread-safe subject that tells subscribers the grid's
//! new dimensions.
//!
//! Subscribing and removing may happen from any thread while the scheduler is
//! notifying. `notify` snapshots the subscriber list under the lock and calls
//! back outside it, so a callback may itself subscribe or remove without
//! deadlocking, and no caller ever sees a half-updated list.

use log::{debug, trace};
use std::sync::{Arc, Mutex, MutexGuard};

/// Receives the grid dimensions after a resize.
pub trait ResizeSubscriber: Send + Sync {
    fn resize(&self, lines: usize, columns: usize);
}

/// Handle returned by `ResizeNotifier::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Arc<dyn ResizeSubscriber>)>,
}

/// Cloneable handle to a shared list of resize subscribers.
#[derive(Clone, Default)]
pub struct ResizeNotifier {
    inner: Arc<Mutex<Subscribers>>,
}

impl ResizeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Subscribers> {
        // A subscriber that panicked while we held the lock leaves the list
        // itself intact.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Adds a subscriber. Subscribers are notified in subscription order.
    pub fn subscribe(&self, subscriber: Arc<dyn ResizeSubscriber>) -> SubscriptionId {
        let mut subscribers = self.lock();
        let id = SubscriptionId(subscribers.next_id);
        subscribers.next_id += 1;
        subscribers.entries.push((id, subscriber));
        debug!("ResizeNotifier: added subscriber {:?}", id);
        id
    }

    /// Removes a subscriber. Returns false if `id` was not subscribed.
    pub fn remove(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.entries.len();
        subscribers.entries.retain(|(entry, _)| *entry != id);
        let removed = subscribers.entries.len() != before;
        debug!("ResizeNotifier: remove {:?} -> {}", id, removed);
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every subscriber with the new dimensions. Returns how many were
    /// notified.
    pub fn notify(&self, lines: usize, columns: usize) -> usize {
        let snapshot: Vec<Arc<dyn ResizeSubscriber>> = self
            .lock()
            .entries
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        trace!(
            "ResizeNotifier: notifying {} subscribers of {}x{}",
            snapshot.len(),
            lines,
            columns
        );
        for subscriber in &snapshot {
            subscriber.resize(lines, columns);
        }
        snapshot.len()
    }
}

impl std::fmt::Debug for ResizeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeNotifier")
            .field("subscribers", &self.len())
            .finish()
    }
}
