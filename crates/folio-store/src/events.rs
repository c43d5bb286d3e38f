//! # Change Events
//!
//! Each store owns an [`EventBus`] and emits one event after every
//! successful mutation. Subscribers are plain callbacks invoked
//! synchronously, in subscription order, before the mutating call returns.
//!
//! ```text
//!   store.mutate()
//!        │ state updated
//!        ▼
//!   bus.emit(&event) ──► subscriber 1 ──► subscriber 2 ──► ...
//!        │
//!        ▼
//!   mutate() returns
//! ```

use std::fmt;

use folio_core::{BookId, CategoryFilter, User};
use serde::Serialize;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<E> = Box<dyn Fn(&E) + Send + Sync>;

/// A list of callbacks interested in one store's changes.
pub struct EventBus<E> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        EventBus {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn emit(&self, event: &E) {
        for (_, callback) in &self.subscribers {
            callback(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

// =============================================================================
// Event Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "user", rename_all = "camelCase")]
pub enum SessionEvent {
    LoggedIn(User),
    Registered(User),
    Updated(User),
    LoggedOut,
    Withdrawn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CatalogEvent {
    CategoryChanged { category: CategoryFilter },
    QueryChanged { query: String },
    BookAdded { id: BookId },
    BookUpdated { id: BookId },
    BookRemoved { id: BookId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartEvent {
    ItemAdded { id: BookId, quantity: u32 },
    QuantityChanged { id: BookId, quantity: u32 },
    ItemRemoved { id: BookId },
    Cleared,
}
