//! # Cart Store
//!
//! Wraps the core [`Cart`] with logging and change notifications.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Command                  Store Method            Event                 │
//! │  ───────                  ────────────            ─────                 │
//! │                                                                         │
//! │  add_to_cart ────────────► add() ───────────────► ItemAdded            │
//! │                                                                         │
//! │  update_cart_item ───────► update_quantity() ───► QuantityChanged      │
//! │                                                                         │
//! │  remove_from_cart ───────► remove() ────────────► ItemRemoved          │
//! │                                                                         │
//! │  clear_cart / checkout ──► clear() ─────────────► Cleared              │
//! │                                                                         │
//! │  get_cart ───────────────► items(), totals() ───► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is not persisted.

use folio_core::cart::{Cart, CartItem, CartTotals};
use folio_core::{Book, BookId, Money};
use tracing::debug;

use crate::events::{CartEvent, EventBus, SubscriptionId};

#[derive(Debug, Default)]
pub struct CartStore {
    cart: Cart,
    events: EventBus<CartEvent>,
}

impl CartStore {
    pub fn new() -> Self {
        CartStore::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Adds `quantity` copies of `book`, merging with an existing line.
    pub fn add(&mut self, book: &Book, quantity: u32) {
        self.cart.add(book, quantity);
        let quantity = self.cart.get(book.id).map_or(0, |i| i.quantity);

        debug!(book_id = book.id, quantity, "Added to cart");
        self.events.emit(&CartEvent::ItemAdded {
            id: book.id,
            quantity,
        });
    }

    /// Sets a line's quantity, clamped to `1..=MAX_ITEM_QUANTITY`.
    pub fn update_quantity(&mut self, id: BookId, quantity: i64) -> bool {
        if !self.cart.update_quantity(id, quantity) {
            return false;
        }

        let quantity = self.cart.get(id).map_or(0, |i| i.quantity);
        debug!(book_id = id, quantity, "Updated cart quantity");
        self.events.emit(&CartEvent::QuantityChanged { id, quantity });
        true
    }

    pub fn remove(&mut self, id: BookId) -> bool {
        if !self.cart.remove(id) {
            return false;
        }

        debug!(book_id = id, "Removed from cart");
        self.events.emit(&CartEvent::ItemRemoved { id });
        true
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        debug!("Cleared cart");
        self.events.emit(&CartEvent::Cleared);
    }

    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    pub fn line_total(&self, id: BookId) -> Option<Money> {
        self.cart.line_total(id)
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&CartEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(callback)
    }
}
