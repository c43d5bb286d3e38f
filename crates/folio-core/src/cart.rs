//! # Cart
//!
//! Line items and totals of the shopping cart.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action              Method                 Effect                 │
//! │  ───────────              ──────                 ──────                 │
//! │                                                                         │
//! │  "장바구니 담기" ─────────► add(book, n) ─────────► merge by id or push │
//! │                                                                         │
//! │  − / + stepper ──────────► update_quantity() ───► qty ∈ [1, 999]       │
//! │                                                                         │
//! │  Trash icon ─────────────► remove(id) ──────────► item dropped         │
//! │                                                                         │
//! │  Checkout / "비우기" ─────► clear() ─────────────► items emptied         │
//! │                                                                         │
//! │  Summary box ────────────► total_items(), total_price() (derived)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quantity Bounds
//! A line never drops below one copy. Lowering the stepper past one clamps
//! to one; taking a book out of the cart is always an explicit `remove`.
//! Raising it stops at [`MAX_ITEM_QUANTITY`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Book, BookId};
use crate::MAX_ITEM_QUANTITY;

/// An item in the shopping cart.
///
/// The book is a snapshot taken when it was first added: later catalog
/// edits do not change the price of a line already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    #[serde(flatten)]
    pub book: Book,

    /// Copies of the book in the cart (1..=MAX_ITEM_QUANTITY).
    pub quantity: u32,
}

impl CartItem {
    /// Creates a new cart item from a book and quantity.
    pub fn from_book(book: &Book, quantity: u32) -> Self {
        CartItem {
            book: book.clone(),
            quantity: quantity.clamp(1, MAX_ITEM_QUANTITY),
        }
    }

    #[inline]
    pub fn id(&self) -> BookId {
        self.book.id
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.book.price * self.quantity
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by book id (adding the same book increases quantity)
/// - Quantity is always within 1..=MAX_ITEM_QUANTITY
/// - Items keep insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: BookId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Adds a book to the cart or increases quantity if already present.
    ///
    /// A quantity of zero is treated as one. The merged quantity stops at
    /// [`MAX_ITEM_QUANTITY`].
    pub fn add(&mut self, book: &Book, quantity: u32) {
        let quantity = quantity.max(1);

        if let Some(item) = self.items.iter_mut().find(|i| i.id() == book.id) {
            item.quantity = item.quantity.saturating_add(quantity).min(MAX_ITEM_QUANTITY);
            return;
        }

        self.items.push(CartItem::from_book(book, quantity));
    }

    /// Sets the quantity of a line, clamped to `1..=MAX_ITEM_QUANTITY`.
    ///
    /// ## Returns
    /// `false` when no line exists for `id` (nothing changes).
    pub fn update_quantity(&mut self, id: BookId, quantity: i64) -> bool {
        let clamped = u32::try_from(quantity.clamp(1, i64::from(MAX_ITEM_QUANTITY)))
            .unwrap_or(MAX_ITEM_QUANTITY);

        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(item) => {
                item.quantity = clamped;
                true
            }
            None => false,
        }
    }

    /// Removes a line by book id. Returns `false` if it was not present.
    pub fn remove(&mut self, id: BookId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id() != id);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `price × quantity` across all lines.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Line total for one book, if it is in the cart.
    pub fn line_total(&self, id: BookId) -> Option<Money> {
        self.get(id).map(CartItem::line_total)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart totals summary for the order box and the header badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    #[ts(type = "number")]
    pub total_items: u64,
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.items.len(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

/// Clamps the quantity picker on the book detail page.
///
/// The picker stays between one and the copies in stock, never above
/// [`MAX_ITEM_QUANTITY`]; an out-of-stock book still offers a single copy.
///
/// ## Example
/// ```rust
/// use folio_core::cart::stepper_quantity;
///
/// assert_eq!(stepper_quantity(0, 10), 1);
/// assert_eq!(stepper_quantity(11, 10), 10);
/// assert_eq!(stepper_quantity(4, 10), 4);
/// assert_eq!(stepper_quantity(5_000, 100_000), 999);
/// ```
pub fn stepper_quantity(requested: i64, stock: u32) -> u32 {
    let ceiling = stock.clamp(1, MAX_ITEM_QUANTITY);
    // Bounded to 1..=MAX_ITEM_QUANTITY by the clamp above.
    requested.clamp(1, i64::from(ceiling)) as u32
}
