//! # Cart Commands
//!
//! Cart manipulation and checkout.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────────┐   │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  purchases_  │   │
//! │  │  Cart    │     │          │     │ (signed  │     │  <userId>    │   │
//! │  └──────────┘     └──────────┘     │   in)    │     └──────────────┘   │
//! │       ▲                │           └──────────┘                        │
//! │       │           add_to_cart           │                              │
//! │       │           update_cart_item      │                              │
//! │       │           remove_from_cart      │                              │
//! │       │                │                │                              │
//! │       │                ▼                │                              │
//! │       └──────── clear_cart ◄────────────┘                              │
//! │                 (also on login/logout)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use folio_core::cart::{stepper_quantity, CartItem, CartTotals};
use folio_core::{BookId, Money, PurchaseRecord};
use folio_store::{CartStore, Storefront};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::ConfigState;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&CartStore> for CartResponse {
    fn from(cart: &CartStore) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// The purchase just recorded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub records: Vec<PurchaseRecord>,
    pub total_price: Money,
    /// Total with the configured currency suffix ("33,000원")
    pub formatted_total: String,
}

pub fn get_cart(storefront: &Storefront) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(storefront.cart())
}

/// Adds a catalog book to the cart.
///
/// ## Behavior
/// - Quantity defaults to 1 and is clamped to `1..=stock` like the picker,
///   never above `MAX_ITEM_QUANTITY`
/// - A book already in the cart has its quantity increased
/// - Price is frozen at the time of adding
///
/// ## Errors
/// `NOT_FOUND` for a book id that is not in the catalog.
pub fn add_to_cart(
    storefront: &mut Storefront,
    book_id: BookId,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let requested = quantity.unwrap_or(1);
    debug!(book_id, quantity = requested, "add_to_cart command");

    let stock = storefront
        .catalog()
        .get(book_id)
        .map(|book| book.stock)
        .ok_or_else(|| ApiError::not_found("Book", book_id))?;

    storefront.add_to_cart(book_id, stepper_quantity(requested, stock));
    Ok(CartResponse::from(storefront.cart()))
}

/// Sets the quantity of a cart line.
///
/// Quantities are clamped to `1..=MAX_ITEM_QUANTITY`; use `remove_from_cart`
/// to take a line out. An id not in the cart leaves the cart unchanged.
pub fn update_cart_item(storefront: &mut Storefront, book_id: BookId, quantity: i64) -> CartResponse {
    debug!(book_id, quantity, "update_cart_item command");
    storefront.cart_mut().update_quantity(book_id, quantity);
    CartResponse::from(storefront.cart())
}

pub fn remove_from_cart(storefront: &mut Storefront, book_id: BookId) -> CartResponse {
    debug!(book_id, "remove_from_cart command");
    storefront.cart_mut().remove(book_id);
    CartResponse::from(storefront.cart())
}

pub fn clear_cart(storefront: &mut Storefront) -> CartResponse {
    debug!("clear_cart command");
    storefront.cart_mut().clear();
    CartResponse::from(storefront.cart())
}

/// Buys everything in the cart.
///
/// ## Errors
/// - `UNAUTHENTICATED` without a session (the cart is kept)
/// - `CART_ERROR` when the cart is empty
pub fn checkout(storefront: &mut Storefront, config: &ConfigState) -> Result<CheckoutResponse, ApiError> {
    debug!("checkout command");

    let total_price = storefront.cart().total_price();
    let records = storefront.checkout()?;

    info!(lines = records.len(), total = total_price.won(), "Order placed");
    Ok(CheckoutResponse {
        records,
        total_price,
        formatted_total: config.format_price(total_price),
    })
}
