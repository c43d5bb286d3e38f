//! # Storefront Commands
//!
//! Every operation the presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports + shared guards)
//! ├── catalog.rs  ◄─── Home, listing, filters, book detail, navigation
//! ├── cart.rs     ◄─── Cart manipulation and checkout
//! ├── session.rs  ◄─── Login, register, logout, withdraw
//! ├── account.rs  ◄─── My page: profile, purchases, own reviews
//! ├── reviews.rs  ◄─── Per-book reviews
//! ├── admin.rs    ◄─── Catalog administration
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  {"command":"add_to_cart","bookId":3,"quantity":2}                      │
//! │         │                                                               │
//! │         │ (one JSON line on stdin)                                      │
//! │         ▼                                                               │
//! │  dispatch::handle_line ──► Request::AddToCart { book_id, quantity }     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      storefront: &mut Storefront,  ◄── Only the state it needs          │
//! │      book_id: BookId,                                                   │
//! │      quantity: Option<i64>,                                             │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  {"ok":true,"data":{"items":[...],"totals":{...}}}                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod reviews;
pub mod session;

use folio_core::User;
use folio_store::Storefront;

use crate::error::ApiError;

/// The signed-in user, or `UNAUTHENTICATED`.
pub(crate) fn require_user(storefront: &Storefront) -> Result<&User, ApiError> {
    Ok(storefront.session().require_user()?)
}

/// The signed-in administrator.
///
/// `UNAUTHENTICATED` without a session, `FORBIDDEN` for a regular user.
pub(crate) fn require_admin(storefront: &Storefront) -> Result<&User, ApiError> {
    let user = require_user(storefront)?;
    if !user.is_admin() {
        return Err(ApiError::forbidden("관리자만 접근할 수 있습니다."));
    }
    Ok(user)
}
