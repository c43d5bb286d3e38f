//! # folio-store: Stateful Stores for the Folio Bookstore
//!
//! This crate owns the storefront's mutable state: who is signed in, the
//! book collection and filter bar, the cart, and the review and purchase
//! records kept behind a key-value port.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Folio Data Flow                                  │
//! │                                                                         │
//! │  Command (add_to_cart)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   folio-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Storefront   │    │    Stores     │    │ Repositories │  │   │
//! │  │   │               │───►│ SessionStore  │    │ Reviews      │  │   │
//! │  │   │ checkout()    │    │ CatalogStore  │    │ Purchases    │  │   │
//! │  │   │ cart scoping  │    │ CartStore     │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────┬───────┘  │   │
//! │  │                                └─────────┬─────────┘          │   │
//! │  │                                          ▼                    │   │
//! │  │                                KeyValueStore (kv.rs)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MemoryKv  or  JsonFileKv (~/.local/share/folio/store.json)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - Key-value port, in-memory and JSON-file adapters
//! - [`keys`] - Persisted key layout
//! - [`session`] - Current user
//! - [`catalog`] - Books and filter state
//! - [`cart`] - Shopping cart
//! - [`repository`] - Reviews and purchase history
//! - [`events`] - Change notifications
//! - [`storefront`] - Facade and cross-store operations
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use folio_core::clock::SystemClock;
//! use folio_store::{MemoryKv, Storefront};
//!
//! let mut store = Storefront::open(MemoryKv::shared(), Arc::new(SystemClock));
//! store.login("reader@example.com", "anything").unwrap();
//! store.add_to_cart(1, 2);
//!
//! let records = store.checkout().unwrap();
//! assert_eq!(records.len(), 1);
//! assert!(store.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod events;
pub mod keys;
pub mod kv;
pub mod repository;
pub mod session;
pub mod storefront;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::CartStore;
pub use catalog::CatalogStore;
pub use error::{StoreError, StoreResult};
pub use events::{CartEvent, CatalogEvent, EventBus, SessionEvent, SubscriptionId};
pub use kv::{JsonFileKv, KeyValueStore, MemoryKv, SharedKv};
pub use repository::{PurchaseRepository, ReviewRepository, UserReview};
pub use session::SessionStore;
pub use storefront::Storefront;
