//! # folio-core: Pure Domain Logic for the Folio Bookstore
//!
//! This crate is the **heart** of the storefront. It contains the record
//! types, catalog views, cart math and form rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Folio Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Layer (out of tree)                │   │
//! │  │   Home ──► Book List ──► Book Detail ──► Cart ──► My Page       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON-lines commands                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront (commands)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    folio-store (stateful stores)                │   │
//! │  │     SessionStore • CatalogStore • CartStore • repositories      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ catalog  │ │validat.│  │   │
//! │  │   │  Book   │ │  Money  │ │  Cart   │ │  views   │ │ forms  │  │   │
//! │  │   │  User   │ │  (won)  │ │CartItem │ │  filter  │ │ rules  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, User, Review, Purchase, etc.)
//! - [`money`] - Whole-won money type with integer arithmetic
//! - [`cart`] - Cart line items and totals
//! - [`catalog`] - Derived catalog views (filtered, new arrivals, popular)
//! - [`validation`] - Typed form descriptors and the validation rule table
//! - [`clock`] - Time source abstraction
//! - [`seed`] - The static seed catalog
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::cart::Cart;
//! use folio_core::seed::seed_books;
//!
//! let books = seed_books();
//! let mut cart = Cart::new();
//! cart.add(&books[0], 2);
//! cart.add(&books[0], 3);
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.total_items(), 5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod money;
pub mod seed;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FieldErrors, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Email address that logs in with the admin role.
///
/// Authentication is mocked: any password is accepted, and this address is
/// the only thing that distinguishes an administrator.
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Label of the "every category" filter value.
pub const ALL_CATEGORIES_LABEL: &str = "전체";

/// Number of entries in the popular view.
pub const POPULAR_LIMIT: usize = 5;

/// Trailing window, in calendar months, for the new arrivals view.
pub const NEW_ARRIVAL_MONTHS: u32 = 3;

/// Number of books shown in the landing page's "all books" strip.
pub const HOME_CATALOG_LIMIT: usize = 8;

/// Number of new arrivals shown on the landing page.
pub const HOME_NEW_ARRIVALS_LIMIT: usize = 5;

/// Lowest rating a review may carry.
pub const MIN_RATING: u8 = 1;

/// Highest rating a review may carry.
pub const MAX_RATING: u8 = 5;

/// Most copies of one book a cart line may hold.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Highest price, in won, the book form accepts.
pub const MAX_BOOK_PRICE: i64 = 10_000_000;

/// Highest stock count the book form accepts.
pub const MAX_BOOK_STOCK: u32 = 100_000;
