//! # Repository Module
//!
//! Record collections kept in the key-value port.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Key-Value Repositories                               │
//! │                                                                         │
//! │  Command                                                               │
//! │       │                                                                 │
//! │       │  storefront.reviews().list(3)                                  │
//! │       ▼                                                                 │
//! │  ReviewRepository                                                      │
//! │  ├── list / add / edit / delete       (one key per book)               │
//! │  └── by_user                          (scans every reviews_* key)      │
//! │                                                                         │
//! │  PurchaseRepository                                                    │
//! │  ├── append                           (one key per buyer)              │
//! │  └── list                                                              │
//! │       │                                                                 │
//! │       │  read-modify-write of a JSON array                             │
//! │       ▼                                                                 │
//! │  SharedKv                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ReviewRepository`] - Per-book reviews
//! - [`PurchaseRepository`] - Per-user purchase history

pub mod purchases;
pub mod reviews;

pub use purchases::PurchaseRepository;
pub use reviews::{ReviewRepository, UserReview};
