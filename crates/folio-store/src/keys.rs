//! Persisted key layout.
//!
//! ```text
//! user                  → User            (current session)
//! reviews_<bookId>      → [Review]        (per book, in submission order)
//! purchases_<userId>    → [PurchaseRecord] (per buyer, append only)
//! ```

use folio_core::{BookId, UserId};

pub const USER_KEY: &str = "user";
pub const REVIEWS_PREFIX: &str = "reviews_";
pub const PURCHASES_PREFIX: &str = "purchases_";

pub fn reviews_key(book_id: BookId) -> String {
    format!("{REVIEWS_PREFIX}{book_id}")
}

pub fn purchases_key(user_id: UserId) -> String {
    format!("{PURCHASES_PREFIX}{user_id}")
}

/// Book id encoded in a `reviews_<bookId>` key.
pub fn parse_reviews_key(key: &str) -> Option<BookId> {
    key.strip_prefix(REVIEWS_PREFIX)?.parse().ok()
}
