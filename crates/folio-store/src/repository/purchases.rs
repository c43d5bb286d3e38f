//! # Purchase Repository
//!
//! Purchase history per user under `purchases_<userId>`. Checkout appends
//! one record per cart line; records are never merged or rewritten.

use chrono::{DateTime, Utc};
use folio_core::cart::CartItem;
use folio_core::{Money, PurchaseRecord, UserId};
use tracing::debug;

use crate::error::StoreResult;
use crate::keys::purchases_key;
use crate::kv::{read_json, write_json, SharedKv};

#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    kv: SharedKv,
}

impl PurchaseRepository {
    pub fn new(kv: SharedKv) -> Self {
        PurchaseRepository { kv }
    }

    /// The user's history, oldest first. Empty if there is none.
    pub fn list(&self, user_id: UserId) -> StoreResult<Vec<PurchaseRecord>> {
        Ok(read_json(self.kv.as_ref(), &purchases_key(user_id))?.unwrap_or_default())
    }

    /// Appends one record per item, all stamped with `now`.
    ///
    /// ## Returns
    /// The records that were appended.
    pub fn append(
        &self,
        user_id: UserId,
        items: &[CartItem],
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<PurchaseRecord>> {
        let key = purchases_key(user_id);
        let mut history: Vec<PurchaseRecord> = read_json(self.kv.as_ref(), &key)?.unwrap_or_default();

        let added: Vec<PurchaseRecord> = items
            .iter()
            .cloned()
            .map(|item| PurchaseRecord::new(item, now))
            .collect();
        history.extend(added.iter().cloned());
        write_json(self.kv.as_ref(), &key, &history)?;

        debug!(user_id, lines = added.len(), total = history.len(), "Appended purchases");
        Ok(added)
    }

    /// Sum of every line the user has paid for.
    pub fn total_spent(&self, user_id: UserId) -> StoreResult<Money> {
        Ok(self.list(user_id)?.iter().map(PurchaseRecord::line_total).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use chrono::{Duration, TimeZone};
    use folio_core::seed::seed_books;

    #[test]
    fn test_append_accumulates() {
        let repo = PurchaseRepository::new(MemoryKv::shared());
        let books = seed_books();
        let t0 = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();

        assert!(repo.list(7).unwrap().is_empty());

        let first = vec![CartItem::from_book(&books[0], 2)];
        repo.append(7, &first, t0).unwrap();

        // The same book bought again is a second record, not a merged one.
        let second = vec![
            CartItem::from_book(&books[0], 1),
            CartItem::from_book(&books[1], 1),
        ];
        let later = t0 + Duration::days(1);
        let added = repo.append(7, &second, later).unwrap();
        assert_eq!(added.len(), 2);

        let history = repo.list(7).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].date, t0);
        assert!(history[1..].iter().all(|r| r.date == later));
        assert!(repo.list(8).unwrap().is_empty());

        let expected = books[0].price * 3 + books[1].price;
        assert_eq!(repo.total_spent(7).unwrap(), expected);
    }

    #[test]
    fn test_record_wire_shape_is_flat() {
        let kv = MemoryKv::shared();
        let repo = PurchaseRepository::new(kv.clone());
        let book = seed_books().remove(0);
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();

        repo.append(1, &[CartItem::from_book(&book, 1)], now).unwrap();

        let raw = kv.get("purchases_1").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], book.id);
        assert_eq!(value[0]["quantity"], 1);
        assert!(value[0]["date"].is_string());
    }
}
