//! # Review Repository
//!
//! Reviews are stored per book as a JSON array under `reviews_<bookId>`,
//! in submission order.
//!
//! Who may write what is decided by the caller: the repository does not
//! check that a user reviews a book once, or that only the author edits.

use chrono::{DateTime, Utc};
use folio_core::validation::{validate_rating, validate_review_text};
use folio_core::{BookId, Review, User, UserId};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::keys::{parse_reviews_key, reviews_key, REVIEWS_PREFIX};
use crate::kv::{read_json, write_json, SharedKv};

/// A review together with the book it belongs to (account page listing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReview {
    pub book_id: BookId,
    #[serde(flatten)]
    pub review: Review,
}

#[derive(Debug, Clone)]
pub struct ReviewRepository {
    kv: SharedKv,
}

impl ReviewRepository {
    pub fn new(kv: SharedKv) -> Self {
        ReviewRepository { kv }
    }

    /// Reviews for one book, oldest first. Empty if there are none.
    pub fn list(&self, book_id: BookId) -> StoreResult<Vec<Review>> {
        Ok(read_json(self.kv.as_ref(), &reviews_key(book_id))?.unwrap_or_default())
    }

    /// The review `user_id` left on `book_id`, if any.
    pub fn user_review(&self, book_id: BookId, user_id: UserId) -> StoreResult<Option<Review>> {
        Ok(self
            .list(book_id)?
            .into_iter()
            .find(|r| r.user_id == user_id))
    }

    /// Appends a review.
    ///
    /// The id is the submission time in milliseconds, bumped past the
    /// newest existing id if two reviews land in the same millisecond.
    ///
    /// ## Errors
    /// Validation errors for a rating outside 1..=5 or blank text.
    pub fn add(
        &self,
        book_id: BookId,
        user: &User,
        rating: u8,
        text: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Review> {
        validate_rating(rating)?;
        validate_review_text(text)?;

        let mut reviews = self.list(book_id)?;
        let millis = now.timestamp_millis();
        let id = reviews
            .iter()
            .map(|r| r.id + 1)
            .max()
            .map_or(millis, |next| next.max(millis));

        let review = Review {
            id,
            user_id: user.id,
            user_name: user.name.clone(),
            rating,
            text: text.trim().to_string(),
            date: now,
        };
        reviews.push(review.clone());
        self.save(book_id, &reviews)?;

        debug!(book_id, review_id = id, user_id = user.id, rating, "Added review");
        Ok(review)
    }

    /// Replaces rating, text and date of a review, keeping its id and author.
    ///
    /// Returns `Ok(None)` when no review with `review_id` exists.
    pub fn edit(
        &self,
        book_id: BookId,
        review_id: i64,
        rating: u8,
        text: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Review>> {
        validate_rating(rating)?;
        validate_review_text(text)?;

        let mut reviews = self.list(book_id)?;
        let Some(review) = reviews.iter_mut().find(|r| r.id == review_id) else {
            return Ok(None);
        };

        review.rating = rating;
        review.text = text.trim().to_string();
        review.date = now;
        let updated = review.clone();
        self.save(book_id, &reviews)?;

        debug!(book_id, review_id, "Edited review");
        Ok(Some(updated))
    }

    /// Deletes a review. Returns `false` if it did not exist.
    pub fn delete(&self, book_id: BookId, review_id: i64) -> StoreResult<bool> {
        let mut reviews = self.list(book_id)?;
        let before = reviews.len();
        reviews.retain(|r| r.id != review_id);
        if reviews.len() == before {
            return Ok(false);
        }

        self.save(book_id, &reviews)?;
        debug!(book_id, review_id, "Deleted review");
        Ok(true)
    }

    /// Every review written by `user_id`, across all books.
    ///
    /// Keys that do not decode are skipped with a warning so one bad record
    /// does not hide the rest of the listing.
    pub fn by_user(&self, user_id: UserId) -> StoreResult<Vec<UserReview>> {
        let mut found = Vec::new();

        for key in self.kv.keys()? {
            if !key.starts_with(REVIEWS_PREFIX) {
                continue;
            }
            let Some(book_id) = parse_reviews_key(&key) else {
                continue;
            };

            match read_json::<Vec<Review>>(self.kv.as_ref(), &key) {
                Ok(reviews) => found.extend(
                    reviews
                        .unwrap_or_default()
                        .into_iter()
                        .filter(|r| r.user_id == user_id)
                        .map(|review| UserReview { book_id, review }),
                ),
                Err(err) => warn!(key = %key, error = %err, "Skipping unreadable reviews"),
            }
        }

        found.sort_by_key(|r| r.review.date);
        Ok(found)
    }

    fn save(&self, book_id: BookId, reviews: &[Review]) -> StoreResult<()> {
        write_json(self.kv.as_ref(), &reviews_key(book_id), reviews)
    }
}
