//! # Review Commands
//!
//! Reviews on the book detail page.
//!
//! ## Who May Do What
//! ```text
//! ┌───────────────┬──────────┬───────────────────────────────────────────┐
//! │ Operation     │ Guest    │ Signed in                                 │
//! ├───────────────┼──────────┼───────────────────────────────────────────┤
//! │ list_reviews  │ yes      │ yes                                       │
//! │ add_review    │ → /login │ once per book                             │
//! │ edit_review   │ → /login │ own review only                           │
//! │ delete_review │ → /login │ own review only                           │
//! └───────────────┴──────────┴───────────────────────────────────────────┘
//! ```

use folio_core::validation::{review_form, FormValues};
use folio_core::{BookId, Review, User};
use folio_store::Storefront;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;

/// Review form submission.
///
/// The rating arrives as a plain number so an out-of-range value is
/// reported on the field rather than as a malformed request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub rating: i64,
    #[serde(default)]
    pub text: String,
}

impl ReviewRequest {
    /// Validates the form and returns the rating narrowed to `u8`.
    fn checked_rating(&self) -> Result<u8, ApiError> {
        review_form().validate(&FormValues::from([
            ("rating".to_string(), self.rating.to_string()),
            ("text".to_string(), self.text.clone()),
        ]))?;
        u8::try_from(self.rating).map_err(|_| ApiError::validation("평점은 1에서 5 사이여야 합니다."))
    }
}

pub fn list_reviews(storefront: &Storefront, book_id: BookId) -> Result<Vec<Review>, ApiError> {
    debug!(book_id, "list_reviews command");
    Ok(storefront.reviews().list(book_id)?)
}

/// Posts a review as the signed-in user.
///
/// ## Errors
/// - `UNAUTHENTICATED` without a session
/// - `NOT_FOUND` for a book outside the catalog
/// - `FORBIDDEN` when the user already reviewed this book
/// - `VALIDATION_ERROR` for a rating outside 1..=5 or blank text
pub fn add_review(
    storefront: &Storefront,
    book_id: BookId,
    request: &ReviewRequest,
) -> Result<Review, ApiError> {
    debug!(book_id, rating = request.rating, "add_review command");

    let user = super::require_user(storefront)?;
    if storefront.catalog().get(book_id).is_none() {
        return Err(ApiError::not_found("Book", book_id));
    }
    if storefront.reviews().user_review(book_id, user.id)?.is_some() {
        return Err(ApiError::forbidden("이미 이 도서에 리뷰를 작성했습니다."));
    }

    let rating = request.checked_rating()?;
    let review = storefront
        .reviews()
        .add(book_id, user, rating, &request.text, storefront.clock().now())?;
    Ok(review)
}

/// Rewrites the user's own review, keeping its id.
///
/// ## Errors
/// `NOT_FOUND` for an unknown review, `FORBIDDEN` for someone else's.
pub fn edit_review(
    storefront: &Storefront,
    book_id: BookId,
    review_id: i64,
    request: &ReviewRequest,
) -> Result<Review, ApiError> {
    debug!(book_id, review_id, "edit_review command");

    let user = super::require_user(storefront)?;
    authorize_author(storefront, user, book_id, review_id)?;

    let rating = request.checked_rating()?;
    storefront
        .reviews()
        .edit(book_id, review_id, rating, &request.text, storefront.clock().now())?
        .ok_or_else(|| ApiError::not_found("Review", review_id))
}

/// Deletes the user's own review and returns what remains for the book.
pub fn delete_review(
    storefront: &Storefront,
    book_id: BookId,
    review_id: i64,
) -> Result<Vec<Review>, ApiError> {
    debug!(book_id, review_id, "delete_review command");

    let user = super::require_user(storefront)?;
    authorize_author(storefront, user, book_id, review_id)?;

    if !storefront.reviews().delete(book_id, review_id)? {
        return Err(ApiError::not_found("Review", review_id));
    }
    Ok(storefront.reviews().list(book_id)?)
}

fn authorize_author(storefront: &Storefront, user: &User, book_id: BookId, review_id: i64) -> Result<(), ApiError> {
    let review = storefront
        .reviews()
        .list(book_id)?
        .into_iter()
        .find(|r| r.id == review_id)
        .ok_or_else(|| ApiError::not_found("Review", review_id))?;

    if review.user_id != user.id {
        return Err(ApiError::forbidden("본인이 작성한 리뷰만 수정할 수 있습니다."));
    }
    Ok(())
}
