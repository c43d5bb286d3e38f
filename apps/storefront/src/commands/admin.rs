//! # Admin Commands
//!
//! Catalog administration. Every command here requires the admin role.
//!
//! Edits live in memory only: a restart brings back the seed catalog.

use folio_core::validation::{parse_book_form, FormValues};
use folio_core::{Book, BookId, BookPatch};
use folio_store::Storefront;
use tracing::{debug, info};

use crate::error::ApiError;

/// Adds a book from the admin form. The id is one past the largest.
///
/// ## Errors
/// - `UNAUTHENTICATED` / `FORBIDDEN` unless signed in as admin
/// - `VALIDATION_ERROR` with per-field messages for a bad form
pub fn add_book(storefront: &mut Storefront, form: &FormValues) -> Result<Book, ApiError> {
    debug!("add_book command");
    super::require_admin(storefront)?;

    let draft = parse_book_form(form)?;
    let book = storefront.catalog_mut().add(draft)?;

    info!(book_id = book.id, title = %book.title, "Book added");
    Ok(book)
}

/// Replaces a book's fields with the submitted form.
///
/// ## Errors
/// `NOT_FOUND` when no book has this id.
pub fn update_book(storefront: &mut Storefront, id: BookId, form: &FormValues) -> Result<Book, ApiError> {
    debug!(book_id = id, "update_book command");
    super::require_admin(storefront)?;

    let patch = BookPatch::from(parse_book_form(form)?);
    if !storefront.catalog_mut().update(id, patch) {
        return Err(ApiError::not_found("Book", id));
    }

    storefront
        .catalog()
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Book", id))
}

/// Removes a book from the catalog.
///
/// Lines already in a cart keep their snapshot.
pub fn delete_book(storefront: &mut Storefront, id: BookId) -> Result<(), ApiError> {
    debug!(book_id = id, "delete_book command");
    super::require_admin(storefront)?;

    if !storefront.catalog_mut().remove(id) {
        return Err(ApiError::not_found("Book", id));
    }

    info!(book_id = id, "Book removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use crate::error::ErrorCode;
    use folio_core::{Category, Money};

    fn form() -> FormValues {
        [
            ("title", "새 책"),
            ("author", "홍길동"),
            ("publisher", "폴리오"),
            ("category", "과학"),
            ("price", "21000"),
            ("stock", "7"),
            ("isbn", "9780000000123"),
            ("publishDate", "2025-02-01"),
            ("description", "설명"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_requires_admin() {
        let mut bob = signed_in("bob@example.com");
        let before = bob.catalog().books().len();

        assert_eq!(add_book(&mut bob, &form()).unwrap_err().code, ErrorCode::Forbidden);
        assert_eq!(delete_book(&mut bob, 1).unwrap_err().code, ErrorCode::Forbidden);
        assert_eq!(bob.catalog().books().len(), before);

        let mut guest = storefront();
        assert_eq!(
            update_book(&mut guest, 1, &form()).unwrap_err().code,
            ErrorCode::Unauthenticated
        );
    }

    #[test]
    fn test_add_update_delete() {
        let mut admin = signed_in(folio_core::ADMIN_EMAIL);
        let next_id = admin.catalog().books().iter().map(|b| b.id).max().unwrap() + 1;

        let book = add_book(&mut admin, &form()).unwrap();
        assert_eq!(book.id, next_id);
        assert_eq!(book.category, Category::Science);

        let mut edited = form();
        edited.insert("price".to_string(), "19000".to_string());
        let updated = update_book(&mut admin, book.id, &edited).unwrap();
        assert_eq!(updated.price, Money::from_won(19_000));

        delete_book(&mut admin, book.id).unwrap();
        assert_eq!(
            delete_book(&mut admin, book.id).unwrap_err().code,
            ErrorCode::NotFound
        );
        assert_eq!(
            update_book(&mut admin, book.id, &form()).unwrap_err().code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_form_errors_are_reported() {
        let mut admin = signed_in(folio_core::ADMIN_EMAIL);
        let mut bad = form();
        bad.insert("price".to_string(), "-5".to_string());
        bad.remove("title");

        let err = add_book(&mut admin, &bad).unwrap_err();
        let fields = err.fields.unwrap();
        assert_eq!(fields.message_for("title"), Some("도서명을 입력해주세요."));
        assert_eq!(fields.message_for("price"), Some("가격은 0원 이상 10,000,000원 이하여야 합니다."));
    }
}
