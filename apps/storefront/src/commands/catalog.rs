//! # Catalog Commands
//!
//! Browsing: the landing page, the filtered book list, the detail page
//! and route resolution.
//!
//! ## Filter State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_category("IT/컴퓨터") ──┐                                          │
//! │                              ├──► CatalogStore ──► filtered view        │
//! │  set_search_query("러스트") ─┘         ▲                                │
//! │                                        │                                │
//! │  navigate("/search?q=러스트") ─────────┘  (search route sets the query)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use folio_core::catalog::HomeView;
use folio_core::{Book, CategoryFilter, Review, ValidationError};
use folio_store::Storefront;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ErrorCode};
use crate::routes::Route;

/// The book list page: current filters plus the books passing them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListResponse {
    pub category: CategoryFilter,
    pub query: String,
    pub categories: Vec<CategoryFilter>,
    pub books: Vec<Book>,
}

impl From<&Storefront> for BookListResponse {
    fn from(storefront: &Storefront) -> Self {
        let catalog = storefront.catalog();
        BookListResponse {
            category: catalog.category(),
            query: catalog.search_query().to_string(),
            categories: catalog.categories(),
            books: catalog.filtered_view().into_iter().cloned().collect(),
        }
    }
}

/// Everything the detail page shows for one book.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailResponse {
    pub book: Book,
    pub reviews: Vec<Review>,
    /// The signed-in user's own review, which the page offers to edit
    pub my_review: Option<Review>,
    /// Signed in and not yet reviewed
    pub can_review: bool,
    /// Upper bound of the quantity picker
    pub max_quantity: u32,
}

/// Result of resolving a path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    /// The page to render; differs from the request after a guard redirect
    pub route: Route,
    pub path: String,
    pub redirected: bool,
}

/// Landing page: new arrivals, popular picks and the first catalog strip.
pub fn home(storefront: &Storefront) -> HomeView {
    debug!("home command");
    storefront.catalog().home_view()
}

pub fn list_books(storefront: &Storefront) -> BookListResponse {
    debug!("list_books command");
    BookListResponse::from(storefront)
}

pub fn get_categories(storefront: &Storefront) -> Vec<CategoryFilter> {
    storefront.catalog().categories()
}

/// Selects a category filter by label ("전체" for all).
///
/// ## Errors
/// `VALIDATION_ERROR` for a label outside the fixed category set.
pub fn set_category(storefront: &mut Storefront, category: &str) -> Result<BookListResponse, ApiError> {
    debug!(category = %category, "set_category command");

    let filter: CategoryFilter = category
        .parse()
        .map_err(|e: ValidationError| ApiError::validation(e.to_string()))?;
    storefront.catalog_mut().set_category(filter);

    Ok(BookListResponse::from(&*storefront))
}

pub fn set_search_query(storefront: &mut Storefront, query: &str) -> BookListResponse {
    debug!(query = %query, "set_search_query command");
    storefront.catalog_mut().set_search_query(query);
    BookListResponse::from(&*storefront)
}

/// Loads the detail page for a raw route parameter.
///
/// The parameter is coerced like the page does (`"7abc"` is book 7).
///
/// ## Errors
/// `NOT_FOUND` when nothing matches ("도서를 찾을 수 없습니다.").
pub fn get_book(storefront: &Storefront, raw_id: &str) -> Result<BookDetailResponse, ApiError> {
    debug!(id = %raw_id, "get_book command");

    let book = storefront
        .catalog()
        .find_by_param(raw_id)
        .cloned()
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "도서를 찾을 수 없습니다."))?;

    let reviews = storefront.reviews().list(book.id)?;
    let my_review = storefront
        .session()
        .current()
        .and_then(|user| reviews.iter().find(|r| r.user_id == user.id).cloned());
    let can_review = storefront.session().is_authenticated() && my_review.is_none();

    Ok(BookDetailResponse {
        max_quantity: book.stock.max(1),
        book,
        reviews,
        my_review,
        can_review,
    })
}

/// Resolves a path to a page, applying the route guards.
///
/// The search page copies its `q` parameter into the catalog query; the
/// book list does the same when `q` is non-empty.
///
/// ## Errors
/// `NOT_FOUND` for a path no page answers to.
pub fn navigate(storefront: &mut Storefront, path: &str) -> Result<NavigationResponse, ApiError> {
    debug!(path = %path, "navigate command");

    let requested = Route::parse(path).ok_or_else(|| ApiError::not_found("Page", path))?;

    match &requested {
        Route::Search { query } | Route::Books { query: Some(query) } => {
            storefront.catalog_mut().set_search_query(query.as_str());
        }
        _ => {}
    }

    let (route, redirected) = match requested.redirect_for(storefront.session()) {
        Some(target) => {
            debug!(from = %requested.path(), to = %target.path(), "Route guard redirect");
            (target, true)
        }
        None => (requested, false),
    };

    Ok(NavigationResponse {
        path: route.path(),
        route,
        redirected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use folio_core::Category;

    #[test]
    fn test_category_filter_round_trip() {
        let mut store = storefront();

        let list = set_category(&mut store, "IT/컴퓨터").unwrap();
        assert_eq!(list.category, CategoryFilter::Only(Category::Computing));
        assert!(!list.books.is_empty());
        assert!(list.books.iter().all(|b| b.category == Category::Computing));

        let all = set_category(&mut store, "전체").unwrap();
        assert_eq!(all.books.len(), store.catalog().books().len());

        let err = set_category(&mut store, "요리").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        // A rejected label leaves the filter alone.
        assert_eq!(store.catalog().category(), CategoryFilter::All);
    }

    #[test]
    fn test_get_book_coerces_param() {
        let store = storefront();
        assert_eq!(get_book(&store, "3abc").unwrap().book.id, 3);

        let err = get_book(&store, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "도서를 찾을 수 없습니다.");
    }

    #[test]
    fn test_review_eligibility() {
        let guest = storefront();
        assert!(!get_book(&guest, "1").unwrap().can_review);

        let bob = signed_in("bob@example.com");
        let detail = get_book(&bob, "1").unwrap();
        assert!(detail.can_review);
        assert!(detail.my_review.is_none());

        let user = bob.session().current().cloned().unwrap();
        bob.reviews()
            .add(1, &user, 4, "재밌어요", bob.clock().now())
            .unwrap();
        let detail = get_book(&bob, "1").unwrap();
        assert!(!detail.can_review);
        assert_eq!(detail.my_review.map(|r| r.rating), Some(4));
    }

    #[test]
    fn test_navigate_search_sets_query() {
        let mut store = storefront();
        let nav = navigate(&mut store, "/search?q=%EB%9F%AC%EC%8A%A4%ED%8A%B8").unwrap();
        assert!(!nav.redirected);
        assert_eq!(store.catalog().search_query(), "러스트");
    }

    #[test]
    fn test_navigate_book_list_sets_query() {
        let mut store = storefront();
        navigate(&mut store, "/books?q=%EB%8D%B0%EC%9D%B4%ED%84%B0").unwrap();
        assert_eq!(store.catalog().search_query(), "데이터");

        let nav = navigate(&mut store, "/books").unwrap();
        assert_eq!(nav.route, Route::Books { query: None });
        assert_eq!(store.catalog().search_query(), "데이터");
    }

    #[test]
    fn test_navigate_guards() {
        let mut guest = storefront();
        let nav = navigate(&mut guest, "/mypage").unwrap();
        assert!(nav.redirected);
        assert_eq!(nav.route, Route::Login);
        assert_eq!(nav.path, "/login");

        let mut bob = signed_in("bob@example.com");
        assert_eq!(navigate(&mut bob, "/admin").unwrap().route, Route::Home);
        assert_eq!(navigate(&mut bob, "/mypage").unwrap().route, Route::MyPage);

        assert_eq!(
            navigate(&mut bob, "/nowhere").unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
