//! # Catalog Views
//!
//! Derived, read-only projections over the book collection.
//!
//! ## Views
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Views                                    │
//! │                                                                         │
//! │  books (insertion order)                                                │
//! │     │                                                                   │
//! │     ├──► filtered()      category == selected  AND  query ⊂ title|author│
//! │     │                    ("전체" and "" skip their half of the filter)    │
//! │     │                                                                   │
//! │     ├──► new_arrivals()  publishDate ≥ today − 3 months                 │
//! │     │                                                                   │
//! │     └──► popular()       stable sort by stock ascending, take 5         │
//! │                          (low stock stands in for sales volume)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every view keeps the collection's insertion order unless it sorts, and
//! no view copies books: callers get references into the collection.

use chrono::{Months, NaiveDate};
use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Book, BookId, CategoryFilter};
use crate::{HOME_CATALOG_LIMIT, HOME_NEW_ARRIVALS_LIMIT, NEW_ARRIVAL_MONTHS, POPULAR_LIMIT};

/// Books passing both the category filter and the search query.
///
/// ## Example
/// ```rust
/// use folio_core::catalog::filtered;
/// use folio_core::seed::seed_books;
/// use folio_core::CategoryFilter;
///
/// let books = seed_books();
/// let all = filtered(&books, CategoryFilter::All, "");
/// assert_eq!(all.len(), books.len());
/// ```
pub fn filtered<'a>(books: &'a [Book], filter: CategoryFilter, query: &str) -> Vec<&'a Book> {
    books
        .iter()
        .filter(|b| filter.matches(b.category))
        .filter(|b| b.matches_query(query))
        .collect()
}

/// Books published within the trailing three calendar months.
///
/// The lower bound is inclusive: a book published exactly three months
/// before `today` is still new. At month ends the cutoff clamps to the
/// last valid day (2024-05-31 gives 2024-02-29, not 2024-03-02).
pub fn new_arrivals(books: &[Book], today: NaiveDate) -> Vec<&Book> {
    let cutoff = today.checked_sub_months(Months::new(NEW_ARRIVAL_MONTHS));

    books
        .iter()
        .filter(|b| cutoff.map_or(true, |c| b.publish_date >= c))
        .collect()
}

/// The popular list: lowest stock first, ties in collection order.
pub fn popular(books: &[Book]) -> Vec<&Book> {
    let mut ranked: Vec<&Book> = books.iter().collect();
    // sort_by_key is stable, which keeps ties in insertion order.
    ranked.sort_by_key(|b| b.stock);
    ranked.truncate(POPULAR_LIMIT);
    ranked
}

/// Id for the next book added to the catalog: `max(existing) + 1`.
///
/// ## Errors
/// [`CoreError::EmptyCatalog`] when there is no existing id to count from.
pub fn next_book_id(books: &[Book]) -> CoreResult<BookId> {
    books
        .iter()
        .map(|b| b.id)
        .max()
        .map(|max| max + 1)
        .ok_or(CoreError::EmptyCatalog)
}

/// The landing page composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub new_arrivals: Vec<Book>,
    pub popular: Vec<Book>,
    pub all_books: Vec<Book>,
}

impl HomeView {
    pub fn build(books: &[Book], today: NaiveDate) -> Self {
        HomeView {
            new_arrivals: new_arrivals(books, today)
                .into_iter()
                .take(HOME_NEW_ARRIVALS_LIMIT)
                .cloned()
                .collect(),
            popular: popular(books).into_iter().cloned().collect(),
            all_books: books.iter().take(HOME_CATALOG_LIMIT).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_books;
    use crate::types::Category;

    fn with_stock(stocks: &[(BookId, u32)]) -> Vec<Book> {
        let template = seed_books().remove(0);
        stocks
            .iter()
            .map(|&(id, stock)| Book {
                id,
                stock,
                ..template.clone()
            })
            .collect()
    }

    fn ids(view: &[&Book]) -> Vec<BookId> {
        view.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_filtered_all_and_empty_query_is_identity() {
        let books = seed_books();
        let view = filtered(&books, CategoryFilter::All, "");
        let expected: Vec<BookId> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids(&view), expected);
    }

    #[test]
    fn test_filtered_by_category_only() {
        let books = seed_books();
        let view = filtered(&books, Category::Fiction.into(), "");

        let expected: Vec<BookId> = books
            .iter()
            .filter(|b| b.category == Category::Fiction)
            .map(|b| b.id)
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(ids(&view), expected);
    }

    #[test]
    fn test_filtered_intersects_category_and_query() {
        let mut books = with_stock(&[(1, 1), (2, 1), (3, 1)]);
        books[0].category = Category::Computing;
        books[0].title = "Rust in Action".to_string();
        books[1].category = Category::Computing;
        books[1].title = "Python Crash Course".to_string();
        books[2].category = Category::Fiction;
        books[2].title = "Rusty Nails".to_string();

        let view = filtered(&books, Category::Computing.into(), "RUST");
        assert_eq!(ids(&view), vec![1]);

        let view = filtered(&books, CategoryFilter::All, "rust");
        assert_eq!(ids(&view), vec![1, 3]);
    }

    #[test]
    fn test_popular_sorted_ascending_by_stock() {
        let books = with_stock(&[(1, 10), (2, 3), (3, 7)]);
        assert_eq!(ids(&popular(&books)), vec![2, 3, 1]);
    }

    #[test]
    fn test_popular_is_stable_and_capped() {
        let books = with_stock(&[(1, 5), (2, 1), (3, 5), (4, 1), (5, 9), (6, 0), (7, 5)]);
        assert_eq!(ids(&popular(&books)), vec![6, 2, 4, 1, 3]);
    }

    #[test]
    fn test_new_arrivals_window_is_inclusive() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let mut books = with_stock(&[(1, 1), (2, 1), (3, 1), (4, 1)]);
        // 2024-05-31 minus three months clamps to 2024-02-29.
        books[0].publish_date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        books[1].publish_date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        books[2].publish_date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        books[3].publish_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        assert_eq!(ids(&new_arrivals(&books, today)), vec![1, 3, 4]);
    }

    #[test]
    fn test_next_book_id() {
        let books = with_stock(&[(4, 1), (9, 1), (2, 1)]);
        assert_eq!(next_book_id(&books).unwrap(), 10);
        assert!(matches!(next_book_id(&[]), Err(CoreError::EmptyCatalog)));
    }

    #[test]
    fn test_home_view_limits() {
        let books = seed_books();
        let today = books.iter().map(|b| b.publish_date).max().unwrap();
        let home = HomeView::build(&books, today);

        assert!(home.all_books.len() <= HOME_CATALOG_LIMIT);
        assert!(home.new_arrivals.len() <= HOME_NEW_ARRIVALS_LIMIT);
        assert!(!home.new_arrivals.is_empty());
        assert_eq!(home.popular.len(), POPULAR_LIMIT);
    }
}
