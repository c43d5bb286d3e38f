//! # Catalog Store
//!
//! The book collection plus the filter bar state.
//!
//! The collection starts from the seed dataset on every run. Admin edits
//! live only as long as the store does; nothing here touches the
//! key-value port.

use std::sync::Arc;

use folio_core::catalog::{self, HomeView};
use folio_core::clock::Clock;
use folio_core::seed::seed_books;
use folio_core::{parse_book_id, Book, BookDraft, BookId, BookPatch, CategoryFilter, CoreResult};
use tracing::debug;

use crate::events::{CatalogEvent, EventBus, SubscriptionId};

#[derive(Debug)]
pub struct CatalogStore {
    books: Vec<Book>,
    category: CategoryFilter,
    query: String,
    clock: Arc<dyn Clock>,
    events: EventBus<CatalogEvent>,
}

impl CatalogStore {
    pub fn new(books: Vec<Book>, clock: Arc<dyn Clock>) -> Self {
        CatalogStore {
            books,
            category: CategoryFilter::All,
            query: String::new(),
            clock,
            events: EventBus::new(),
        }
    }

    /// A catalog holding the seed dataset.
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        CatalogStore::new(seed_books(), clock)
    }

    // =========================================================================
    // Filter State
    // =========================================================================

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn search_query(&self) -> &str {
        &self.query
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        debug!(category = %category, "Set category filter");
        self.category = category;
        self.events.emit(&CatalogEvent::CategoryChanged { category });
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        debug!(query = %self.query, "Set search query");
        self.events.emit(&CatalogEvent::QueryChanged {
            query: self.query.clone(),
        });
    }

    /// The filter bar entries, "전체" first.
    pub fn categories(&self) -> Vec<CategoryFilter> {
        CategoryFilter::options()
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Books matching the current category and search query.
    pub fn filtered_view(&self) -> Vec<&Book> {
        catalog::filtered(&self.books, self.category, &self.query)
    }

    pub fn new_arrivals_view(&self) -> Vec<&Book> {
        catalog::new_arrivals(&self.books, self.clock.today())
    }

    pub fn popular_view(&self) -> Vec<&Book> {
        catalog::popular(&self.books)
    }

    pub fn home_view(&self) -> HomeView {
        HomeView::build(&self.books, self.clock.today())
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Looks up a book from a raw route parameter such as `"12"`.
    pub fn find_by_param(&self, raw: &str) -> Option<&Book> {
        parse_book_id(raw).and_then(|id| self.get(id))
    }

    // =========================================================================
    // Admin Mutations
    // =========================================================================

    /// Appends a new book numbered `max(id) + 1`.
    pub fn add(&mut self, draft: BookDraft) -> CoreResult<Book> {
        let id = catalog::next_book_id(&self.books)?;
        let book = Book::from_draft(id, draft);

        debug!(id, title = %book.title, "Added book");
        self.books.push(book.clone());
        self.events.emit(&CatalogEvent::BookAdded { id });
        Ok(book)
    }

    /// Merges `patch` into the book with `id`. Returns `false` if missing.
    pub fn update(&mut self, id: BookId, patch: BookPatch) -> bool {
        let Some(book) = self.books.iter_mut().find(|b| b.id == id) else {
            return false;
        };

        book.apply(patch);
        debug!(id, "Updated book");
        self.events.emit(&CatalogEvent::BookUpdated { id });
        true
    }

    /// Deletes the book with `id`. Returns `false` if missing.
    pub fn remove(&mut self, id: BookId) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id != id);
        if self.books.len() == before {
            return false;
        }

        debug!(id, "Removed book");
        self.events.emit(&CatalogEvent::BookRemoved { id });
        true
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&CatalogEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_core::clock::FixedClock;
    use folio_core::{Category, CoreError, Money};

    fn store() -> CatalogStore {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        CatalogStore::seeded(Arc::new(FixedClock::at_date(today)))
    }

    fn draft() -> BookDraft {
        BookDraft {
            title: "새 책".to_string(),
            author: "작가".to_string(),
            publisher: "출판사".to_string(),
            category: Category::Science,
            price: Money::from_won(20_000),
            stock: 3,
            isbn: "9780000000001".to_string(),
            publish_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            description: "설명".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn test_default_filter_shows_everything() {
        let catalog = store();
        assert_eq!(catalog.category(), CategoryFilter::All);
        assert_eq!(catalog.search_query(), "");
        assert_eq!(catalog.filtered_view().len(), catalog.books().len());
    }

    #[test]
    fn test_filter_state_drives_view() {
        let mut catalog = store();
        catalog.set_category(Category::Fiction.into());
        assert!(catalog
            .filtered_view()
            .iter()
            .all(|b| b.category == Category::Fiction));

        catalog.set_category(CategoryFilter::All);
        catalog.set_search_query("이서윤");
        let authors: Vec<&str> = catalog.filtered_view().iter().map(|b| b.author.as_str()).collect();
        assert!(!authors.is_empty());
        assert!(authors.iter().all(|a| *a == "이서윤"));
    }

    #[test]
    fn test_add_assigns_max_plus_one() {
        let mut catalog = store();
        let max = catalog.books().iter().map(|b| b.id).max().unwrap();

        let book = catalog.add(draft()).unwrap();
        assert_eq!(book.id, max + 1);
        assert_eq!(catalog.get(book.id), Some(&book));
    }

    #[test]
    fn test_add_to_empty_catalog_fails() {
        let mut catalog = CatalogStore::new(Vec::new(), Arc::new(FixedClock::at_date(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )));
        assert!(matches!(catalog.add(draft()), Err(CoreError::EmptyCatalog)));
    }

    #[test]
    fn test_update_changes_only_patched_fields() {
        let mut catalog = store();
        let before = catalog.get(1).cloned().unwrap();

        assert!(catalog.update(
            1,
            BookPatch {
                price: Some(Money::from_won(500)),
                ..BookPatch::default()
            }
        ));

        let after = catalog.get(1).unwrap();
        assert_eq!(after.price, Money::from_won(500));
        assert_eq!(
            Book {
                price: before.price,
                ..after.clone()
            },
            before
        );
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut catalog = store();
        let count = catalog.books().len();

        assert!(!catalog.update(999, BookPatch::default()));
        assert!(!catalog.remove(999));
        assert_eq!(catalog.books().len(), count);
        assert!(catalog.get(999).is_none());
    }

    #[test]
    fn test_remove_then_get() {
        let mut catalog = store();
        assert!(catalog.remove(2));
        assert!(catalog.get(2).is_none());
        assert!(catalog.filtered_view().iter().all(|b| b.id != 2));
    }

    #[test]
    fn test_find_by_param() {
        let catalog = store();
        assert_eq!(catalog.find_by_param("3").map(|b| b.id), Some(3));
        assert_eq!(catalog.find_by_param("3-anything").map(|b| b.id), Some(3));
        assert!(catalog.find_by_param("abc").is_none());
        assert!(catalog.find_by_param("404").is_none());
    }

    #[test]
    fn test_new_arrivals_use_clock() {
        let catalog = store();
        let cutoff = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let view = catalog.new_arrivals_view();
        assert!(!view.is_empty());
        assert!(view.iter().all(|b| b.publish_date >= cutoff));
    }

    #[test]
    fn test_categories_start_with_all() {
        let catalog = store();
        let categories = catalog.categories();
        assert_eq!(categories.first(), Some(&CategoryFilter::All));
        assert_eq!(categories.len(), Category::ALL.len() + 1);
    }
}
