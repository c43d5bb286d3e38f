//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │      User       │   │     Review      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  title, author  │   │  email, name    │   │  userId         │       │
//! │  │  category       │   │  role           │   │  rating 1..=5   │       │
//! │  │  price (Money)  │   └─────────────────┘   │  text, date     │       │
//! │  │  stock          │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │ CategoryFilter  │   │ PurchaseRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  소설, 에세이…    │   │  All ("전체")    │   │  CartItem       │       │
//! │  │  (fixed set)    │   │  Only(Category) │   │  + date         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Every record serializes with camelCase field names (`publishDate`,
//! `userId`, `userName`). This is the layout stored under the `user`,
//! `reviews_<bookId>` and `purchases_<userId>` keys.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartItem;
use crate::error::ValidationError;
use crate::money::Money;
use crate::{ADMIN_EMAIL, ALL_CATEGORIES_LABEL};

/// Integer identity of a book, unique within the catalog.
pub type BookId = i64;

/// Integer identity of a user.
pub type UserId = i64;

// =============================================================================
// User
// =============================================================================

/// Role carried by a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// The signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[ts(type = "number")]
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl User {
    /// Derives the mock login identity for an email address.
    ///
    /// The result depends only on the email: the name is the local part,
    /// the role is admin for [`ADMIN_EMAIL`], and the id is a stable hash
    /// of the address so that the same person gets the same purchase
    /// history on every login.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::{Role, User};
    ///
    /// let bob = User::from_login_email("bob@example.com");
    /// assert_eq!(bob.name, "bob");
    /// assert_eq!(bob.role, Role::User);
    /// assert_eq!(bob, User::from_login_email("bob@example.com"));
    /// ```
    pub fn from_login_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or_default().to_string();
        let role = if email == ADMIN_EMAIL {
            Role::Admin
        } else {
            Role::User
        };

        User {
            id: login_id_for(email),
            email: email.to_string(),
            name,
            role,
        }
    }

    /// Builds a freshly registered user; registration never grants admin.
    pub fn registered(id: UserId, email: &str, name: &str) -> Self {
        User {
            id,
            email: email.to_string(),
            name: name.to_string(),
            role: Role::User,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Merges a partial update into this user.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }
}

/// 32-bit FNV-1a over the email bytes, widened to a positive id.
fn login_id_for(email: &str) -> UserId {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    let hash = email
        .bytes()
        .fold(OFFSET_BASIS, |acc, b| (acc ^ u32::from(b)).wrapping_mul(PRIME));
    // Keep ids clear of zero so a derived id never looks like "no user".
    i64::from(hash) + 1
}

/// Fields the account page may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// =============================================================================
// Category
// =============================================================================

/// The fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    #[serde(rename = "소설")]
    Fiction,
    #[serde(rename = "에세이")]
    Essay,
    #[serde(rename = "자기계발")]
    SelfHelp,
    #[serde(rename = "경제/경영")]
    Business,
    #[serde(rename = "인문")]
    Humanities,
    #[serde(rename = "과학")]
    Science,
    #[serde(rename = "IT/컴퓨터")]
    Computing,
    #[serde(rename = "어린이")]
    Children,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 8] = [
        Category::Fiction,
        Category::Essay,
        Category::SelfHelp,
        Category::Business,
        Category::Humanities,
        Category::Science,
        Category::Computing,
        Category::Children,
    ];

    /// The label shown in the filter bar and stored in records.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Fiction => "소설",
            Category::Essay => "에세이",
            Category::SelfHelp => "자기계발",
            Category::Business => "경제/경영",
            Category::Humanities => "인문",
            Category::Science => "과학",
            Category::Computing => "IT/컴퓨터",
            Category::Children => "어린이",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{s}'"),
            })
    }
}

/// The category selection of the catalog filter bar.
///
/// `All` is the "전체" sentinel: it is a filter value only, never the
/// category of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export, type = "string")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a book with `category` passes this filter.
    #[inline]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES_LABEL,
            CategoryFilter::Only(c) => c.label(),
        }
    }

    /// The filter bar entries: "전체" followed by every category.
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == ALL_CATEGORIES_LABEL {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.label().to_string()
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book record in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[ts(type = "number")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub category: Category,
    pub price: Money,
    pub stock: u32,
    pub isbn: String,
    #[ts(as = "String")]
    pub publish_date: NaiveDate,
    pub description: String,
    /// Image URL or `data:` URI.
    pub image: String,
}

impl Book {
    /// Builds a catalog record from admin form fields and an assigned id.
    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        Book {
            id,
            title: draft.title,
            author: draft.author,
            publisher: draft.publisher,
            category: draft.category,
            price: draft.price,
            stock: draft.stock,
            isbn: draft.isbn,
            publish_date: draft.publish_date,
            description: draft.description,
            image: draft.image,
        }
    }

    /// Merges a partial update. The id never changes.
    pub fn apply(&mut self, patch: BookPatch) {
        let BookPatch {
            title,
            author,
            publisher,
            category,
            price,
            stock,
            isbn,
            publish_date,
            description,
            image,
        } = patch;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = author {
            self.author = v;
        }
        if let Some(v) = publisher {
            self.publisher = v;
        }
        if let Some(v) = category {
            self.category = v;
        }
        if let Some(v) = price {
            self.price = v;
        }
        if let Some(v) = stock {
            self.stock = v;
        }
        if let Some(v) = isbn {
            self.isbn = v;
        }
        if let Some(v) = publish_date {
            self.publish_date = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = image {
            self.image = v;
        }
    }

    /// Case-insensitive substring match against title or author.
    ///
    /// An empty query matches every book.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.author.to_lowercase().contains(&needle)
    }
}

/// Every field of a book except its id, as entered in the admin form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub category: Category,
    pub price: Money,
    pub stock: u32,
    pub isbn: String,
    #[ts(as = "String")]
    pub publish_date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// A partial book update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub publish_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<BookDraft> for BookPatch {
    /// An edit submitted through the full admin form touches every field.
    fn from(draft: BookDraft) -> Self {
        BookPatch {
            title: Some(draft.title),
            author: Some(draft.author),
            publisher: Some(draft.publisher),
            category: Some(draft.category),
            price: Some(draft.price),
            stock: Some(draft.stock),
            isbn: Some(draft.isbn),
            publish_date: Some(draft.publish_date),
            description: Some(draft.description),
            image: Some(draft.image),
        }
    }
}

/// Coerces a route parameter to a book id the way the detail page does.
///
/// Leading whitespace and an optional sign are accepted, then the longest
/// run of ASCII digits is parsed; trailing garbage is ignored.
///
/// ## Example
/// ```rust
/// use folio_core::parse_book_id;
///
/// assert_eq!(parse_book_id("12"), Some(12));
/// assert_eq!(parse_book_id(" 7abc"), Some(7));
/// assert_eq!(parse_book_id("abc"), None);
/// ```
pub fn parse_book_id(raw: &str) -> Option<BookId> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(rest.len(), |(i, _)| i);
        &rest[..end]
    };

    let value: BookId = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

// =============================================================================
// Review
// =============================================================================

/// A reader review attached to one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[ts(type = "number")]
    pub id: i64,
    #[ts(type = "number")]
    pub user_id: UserId,
    pub user_name: String,
    pub rating: u8,
    pub text: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

// =============================================================================
// Purchase Record
// =============================================================================

/// A cart line frozen at checkout, appended to the buyer's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseRecord {
    #[serde(flatten)]
    pub item: CartItem,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl PurchaseRecord {
    pub fn new(item: CartItem, date: DateTime<Utc>) -> Self {
        PurchaseRecord { item, date }
    }

    /// Price paid for the whole line.
    pub fn line_total(&self) -> Money {
        self.item.line_total()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_books;

    #[test]
    fn test_login_identity_roles() {
        let admin = User::from_login_email("admin@example.com");
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.name, "admin");
        assert!(admin.is_admin());

        let bob = User::from_login_email("bob@example.com");
        assert_eq!(bob.role, Role::User);
        assert_eq!(bob.name, "bob");
        assert_ne!(bob.id, admin.id);
    }

    #[test]
    fn test_login_identity_is_deterministic() {
        let a = User::from_login_email("reader@example.com");
        let b = User::from_login_email("reader@example.com");
        assert_eq!(a, b);
        assert!(a.id > 0);
    }

    #[test]
    fn test_user_patch_merges_only_present_fields() {
        let mut user = User::registered(42, "kim@example.com", "Kim");
        user.apply(UserPatch {
            name: Some("Kim Minji".to_string()),
            email: None,
        });
        assert_eq!(user.name, "Kim Minji");
        assert_eq!(user.email, "kim@example.com");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
        assert!("만화".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_filter_parse_and_match() {
        assert_eq!("전체".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        let only = "과학".parse::<CategoryFilter>().unwrap();
        assert_eq!(only, CategoryFilter::Only(Category::Science));
        assert!(only.matches(Category::Science));
        assert!(!only.matches(Category::Fiction));
        assert!(CategoryFilter::All.matches(Category::Fiction));

        let options = CategoryFilter::options();
        assert_eq!(options.len(), Category::ALL.len() + 1);
        assert_eq!(options[0], CategoryFilter::All);
    }

    #[test]
    fn test_category_filter_serializes_as_label() {
        let json = serde_json::to_string(&CategoryFilter::All).unwrap();
        assert_eq!(json, "\"전체\"");
        let back: CategoryFilter = serde_json::from_str("\"IT/컴퓨터\"").unwrap();
        assert_eq!(back, CategoryFilter::Only(Category::Computing));
    }

    #[test]
    fn test_book_patch_changes_only_given_fields() {
        let mut book = seed_books().remove(0);
        let before = book.clone();

        book.apply(BookPatch {
            price: Some(Money::from_won(500)),
            ..BookPatch::default()
        });

        assert_eq!(book.price, Money::from_won(500));
        assert_eq!(book.id, before.id);
        assert_eq!(book.title, before.title);
        assert_eq!(book.stock, before.stock);
        assert_eq!(book.publish_date, before.publish_date);
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let mut book = seed_books().remove(0);
        book.title = "Clean Code".to_string();
        book.author = "Robert C. Martin".to_string();

        assert!(book.matches_query(""));
        assert!(book.matches_query("clean"));
        assert!(book.matches_query("MARTIN"));
        assert!(!book.matches_query("refactoring"));
    }

    #[test]
    fn test_parse_book_id() {
        assert_eq!(parse_book_id("3"), Some(3));
        assert_eq!(parse_book_id("  15 "), Some(15));
        assert_eq!(parse_book_id("8-detail"), Some(8));
        assert_eq!(parse_book_id("-2"), Some(-2));
        assert_eq!(parse_book_id(""), None);
        assert_eq!(parse_book_id("x1"), None);
    }

    #[test]
    fn test_book_serializes_camel_case() {
        let book = seed_books().remove(0);
        let value = serde_json::to_value(&book).unwrap();
        assert!(value.get("publishDate").is_some());
        assert!(value.get("publish_date").is_none());
        assert!(value["price"].is_i64());
    }
}
