//! # Routes
//!
//! The page addresses the presentation layer navigates between, parsed
//! into a closed enum.
//!
//! ```text
//! /                 → Home
//! /books?q=...      → Books { query }        (q kept only when non-empty)
//! /books/:id        → BookDetail { id }      (raw segment, coerced later)
//! /search?q=...     → Search { query }       (percent-decoded)
//! /login            → Login
//! /register         → Register
//! /cart             → Cart
//! /mypage           → MyPage                 (signed in, else → /login)
//! /admin            → Admin                  (admin, else → /)
//! ```

use folio_store::SessionStore;
use serde::Serialize;
use url::Url;

/// Base used to resolve bare paths; only the path and query are read back.
const ROUTE_BASE: &str = "http://folio.invalid/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum Route {
    Home,
    Books {
        #[serde(skip_serializing_if = "Option::is_none")]
        query: Option<String>,
    },
    BookDetail { id: String },
    Search { query: String },
    Login,
    Register,
    Cart,
    MyPage,
    Admin,
}

impl Route {
    /// Parses a path with an optional query string.
    ///
    /// Trailing slashes are ignored. Unknown paths are `None`.
    pub fn parse(target: &str) -> Option<Route> {
        let url = Url::parse(ROUTE_BASE).ok()?.join(target).ok()?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["books"] => Route::Books {
                query: search_param(&url).filter(|q| !q.is_empty()),
            },
            ["books", id] => Route::BookDetail { id: id.to_string() },
            ["search"] => Route::Search {
                query: search_param(&url).unwrap_or_default(),
            },
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["cart"] => Route::Cart,
            ["mypage"] => Route::MyPage,
            ["admin"] => Route::Admin,
            _ => return None,
        };
        Some(route)
    }

    /// The canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Books { query: None } => "/books".to_string(),
            Route::Books { query: Some(query) } => format!("/books?q={}", encode(query)),
            Route::BookDetail { id } => format!("/books/{id}"),
            Route::Search { query } => format!("/search?q={}", encode(query)),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Cart => "/cart".to_string(),
            Route::MyPage => "/mypage".to_string(),
            Route::Admin => "/admin".to_string(),
        }
    }

    /// Where the session must be sent instead, if this page is off limits.
    pub fn redirect_for(&self, session: &SessionStore) -> Option<Route> {
        match self {
            Route::MyPage if !session.is_authenticated() => Some(Route::Login),
            Route::Admin if !session.is_admin() => Some(Route::Home),
            _ => None,
        }
    }
}

/// The percent-decoded `q` parameter, if present.
fn search_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
}

fn encode(query: &str) -> String {
    url::form_urlencoded::byte_serialize(query.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_core::clock::FixedClock;
    use folio_store::MemoryKv;
    use std::sync::Arc;

    #[test]
    fn test_parse_static_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/books"), Some(Route::Books { query: None }));
        assert_eq!(Route::parse("/books/"), Some(Route::Books { query: None }));
        assert_eq!(Route::parse("/cart"), Some(Route::Cart));
        assert_eq!(Route::parse("/mypage"), Some(Route::MyPage));
        assert_eq!(Route::parse("/admin"), Some(Route::Admin));
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::parse("/books/1/extra"), None);
    }

    #[test]
    fn test_parse_book_detail_keeps_raw_id() {
        assert_eq!(
            Route::parse("/books/12"),
            Some(Route::BookDetail { id: "12".to_string() })
        );
    }

    #[test]
    fn test_search_query_is_decoded() {
        let route = Route::parse("/search?q=%EB%9F%AC%EC%8A%A4%ED%8A%B8+%EC%8B%9C%EC%8A%A4%ED%85%9C").unwrap();
        assert_eq!(
            route,
            Route::Search {
                query: "러스트 시스템".to_string()
            }
        );
        assert_eq!(Route::parse(&route.path()), Some(route));

        assert_eq!(
            Route::parse("/search"),
            Some(Route::Search { query: String::new() })
        );
    }

    #[test]
    fn test_book_list_reads_query() {
        let route = Route::parse("/books?q=%EB%9F%AC%EC%8A%A4%ED%8A%B8").unwrap();
        assert_eq!(
            route,
            Route::Books {
                query: Some("러스트".to_string())
            }
        );
        assert_eq!(Route::parse(&route.path()), Some(route));

        assert_eq!(Route::parse("/books?q="), Some(Route::Books { query: None }));
        assert_eq!(Route::parse("/books?filter=new"), Some(Route::Books { query: None }));
    }

    #[test]
    fn test_guards() {
        let clock = Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        let mut session = SessionStore::load(MemoryKv::shared(), clock);

        assert_eq!(Route::MyPage.redirect_for(&session), Some(Route::Login));
        assert_eq!(Route::Admin.redirect_for(&session), Some(Route::Home));
        assert_eq!(Route::Books { query: None }.redirect_for(&session), None);

        session.login("bob@example.com", "pw").unwrap();
        assert_eq!(Route::MyPage.redirect_for(&session), None);
        assert_eq!(Route::Admin.redirect_for(&session), Some(Route::Home));

        session.login("admin@example.com", "pw").unwrap();
        assert_eq!(Route::Admin.redirect_for(&session), None);
    }
}
