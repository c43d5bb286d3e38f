//! # Request Dispatch
//!
//! Decodes one JSON request line, routes it to its command and wraps the
//! outcome in the response envelope.
//!
//! ## Wire Format
//! ```text
//! request   {"command":"add_to_cart","bookId":3,"quantity":2}
//! success   {"ok":true,"data":{...}}
//! failure   {"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}
//! ```
//!
//! Arguments sit next to `command` in camelCase. Commands without a
//! result (`delete_book`) answer with `"data":null`.

use folio_core::validation::FormValues;
use folio_core::BookId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::commands::{account, admin, cart, catalog, config, reviews, session};
use crate::error::ApiError;
use crate::state::AppState;

/// Every command the presentation layer can send.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Request {
    // Catalog
    Home,
    ListBooks,
    GetCategories,
    SetCategory { category: String },
    SetSearchQuery { query: String },
    GetBook { id: RouteParam },
    Navigate { path: String },

    // Session
    GetSession,
    Login(session::LoginRequest),
    Register(session::RegisterRequest),
    Logout,
    Withdraw,

    // Account
    GetAccount,
    UpdateProfile(account::ProfileRequest),

    // Cart
    GetCart,
    AddToCart { book_id: BookId, quantity: Option<i64> },
    UpdateCartItem { book_id: BookId, quantity: i64 },
    RemoveFromCart { book_id: BookId },
    ClearCart,
    Checkout,

    // Reviews
    ListReviews { book_id: BookId },
    AddReview {
        book_id: BookId,
        rating: i64,
        #[serde(default)]
        text: String,
    },
    EditReview {
        book_id: BookId,
        review_id: i64,
        rating: i64,
        #[serde(default)]
        text: String,
    },
    DeleteReview { book_id: BookId, review_id: i64 },

    // Admin
    AddBook { form: FormValues },
    UpdateBook { id: BookId, form: FormValues },
    DeleteBook { id: BookId },

    // Config
    GetConfig,
}

/// A book id as it appears in a route: a number, or the raw path segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RouteParam {
    Id(BookId),
    Raw(String),
}

impl RouteParam {
    fn as_raw(&self) -> String {
        match self {
            RouteParam::Id(id) => id.to_string(),
            RouteParam::Raw(raw) => raw.clone(),
        }
    }
}

/// The response envelope written back for every request line.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Response {
    pub fn success(data: Value) -> Self {
        Response {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ApiError) -> Self {
        Response {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

impl From<Result<Value, ApiError>> for Response {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Response::success(data),
            Err(error) => Response::failure(error),
        }
    }
}

/// Handles one raw request line.
pub fn handle_line(state: &mut AppState, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(state, request).into(),
        Err(e) => {
            warn!(error = %e, "Rejected malformed request");
            Response::failure(ApiError::bad_request(format!("Invalid request: {e}")))
        }
    }
}

/// Routes a decoded request to its command.
pub fn handle(state: &mut AppState, request: Request) -> Result<Value, ApiError> {
    let storefront = &mut state.storefront;
    let cfg = &state.config;

    match request {
        Request::Home => to_data(catalog::home(storefront)),
        Request::ListBooks => to_data(catalog::list_books(storefront)),
        Request::GetCategories => to_data(catalog::get_categories(storefront)),
        Request::SetCategory { category } => to_data(catalog::set_category(storefront, &category)?),
        Request::SetSearchQuery { query } => to_data(catalog::set_search_query(storefront, &query)),
        Request::GetBook { id } => to_data(catalog::get_book(storefront, &id.as_raw())?),
        Request::Navigate { path } => to_data(catalog::navigate(storefront, &path)?),

        Request::GetSession => to_data(session::get_session(storefront)),
        Request::Login(form) => to_data(session::login(storefront, &form)?),
        Request::Register(form) => to_data(session::register(storefront, &form)?),
        Request::Logout => to_data(session::logout(storefront)?),
        Request::Withdraw => to_data(session::withdraw(storefront)?),

        Request::GetAccount => to_data(account::get_account(storefront, cfg)?),
        Request::UpdateProfile(form) => to_data(account::update_profile(storefront, &form)?),

        Request::GetCart => to_data(cart::get_cart(storefront)),
        Request::AddToCart { book_id, quantity } => to_data(cart::add_to_cart(storefront, book_id, quantity)?),
        Request::UpdateCartItem { book_id, quantity } => {
            to_data(cart::update_cart_item(storefront, book_id, quantity))
        }
        Request::RemoveFromCart { book_id } => to_data(cart::remove_from_cart(storefront, book_id)),
        Request::ClearCart => to_data(cart::clear_cart(storefront)),
        Request::Checkout => to_data(cart::checkout(storefront, cfg)?),

        Request::ListReviews { book_id } => to_data(reviews::list_reviews(storefront, book_id)?),
        Request::AddReview { book_id, rating, text } => {
            let review = reviews::ReviewRequest { rating, text };
            to_data(reviews::add_review(storefront, book_id, &review)?)
        }
        Request::EditReview {
            book_id,
            review_id,
            rating,
            text,
        } => {
            let review = reviews::ReviewRequest { rating, text };
            to_data(reviews::edit_review(storefront, book_id, review_id, &review)?)
        }
        Request::DeleteReview { book_id, review_id } => {
            to_data(reviews::delete_review(storefront, book_id, review_id)?)
        }

        Request::AddBook { form } => to_data(admin::add_book(storefront, &form)?),
        Request::UpdateBook { id, form } => to_data(admin::update_book(storefront, id, &form)?),
        Request::DeleteBook { id } => to_data(admin::delete_book(storefront, id)?),

        Request::GetConfig => to_data(config::get_config(cfg)),
    }
}

fn to_data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!("Response serialization failed: {}", e);
        ApiError::internal("Response could not be encoded")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use chrono::NaiveDate;
    use folio_core::clock::FixedClock;
    use folio_store::MemoryKv;
    use serde_json::json;
    use std::sync::Arc;

    fn state() -> AppState {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        AppState::with_kv(ConfigState::default(), MemoryKv::shared(), Arc::new(clock))
    }

    fn send(state: &mut AppState, request: Value) -> Value {
        let response = handle_line(state, &request.to_string());
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_malformed_lines() {
        let mut state = state();

        let reply = send(&mut state, json!({"command": "fly_to_moon"}));
        assert_eq!(reply["ok"], false);
        assert_eq!(reply["error"]["code"], "BAD_REQUEST");

        let response = serde_json::to_value(handle_line(&mut state, "{not json")).unwrap();
        assert_eq!(response["error"]["code"], "BAD_REQUEST");
    }

    #[test]
    fn test_shopping_session() {
        let mut state = state();

        let reply = send(&mut state, json!({"command": "add_to_cart", "bookId": 1, "quantity": 2}));
        assert_eq!(reply["ok"], true);
        assert_eq!(reply["data"]["totals"]["totalItems"], 2);

        let reply = send(&mut state, json!({"command": "checkout"}));
        assert_eq!(reply["error"]["code"], "UNAUTHENTICATED");

        let reply = send(
            &mut state,
            json!({"command": "login", "email": "bob@example.com", "password": "pw"}),
        );
        assert_eq!(reply["data"]["isAuthenticated"], true);
        // The guest cart survives sign-in.
        assert_eq!(reply["data"]["cartCount"], 2);

        send(&mut state, json!({"command": "add_to_cart", "bookId": 1}));
        let reply = send(&mut state, json!({"command": "checkout"}));
        assert_eq!(reply["ok"], true);
        assert_eq!(reply["data"]["records"].as_array().map(Vec::len), Some(1));
        assert_eq!(reply["data"]["records"][0]["quantity"], 3);

        let reply = send(&mut state, json!({"command": "get_account"}));
        assert_eq!(reply["data"]["purchases"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_review_round_trip() {
        let mut state = state();
        send(
            &mut state,
            json!({"command": "login", "email": "bob@example.com", "password": "pw"}),
        );

        let reply = send(
            &mut state,
            json!({"command": "add_review", "bookId": 2, "rating": 5, "text": "최고"}),
        );
        assert_eq!(reply["ok"], true);
        let review_id = reply["data"]["id"].as_i64().unwrap();

        let reply = send(
            &mut state,
            json!({"command": "edit_review", "bookId": 2, "reviewId": review_id, "rating": 2, "text": "다시 보니 별로"}),
        );
        assert_eq!(reply["data"]["rating"], 2);

        let reply = send(&mut state, json!({"command": "get_book", "id": "2"}));
        assert_eq!(reply["data"]["myReview"]["id"], review_id);
    }

    #[test]
    fn test_form_errors_on_the_wire() {
        let mut state = state();
        let reply = send(&mut state, json!({"command": "login"}));

        assert_eq!(reply["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(reply["error"]["fields"][0]["field"], "email");
    }

    #[test]
    fn test_delete_book_answers_null() {
        let mut state = state();
        send(
            &mut state,
            json!({"command": "login", "email": "admin@example.com", "password": "x"}),
        );

        let reply = send(&mut state, json!({"command": "delete_book", "id": 1}));
        assert_eq!(reply, json!({"ok": true, "data": null}));
    }
}
