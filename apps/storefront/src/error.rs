//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Presentation layer          Rust shell                                 │
//! │  ──────────────────          ──────────                                 │
//! │                                                                         │
//! │  {"command":"checkout"}                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ─── StoreError::NotAuthenticated ───┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Form Error? ─── FieldErrors ───────────────── ApiError ───────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"ok":false,"error":{"code":"UNAUTHENTICATED","message":"..."}}        │
//! │  → caller redirects to /login                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use folio_core::{CoreError, FieldErrors};
use folio_store::StoreError;
use serde::Serialize;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Form validation failed",
///   "fields": [{ "field": "email", "message": "이메일을 입력해주세요." }]
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages when a form failed validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Book, review or route not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// No signed-in user; the caller should go to /login
    Unauthenticated,

    /// Signed in, but not allowed (admin-only, author-only, already reviewed)
    Forbidden,

    /// Cart operation failed (e.g. checkout with an empty cart)
    CartError,

    /// Reading or writing persisted records failed
    StorageError,

    /// The request line could not be understood
    BadRequest,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// A form failure carrying every field message.
    pub fn form(fields: FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: fields.to_string(),
            fields: Some(fields),
        }
    }

    pub fn unauthenticated() -> Self {
        ApiError::new(ErrorCode::Unauthenticated, "로그인이 필요합니다.")
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<FieldErrors> for ApiError {
    fn from(err: FieldErrors) -> Self {
        ApiError::form(err)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Form(fields) => ApiError::form(fields),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            e @ CoreError::EmptyCatalog => ApiError::internal(e.to_string()),
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotAuthenticated => ApiError::unauthenticated(),
            StoreError::EmptyCart => ApiError::new(ErrorCode::CartError, "장바구니가 비어 있습니다."),
            StoreError::Core(e) => e.into(),
            StoreError::Io(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Storage I/O failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            StoreError::Serialization(e) => {
                tracing::error!("Stored record unreadable: {}", e);
                ApiError::new(ErrorCode::StorageError, "Stored data could not be read")
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
