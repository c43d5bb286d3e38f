//! # Store Error Types
//!
//! Error types for store and persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error      CoreError / ValidationError   │
//! │       │                                        │                        │
//! │       └───────────────┬────────────────────────┘                        │
//! │                       ▼                                                 │
//! │  StoreError (this module) ← adds precondition failures                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in storefront app) ← serialized for the presentation layer  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups that can miss return `Option`, never an error.

use folio_core::{CoreError, FieldErrors, ValidationError};
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An operation needs a signed-in user and there is none.
    ///
    /// ## When This Occurs
    /// - `update_user` after logout
    /// - Checkout or review submission without a session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Domain rule violation from folio-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing the backing file failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted record could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

impl From<FieldErrors> for StoreError {
    fn from(err: FieldErrors) -> Self {
        StoreError::Core(err.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
