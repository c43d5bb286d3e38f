//! # Session Commands
//!
//! Login, registration, logout and withdrawal.
//!
//! Authentication is mocked: any password is accepted once the form
//! passes validation. A guest cart carries into the first sign-in;
//! switching accounts or signing out empties it.

use folio_core::validation::{login_form, register_form, FormValues};
use folio_core::User;
use folio_store::Storefront;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

/// Login form submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    fn form_values(&self) -> FormValues {
        FormValues::from([
            ("email".to_string(), self.email.clone()),
            ("password".to_string(), self.password.clone()),
        ])
    }
}

/// Registration form submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl RegisterRequest {
    fn form_values(&self) -> FormValues {
        FormValues::from([
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("password".to_string(), self.password.clone()),
            ("passwordConfirm".to_string(), self.password_confirm.clone()),
        ])
    }
}

/// What the header needs: who is signed in and the cart badge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub cart_count: u64,
}

impl From<&Storefront> for SessionResponse {
    fn from(storefront: &Storefront) -> Self {
        let session = storefront.session();
        SessionResponse {
            user: session.current().cloned(),
            is_authenticated: session.is_authenticated(),
            is_admin: session.is_admin(),
            cart_count: storefront.cart().total_items(),
        }
    }
}

pub fn get_session(storefront: &Storefront) -> SessionResponse {
    debug!("get_session command");
    SessionResponse::from(storefront)
}

/// Signs in.
///
/// ## Errors
/// `VALIDATION_ERROR` with per-field messages for a blank or malformed
/// email or a blank password.
pub fn login(storefront: &mut Storefront, request: &LoginRequest) -> Result<SessionResponse, ApiError> {
    debug!(email = %request.email, "login command");

    login_form().validate(&request.form_values())?;
    storefront.login(&request.email, &request.password)?;

    Ok(SessionResponse::from(&*storefront))
}

/// Creates an account and signs it in.
///
/// ## Errors
/// `VALIDATION_ERROR` when a field is missing, the password is shorter
/// than six characters or the confirmation does not match.
pub fn register(storefront: &mut Storefront, request: &RegisterRequest) -> Result<SessionResponse, ApiError> {
    debug!(email = %request.email, "register command");

    register_form().validate(&request.form_values())?;
    storefront.register(&request.email, &request.password, &request.name)?;

    Ok(SessionResponse::from(&*storefront))
}

pub fn logout(storefront: &mut Storefront) -> Result<SessionResponse, ApiError> {
    debug!("logout command");
    storefront.logout()?;
    Ok(SessionResponse::from(&*storefront))
}

/// Withdraws the account. Reviews and purchase history are kept.
///
/// ## Errors
/// `UNAUTHENTICATED` when nobody is signed in.
pub fn withdraw(storefront: &mut Storefront) -> Result<SessionResponse, ApiError> {
    debug!("withdraw command");
    super::require_user(storefront)?;
    storefront.withdraw()?;
    Ok(SessionResponse::from(&*storefront))
}
