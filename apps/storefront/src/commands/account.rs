//! # Account Commands
//!
//! The "my page": profile, purchase history and the reviews the user
//! has written across the catalog.

use folio_core::validation::{profile_form, FormValues};
use folio_core::{Money, PurchaseRecord, User, UserPatch};
use folio_store::{Storefront, UserReview};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::ConfigState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub user: User,
    pub purchases: Vec<PurchaseRecord>,
    pub total_spent: Money,
    pub formatted_total_spent: String,
    pub reviews: Vec<UserReview>,
}

/// Profile form submission. Only the name is editable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRequest {
    pub name: String,
}

/// Loads the account page.
///
/// ## Errors
/// `UNAUTHENTICATED` without a session.
pub fn get_account(storefront: &Storefront, config: &ConfigState) -> Result<AccountResponse, ApiError> {
    debug!("get_account command");

    let user = super::require_user(storefront)?.clone();
    let purchases = storefront.purchases().list(user.id)?;
    let total_spent = storefront.purchases().total_spent(user.id)?;
    let reviews = storefront.reviews().by_user(user.id)?;

    Ok(AccountResponse {
        user,
        purchases,
        total_spent,
        formatted_total_spent: config.format_price(total_spent),
        reviews,
    })
}

/// Saves the profile form.
///
/// ## Errors
/// - `UNAUTHENTICATED` without a session
/// - `VALIDATION_ERROR` for a blank name
pub fn update_profile(storefront: &mut Storefront, request: &ProfileRequest) -> Result<User, ApiError> {
    debug!("update_profile command");

    super::require_user(storefront)?;
    profile_form().validate(&FormValues::from([("name".to_string(), request.name.clone())]))?;

    let user = storefront.update_user(UserPatch {
        name: Some(request.name.trim().to_string()),
        ..UserPatch::default()
    })?;
    Ok(user)
}
