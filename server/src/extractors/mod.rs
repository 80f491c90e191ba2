use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::models::user::{UserAccount, Viewer};
use crate::routes::USER_ID_HEADER;
use crate::state::AppState;
use crate::utils::error::AppError;

/// The signed-in account, resolved from the `x-user-id` header the client
/// keeps from its login response.
pub struct CurrentUser(pub UserAccount);

impl CurrentUser {
    pub fn viewer(&self) -> Viewer {
        self.0.viewer()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::AuthError("You must be logged in to perform this action".to_string()))?;

        let account = state
            .store
            .user(user_id)
            .await
            .ok_or_else(|| AppError::AuthError(format!("Unknown user '{}'", user_id)))?;

        tracing::debug!(user_id = %account.id, role = ?account.role, "Resolved viewer");
        Ok(CurrentUser(account))
    }
}
