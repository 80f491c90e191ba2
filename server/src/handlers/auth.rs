use std::collections::BTreeSet;

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::models::user::Role;
use crate::state::AppState;
use crate::store::fixtures::DEMO_PASSWORD;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Mocked credential check: any known account with the demo password.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let account = state
        .store
        .user_by_email(request.email.trim())
        .await
        .filter(|_| request.password == DEMO_PASSWORD)
        .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

    info!(user_id = %account.id, role = ?account.role, "User signed in");
    Ok(success(account, "Login successful"))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub clubs: BTreeSet<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    let name = request.name.trim();
    let email = request.email.trim();
    if name.is_empty() {
        return Err(AppError::ValidationError("Name is required".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::ValidationError("A valid email address is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::ValidationError("Password is required".to_string()));
    }
    if request.role == Role::CollegeAdmin {
        return Err(AppError::Forbidden(
            "College admin accounts cannot be self-registered".to_string(),
        ));
    }

    let account = state
        .store
        .register(name.to_string(), email.to_string(), request.role, request.clubs)
        .await?;

    Ok(created(account, "Registration successful"))
}
