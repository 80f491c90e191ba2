use axum::extract::State;
use axum::response::Response;

use crate::extractors::CurrentUser;
use crate::models::user::Role;
use crate::services::queries::{club_admin_overview, college_admin_overview};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

fn require_role(user: &CurrentUser, role: Role) -> Result<(), AppError> {
    if user.0.role == role {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Access denied: this dashboard requires the {:?} role. Your current role is {:?}",
            role, user.0.role
        )))
    }
}

pub async fn club_admin(State(state): State<AppState>, user: CurrentUser) -> Result<Response, AppError> {
    require_role(&user, Role::ClubAdmin)?;
    let snapshot = state.store.snapshot().await;

    let overview = club_admin_overview(&user.viewer(), &snapshot.events, &snapshot.clubs, state.today());
    Ok(success(overview, "Club admin dashboard retrieved"))
}

pub async fn college_admin(State(state): State<AppState>, user: CurrentUser) -> Result<Response, AppError> {
    require_role(&user, Role::CollegeAdmin)?;
    let snapshot = state.store.snapshot().await;

    Ok(success(
        college_admin_overview(&snapshot.events),
        "College admin dashboard retrieved",
    ))
}
