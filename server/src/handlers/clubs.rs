use axum::extract::{Path, State};
use axum::response::Response;

use crate::extractors::CurrentUser;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn list_clubs(State(state): State<AppState>, _user: CurrentUser) -> Response {
    let snapshot = state.store.snapshot().await;
    success(snapshot.clubs, "Clubs retrieved")
}

pub async fn join_club(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(club_id): Path<String>,
) -> Result<Response, AppError> {
    let club = state.store.join_club(&user.0.id, &club_id).await?;
    Ok(success(club, "Joined club"))
}
