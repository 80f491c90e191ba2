use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::extractors::CurrentUser;
use crate::handlers::events::redact_for;
use crate::models::event::ApprovalState;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl From<Decision> for ApprovalState {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approve => ApprovalState::Approved,
            Decision::Reject => ApprovalState::Rejected,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: Decision,
    /// Approve even though the slot clashes with approved events.
    #[serde(default)]
    pub override_conflicts: bool,
}

pub async fn decide(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
    Json(request): Json<DecisionRequest>,
) -> Result<Response, AppError> {
    let viewer = user.viewer();
    let event = state
        .store
        .decide(
            &viewer,
            &event_id,
            request.decision.into(),
            request.override_conflicts,
        )
        .await?;

    let message = match request.decision {
        Decision::Approve => "Event approved successfully!",
        Decision::Reject => "Event rejected. The club admin has been notified.",
    };
    Ok(success(redact_for(&viewer, event), message))
}
