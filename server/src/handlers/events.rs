use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::extractors::CurrentUser;
use crate::models::event::{ApprovalState, Event, EventTimeSlot, Venue};
use crate::models::user::{Role, Viewer};
use crate::services::conflicts::{conflict_warning, conflicting_slots, find_conflicts, ConflictingSlot};
use crate::services::policy::{can_edit, can_rsvp, can_transition_approval};
use crate::services::queries::{events_for_viewer, EventFilter, EventListing};
use crate::services::validation::{EventDraft, ValidationError};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

/// Permission letters are reviewed by college admins only.
pub(crate) fn redact_for(viewer: &Viewer, mut event: Event) -> Event {
    if viewer.role != Role::CollegeAdmin {
        event.permission_letter_url = None;
    }
    event
}

pub async fn list_events(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(filter): Query<EventFilter>,
) -> Result<Response, AppError> {
    let viewer = user.viewer();
    let snapshot = state.store.snapshot().await;

    let listing = events_for_viewer(&viewer, &snapshot.events, &snapshot.clubs, &filter, state.today());
    let listing = EventListing {
        upcoming: listing.upcoming.into_iter().map(|e| redact_for(&viewer, e)).collect(),
        past: listing.past.into_iter().map(|e| redact_for(&viewer, e)).collect(),
    };

    Ok(success(listing, "Events retrieved"))
}

#[derive(Debug, Serialize)]
pub struct ClubSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct EventPermissions {
    pub can_edit: bool,
    pub can_rsvp: bool,
    pub can_approve: bool,
    pub can_reject: bool,
}

#[derive(Debug, Serialize)]
pub struct EventDetails {
    pub event: Event,
    pub club: ClubSummary,
    pub attending: bool,
    pub is_full: bool,
    pub is_past: bool,
    pub permissions: EventPermissions,
}

pub async fn get_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
) -> Result<Response, AppError> {
    let viewer = user.viewer();
    let today = state.today();
    let (event, club) = state.store.visible_event(&viewer, &event_id).await?;

    let permissions = EventPermissions {
        can_edit: can_edit(&viewer, &event, &club),
        can_rsvp: can_rsvp(&viewer, &event, today),
        can_approve: can_transition_approval(&viewer, &event, ApprovalState::Approved),
        can_reject: can_transition_approval(&viewer, &event, ApprovalState::Rejected),
    };
    let details = EventDetails {
        attending: event.attendee_ids.contains(&viewer.id),
        is_full: event.is_full(),
        is_past: event.date < today,
        club: ClubSummary {
            id: club.id,
            name: club.name,
            description: club.description,
        },
        event: redact_for(&viewer, event),
        permissions,
    };

    Ok(success(details, "Event retrieved"))
}

pub async fn create_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(draft): Json<EventDraft>,
) -> Result<Response, AppError> {
    draft.validate(state.today())?;
    let viewer = user.viewer();
    let event = state.store.create_event(&viewer, draft).await?;

    Ok(created(
        redact_for(&viewer, event),
        "Event created successfully! It will be reviewed by the college admin.",
    ))
}

pub async fn update_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
    Json(draft): Json<EventDraft>,
) -> Result<Response, AppError> {
    draft.validate(state.today())?;
    let viewer = user.viewer();
    let event = state.store.update_event(&viewer, &event_id, draft).await?;

    Ok(success(redact_for(&viewer, event), "Event updated successfully!"))
}

#[derive(Debug, Deserialize)]
pub struct ConflictCheckRequest {
    pub location: Venue,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub exclude_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConflictReport {
    pub conflicts: Vec<ConflictingSlot>,
    pub warning: Option<String>,
}

/// Live clash check for the authoring form; reports without blocking.
pub async fn check_conflicts(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<ConflictCheckRequest>,
) -> Result<Response, AppError> {
    if user.0.role == Role::Student {
        return Err(AppError::Forbidden(
            "Only club and college admins can check the venue schedule".to_string(),
        ));
    }
    if request.start_time >= request.end_time {
        return Err(ValidationError::EndNotAfterStart.into());
    }

    let slot = EventTimeSlot {
        location: request.location,
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
    };
    let snapshot = state.store.snapshot().await;
    let conflicts = find_conflicts(&slot, &snapshot.events, request.exclude_id.as_deref());

    let report = ConflictReport {
        warning: conflict_warning(&conflicts),
        conflicts: conflicting_slots(&conflicts),
    };
    Ok(success(report, "Schedule checked"))
}

pub async fn rsvp(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<String>,
) -> Result<Response, AppError> {
    let viewer = user.viewer();
    let event = state.store.rsvp(&viewer, &event_id, state.today()).await?;

    Ok(success(redact_for(&viewer, event), "RSVP confirmed!"))
}
