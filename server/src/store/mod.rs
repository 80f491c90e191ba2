//! Process-local event store.
//!
//! Every mutation re-checks its policy and applies the update under a single
//! write guard, so approval decisions stay one-way and attendee counts never
//! pass capacity even when requests race.

pub mod fixtures;

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::club::Club;
use crate::models::event::{ApprovalState, Event};
use crate::models::user::{Role, UserAccount, Viewer};
use crate::services::conflicts::{conflict_warning, conflicting_slots, find_conflicts};
use crate::services::policy::{can_edit, can_propose, can_rsvp, can_transition_approval, can_view};
use crate::services::queries::find_club;
use crate::services::validation::EventDraft;
use crate::utils::error::AppError;

#[derive(Debug, Default)]
struct Inner {
    events: Vec<Event>,
    clubs: Vec<Club>,
    users: Vec<UserAccount>,
}

/// Read-only copy of the collections, handed to the pure query layer.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub events: Vec<Event>,
    pub clubs: Vec<Club>,
}

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    inner: Arc<RwLock<Inner>>,
}

impl EventStore {
    pub fn new(events: Vec<Event>, clubs: Vec<Club>, users: Vec<UserAccount>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                events,
                clubs,
                users,
            })),
        }
    }

    pub fn seeded() -> Self {
        Self::new(fixtures::events(), fixtures::clubs(), fixtures::users())
    }

    pub async fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().await;
        Snapshot {
            events: inner.events.clone(),
            clubs: inner.clubs.clone(),
        }
    }

    pub async fn user(&self, user_id: &str) -> Option<UserAccount> {
        let inner = self.inner.read().await;
        inner.users.iter().find(|u| u.id == user_id).cloned()
    }

    pub async fn user_by_email(&self, email: &str) -> Option<UserAccount> {
        let inner = self.inner.read().await;
        inner
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Returns the event with its owning club if the viewer may see it.
    pub async fn visible_event(&self, viewer: &Viewer, event_id: &str) -> Result<(Event, Club), AppError> {
        let inner = self.inner.read().await;
        let (event, club) = lookup(&inner, event_id)?;
        if !can_view(viewer, event, club) {
            return Err(not_found(event_id));
        }
        Ok((event.clone(), club.clone()))
    }

    pub async fn register(
        &self,
        name: String,
        email: String,
        role: Role,
        club_ids: BTreeSet<String>,
    ) -> Result<UserAccount, AppError> {
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(AppError::Conflict(format!("An account for '{}' already exists", email)));
        }
        if let Some(unknown) = club_ids.iter().find(|id| find_club(&inner.clubs, id).is_none()) {
            return Err(AppError::NotFound(format!("Club with id '{}' was not found", unknown)));
        }

        let account = UserAccount {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            role,
            club_ids,
        };
        for club in inner.clubs.iter_mut().filter(|c| account.club_ids.contains(&c.id)) {
            club.member_ids.insert(account.id.clone());
        }
        inner.users.push(account.clone());

        info!(user_id = %account.id, role = ?account.role, "Registered account");
        Ok(account)
    }

    pub async fn create_event(&self, viewer: &Viewer, draft: EventDraft) -> Result<Event, AppError> {
        let mut inner = self.inner.write().await;

        let club = find_club(&inner.clubs, &draft.club_id)
            .ok_or_else(|| AppError::NotFound(format!("Club with id '{}' was not found", draft.club_id)))?;
        if !can_propose(viewer, club) {
            return Err(AppError::Forbidden(
                "Only admins of the organising club can create its events".to_string(),
            ));
        }
        ensure_slot_free(&inner.events, &draft, None)?;

        let event = Event {
            id: Uuid::new_v4().to_string(),
            club_id: draft.club_id,
            name: draft.name,
            description: draft.description,
            location: draft.location,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            visibility: draft.visibility,
            approval_state: ApprovalState::Pending,
            max_attendees: draft.max_attendees,
            attendee_ids: BTreeSet::new(),
            permission_letter_url: draft.permission_letter.as_ref().map(|l| l.url()),
        };
        inner.events.push(event.clone());

        info!(event_id = %event.id, club_id = %event.club_id, user_id = %viewer.id, "Event proposed");
        Ok(event)
    }

    pub async fn update_event(&self, viewer: &Viewer, event_id: &str, draft: EventDraft) -> Result<Event, AppError> {
        let mut inner = self.inner.write().await;

        let (current, owner) = lookup(&inner, event_id)?;
        if !can_view(viewer, current, owner) {
            return Err(not_found(event_id));
        }
        if !can_edit(viewer, current, owner) {
            return Err(AppError::Forbidden("Only admins of the owning club can edit this event".to_string()));
        }
        let target = find_club(&inner.clubs, &draft.club_id)
            .ok_or_else(|| AppError::NotFound(format!("Club with id '{}' was not found", draft.club_id)))?;
        if !can_propose(viewer, target) {
            return Err(AppError::Forbidden("Events can only move to clubs you administer".to_string()));
        }
        if let Some(max) = draft.max_attendees {
            if (max as usize) < current.attendee_ids.len() {
                return Err(AppError::ValidationError(format!(
                    "Maximum attendees cannot be lower than the {} existing RSVPs",
                    current.attendee_ids.len()
                )));
            }
        }
        ensure_slot_free(&inner.events, &draft, Some(event_id))?;

        let letter_url = draft.permission_letter.as_ref().map(|l| l.url());
        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| not_found(event_id))?;
        let updated = Event {
            id: event.id.clone(),
            club_id: draft.club_id,
            name: draft.name,
            description: draft.description,
            location: draft.location,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            visibility: draft.visibility,
            approval_state: event.approval_state,
            max_attendees: draft.max_attendees,
            attendee_ids: event.attendee_ids.clone(),
            permission_letter_url: letter_url.or_else(|| event.permission_letter_url.clone()),
        };
        *event = updated.clone();

        info!(event_id = %updated.id, user_id = %viewer.id, "Event updated");
        Ok(updated)
    }

    /// Approves or rejects a pending event. Approving over a clash requires
    /// `override_conflicts`.
    pub async fn decide(
        &self,
        viewer: &Viewer,
        event_id: &str,
        decision: ApprovalState,
        override_conflicts: bool,
    ) -> Result<Event, AppError> {
        let mut inner = self.inner.write().await;

        let (current, _) = lookup(&inner, event_id)?;
        if !can_transition_approval(viewer, current, decision) {
            if viewer.role != Role::CollegeAdmin {
                return Err(AppError::Forbidden("Only college admins can approve or reject events".to_string()));
            }
            current.approval_state.transition(decision)?;
        }

        if decision == ApprovalState::Approved {
            let conflicts = find_conflicts(&current.slot(), &inner.events, Some(event_id));
            if let Some(message) = conflict_warning(&conflicts) {
                if !override_conflicts {
                    return Err(AppError::ScheduleConflict {
                        message,
                        conflicts: conflicting_slots(&conflicts),
                    });
                }
                warn!(event_id = %event_id, user_id = %viewer.id, message = %message, "Approving over schedule conflict");
            }
        }

        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| not_found(event_id))?;
        event.approval_state = event.approval_state.transition(decision)?;

        info!(event_id = %event.id, user_id = %viewer.id, state = ?event.approval_state, "Approval decision recorded");
        Ok(event.clone())
    }

    pub async fn rsvp(&self, viewer: &Viewer, event_id: &str, today: NaiveDate) -> Result<Event, AppError> {
        let mut inner = self.inner.write().await;

        let (current, club) = lookup(&inner, event_id)?;
        if !can_view(viewer, current, club) {
            return Err(not_found(event_id));
        }
        if !can_rsvp(viewer, current, today) {
            return Err(AppError::Forbidden(rsvp_denial(viewer, current, today).to_string()));
        }

        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| not_found(event_id))?;
        event.attendee_ids.insert(viewer.id.clone());

        info!(event_id = %event.id, user_id = %viewer.id, attendees = event.attendee_ids.len(), "RSVP recorded");
        Ok(event.clone())
    }

    pub async fn join_club(&self, user_id: &str, club_id: &str) -> Result<Club, AppError> {
        let mut inner = self.inner.write().await;

        let club_idx = inner
            .clubs
            .iter()
            .position(|c| c.id == club_id)
            .ok_or_else(|| AppError::NotFound(format!("Club with id '{}' was not found", club_id)))?;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' was not found", user_id)))?;
        user.club_ids.insert(club_id.to_string());

        let club = &mut inner.clubs[club_idx];
        if club.member_ids.insert(user_id.to_string()) {
            info!(club_id = %club_id, user_id = %user_id, "Joined club");
        }
        Ok(club.clone())
    }
}

fn not_found(event_id: &str) -> AppError {
    AppError::NotFound(format!("Event with id '{}' was not found", event_id))
}

fn lookup<'a>(inner: &'a Inner, event_id: &str) -> Result<(&'a Event, &'a Club), AppError> {
    let event = inner
        .events
        .iter()
        .find(|e| e.id == event_id)
        .ok_or_else(|| not_found(event_id))?;
    let club = find_club(&inner.clubs, &event.club_id).ok_or_else(|| {
        AppError::InternalServerError(format!("Event '{}' references unknown club '{}'", event.id, event.club_id))
    })?;
    Ok((event, club))
}

fn ensure_slot_free(events: &[Event], draft: &EventDraft, exclude_id: Option<&str>) -> Result<(), AppError> {
    let conflicts = find_conflicts(&draft.slot(), events, exclude_id);
    match conflict_warning(&conflicts) {
        Some(message) => Err(AppError::ScheduleConflict {
            message,
            conflicts: conflicting_slots(&conflicts),
        }),
        None => Ok(()),
    }
}

fn rsvp_denial(viewer: &Viewer, event: &Event, today: NaiveDate) -> &'static str {
    if viewer.role != Role::Student {
        "Only students can RSVP to events"
    } else if !event.is_approved() {
        "This event is not open for RSVPs"
    } else if event.date < today {
        "This event has already taken place"
    } else if event.attendee_ids.contains(&viewer.id) {
        "You have already RSVP'd to this event"
    } else {
        "This event is full"
    }
}
