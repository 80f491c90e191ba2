//! Who may see, edit, approve, and RSVP to an event.
//!
//! Every check is a total function over plain values. A `false` result is a
//! denial for the caller to render, never an error.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::club::Club;
use crate::models::event::{ApprovalState, Event, Visibility};
use crate::models::user::{Role, Viewer};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Event has already been {0:?}; approval decisions are final")]
    AlreadyDecided(ApprovalState),
    #[error("Events cannot be moved back to pending")]
    InvalidTarget,
}

impl ApprovalState {
    /// Applies an approval decision. Only `Pending` may move, and only forward.
    pub fn transition(self, to: ApprovalState) -> Result<ApprovalState, TransitionError> {
        match (self, to) {
            (ApprovalState::Pending, ApprovalState::Approved | ApprovalState::Rejected) => Ok(to),
            (ApprovalState::Pending, ApprovalState::Pending) => Err(TransitionError::InvalidTarget),
            (decided, _) => Err(TransitionError::AlreadyDecided(decided)),
        }
    }
}

fn administers(viewer: &Viewer, event: &Event, club: &Club) -> bool {
    club.id == event.club_id && club.is_admin(&viewer.id)
}

pub fn can_view(viewer: &Viewer, event: &Event, club: &Club) -> bool {
    match viewer.role {
        Role::CollegeAdmin => return true,
        Role::Student | Role::ClubAdmin => {}
    }

    // Owning club admins see their events in every state.
    if administers(viewer, event, club) {
        return true;
    }

    match event.visibility {
        Visibility::Open => event.is_approved(),
        Visibility::ClubOnly => viewer.belongs_to(&event.club_id) && event.is_approved(),
    }
}

/// New events are proposed by an admin of the club that will own them.
pub fn can_propose(viewer: &Viewer, club: &Club) -> bool {
    match viewer.role {
        Role::ClubAdmin => club.is_admin(&viewer.id),
        Role::Student | Role::CollegeAdmin => false,
    }
}

/// Content belongs to the owning club; college admins only approve or reject.
pub fn can_edit(viewer: &Viewer, event: &Event, club: &Club) -> bool {
    match viewer.role {
        Role::ClubAdmin => administers(viewer, event, club),
        Role::Student | Role::CollegeAdmin => false,
    }
}

pub fn can_transition_approval(viewer: &Viewer, event: &Event, new_state: ApprovalState) -> bool {
    match viewer.role {
        Role::CollegeAdmin => event.approval_state.transition(new_state).is_ok(),
        Role::Student | Role::ClubAdmin => false,
    }
}

pub fn can_rsvp(viewer: &Viewer, event: &Event, today: NaiveDate) -> bool {
    match viewer.role {
        Role::Student => {
            event.is_approved()
                && today <= event.date
                && !event.is_full()
                && !event.attendee_ids.contains(&viewer.id)
        }
        Role::ClubAdmin | Role::CollegeAdmin => false,
    }
}
