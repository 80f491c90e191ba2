use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::club::Club;
use crate::models::event::{ApprovalState, Event, Venue};
use crate::models::user::Viewer;
use crate::services::conflicts::{conflict_warning, find_conflicts};
use crate::services::policy::can_view;

/// Narrowing applied on top of visibility in the student listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub search: Option<String>,
    pub location: Option<Venue>,
    pub club_id: Option<String>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                event.name.to_lowercase().contains(&term)
                    || event.description.to_lowercase().contains(&term)
            }
            _ => true,
        };
        let matches_location = self.location.map_or(true, |venue| venue == event.location);
        let matches_club = self
            .club_id
            .as_deref()
            .map_or(true, |club_id| club_id == event.club_id);

        matches_search && matches_location && matches_club
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventListing {
    pub upcoming: Vec<Event>,
    pub past: Vec<Event>,
}

impl EventListing {
    fn partition<'a>(events: impl IntoIterator<Item = &'a Event>, today: NaiveDate) -> Self {
        let (upcoming, past) = events
            .into_iter()
            .cloned()
            .partition(|event| event.date >= today);
        Self { upcoming, past }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_events: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total_attendees: usize,
}

impl DashboardStats {
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        events.into_iter().fold(Self::default(), |mut stats, event| {
            stats.total_events += 1;
            stats.total_attendees += event.attendee_ids.len();
            match event.approval_state {
                ApprovalState::Pending => stats.pending += 1,
                ApprovalState::Approved => stats.approved += 1,
                ApprovalState::Rejected => stats.rejected += 1,
            }
            stats
        })
    }
}

pub fn find_club<'a>(clubs: &'a [Club], club_id: &str) -> Option<&'a Club> {
    clubs.iter().find(|club| club.id == club_id)
}

/// Everything the viewer may see, narrowed by `filter`, split around `today`.
pub fn events_for_viewer(
    viewer: &Viewer,
    events: &[Event],
    clubs: &[Club],
    filter: &EventFilter,
    today: NaiveDate,
) -> EventListing {
    let visible = events.iter().filter(|event| {
        find_club(clubs, &event.club_id).is_some_and(|club| can_view(viewer, event, club))
            && filter.matches(event)
    });
    EventListing::partition(visible, today)
}

#[derive(Debug, Clone, Serialize)]
pub struct ClubAdminOverview {
    pub clubs: Vec<Club>,
    pub upcoming: Vec<Event>,
    pub pending: Vec<Event>,
    pub rejected: Vec<Event>,
    pub past: Vec<Event>,
    pub stats: DashboardStats,
}

pub fn club_admin_overview(
    viewer: &Viewer,
    events: &[Event],
    clubs: &[Club],
    today: NaiveDate,
) -> ClubAdminOverview {
    let managed: Vec<Club> = clubs
        .iter()
        .filter(|club| club.is_admin(&viewer.id))
        .cloned()
        .collect();
    let owned: Vec<&Event> = events
        .iter()
        .filter(|event| managed.iter().any(|club| club.id == event.club_id))
        .collect();

    let select = |keep: &dyn Fn(&Event) -> bool| -> Vec<Event> {
        owned
            .iter()
            .copied()
            .filter(|event| keep(*event))
            .cloned()
            .collect()
    };

    ClubAdminOverview {
        upcoming: select(&|e| e.is_approved() && e.date >= today),
        pending: select(&|e| e.approval_state == ApprovalState::Pending),
        rejected: select(&|e| e.approval_state == ApprovalState::Rejected),
        past: select(&|e| e.date < today),
        stats: DashboardStats::from_events(owned.iter().copied()),
        clubs: managed,
    }
}

/// A pending event together with the approved events its slot clashes with.
#[derive(Debug, Clone, Serialize)]
pub struct PendingReview {
    pub event: Event,
    pub conflicts: Vec<Event>,
    pub warning: Option<String>,
}

pub fn pending_reviews(events: &[Event]) -> Vec<PendingReview> {
    events
        .iter()
        .filter(|event| event.approval_state == ApprovalState::Pending)
        .map(|event| {
            let conflicts = find_conflicts(&event.slot(), events, Some(event.id.as_str()));
            PendingReview {
                event: event.clone(),
                warning: conflict_warning(&conflicts),
                conflicts: conflicts.into_iter().cloned().collect(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct CollegeAdminOverview {
    pub pending: Vec<PendingReview>,
    pub approved: Vec<Event>,
    pub all: Vec<Event>,
    pub stats: DashboardStats,
}

pub fn college_admin_overview(events: &[Event]) -> CollegeAdminOverview {
    CollegeAdminOverview {
        pending: pending_reviews(events),
        approved: events.iter().filter(|e| e.is_approved()).cloned().collect(),
        all: events.to_vec(),
        stats: DashboardStats::from_events(events),
    }
}
