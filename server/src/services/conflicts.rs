use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::models::event::{Event, EventTimeSlot, Venue};

/// Returns every approved event that occupies the same venue on the same day
/// with an overlapping `[start, end)` interval, in input order.
///
/// `exclude_id` drops the event being edited so a draft never clashes with
/// its own stored version. Pending and rejected events never block a slot.
/// The candidate is assumed to satisfy `start_time < end_time`.
pub fn find_conflicts<'a>(
    candidate: &EventTimeSlot,
    existing: &'a [Event],
    exclude_id: Option<&str>,
) -> Vec<&'a Event> {
    existing
        .iter()
        .filter(|event| exclude_id != Some(event.id.as_str()))
        .filter(|event| event.is_approved())
        .filter(|event| event.location == candidate.location && event.date == candidate.date)
        .filter(|event| overlaps(candidate, event))
        .collect()
}

fn overlaps(candidate: &EventTimeSlot, event: &Event) -> bool {
    !(candidate.end_time <= event.start_time || candidate.start_time >= event.end_time)
}

/// Banner text shown next to a slot that clashes with approved events.
pub fn conflict_warning(conflicts: &[&Event]) -> Option<String> {
    if conflicts.is_empty() {
        return None;
    }

    let names: Vec<&str> = conflicts.iter().map(|event| event.name.as_str()).collect();
    Some(format!("Schedule conflict with: {}", names.join(", ")))
}

/// The part of a clashing event a conflict report may reveal. Attendees,
/// visibility and the permission letter stay behind `can_view`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictingSlot {
    pub id: String,
    pub name: String,
    pub location: Venue,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<&Event> for ConflictingSlot {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            location: event.location,
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
        }
    }
}

pub fn conflicting_slots(conflicts: &[&Event]) -> Vec<ConflictingSlot> {
    conflicts.iter().map(|event| ConflictingSlot::from(*event)).collect()
}
