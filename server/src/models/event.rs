use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Bookable campus venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Venue {
    #[serde(rename = "Main Auditorium")]
    MainAuditorium,
    #[serde(rename = "Computer Lab A")]
    ComputerLabA,
    #[serde(rename = "Computer Lab B")]
    ComputerLabB,
    #[serde(rename = "Seminar Hall 1")]
    SeminarHall1,
    #[serde(rename = "Seminar Hall 2")]
    SeminarHall2,
    #[serde(rename = "Art Gallery")]
    ArtGallery,
    #[serde(rename = "Student Center")]
    StudentCenter,
    #[serde(rename = "Library Conference Room")]
    LibraryConferenceRoom,
    #[serde(rename = "Outdoor Amphitheater")]
    OutdoorAmphitheater,
    #[serde(rename = "Sports Complex")]
    SportsComplex,
}

impl Venue {
    pub const ALL: [Venue; 10] = [
        Venue::MainAuditorium,
        Venue::ComputerLabA,
        Venue::ComputerLabB,
        Venue::SeminarHall1,
        Venue::SeminarHall2,
        Venue::ArtGallery,
        Venue::StudentCenter,
        Venue::LibraryConferenceRoom,
        Venue::OutdoorAmphitheater,
        Venue::SportsComplex,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Venue::MainAuditorium => "Main Auditorium",
            Venue::ComputerLabA => "Computer Lab A",
            Venue::ComputerLabB => "Computer Lab B",
            Venue::SeminarHall1 => "Seminar Hall 1",
            Venue::SeminarHall2 => "Seminar Hall 2",
            Venue::ArtGallery => "Art Gallery",
            Venue::StudentCenter => "Student Center",
            Venue::LibraryConferenceRoom => "Library Conference Room",
            Venue::OutdoorAmphitheater => "Outdoor Amphitheater",
            Venue::SportsComplex => "Sports Complex",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Open,
    ClubOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub club_id: String,
    pub name: String,
    pub description: String,
    pub location: Venue,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub visibility: Visibility,
    pub approval_state: ApprovalState,
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub attendee_ids: BTreeSet<String>,
    pub permission_letter_url: Option<String>,
}

impl Event {
    pub fn is_approved(&self) -> bool {
        self.approval_state == ApprovalState::Approved
    }

    pub fn is_full(&self) -> bool {
        match self.max_attendees {
            Some(max) => self.attendee_ids.len() >= max as usize,
            None => false,
        }
    }

    pub fn slot(&self) -> EventTimeSlot {
        EventTimeSlot {
            location: self.location,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Where and when an event takes place, independent of who owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTimeSlot {
    pub location: Venue,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
