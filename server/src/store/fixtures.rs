//! Seed data for demos and tests.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};

use crate::models::club::Club;
use crate::models::event::{ApprovalState, Event, Venue, Visibility};
use crate::models::user::{Role, UserAccount};

/// Every seeded account signs in with this password.
pub const DEMO_PASSWORD: &str = "password";

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn club(id: &str, name: &str, description: &str, admins: &[&str], members: &[&str]) -> Club {
    Club {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        admin_ids: set(admins),
        member_ids: set(members),
    }
}

pub fn clubs() -> Vec<Club> {
    vec![
        club("club1", "Tech Club", "A club for technology enthusiasts", &["u2"], &["u1", "u4", "u5"]),
        club(
            "club2",
            "Drama Society",
            "For students passionate about theater and performing arts",
            &["u6"],
            &["u1", "u7", "u8"],
        ),
        club(
            "club3",
            "Photography Club",
            "Capturing moments and creating memories",
            &["u9"],
            &["u4", "u5", "u7"],
        ),
        club("club4", "Music Society", "For music lovers and performers", &["u10"], &["u1", "u8", "u9"]),
    ]
}

fn account(id: &str, name: &str, email: &str, role: Role, clubs: &[&str]) -> UserAccount {
    UserAccount {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        club_ids: set(clubs),
    }
}

pub fn users() -> Vec<UserAccount> {
    vec![
        account("u1", "John Doe", "student@college.edu", Role::Student, &["club1", "club2", "club4"]),
        account("u2", "Jane Smith", "clubadmin@college.edu", Role::ClubAdmin, &["club1"]),
        account("u3", "Admin User", "admin@college.edu", Role::CollegeAdmin, &[]),
        account("u4", "Priya Nair", "priya@college.edu", Role::Student, &["club1", "club3"]),
        account("u5", "Marcus Lee", "marcus@college.edu", Role::Student, &["club1", "club3"]),
        account("u6", "Sofia Alvarez", "drama.admin@college.edu", Role::ClubAdmin, &["club2"]),
        account("u7", "Tom Becker", "tom@college.edu", Role::Student, &["club2", "club3"]),
        account("u8", "Aisha Khan", "aisha@college.edu", Role::Student, &["club2", "club4"]),
        account("u9", "Leo Martin", "photo.admin@college.edu", Role::ClubAdmin, &["club3", "club4"]),
        account("u10", "Mei Chen", "music.admin@college.edu", Role::ClubAdmin, &["club4"]),
    ]
}

struct Seed<'a> {
    id: &'a str,
    club_id: &'a str,
    name: &'a str,
    description: &'a str,
    location: Venue,
    date: (i32, u32, u32),
    start: (u32, u32),
    end: (u32, u32),
    visibility: Visibility,
    approval_state: ApprovalState,
    attendees: &'a [&'a str],
    max_attendees: Option<u32>,
    letter: Option<&'a str>,
}

impl Seed<'_> {
    fn build(self) -> Option<Event> {
        Some(Event {
            id: self.id.to_string(),
            club_id: self.club_id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            location: self.location,
            date: NaiveDate::from_ymd_opt(self.date.0, self.date.1, self.date.2)?,
            start_time: NaiveTime::from_hms_opt(self.start.0, self.start.1, 0)?,
            end_time: NaiveTime::from_hms_opt(self.end.0, self.end.1, 0)?,
            visibility: self.visibility,
            approval_state: self.approval_state,
            max_attendees: self.max_attendees,
            attendee_ids: set(self.attendees),
            permission_letter_url: self.letter.map(str::to_string),
        })
    }
}

pub fn events() -> Vec<Event> {
    let seeds = [
        Seed {
            id: "1",
            club_id: "club1",
            name: "JavaScript Workshop",
            description: "Learn the fundamentals of JavaScript programming with hands-on exercises and real-world examples.",
            location: Venue::ComputerLabA,
            date: (2024, 10, 15),
            start: (14, 0),
            end: (16, 0),
            visibility: Visibility::Open,
            approval_state: ApprovalState::Approved,
            attendees: &["u1", "u4", "u5"],
            max_attendees: Some(30),
            letter: Some("/documents/tech-workshop-permission.pdf"),
        },
        Seed {
            id: "2",
            club_id: "club2",
            name: "Annual Drama Performance",
            description: "Join us for our annual drama performance featuring classic and contemporary plays.",
            location: Venue::MainAuditorium,
            date: (2024, 10, 20),
            start: (18, 0),
            end: (21, 0),
            visibility: Visibility::Open,
            approval_state: ApprovalState::Approved,
            attendees: &["u1", "u7", "u8", "u9"],
            max_attendees: Some(200),
            letter: Some("/documents/drama-performance-permission.pdf"),
        },
        Seed {
            id: "3",
            club_id: "club3",
            name: "Photography Exhibition",
            description: "Showcase your best photographs in our annual exhibition.",
            location: Venue::ArtGallery,
            date: (2024, 10, 25),
            start: (10, 0),
            end: (17, 0),
            visibility: Visibility::ClubOnly,
            approval_state: ApprovalState::Pending,
            attendees: &["u4", "u5"],
            max_attendees: Some(50),
            letter: Some("/documents/photo-exhibition-permission.pdf"),
        },
        Seed {
            id: "4",
            club_id: "club1",
            name: "React Advanced Concepts",
            description: "Deep dive into advanced React concepts including hooks, context, and performance optimization.",
            location: Venue::ComputerLabB,
            date: (2024, 10, 18),
            start: (15, 0),
            end: (17, 30),
            visibility: Visibility::ClubOnly,
            approval_state: ApprovalState::Pending,
            attendees: &["u1"],
            max_attendees: Some(25),
            letter: None,
        },
        Seed {
            id: "5",
            club_id: "club4",
            name: "Open Mic Night",
            description: "Show off your musical talents at our monthly open mic night.",
            location: Venue::StudentCenter,
            date: (2024, 10, 22),
            start: (19, 0),
            end: (22, 0),
            visibility: Visibility::Open,
            approval_state: ApprovalState::Approved,
            attendees: &["u1", "u8", "u9", "u10"],
            max_attendees: Some(100),
            letter: Some("/documents/open-mic-permission.pdf"),
        },
    ];

    seeds.into_iter().filter_map(Seed::build).collect()
}
