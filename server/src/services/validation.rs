use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use thiserror::Error;

use crate::models::event::{EventTimeSlot, Venue, Visibility};

pub const MAX_PERMISSION_LETTER_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("End time must be after start time")]
    EndNotAfterStart,
    #[error("Event date cannot be in the past")]
    DateInPast,
    #[error("Maximum attendees must be at least 1")]
    ZeroCapacity,
    #[error("Permission letter must be less than 5MB")]
    LetterTooLarge,
    #[error("Permission letter must be a PDF file")]
    LetterNotPdf,
}

/// Metadata of an uploaded permission letter; the file itself is stored elsewhere.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionLetter {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl PermissionLetter {
    pub fn url(&self) -> String {
        format!("/documents/{}", self.file_name)
    }
}

/// An event as submitted by the authoring form, before it is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub club_id: String,
    pub location: Venue,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub visibility: Visibility,
    pub max_attendees: Option<u32>,
    pub permission_letter: Option<PermissionLetter>,
}

impl EventDraft {
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("Event name"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("Description"));
        }
        if self.club_id.trim().is_empty() {
            return Err(ValidationError::MissingField("Club"));
        }
        if self.start_time >= self.end_time {
            return Err(ValidationError::EndNotAfterStart);
        }
        if self.date < today {
            return Err(ValidationError::DateInPast);
        }
        if self.max_attendees == Some(0) {
            return Err(ValidationError::ZeroCapacity);
        }
        if let Some(letter) = &self.permission_letter {
            if letter.size_bytes > MAX_PERMISSION_LETTER_BYTES {
                return Err(ValidationError::LetterTooLarge);
            }
            if !letter.content_type.contains("pdf") {
                return Err(ValidationError::LetterNotPdf);
            }
        }
        Ok(())
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
