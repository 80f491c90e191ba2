use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    ClubAdmin,
    CollegeAdmin,
}

/// The identity a policy decision is made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub role: Role,
    pub club_ids: BTreeSet<String>,
}

impl Viewer {
    pub fn belongs_to(&self, club_id: &str) -> bool {
        self.club_ids.contains(club_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub club_ids: BTreeSet<String>,
}

impl UserAccount {
    pub fn viewer(&self) -> Viewer {
        Viewer {
            id: self.id.clone(),
            role: self.role,
            club_ids: self.club_ids.clone(),
        }
    }
}
