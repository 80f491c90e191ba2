use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub description: String,
    pub admin_ids: BTreeSet<String>,
    pub member_ids: BTreeSet<String>,
}

impl Club {
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_ids.contains(user_id)
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.member_ids.contains(user_id)
    }
}
