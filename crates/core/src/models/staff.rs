use serde::{Deserialize, Serialize};

use crate::schedule::WeeklySchedule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffUser {
    pub name: String,
}

/// A staff member as returned by the staff API.
///
/// `schedule` is kept exactly as the backend sent it; use
/// [`StaffMember::weekly_schedule`] to get the normalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub user: StaffUser,
    #[serde(default)]
    pub schedule: serde_json::Value,
}

impl StaffMember {
    pub fn weekly_schedule(&self) -> WeeklySchedule {
        WeeklySchedule::normalize(&self.schedule)
    }

    pub fn display_name(&self) -> &str {
        &self.user.name
    }
}
