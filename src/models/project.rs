use chrono::NaiveDate;
use serde::Deserialize;

use super::{MyAllocation, ProjectStatus, TeamMember};

/// A project as seen by one employee: the project itself, its team,
/// and the employee's own allocation on it.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub progress: Option<i32>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub manager_email: Option<String>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    pub my_allocation: MyAllocation,
}

impl ProjectWithDetails {
    pub fn progress(&self) -> i32 {
        self.progress.unwrap_or(0)
    }

    /// Description worth showing: present and non-blank.
    pub fn visible_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|text| !text.is_empty())
    }

    pub fn team_size(&self) -> usize {
        self.team_members.len()
    }

    /// Budget worth showing: present and non-zero.
    pub fn visible_budget(&self) -> Option<f64> {
        self.budget.filter(|amount| *amount != 0.0)
    }

    pub fn manager_initial(&self) -> char {
        self.manager_name
            .as_deref()
            .and_then(|name| name.chars().next())
            .unwrap_or('M')
    }
}
