use chrono::NaiveDate;
use serde::Deserialize;

/// The viewing employee's own assignment on a project.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MyAllocation {
    #[serde(default)]
    pub role: Option<String>,
    pub allocation_percentage: i32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl MyAllocation {
    /// The viewer's role, or `N/A` when missing or blank.
    pub fn role_or_na(&self) -> &str {
        self.role
            .as_deref()
            .filter(|role| !role.is_empty())
            .unwrap_or("N/A")
    }
}
