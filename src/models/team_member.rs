use serde::Deserialize;

use super::Identity;

pub const DEFAULT_MEMBER_ROLE: &str = "Team Member";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub allocation_percentage: i32,
}

impl TeamMember {
    pub fn role_or_default(&self) -> &str {
        self.role
            .as_deref()
            .filter(|role| !role.is_empty())
            .unwrap_or(DEFAULT_MEMBER_ROLE)
    }

    pub fn display_name(&self) -> &str {
        self.employee_name.as_deref().unwrap_or_default()
    }

    /// First character of the member's name, or `U` when unnamed.
    pub fn initial(&self) -> char {
        self.employee_name
            .as_deref()
            .and_then(|name| name.chars().next())
            .unwrap_or('U')
    }

    pub fn is(&self, identity: &Identity) -> bool {
        self.employee_id == identity.as_str()
    }
}
