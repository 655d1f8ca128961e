use std::fmt;

use serde::{Deserialize, Deserializer};

/// Project lifecycle stage. Values outside the known four are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
    Cancelled,
    Other(String),
}

impl ProjectStatus {
    pub const KNOWN: [ProjectStatus; 4] = [
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
        ProjectStatus::Cancelled,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => ProjectStatus::Active,
            "completed" => ProjectStatus::Completed,
            "on-hold" => ProjectStatus::OnHold,
            "cancelled" => ProjectStatus::Cancelled,
            other => ProjectStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Cancelled => "cancelled",
            ProjectStatus::Other(raw) => raw,
        }
    }

    /// Human label used by the status selector.
    pub fn label(&self) -> &str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Cancelled => "Cancelled",
            ProjectStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(raw: String) -> Self {
        ProjectStatus::parse(&raw)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ProjectStatus::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_keep_their_wire_names() {
        for status in ProjectStatus::KNOWN {
            assert_eq!(ProjectStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let status = ProjectStatus::parse("archived");
        assert_eq!(status, ProjectStatus::Other("archived".to_string()));
        assert_eq!(status.as_str(), "archived");
    }

    #[test]
    fn status_parsing_is_case_sensitive() {
        assert_eq!(
            ProjectStatus::parse("Active"),
            ProjectStatus::Other("Active".to_string())
        );
    }
}
