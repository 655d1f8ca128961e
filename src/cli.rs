use std::path::PathBuf;

use clap::Parser;

use crate::filter::StatusFilter;

/// Browse the projects an employee is assigned to.
#[derive(Parser, Debug, Default)]
#[command(name = "employee-projects", version, about)]
pub struct Cli {
    /// Employee id to show projects for (falls back to EMPLOYEE_ID)
    #[arg(short, long)]
    pub employee: Option<String>,

    /// Read projects from a JSON fixture instead of the database
    #[arg(short, long, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Start with this search term applied
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Start with this status filter: all, active, completed, on-hold, cancelled
    #[arg(long, value_name = "STATUS")]
    pub status: Option<StatusFilter>,

    /// Write logs to this file (falls back to LOG_FILE)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "employee-projects",
            "--employee",
            "u1",
            "-f",
            "demos/projects.json",
            "--status",
            "on-hold",
        ]);

        assert_eq!(cli.employee.as_deref(), Some("u1"));
        assert_eq!(cli.fixture, Some(PathBuf::from("demos/projects.json")));
        assert_eq!(cli.log_file, None);
        assert_eq!(cli.status, Some(StatusFilter::Only(ProjectStatus::OnHold)));
        assert_eq!(cli.search, None);
    }

    #[test]
    fn rejects_unknown_status() {
        let parsed = Cli::try_parse_from(["employee-projects", "--status", "archived"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn command_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
