use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::{ProjectStatus, ProjectWithDetails};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status filter `{0}`")]
pub struct StatusFilterError(String);

/// Status selector value: everything, or one exact status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProjectStatus),
}

impl StatusFilter {
    /// Selector options in display order.
    pub fn options() -> Vec<StatusFilter> {
        std::iter::once(StatusFilter::All)
            .chain(ProjectStatus::KNOWN.into_iter().map(StatusFilter::Only))
            .collect()
    }

    /// The option after this one, wrapping back to `All`.
    pub fn next(&self) -> StatusFilter {
        let options = Self::options();
        let position = options.iter().position(|option| option == self);
        match position {
            Some(i) => options[(i + 1) % options.len()].clone(),
            None => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Only(status) => status.label(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, StatusFilter::All)
    }

    pub fn accepts(&self, status: &ProjectStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = StatusFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        match ProjectStatus::parse(s) {
            ProjectStatus::Other(raw) => Err(StatusFilterError(raw)),
            status => Ok(StatusFilter::Only(status)),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

/// Case-insensitive substring match against name or description.
pub fn matches_search(project: &ProjectWithDetails, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    let needle = search_term.to_lowercase();
    project.name.to_lowercase().contains(&needle)
        || project
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(&needle))
}

pub fn is_visible(project: &ProjectWithDetails, search_term: &str, status_filter: &StatusFilter) -> bool {
    status_filter.accepts(&project.status) && matches_search(project, search_term)
}

/// Projects passing both filters, in their original order.
pub fn filter_projects<'a>(
    projects: &'a [ProjectWithDetails],
    search_term: &str,
    status_filter: &StatusFilter,
) -> Vec<&'a ProjectWithDetails> {
    projects
        .iter()
        .filter(|project| is_visible(project, search_term, status_filter))
        .collect()
}

/// Whether the user has narrowed the list at all.
pub fn any_filter_active(search_term: &str, status_filter: &StatusFilter) -> bool {
    !search_term.is_empty() || !status_filter.is_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::project;

    fn ids(projects: &[&ProjectWithDetails]) -> Vec<String> {
        projects.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn no_filters_returns_everything() {
        let projects = vec![
            project("p1", "Alpha", "active"),
            project("p2", "Beta", "archived"),
        ];

        let visible = filter_projects(&projects, "", &StatusFilter::All);

        assert_eq!(ids(&visible), vec!["p1", "p2"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let projects = vec![project("p1", "Alpha", "active"), project("p2", "Beta", "active")];

        let visible = filter_projects(&projects, "alpha", &StatusFilter::All);

        assert_eq!(ids(&visible), vec!["p1"]);
    }

    #[test]
    fn search_matches_description() {
        let mut with_description = project("p1", "Ledger", "active");
        with_description.description = Some("Quarterly BILLING cleanup".to_string());
        let projects = vec![with_description, project("p2", "Billing", "active")];

        let visible = filter_projects(&projects, "billing", &StatusFilter::All);

        assert_eq!(ids(&visible), vec!["p1", "p2"]);
    }

    #[test]
    fn status_filter_keeps_order() {
        let projects = vec![
            project("a1", "One", "active"),
            project("c1", "Two", "completed"),
            project("a2", "Three", "active"),
            project("c2", "Four", "completed"),
            project("a3", "Five", "active"),
        ];

        let visible = filter_projects(&projects, "", &StatusFilter::Only(ProjectStatus::Active));

        assert_eq!(ids(&visible), vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn both_filters_must_match() {
        let projects = vec![
            project("p1", "Website", "active"),
            project("p2", "Website", "completed"),
            project("p3", "Mobile", "active"),
        ];

        let visible = filter_projects(&projects, "web", &StatusFilter::Only(ProjectStatus::Active));

        assert_eq!(ids(&visible), vec!["p1"]);
    }

    #[test]
    fn options_cycle_back_to_all() {
        let mut filter = StatusFilter::All;
        let mut labels = Vec::new();
        for _ in 0..5 {
            filter = filter.next();
            labels.push(filter.label().to_string());
        }
        assert_eq!(labels, vec!["Active", "Completed", "On Hold", "Cancelled", "All Status"]);
    }

    #[test]
    fn parses_selector_values() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "on-hold".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(ProjectStatus::OnHold))
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn filter_activity() {
        assert!(!any_filter_active("", &StatusFilter::All));
        assert!(any_filter_active("x", &StatusFilter::All));
        assert!(any_filter_active("", &StatusFilter::Only(ProjectStatus::Cancelled)));
    }
}
