use crate::models::{ProjectStatus, ProjectWithDetails};

/// Summary counts shown above the project list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub on_hold: usize,
}

impl ProjectStats {
    pub fn from_projects(projects: &[ProjectWithDetails]) -> Self {
        let count = |status: ProjectStatus| projects.iter().filter(|p| p.status == status).count();

        Self {
            total: projects.len(),
            active: count(ProjectStatus::Active),
            completed: count(ProjectStatus::Completed),
            on_hold: count(ProjectStatus::OnHold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::project;

    #[test]
    fn empty_list_has_zero_counts() {
        assert_eq!(ProjectStats::from_projects(&[]), ProjectStats::default());
    }

    #[test]
    fn counts_by_status_and_ignores_unknown_and_cancelled() {
        let projects = vec![
            project("p1", "One", "active"),
            project("p2", "Two", "active"),
            project("p3", "Three", "completed"),
            project("p4", "Four", "on-hold"),
            project("p5", "Five", "cancelled"),
            project("p6", "Six", "archived"),
        ];

        let stats = ProjectStats::from_projects(&projects);

        assert_eq!(
            stats,
            ProjectStats {
                total: 6,
                active: 2,
                completed: 1,
                on_hold: 1,
            }
        );
        assert!(stats.active + stats.completed + stats.on_hold <= stats.total);
    }
}
