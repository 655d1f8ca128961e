//! Builders shared by unit tests.

use crate::models::{MyAllocation, ProjectStatus, ProjectWithDetails, TeamMember};

pub fn project(id: &str, name: &str, status: &str) -> ProjectWithDetails {
    ProjectWithDetails {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        status: ProjectStatus::parse(status),
        progress: None,
        budget: None,
        start_date: None,
        end_date: None,
        manager_name: None,
        manager_email: None,
        team_members: Vec::new(),
        my_allocation: MyAllocation {
            allocation_percentage: 100,
            ..MyAllocation::default()
        },
    }
}

pub fn member(employee_id: &str, name: &str, allocation_percentage: i32) -> TeamMember {
    TeamMember {
        employee_id: employee_id.to_string(),
        employee_name: Some(name.to_string()),
        role: None,
        allocation_percentage,
    }
}

/// The single-project example: "Website Revamp" with Jane (u1) on the team.
pub fn website_revamp() -> ProjectWithDetails {
    let mut project = project("p1", "Website Revamp", "active");
    project.progress = Some(40);
    project.my_allocation.allocation_percentage = 50;
    project.team_members = vec![member("u1", "Jane", 50)];
    project
}
