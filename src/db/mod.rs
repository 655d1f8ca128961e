use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::loader::ProjectSource;
use crate::models::{Identity, MyAllocation, ProjectStatus, ProjectWithDetails, TeamMember};

/// A project row joined with its manager and the viewer's own assignment.
#[derive(sqlx::FromRow, Debug)]
struct AssignedProjectRow {
    id: String,
    name: String,
    description: Option<String>,
    status: String,
    progress: Option<i32>,
    budget: Option<f64>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    manager_name: Option<String>,
    manager_email: Option<String>,
    my_role: Option<String>,
    my_allocation_percentage: i32,
    my_start_date: Option<NaiveDate>,
    my_end_date: Option<NaiveDate>,
}

#[derive(sqlx::FromRow, Debug)]
struct TeamMemberRow {
    project_id: String,
    employee_id: String,
    employee_name: Option<String>,
    role: Option<String>,
    allocation_percentage: i32,
}

/// Database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    async fn get_assigned_projects(&self, employee_id: &str) -> Result<Vec<AssignedProjectRow>> {
        let rows = sqlx::query_as::<_, AssignedProjectRow>(
            r#"
            SELECT p.id, p.name, p.description, p.status, p.progress, p.budget,
                   p.start_date, p.end_date,
                   m.name AS manager_name, m.email AS manager_email,
                   a.role AS my_role,
                   a.allocation_percentage AS my_allocation_percentage,
                   a.start_date AS my_start_date, a.end_date AS my_end_date
            FROM project_assignments a
            JOIN projects p ON p.id = a.project_id
            LEFT JOIN employees m ON m.id = p.manager_id
            WHERE a.employee_id = $1
            ORDER BY p.name ASC
            "#,
        )
        .bind(employee_id)
        .fetch_all(self.get_pool())
        .await?;

        Ok(rows)
    }

    async fn get_team_members(&self, project_ids: &[String]) -> Result<Vec<TeamMemberRow>> {
        let rows = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT a.project_id, a.employee_id, e.name AS employee_name,
                   a.role, a.allocation_percentage
            FROM project_assignments a
            LEFT JOIN employees e ON e.id = a.employee_id
            WHERE a.project_id = ANY($1)
            ORDER BY a.project_id, a.id
            "#,
        )
        .bind(project_ids)
        .fetch_all(self.get_pool())
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl ProjectSource for Database {
    async fn get_employee_projects_with_details(
        &self,
        identity: &Identity,
    ) -> Result<Vec<ProjectWithDetails>> {
        let projects = self.get_assigned_projects(identity.as_str()).await?;
        if projects.is_empty() {
            return Ok(Vec::new());
        }

        let project_ids: Vec<String> = projects.iter().map(|p| p.id.clone()).collect();
        let members = self.get_team_members(&project_ids).await?;
        tracing::debug!(
            employee = %identity,
            projects = projects.len(),
            members = members.len(),
            "loaded project assignments"
        );

        Ok(assemble(projects, members))
    }
}

/// Attach team members to their projects, keeping both orderings.
fn assemble(projects: Vec<AssignedProjectRow>, members: Vec<TeamMemberRow>) -> Vec<ProjectWithDetails> {
    let mut teams: HashMap<String, Vec<TeamMember>> = HashMap::new();
    for row in members {
        teams.entry(row.project_id).or_default().push(TeamMember {
            employee_id: row.employee_id,
            employee_name: row.employee_name,
            role: row.role,
            allocation_percentage: row.allocation_percentage,
        });
    }

    projects
        .into_iter()
        .map(|row| ProjectWithDetails {
            team_members: teams.remove(&row.id).unwrap_or_default(),
            id: row.id,
            name: row.name,
            description: row.description,
            status: ProjectStatus::from(row.status),
            progress: row.progress,
            budget: row.budget,
            start_date: row.start_date,
            end_date: row.end_date,
            manager_name: row.manager_name,
            manager_email: row.manager_email,
            my_allocation: MyAllocation {
                role: row.my_role,
                allocation_percentage: row.my_allocation_percentage,
                start_date: row.my_start_date,
                end_date: row.my_end_date,
            },
        })
        .collect()
}

/// Initialize the database connection pool
pub async fn init(database_url: &str) -> Result<Database> {
    let db = Database::new(database_url).await?;
    tracing::info!("database connection established");

    // Run migrations if you want to automatically migrate the database
    // sqlx::migrate!().run(db.get_pool()).await?;

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_row(id: &str, name: &str) -> AssignedProjectRow {
        AssignedProjectRow {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            status: "on-hold".to_string(),
            progress: None,
            budget: Some(125000.0),
            start_date: None,
            end_date: None,
            manager_name: Some("Morgan".to_string()),
            manager_email: Some("morgan@example.com".to_string()),
            my_role: Some("Developer".to_string()),
            my_allocation_percentage: 60,
            my_start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            my_end_date: None,
        }
    }

    fn member_row(project_id: &str, employee_id: &str, name: &str) -> TeamMemberRow {
        TeamMemberRow {
            project_id: project_id.to_string(),
            employee_id: employee_id.to_string(),
            employee_name: Some(name.to_string()),
            role: None,
            allocation_percentage: 25,
        }
    }

    #[test]
    fn assemble_groups_members_under_their_projects() {
        let projects = vec![project_row("p1", "Alpha"), project_row("p2", "Beta")];
        let members = vec![
            member_row("p2", "u3", "Sam"),
            member_row("p1", "u1", "Jane"),
            member_row("p1", "u2", "Lee"),
        ];

        let assembled = assemble(projects, members);

        assert_eq!(assembled.len(), 2);
        assert_eq!(assembled[0].id, "p1");
        let p1_members: Vec<&str> = assembled[0]
            .team_members
            .iter()
            .map(|m| m.employee_id.as_str())
            .collect();
        assert_eq!(p1_members, vec!["u1", "u2"]);
        assert_eq!(assembled[1].team_members.len(), 1);
        assert_eq!(assembled[1].status, ProjectStatus::OnHold);
    }

    #[test]
    fn assemble_maps_viewer_allocation() {
        let assembled = assemble(vec![project_row("p1", "Alpha")], Vec::new());

        let allocation = &assembled[0].my_allocation;
        assert_eq!(allocation.role.as_deref(), Some("Developer"));
        assert_eq!(allocation.allocation_percentage, 60);
        assert_eq!(allocation.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(assembled[0].team_members.is_empty());
    }
}
