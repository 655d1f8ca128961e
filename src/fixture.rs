use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::loader::ProjectSource;
use crate::models::{Identity, ProjectWithDetails};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Project records read from a JSON file mapping employee id to projects.
///
/// The file is re-read on every load so edits show up on refresh.
pub struct FixtureSource {
    path: PathBuf,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Result<HashMap<String, Vec<ProjectWithDetails>>, FixtureError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FixtureError::Read {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl ProjectSource for FixtureSource {
    async fn get_employee_projects_with_details(
        &self,
        identity: &Identity,
    ) -> Result<Vec<ProjectWithDetails>> {
        let mut by_employee = self.read_all().await?;
        let projects = by_employee.remove(identity.as_str()).unwrap_or_default();
        tracing::debug!(
            path = %self.path.display(),
            employee = %identity,
            count = projects.len(),
            "read projects from fixture"
        );
        Ok(projects)
    }
}
