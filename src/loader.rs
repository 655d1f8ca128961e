use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Identity, ProjectWithDetails};

/// Where project records come from.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn get_employee_projects_with_details(
        &self,
        identity: &Identity,
    ) -> Result<Vec<ProjectWithDetails>>;
}

/// Handle for one issued load. Only the most recently issued ticket is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    sequence: u64,
    identity: Identity,
}

impl LoadTicket {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// A finished fetch, tagged with the ticket it was issued under.
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: Result<Vec<ProjectWithDetails>>,
}

/// Issues monotonically increasing tickets and tracks which one is current.
#[derive(Debug, Default)]
pub struct ProjectLoader {
    latest: u64,
}

impl ProjectLoader {
    pub fn issue(&mut self, identity: Identity) -> LoadTicket {
        self.latest += 1;
        tracing::debug!(sequence = self.latest, employee = %identity, "issuing project load");
        LoadTicket {
            sequence: self.latest,
            identity,
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.sequence == self.latest
    }
}

/// Run one fetch against `source` for the ticket's identity.
pub async fn fetch(source: &dyn ProjectSource, ticket: LoadTicket) -> LoadOutcome {
    let result = source
        .get_employee_projects_with_details(ticket.identity())
        .await;
    LoadOutcome { ticket, result }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use anyhow::anyhow;

    use super::*;

    /// In-memory source. Identities without an entry fail to load.
    #[derive(Default)]
    pub struct FakeSource {
        projects: Mutex<HashMap<String, Vec<ProjectWithDetails>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        pub fn with(self, employee_id: &str, projects: Vec<ProjectWithDetails>) -> Self {
            self.projects
                .lock()
                .unwrap()
                .insert(employee_id.to_string(), projects);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProjectSource for FakeSource {
        async fn get_employee_projects_with_details(
            &self,
            identity: &Identity,
        ) -> Result<Vec<ProjectWithDetails>> {
            self.calls.lock().unwrap().push(identity.to_string());
            self.projects
                .lock()
                .unwrap()
                .get(identity.as_str())
                .cloned()
                .ok_or_else(|| anyhow!("service unavailable for {identity}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeSource;
    use super::*;
    use crate::test_support::website_revamp;

    fn identity(id: &str) -> Identity {
        id.parse().unwrap()
    }

    #[test]
    fn newest_ticket_is_the_only_current_one() {
        let mut loader = ProjectLoader::default();

        let first = loader.issue(identity("u1"));
        assert!(loader.is_current(&first));

        let second = loader.issue(identity("u2"));
        assert!(!loader.is_current(&first));
        assert!(loader.is_current(&second));
        assert!(second.sequence() > first.sequence());
    }

    #[tokio::test]
    async fn fetch_uses_ticket_identity() {
        let source = FakeSource::default().with("u1", vec![website_revamp()]);
        let mut loader = ProjectLoader::default();

        let outcome = fetch(&source, loader.issue(identity("u1"))).await;

        assert_eq!(source.calls(), vec!["u1"]);
        assert_eq!(outcome.ticket.identity().as_str(), "u1");
        assert_eq!(outcome.result.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fetch_reports_source_errors() {
        let source = FakeSource::default();
        let mut loader = ProjectLoader::default();

        let outcome = fetch(&source, loader.issue(identity("nobody"))).await;

        assert!(outcome.result.is_err());
    }
}
