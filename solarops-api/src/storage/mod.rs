pub mod sqlite_storage;

pub use sqlite_storage::{SqliteLeadStore, SqliteProjectRequestStore};

use anyhow::Result;
use async_trait::async_trait;
use shared_types::{CreateProjectRequestInput, Lead, LeadInput, ProjectRequest, ProjectRequestStatus};
use std::collections::HashSet;

/// A status change already cleared by the workflow rules. `from` is the
/// status the rules were checked against; the write only lands while the
/// stored row still has it.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub from: ProjectRequestStatus,
    pub status: ProjectRequestStatus,
    pub reviewer_id: String,
    pub rejection_reason: Option<String>,
    pub admin_notes: Option<String>,
}

/// Lead persistence, scoped to one tenant by the implementation.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn create(&self, input: LeadInput) -> Result<Lead>;
    /// Which of the given normalized emails already belong to a lead.
    async fn find_existing_emails(&self, emails: &[String]) -> Result<HashSet<String>>;
    async fn get(&self, id: i64) -> Result<Option<Lead>>;
    async fn list(&self, limit: usize) -> Result<Vec<Lead>>;
}

/// Project request persistence, scoped to one tenant by the implementation.
///
/// Mutating calls return `None` when the row does not exist or is no longer
/// in the status the caller read (`APPROVED` for `convert_to_project`).
#[async_trait]
pub trait ProjectRequestStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProjectRequest>>;
    async fn create(
        &self,
        submitted_by: &str,
        input: &CreateProjectRequestInput,
    ) -> Result<ProjectRequest>;
    async fn list(
        &self,
        status: Option<ProjectRequestStatus>,
        limit: usize,
    ) -> Result<Vec<ProjectRequest>>;
    async fn update_status(&self, id: i64, change: StatusChange) -> Result<Option<ProjectRequest>>;
    async fn assign(
        &self,
        id: i64,
        assignee_id: &str,
        from: ProjectRequestStatus,
        status: ProjectRequestStatus,
    ) -> Result<Option<ProjectRequest>>;
    async fn convert_to_project(&self, id: i64, project_id: &str) -> Result<Option<ProjectRequest>>;
}
