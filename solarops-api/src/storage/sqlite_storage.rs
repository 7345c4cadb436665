use super::{LeadStore, ProjectRequestStore, StatusChange};
use crate::database::{leads as leads_db, project_requests as requests_db, AsyncDbConnection};
use async_trait::async_trait;
use shared_types::{CreateProjectRequestInput, Lead, LeadInput, ProjectRequest, ProjectRequestStatus};
use std::collections::HashSet;

pub struct SqliteLeadStore {
    conn: AsyncDbConnection,
    tenant_id: String,
}

impl SqliteLeadStore {
    pub fn new(conn: AsyncDbConnection, tenant_id: impl Into<String>) -> Self {
        Self {
            conn,
            tenant_id: tenant_id.into(),
        }
    }
}

#[async_trait]
impl LeadStore for SqliteLeadStore {
    async fn create(&self, input: LeadInput) -> anyhow::Result<Lead> {
        leads_db::insert_lead(self.conn.clone(), &self.tenant_id, &input).await
    }

    async fn find_existing_emails(&self, emails: &[String]) -> anyhow::Result<HashSet<String>> {
        leads_db::find_existing_emails(self.conn.clone(), &self.tenant_id, emails).await
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Lead>> {
        leads_db::get_lead(self.conn.clone(), &self.tenant_id, id).await
    }

    async fn list(&self, limit: usize) -> anyhow::Result<Vec<Lead>> {
        leads_db::list_leads(self.conn.clone(), &self.tenant_id, limit).await
    }
}

pub struct SqliteProjectRequestStore {
    conn: AsyncDbConnection,
    tenant_id: String,
}

impl SqliteProjectRequestStore {
    pub fn new(conn: AsyncDbConnection, tenant_id: impl Into<String>) -> Self {
        Self {
            conn,
            tenant_id: tenant_id.into(),
        }
    }
}

#[async_trait]
impl ProjectRequestStore for SqliteProjectRequestStore {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<ProjectRequest>> {
        requests_db::get_project_request(self.conn.clone(), &self.tenant_id, id).await
    }

    async fn create(
        &self,
        submitted_by: &str,
        input: &CreateProjectRequestInput,
    ) -> anyhow::Result<ProjectRequest> {
        requests_db::insert_project_request(self.conn.clone(), &self.tenant_id, submitted_by, input)
            .await
    }

    async fn list(
        &self,
        status: Option<ProjectRequestStatus>,
        limit: usize,
    ) -> anyhow::Result<Vec<ProjectRequest>> {
        requests_db::list_project_requests(self.conn.clone(), &self.tenant_id, status, limit).await
    }

    async fn update_status(
        &self,
        id: i64,
        change: StatusChange,
    ) -> anyhow::Result<Option<ProjectRequest>> {
        requests_db::update_project_request_status(
            self.conn.clone(),
            &self.tenant_id,
            id,
            change.from,
            change.status,
            &change.reviewer_id,
            change.rejection_reason.as_deref(),
            change.admin_notes.as_deref(),
        )
        .await
    }

    async fn assign(
        &self,
        id: i64,
        assignee_id: &str,
        from: ProjectRequestStatus,
        status: ProjectRequestStatus,
    ) -> anyhow::Result<Option<ProjectRequest>> {
        requests_db::assign_project_request(
            self.conn.clone(),
            &self.tenant_id,
            id,
            assignee_id,
            from,
            status,
        )
        .await
    }

    async fn convert_to_project(
        &self,
        id: i64,
        project_id: &str,
    ) -> anyhow::Result<Option<ProjectRequest>> {
        requests_db::convert_project_request(self.conn.clone(), &self.tenant_id, id, project_id).await
    }
}
