use crate::helpers::request_validator::{validate_project_request, validate_rejection_reason};
use crate::storage::{ProjectRequestStore, StatusChange};
use shared_types::{
    CreateProjectRequestInput, FieldError, ProjectRequest, ProjectRequestStatus, UpdateStatusInput,
};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Project request {0} not found")]
    NotFound(i64),

    #[error("Cannot move project request from {from} to {to}")]
    InvalidTransition {
        from: ProjectRequestStatus,
        to: ProjectRequestStatus,
    },

    #[error("Project request {id} is {status}; only APPROVED requests can be converted")]
    NotApproved {
        id: i64,
        status: ProjectRequestStatus,
    },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl WorkflowError {
    fn validation(field: &str, message: impl Into<String>) -> Self {
        WorkflowError::Validation(vec![FieldError::new(field, message)])
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Review lifecycle of customer-submitted project requests.
///
/// `PENDING -> UNDER_REVIEW | APPROVED | REJECTED`,
/// `UNDER_REVIEW -> APPROVED | REJECTED | PENDING`,
/// `APPROVED -> CONVERTED_TO_PROJECT` (via `convert_to_project` only).
/// `REJECTED` and `CONVERTED_TO_PROJECT` are terminal.
pub struct ProjectRequestWorkflow<S> {
    store: S,
}

impl<S: ProjectRequestStore> ProjectRequestWorkflow<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and store a new request in `PENDING`.
    ///
    /// Repeat submissions for the same email and address are accepted; no
    /// duplicate window is enforced.
    pub async fn create(
        &self,
        input: CreateProjectRequestInput,
        submitted_by: &str,
    ) -> Result<ProjectRequest, WorkflowError> {
        let errors = validate_project_request(&input);
        if !errors.is_empty() {
            return Err(WorkflowError::Validation(errors));
        }

        let request = self.store.create(submitted_by, &input).await?;
        info!(
            "Project request {} submitted by {}",
            request.id, submitted_by
        );

        Ok(request)
    }

    pub async fn get(&self, id: i64) -> Result<ProjectRequest, WorkflowError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(WorkflowError::NotFound(id))
    }

    pub async fn list(
        &self,
        status: Option<ProjectRequestStatus>,
        limit: usize,
    ) -> Result<Vec<ProjectRequest>, WorkflowError> {
        Ok(self.store.list(status, limit).await?)
    }

    pub async fn update_status(
        &self,
        id: i64,
        input: UpdateStatusInput,
        reviewer_id: &str,
    ) -> Result<ProjectRequest, WorkflowError> {
        let current = self.get(id).await?;

        if !current.status.can_transition_to(input.status) {
            return Err(WorkflowError::InvalidTransition {
                from: current.status,
                to: input.status,
            });
        }

        match input.status {
            ProjectRequestStatus::Rejected => {
                if let Some(error) = validate_rejection_reason(input.rejection_reason.as_deref()) {
                    return Err(WorkflowError::Validation(vec![error]));
                }
            }
            ProjectRequestStatus::ConvertedToProject => {
                return Err(WorkflowError::validation(
                    "status",
                    "Use the convert operation to turn a request into a project",
                ));
            }
            _ => {}
        }

        let change = StatusChange {
            from: current.status,
            status: input.status,
            reviewer_id: reviewer_id.to_string(),
            rejection_reason: input.rejection_reason.map(|r| r.trim().to_string()),
            admin_notes: input.admin_notes,
        };

        let updated = match self.store.update_status(id, change).await? {
            Some(updated) => updated,
            None => return Err(self.moved_since_read(id, input.status).await),
        };

        info!(
            "Project request {} moved {} -> {} by {}",
            id, current.status, updated.status, reviewer_id
        );

        Ok(updated)
    }

    /// Hand a request to a reviewer. A `PENDING` request moves to
    /// `UNDER_REVIEW`; other open states keep their status.
    pub async fn assign(&self, id: i64, assignee_id: &str) -> Result<ProjectRequest, WorkflowError> {
        let assignee_id = assignee_id.trim();
        if assignee_id.is_empty() {
            return Err(WorkflowError::validation("assignee_id", "Assignee is required"));
        }

        let current = self.get(id).await?;

        if current.status.is_terminal() {
            return Err(WorkflowError::InvalidTransition {
                from: current.status,
                to: current.status,
            });
        }

        let status = match current.status {
            ProjectRequestStatus::Pending => ProjectRequestStatus::UnderReview,
            other => other,
        };

        let updated = match self.store.assign(id, assignee_id, current.status, status).await? {
            Some(updated) => updated,
            None => return Err(self.moved_since_read(id, status).await),
        };

        info!("Project request {} assigned to {}", id, assignee_id);

        Ok(updated)
    }

    pub async fn convert_to_project(
        &self,
        id: i64,
        project_id: &str,
    ) -> Result<ProjectRequest, WorkflowError> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(WorkflowError::validation("project_id", "Project id is required"));
        }

        let current = self.get(id).await?;

        if current.status != ProjectRequestStatus::Approved {
            return Err(WorkflowError::NotApproved {
                id,
                status: current.status,
            });
        }

        match self.store.convert_to_project(id, project_id).await? {
            Some(converted) => {
                info!("Project request {} converted to project {}", id, project_id);
                Ok(converted)
            }
            // Status changed between the check and the guarded update
            None => {
                let latest = self.get(id).await?;
                Err(WorkflowError::NotApproved {
                    id,
                    status: latest.status,
                })
            }
        }
    }

    /// Explain a guarded write that matched no row: the request was removed
    /// or another reviewer moved it after it was read.
    async fn moved_since_read(&self, id: i64, to: ProjectRequestStatus) -> WorkflowError {
        match self.get(id).await {
            Ok(latest) => WorkflowError::InvalidTransition {
                from: latest.status,
                to,
            },
            Err(e) => e,
        }
    }
}
