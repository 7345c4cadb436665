use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod lead;
pub mod project_request;

pub use lead::{
    CustomerType, ImportBatchResult, ImportLeadsResponse, ImportRowError, Lead, LeadImportRow,
    LeadInput, LeadsResponse,
};
pub use project_request::{
    AssignProjectRequestInput, ConvertProjectRequestInput, CreateProjectRequestInput,
    ProjectRequest, ProjectRequestPriority, ProjectRequestStatus, ProjectRequestsResponse,
    PropertyType, ServiceType, UpdateStatusInput,
};

/// A single violated field rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors,
        }
    }
}
