use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Review status of a customer-submitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectRequestStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
    ConvertedToProject,
}

impl ProjectRequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectRequestStatus::Pending => "PENDING",
            ProjectRequestStatus::UnderReview => "UNDER_REVIEW",
            ProjectRequestStatus::Approved => "APPROVED",
            ProjectRequestStatus::Rejected => "REJECTED",
            ProjectRequestStatus::ConvertedToProject => "CONVERTED_TO_PROJECT",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(ProjectRequestStatus::Pending),
            "UNDER_REVIEW" => Some(ProjectRequestStatus::UnderReview),
            "APPROVED" => Some(ProjectRequestStatus::Approved),
            "REJECTED" => Some(ProjectRequestStatus::Rejected),
            "CONVERTED_TO_PROJECT" => Some(ProjectRequestStatus::ConvertedToProject),
            _ => None,
        }
    }

    /// Statuses reachable from `self` in one step.
    pub fn allowed_transitions(&self) -> &'static [ProjectRequestStatus] {
        use ProjectRequestStatus::*;
        match self {
            Pending => &[UnderReview, Approved, Rejected],
            UnderReview => &[Approved, Rejected, Pending],
            Approved => &[ConvertedToProject],
            Rejected => &[],
            ConvertedToProject => &[],
        }
    }

    pub fn can_transition_to(&self, target: ProjectRequestStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl std::fmt::Display for ProjectRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectRequestPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl ProjectRequestPriority {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectRequestPriority::Low => "low",
            ProjectRequestPriority::Medium => "medium",
            ProjectRequestPriority::High => "high",
            ProjectRequestPriority::Urgent => "urgent",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "low" => ProjectRequestPriority::Low,
            "high" => ProjectRequestPriority::High,
            "urgent" => ProjectRequestPriority::Urgent,
            _ => ProjectRequestPriority::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    Installation,
    Maintenance,
    Repair,
    Consultation,
    BatteryStorage,
    Monitoring,
    Other,
}

impl ServiceType {
    pub fn as_str(&self) -> &str {
        match self {
            ServiceType::Installation => "installation",
            ServiceType::Maintenance => "maintenance",
            ServiceType::Repair => "repair",
            ServiceType::Consultation => "consultation",
            ServiceType::BatteryStorage => "battery-storage",
            ServiceType::Monitoring => "monitoring",
            ServiceType::Other => "other",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "installation" => ServiceType::Installation,
            "maintenance" => ServiceType::Maintenance,
            "repair" => ServiceType::Repair,
            "consultation" => ServiceType::Consultation,
            "battery-storage" => ServiceType::BatteryStorage,
            "monitoring" => ServiceType::Monitoring,
            _ => ServiceType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Residential,
    Commercial,
    Industrial,
    Agricultural,
    Other,
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::Residential => "residential",
            PropertyType::Commercial => "commercial",
            PropertyType::Industrial => "industrial",
            PropertyType::Agricultural => "agricultural",
            PropertyType::Other => "other",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "residential" => PropertyType::Residential,
            "commercial" => PropertyType::Commercial,
            "industrial" => PropertyType::Industrial,
            "agricultural" => PropertyType::Agricultural,
            _ => PropertyType::Other,
        }
    }
}

/// Customer-submitted service request awaiting review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectRequest {
    pub id: i64,
    pub tenant_id: String,
    pub submitted_by: String,
    pub service_type: ServiceType,

    // Client contact
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,

    // Site address
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,

    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub estimated_budget: Option<f64>,
    pub system_size_kw: Option<f64>,
    pub desired_timeline: Option<String>,

    pub status: ProjectRequestStatus,
    pub priority: ProjectRequestPriority,

    // Review bookkeeping
    pub assigned_to: Option<String>,
    pub assigned_at: Option<i64>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<i64>,
    pub rejection_reason: Option<String>,
    pub admin_notes: Option<String>,
    pub converted_project_id: Option<String>,
    pub converted_at: Option<i64>,

    pub created_at: i64,
    pub updated_at: i64,
}

/// Submission payload. Enum fields are optional so a missing value is
/// reported as a field error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateProjectRequestInput {
    pub service_type: Option<ServiceType>,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub property_type: Option<PropertyType>,
    pub estimated_budget: Option<f64>,
    pub system_size_kw: Option<f64>,
    pub desired_timeline: Option<String>,
    pub priority: Option<ProjectRequestPriority>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateStatusInput {
    pub status: ProjectRequestStatus,
    pub rejection_reason: Option<String>,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssignProjectRequestInput {
    pub assignee_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConvertProjectRequestInput {
    pub project_id: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ProjectRequestsResponse {
    pub project_requests: Vec<ProjectRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProjectRequestStatus::*;

    #[test]
    fn test_transition_table() {
        assert!(Pending.can_transition_to(UnderReview));
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(ConvertedToProject));
        assert!(!Pending.can_transition_to(Pending));

        assert!(UnderReview.can_transition_to(Pending));
        assert!(!UnderReview.can_transition_to(ConvertedToProject));

        assert_eq!(Approved.allowed_transitions(), &[ConvertedToProject]);
    }

    #[test]
    fn test_terminal_states() {
        assert!(Rejected.is_terminal());
        assert!(ConvertedToProject.is_terminal());
        assert!(!Pending.is_terminal());
        assert!(!Approved.is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ConvertedToProject).unwrap();
        assert_eq!(json, "\"CONVERTED_TO_PROJECT\"");

        let status: ProjectRequestStatus = serde_json::from_str("\"UNDER_REVIEW\"").unwrap();
        assert_eq!(status, UnderReview);

        for status in [Pending, UnderReview, Approved, Rejected, ConvertedToProject] {
            assert_eq!(ProjectRequestStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ProjectRequestStatus::from_str("pending"), None);
    }

    #[test]
    fn test_missing_enum_fields_deserialize_as_none() {
        let input: CreateProjectRequestInput =
            serde_json::from_str(r#"{"client_name": "Ada"}"#).unwrap();
        assert!(input.service_type.is_none());
        assert!(input.property_type.is_none());
        assert_eq!(input.client_name, "Ada");
        assert!(input.description.is_empty());
    }
}
