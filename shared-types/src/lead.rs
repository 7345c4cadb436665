use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How the prospect relates to the property being quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerType {
    Owner,
    Lease,
    Unknown,
}

impl CustomerType {
    pub fn as_str(&self) -> &str {
        match self {
            CustomerType::Owner => "owner",
            CustomerType::Lease => "lease",
            CustomerType::Unknown => "unknown",
        }
    }

    /// Lenient mapping used for CSV cells and stored values.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "owner" | "homeowner" => CustomerType::Owner,
            "lease" | "leased" | "lessee" => CustomerType::Lease,
            _ => CustomerType::Unknown,
        }
    }
}

impl Default for CustomerType {
    fn default() -> Self {
        CustomerType::Unknown
    }
}

/// Prospective customer record
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Lead {
    pub id: i64,
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub product_category: Option<String>,
    pub notes: Option<String>,
    pub reference_id: Option<String>,
    pub customer_type: CustomerType,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields needed to persist a new lead
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct LeadInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub product_category: Option<String>,
    pub notes: Option<String>,
    pub reference_id: Option<String>,
    #[serde(default)]
    pub customer_type: CustomerType,
    #[serde(default)]
    pub created_by: String,
}

/// A lead candidate produced by the CSV mapper.
///
/// `row` is the 1-based line of the source file (the header is row 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeadImportRow {
    pub row: usize,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub reference_id: Option<String>,
    pub customer_type: CustomerType,
}

/// A row that could not be parsed or persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImportRowError {
    pub row: usize,
    pub email: Option<String>,
    pub error: String,
}

/// Aggregate outcome of a single import call. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImportBatchResult {
    pub total: usize,
    pub imported: usize,
    pub failed: usize,
    pub skipped: usize,
    pub invalid: usize,
    pub duration_ms: u64,
    pub errors: Vec<ImportRowError>,
    pub leads: Vec<Lead>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImportLeadsResponse {
    pub success: bool,
    pub message: String,
    pub result: ImportBatchResult,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct LeadsResponse {
    pub leads: Vec<Lead>,
}
