mod csv_parser;

pub use csv_parser::CsvParser;

use crate::ImportError;
use regex::Regex;
use shared_types::{CustomerType, ImportRowError, LeadImportRow};
use std::collections::HashMap;

const NAME_COLUMN: &str = "name";
const EMAIL_COLUMN: &str = "owner email";
const PHONE_COLUMN: &str = "owner phone";
const CUSTOMER_TYPE_COLUMN: &str = "customer type";
const REFERENCE_COLUMNS: [&str; 4] = ["reference id", "reference", "ref id", "id"];

/// Output of the CSV-to-lead mapping: candidates plus per-row rejects
#[derive(Debug, Default)]
pub struct ParsedLeads {
    pub leads: Vec<LeadImportRow>,
    pub errors: Vec<ImportRowError>,
}

pub struct LeadCsvParser {
    csv_parser: CsvParser,
    email_regex: Regex,
}

impl LeadCsvParser {
    pub fn new() -> Self {
        Self {
            csv_parser: CsvParser::new(),
            // Same shape check used for project request contact emails
            email_regex: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"),
        }
    }

    /// Map an uploaded CSV into lead candidates.
    ///
    /// A file missing a required column produces one error on row 1 and no
    /// leads. Rows are otherwise independent: a bad row never hides the rest.
    pub fn parse(&self, content: &str) -> ParsedLeads {
        match self.parse_rows(content) {
            Ok(parsed) => parsed,
            Err(e) => ParsedLeads {
                leads: Vec::new(),
                errors: vec![ImportRowError {
                    row: 1,
                    email: None,
                    error: e.to_string(),
                }],
            },
        }
    }

    fn parse_rows(&self, content: &str) -> Result<ParsedLeads, ImportError> {
        if content.trim().is_empty() {
            return Err(ImportError::InvalidInput("CSV content is empty".to_string()));
        }

        let headers = self.csv_parser.headers(content)?;
        for required in [NAME_COLUMN, EMAIL_COLUMN] {
            if !headers.iter().any(|h| h == required) {
                return Err(ImportError::MissingColumn(display_column(required)));
            }
        }

        let mut parsed = ParsedLeads::default();

        for (row, record) in self.csv_parser.parse_to_maps(content)? {
            let record = match record {
                Ok(record) => record,
                Err(error) => {
                    parsed.errors.push(ImportRowError {
                        row,
                        email: None,
                        error,
                    });
                    continue;
                }
            };

            match self.map_record(row, &record) {
                Ok(lead) => parsed.leads.push(lead),
                Err(error) => parsed.errors.push(error),
            }
        }

        Ok(parsed)
    }

    fn map_record(
        &self,
        row: usize,
        record: &HashMap<String, String>,
    ) -> Result<LeadImportRow, ImportRowError> {
        let name = field(record, NAME_COLUMN);
        let email = field(record, EMAIL_COLUMN).map(|e| e.to_lowercase());

        let Some(email) = email else {
            return Err(ImportRowError {
                row,
                email: None,
                error: "Owner Email is required".to_string(),
            });
        };

        let Some(name) = name else {
            return Err(ImportRowError {
                row,
                email: Some(email),
                error: "Name is required".to_string(),
            });
        };

        if !self.email_regex.is_match(&email) {
            return Err(ImportRowError {
                row,
                error: format!("Invalid email format: {}", email),
                email: Some(email),
            });
        }

        let reference_id = REFERENCE_COLUMNS
            .iter()
            .find_map(|column| field(record, column));
        let customer_type = field(record, CUSTOMER_TYPE_COLUMN)
            .map(|value| CustomerType::parse(&value))
            .unwrap_or_default();

        Ok(LeadImportRow {
            row,
            name,
            email,
            phone: field(record, PHONE_COLUMN),
            reference_id,
            customer_type,
        })
    }
}

impl Default for LeadCsvParser {
    fn default() -> Self {
        Self::new()
    }
}

fn field(record: &HashMap<String, String>, column: &str) -> Option<String> {
    record
        .get(column)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn display_column(column: &str) -> String {
    column
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
