//! Importers Crate
//!
//! Turns uploaded files into typed candidate records for the API to persist.
//! Parsing is pure: nothing here touches the database, so duplicate detection
//! and persistence stay with the caller.
//!
//! # Available Importers
//!
//! - `LeadCsvParser`: maps a lead spreadsheet (`Name`, `Owner Email`, ...) into
//!   `LeadImportRow`s plus per-row errors
//!
//! # Example
//!
//! ```rust,ignore
//! use importers::LeadCsvParser;
//!
//! let parsed = LeadCsvParser::new().parse(&csv_content);
//! println!("{} leads, {} rejected", parsed.leads.len(), parsed.errors.len());
//! ```

mod error;
pub mod lead_csv;

pub use error::ImportError;
pub use lead_csv::{LeadCsvParser, ParsedLeads};
