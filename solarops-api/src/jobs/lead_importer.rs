use crate::storage::LeadStore;
use importers::LeadCsvParser;
use shared_types::{ImportBatchResult, ImportLeadsResponse, ImportRowError, LeadImportRow, LeadInput};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub skip_duplicates: bool,
    pub batch_size: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            skip_duplicates: true,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Best-effort CSV lead import.
///
/// Rows are persisted one at a time in `batch_size` slices. A failing row is
/// counted and reported but never undoes earlier rows, and nothing is retried.
pub struct LeadImporter<S> {
    store: S,
    parser: LeadCsvParser,
}

impl<S: LeadStore> LeadImporter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            parser: LeadCsvParser::new(),
        }
    }

    pub async fn import_leads(
        &self,
        csv_content: &str,
        user_id: &str,
        options: ImportOptions,
    ) -> ImportLeadsResponse {
        let started = Instant::now();
        let parsed = self.parser.parse(csv_content);

        let mut result = ImportBatchResult {
            total: parsed.leads.len() + parsed.errors.len(),
            invalid: parsed.errors.len(),
            errors: parsed.errors,
            ..Default::default()
        };

        if parsed.leads.is_empty() {
            result.duration_ms = started.elapsed().as_millis() as u64;
            info!(
                "Lead import found no valid rows ({} rejected by parser)",
                result.invalid
            );
            return ImportLeadsResponse {
                success: false,
                message: "No valid rows found in CSV".to_string(),
                result,
            };
        }

        match self
            .persist_rows(&parsed.leads, user_id, &options, &mut result)
            .await
        {
            Ok(()) => {
                result.duration_ms = started.elapsed().as_millis() as u64;
                let message = format!(
                    "Imported {} of {} leads ({} skipped as duplicates, {} failed, {} invalid)",
                    result.imported,
                    parsed.leads.len(),
                    result.skipped,
                    result.failed,
                    result.invalid
                );
                info!("{} in {}ms", message, result.duration_ms);

                ImportLeadsResponse {
                    success: true,
                    message,
                    result,
                }
            }
            Err(e) => {
                warn!("Lead import aborted: {}", e);
                ImportLeadsResponse {
                    success: false,
                    message: format!("Import failed: {}", e),
                    result: ImportBatchResult {
                        total: result.total,
                        duration_ms: started.elapsed().as_millis() as u64,
                        errors: vec![ImportRowError {
                            row: 0,
                            email: None,
                            error: e.to_string(),
                        }],
                        ..Default::default()
                    },
                }
            }
        }
    }

    async fn persist_rows(
        &self,
        rows: &[LeadImportRow],
        user_id: &str,
        options: &ImportOptions,
        result: &mut ImportBatchResult,
    ) -> anyhow::Result<()> {
        // Emails already taken, plus every email imported by this call
        let mut seen_emails: HashSet<String> = if options.skip_duplicates {
            let mut emails: Vec<String> = rows.iter().map(|r| r.email.clone()).collect();
            emails.sort();
            emails.dedup();
            self.store.find_existing_emails(&emails).await?
        } else {
            HashSet::new()
        };

        let batch_size = options.batch_size.max(1);

        for (batch_index, batch) in rows.chunks(batch_size).enumerate() {
            debug!(
                "Processing lead batch {} ({} rows)",
                batch_index + 1,
                batch.len()
            );

            for row in batch {
                if seen_emails.contains(&row.email) {
                    debug!("Skipping duplicate lead {} on row {}", row.email, row.row);
                    result.skipped += 1;
                    continue;
                }

                match self.store.create(lead_input(row, user_id)).await {
                    Ok(lead) => {
                        seen_emails.insert(row.email.clone());
                        result.imported += 1;
                        result.leads.push(lead);
                    }
                    Err(e) => {
                        warn!("Failed to import lead on row {}: {}", row.row, e);
                        result.failed += 1;
                        result.errors.push(ImportRowError {
                            row: row.row,
                            email: Some(row.email.clone()),
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

fn lead_input(row: &LeadImportRow, user_id: &str) -> LeadInput {
    LeadInput {
        name: row.name.clone(),
        email: row.email.clone(),
        phone: row.phone.clone(),
        company: None,
        product_category: None,
        notes: None,
        reference_id: row.reference_id.clone(),
        customer_type: row.customer_type,
        created_by: user_id.to_string(),
    }
}
