use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::OptionalExtension;
use shared_types::{CustomerType, Lead, LeadInput};
use std::collections::HashSet;

// SQLite's default host parameter limit is 999; keep well below it.
const EMAIL_LOOKUP_CHUNK: usize = 500;

const LEAD_COLUMNS: &str = "id, tenant_id, name, email, phone, company, product_category, notes,
                            reference_id, customer_type, created_by, created_at, updated_at";

fn row_to_lead(row: &rusqlite::Row<'_>) -> rusqlite::Result<Lead> {
    let customer_type: String = row.get(9)?;

    Ok(Lead {
        id: row.get(0)?,
        tenant_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        company: row.get(5)?,
        product_category: row.get(6)?,
        notes: row.get(7)?,
        reference_id: row.get(8)?,
        customer_type: CustomerType::parse(&customer_type),
        created_by: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

pub async fn insert_lead(conn: AsyncDbConnection, tenant_id: &str, input: &LeadInput) -> Result<Lead> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();
    let email = input.email.trim().to_lowercase();

    let id: i64 = conn
        .query_row(
            "INSERT INTO leads
             (tenant_id, name, email, phone, company, product_category, notes, reference_id,
              customer_type, created_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
            rusqlite::params![
                tenant_id,
                &input.name,
                &email,
                input.phone.as_ref(),
                input.company.as_ref(),
                input.product_category.as_ref(),
                input.notes.as_ref(),
                input.reference_id.as_ref(),
                input.customer_type.as_str(),
                &input.created_by,
                now,
                now
            ],
            |row| row.get(0),
        )
        .map_err(|e| {
            if e.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) {
                anyhow::anyhow!("Lead with email {} already exists", email)
            } else {
                anyhow::anyhow!("Failed to insert lead: {}", e)
            }
        })?;

    Ok(Lead {
        id,
        tenant_id: tenant_id.to_string(),
        name: input.name.clone(),
        email,
        phone: input.phone.clone(),
        company: input.company.clone(),
        product_category: input.product_category.clone(),
        notes: input.notes.clone(),
        reference_id: input.reference_id.clone(),
        customer_type: input.customer_type,
        created_by: input.created_by.clone(),
        created_at: now,
        updated_at: now,
    })
}

/// Returns the subset of `emails` (already normalized) that exist for the tenant.
pub async fn find_existing_emails(
    conn: AsyncDbConnection,
    tenant_id: &str,
    emails: &[String],
) -> Result<HashSet<String>> {
    let conn = conn.lock().await?;
    let mut existing = HashSet::new();

    for chunk in emails.chunks(EMAIL_LOOKUP_CHUNK) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let query = format!(
            "SELECT email FROM leads WHERE tenant_id = ? AND email IN ({})",
            placeholders
        );

        let mut stmt = conn.prepare(&query)?;
        let params = std::iter::once(tenant_id).chain(chunk.iter().map(|e| e.as_str()));
        let found = stmt
            .query_map(rusqlite::params_from_iter(params), |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        existing.extend(found);
    }

    Ok(existing)
}

pub async fn get_lead(conn: AsyncDbConnection, tenant_id: &str, id: i64) -> Result<Option<Lead>> {
    let conn = conn.lock().await?;

    let query = format!("SELECT {} FROM leads WHERE tenant_id = ? AND id = ?", LEAD_COLUMNS);
    let lead = conn
        .query_row(&query, rusqlite::params![tenant_id, id], row_to_lead)
        .optional()
        .map_err(|e| anyhow::anyhow!("Failed to get lead: {}", e))?;

    Ok(lead)
}

pub async fn list_leads(conn: AsyncDbConnection, tenant_id: &str, limit: usize) -> Result<Vec<Lead>> {
    let conn = conn.lock().await?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let query = format!(
        "SELECT {} FROM leads WHERE tenant_id = ? ORDER BY created_at DESC, id DESC LIMIT ?",
        LEAD_COLUMNS
    );
    let mut stmt = conn.prepare(&query)?;
    let leads = stmt
        .query_map(rusqlite::params![tenant_id, limit], row_to_lead)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(leads)
}
