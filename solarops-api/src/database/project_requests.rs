use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::OptionalExtension;
use shared_types::{
    CreateProjectRequestInput, ProjectRequest, ProjectRequestPriority, ProjectRequestStatus,
    PropertyType, ServiceType,
};

const REQUEST_COLUMNS: &str = "id, tenant_id, submitted_by, service_type, client_name, client_email,
                               client_phone, address, city, state, zip_code, country, title,
                               description, property_type, estimated_budget, system_size_kw,
                               desired_timeline, status, priority, assigned_to, assigned_at,
                               reviewed_by, reviewed_at, rejection_reason, admin_notes,
                               converted_project_id, converted_at, created_at, updated_at";

fn row_to_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectRequest> {
    let service_type: String = row.get(3)?;
    let property_type: String = row.get(14)?;
    let status_str: String = row.get(18)?;
    let priority: String = row.get(19)?;

    let status = ProjectRequestStatus::from_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            18,
            rusqlite::types::Type::Text,
            format!("unknown project request status: {}", status_str).into(),
        )
    })?;

    Ok(ProjectRequest {
        id: row.get(0)?,
        tenant_id: row.get(1)?,
        submitted_by: row.get(2)?,
        service_type: ServiceType::from_str(&service_type),
        client_name: row.get(4)?,
        client_email: row.get(5)?,
        client_phone: row.get(6)?,
        address: row.get(7)?,
        city: row.get(8)?,
        state: row.get(9)?,
        zip_code: row.get(10)?,
        country: row.get(11)?,
        title: row.get(12)?,
        description: row.get(13)?,
        property_type: PropertyType::from_str(&property_type),
        estimated_budget: row.get(15)?,
        system_size_kw: row.get(16)?,
        desired_timeline: row.get(17)?,
        status,
        priority: ProjectRequestPriority::from_str(&priority),
        assigned_to: row.get(20)?,
        assigned_at: row.get(21)?,
        reviewed_by: row.get(22)?,
        reviewed_at: row.get(23)?,
        rejection_reason: row.get(24)?,
        admin_notes: row.get(25)?,
        converted_project_id: row.get(26)?,
        converted_at: row.get(27)?,
        created_at: row.get(28)?,
        updated_at: row.get(29)?,
    })
}

/// Insert a request that already passed validation. Enum fields fall back to
/// `Other`/`Medium` only if the caller skipped validation.
pub async fn insert_project_request(
    conn: AsyncDbConnection,
    tenant_id: &str,
    submitted_by: &str,
    input: &CreateProjectRequestInput,
) -> Result<ProjectRequest> {
    let id = {
        let conn = conn.lock().await?;
        let now = chrono::Utc::now().timestamp();

        let service_type = input.service_type.unwrap_or(ServiceType::Other);
        let property_type = input.property_type.unwrap_or(PropertyType::Other);
        let priority = input.priority.unwrap_or(ProjectRequestPriority::Medium);

        conn.query_row(
            "INSERT INTO project_requests
             (tenant_id, submitted_by, service_type, client_name, client_email, client_phone,
              address, city, state, zip_code, country, title, description, property_type,
              estimated_budget, system_size_kw, desired_timeline, status, priority,
              created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
            rusqlite::params![
                tenant_id,
                submitted_by,
                service_type.as_str(),
                input.client_name.trim(),
                input.client_email.trim().to_lowercase(),
                input.client_phone.trim(),
                input.address.trim(),
                input.city.trim(),
                input.state.trim(),
                input.zip_code.trim(),
                input.country.trim(),
                input.title.trim(),
                input.description.trim(),
                property_type.as_str(),
                input.estimated_budget,
                input.system_size_kw,
                input.desired_timeline.as_ref(),
                ProjectRequestStatus::Pending.as_str(),
                priority.as_str(),
                now,
                now
            ],
            |row| row.get::<_, i64>(0),
        )?
    };

    get_project_request(conn, tenant_id, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Project request {} vanished after insert", id))
}

pub async fn get_project_request(
    conn: AsyncDbConnection,
    tenant_id: &str,
    id: i64,
) -> Result<Option<ProjectRequest>> {
    let conn = conn.lock().await?;

    let query = format!(
        "SELECT {} FROM project_requests WHERE tenant_id = ? AND id = ?",
        REQUEST_COLUMNS
    );
    let request = conn
        .query_row(&query, rusqlite::params![tenant_id, id], row_to_request)
        .optional()
        .map_err(|e| anyhow::anyhow!("Failed to get project request: {}", e))?;

    Ok(request)
}

pub async fn list_project_requests(
    conn: AsyncDbConnection,
    tenant_id: &str,
    status_filter: Option<ProjectRequestStatus>,
    limit: usize,
) -> Result<Vec<ProjectRequest>> {
    let conn = conn.lock().await?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let requests = if let Some(status) = status_filter {
        let query = format!(
            "SELECT {} FROM project_requests WHERE tenant_id = ? AND status = ?
             ORDER BY created_at DESC, id DESC LIMIT ?",
            REQUEST_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt
            .query_map(
                rusqlite::params![tenant_id, status.as_str(), limit],
                row_to_request,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        rows
    } else {
        let query = format!(
            "SELECT {} FROM project_requests WHERE tenant_id = ?
             ORDER BY created_at DESC, id DESC LIMIT ?",
            REQUEST_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt
            .query_map(rusqlite::params![tenant_id, limit], row_to_request)?
            .collect::<Result<Vec<_>, _>>()?;
        rows
    };

    Ok(requests)
}

/// Apply a reviewed status change. Reason and notes are only overwritten when supplied.
///
/// The row is only written while it is still in `expected`; `None` means it is
/// missing or has moved on since it was read.
pub async fn update_project_request_status(
    conn: AsyncDbConnection,
    tenant_id: &str,
    id: i64,
    expected: ProjectRequestStatus,
    status: ProjectRequestStatus,
    reviewer_id: &str,
    rejection_reason: Option<&str>,
    admin_notes: Option<&str>,
) -> Result<Option<ProjectRequest>> {
    let updated = {
        let conn = conn.lock().await?;
        let now = chrono::Utc::now().timestamp();

        conn.execute(
            "UPDATE project_requests
             SET status = ?, reviewed_by = ?, reviewed_at = ?,
                 rejection_reason = COALESCE(?, rejection_reason),
                 admin_notes = COALESCE(?, admin_notes),
                 updated_at = ?
             WHERE tenant_id = ? AND id = ? AND status = ?",
            rusqlite::params![
                status.as_str(),
                reviewer_id,
                now,
                rejection_reason,
                admin_notes,
                now,
                tenant_id,
                id,
                expected.as_str()
            ],
        )?
    };

    if updated == 0 {
        return Ok(None);
    }

    get_project_request(conn, tenant_id, id).await
}

/// Record the assignee, guarded on `expected` like status updates.
pub async fn assign_project_request(
    conn: AsyncDbConnection,
    tenant_id: &str,
    id: i64,
    assignee_id: &str,
    expected: ProjectRequestStatus,
    status: ProjectRequestStatus,
) -> Result<Option<ProjectRequest>> {
    let updated = {
        let conn = conn.lock().await?;
        let now = chrono::Utc::now().timestamp();

        conn.execute(
            "UPDATE project_requests
             SET assigned_to = ?, assigned_at = ?, status = ?, updated_at = ?
             WHERE tenant_id = ? AND id = ? AND status = ?",
            rusqlite::params![
                assignee_id,
                now,
                status.as_str(),
                now,
                tenant_id,
                id,
                expected.as_str()
            ],
        )?
    };

    if updated == 0 {
        return Ok(None);
    }

    get_project_request(conn, tenant_id, id).await
}

/// Link an approved request to its project. Returns `None` when the row is
/// missing or no longer `APPROVED`.
pub async fn convert_project_request(
    conn: AsyncDbConnection,
    tenant_id: &str,
    id: i64,
    project_id: &str,
) -> Result<Option<ProjectRequest>> {
    let updated = {
        let conn = conn.lock().await?;
        let now = chrono::Utc::now().timestamp();

        conn.execute(
            "UPDATE project_requests
             SET status = ?, converted_project_id = ?, converted_at = ?, updated_at = ?
             WHERE tenant_id = ? AND id = ? AND status = ?",
            rusqlite::params![
                ProjectRequestStatus::ConvertedToProject.as_str(),
                project_id,
                now,
                now,
                tenant_id,
                id,
                ProjectRequestStatus::Approved.as_str()
            ],
        )?
    };

    if updated == 0 {
        return Ok(None);
    }

    get_project_request(conn, tenant_id, id).await
}
