use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    // Create leads table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS leads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tenant_id VARCHAR NOT NULL,
            name VARCHAR NOT NULL,
            email VARCHAR NOT NULL,
            phone VARCHAR,
            company VARCHAR,
            product_category VARCHAR,
            notes VARCHAR,
            reference_id VARCHAR,
            customer_type VARCHAR NOT NULL DEFAULT 'unknown' CHECK (customer_type IN ('owner', 'lease', 'unknown')),
            created_by VARCHAR NOT NULL,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL,
            UNIQUE (tenant_id, email)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_leads_tenant_created
            ON leads(tenant_id, created_at)",
        [],
    )?;

    // Create project_requests table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS project_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tenant_id VARCHAR NOT NULL,
            submitted_by VARCHAR NOT NULL,
            service_type VARCHAR NOT NULL,
            client_name VARCHAR NOT NULL,
            client_email VARCHAR NOT NULL,
            client_phone VARCHAR NOT NULL,
            address VARCHAR NOT NULL,
            city VARCHAR NOT NULL,
            state VARCHAR NOT NULL,
            zip_code VARCHAR NOT NULL,
            country VARCHAR NOT NULL,
            title VARCHAR NOT NULL,
            description VARCHAR NOT NULL,
            property_type VARCHAR NOT NULL,
            estimated_budget DOUBLE,
            system_size_kw DOUBLE,
            desired_timeline VARCHAR,
            status VARCHAR NOT NULL DEFAULT 'PENDING' CHECK (status IN ('PENDING', 'UNDER_REVIEW', 'APPROVED', 'REJECTED', 'CONVERTED_TO_PROJECT')),
            priority VARCHAR NOT NULL DEFAULT 'medium',
            assigned_to VARCHAR,
            assigned_at BIGINT,
            reviewed_by VARCHAR,
            reviewed_at BIGINT,
            rejection_reason VARCHAR,
            admin_notes VARCHAR,
            converted_project_id VARCHAR,
            converted_at BIGINT,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_project_requests_tenant_status
            ON project_requests(tenant_id, status)",
        [],
    )?;

    Ok(())
}
