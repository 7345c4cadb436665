use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use shared_types::{ErrorResponse, LeadsResponse};
use std::sync::Arc;
use tracing::info;

use crate::config::ImportConfig;
use super::MAX_LIST_LIMIT;
use crate::database::Database;
use crate::helpers::session::SessionContext;
use crate::jobs::lead_importer::{ImportOptions, LeadImporter};
use crate::storage::{LeadStore, SqliteLeadStore};

#[derive(Deserialize)]
pub struct ImportQuery {
    skip_duplicates: Option<bool>,
    batch_size: Option<usize>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    100
}

/// Body is the raw CSV text of the uploaded file.
pub async fn import_leads(
    db: web::Data<Arc<Database>>,
    import_config: web::Data<ImportConfig>,
    session: SessionContext,
    query: web::Query<ImportQuery>,
    body: String,
) -> ActixResult<HttpResponse> {
    let options = ImportOptions {
        skip_duplicates: query
            .skip_duplicates
            .unwrap_or(import_config.skip_duplicates),
        batch_size: query.batch_size.unwrap_or(import_config.default_batch_size),
    };

    info!(
        "Lead import requested by {} for tenant {} ({} bytes, batch_size={}, skip_duplicates={})",
        session.user_id,
        session.tenant_id,
        body.len(),
        options.batch_size,
        options.skip_duplicates
    );

    let store = SqliteLeadStore::new(db.async_connection.clone(), session.tenant_id.clone());
    let response = LeadImporter::new(store)
        .import_leads(&body, &session.user_id, options)
        .await;

    if response.success {
        Ok(HttpResponse::Ok().json(response))
    } else {
        Ok(HttpResponse::UnprocessableEntity().json(response))
    }
}

pub async fn list_leads(
    db: web::Data<Arc<Database>>,
    session: SessionContext,
    query: web::Query<ListQuery>,
) -> ActixResult<HttpResponse> {
    let store = SqliteLeadStore::new(db.async_connection.clone(), session.tenant_id);
    let leads = store
        .list(query.limit.min(MAX_LIST_LIMIT))
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(LeadsResponse { leads }))
}

pub async fn get_lead(
    db: web::Data<Arc<Database>>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let lead_id = path.into_inner();
    let store = SqliteLeadStore::new(db.async_connection.clone(), session.tenant_id);

    let lead = store
        .get(lead_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    match lead {
        Some(lead) => Ok(HttpResponse::Ok().json(lead)),
        None => Ok(HttpResponse::NotFound().json(ErrorResponse::new(format!(
            "Lead {} not found",
            lead_id
        )))),
    }
}
