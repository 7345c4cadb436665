pub mod leads;
pub mod project_requests;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::database::Database;

/// Upper bound applied to every `?limit=` query parameter
pub const MAX_LIST_LIMIT: usize = 1000;

pub async fn health(db: web::Data<Arc<Database>>) -> impl Responder {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "unhealthy",
                "database": "disconnected"
            }))
        }
    }
}

/// Register every route; shared by the server and handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/leads/import", web::post().to(leads::import_leads))
        .route("/api/leads", web::get().to(leads::list_leads))
        .route("/api/leads/{id}", web::get().to(leads::get_lead))
        .route("/api/project-requests", web::post().to(project_requests::create_project_request))
        .route("/api/project-requests", web::get().to(project_requests::list_project_requests))
        .route("/api/project-requests/{id}", web::get().to(project_requests::get_project_request))
        .route("/api/project-requests/{id}/status", web::put().to(project_requests::update_status))
        .route("/api/project-requests/{id}/assign", web::post().to(project_requests::assign_project_request))
        .route("/api/project-requests/{id}/convert", web::post().to(project_requests::convert_to_project));
}
