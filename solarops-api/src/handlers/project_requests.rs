use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use shared_types::{
    AssignProjectRequestInput, ConvertProjectRequestInput, CreateProjectRequestInput,
    ErrorResponse, ProjectRequestStatus, ProjectRequestsResponse, UpdateStatusInput,
};
use std::sync::Arc;

use super::MAX_LIST_LIMIT;
use crate::database::Database;
use crate::helpers::session::SessionContext;
use crate::storage::SqliteProjectRequestStore;
use crate::workflows::project_requests::{ProjectRequestWorkflow, WorkflowError};

#[derive(Deserialize)]
pub struct ListQuery {
    status: Option<ProjectRequestStatus>,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    50
}

fn workflow(
    db: &Database,
    session: &SessionContext,
) -> ProjectRequestWorkflow<SqliteProjectRequestStore> {
    ProjectRequestWorkflow::new(SqliteProjectRequestStore::new(
        db.async_connection.clone(),
        session.tenant_id.clone(),
    ))
}

/// Map workflow failures onto structured JSON responses
pub fn error_response(err: WorkflowError) -> HttpResponse {
    let message = err.to_string();

    match err {
        WorkflowError::Validation(errors) => {
            HttpResponse::BadRequest().json(ErrorResponse::with_errors(message, errors))
        }
        WorkflowError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse::new(message)),
        WorkflowError::InvalidTransition { .. } | WorkflowError::NotApproved { .. } => {
            HttpResponse::Conflict().json(ErrorResponse::new(message))
        }
        WorkflowError::Store(e) => {
            tracing::error!("Project request store failure: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
        }
    }
}

pub async fn create_project_request(
    db: web::Data<Arc<Database>>,
    session: SessionContext,
    request: web::Json<CreateProjectRequestInput>,
) -> ActixResult<HttpResponse> {
    match workflow(&db, &session)
        .create(request.into_inner(), &session.user_id)
        .await
    {
        Ok(created) => Ok(HttpResponse::Created().json(created)),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn list_project_requests(
    db: web::Data<Arc<Database>>,
    session: SessionContext,
    query: web::Query<ListQuery>,
) -> ActixResult<HttpResponse> {
    let limit = query.limit.min(MAX_LIST_LIMIT);

    match workflow(&db, &session).list(query.status, limit).await {
        Ok(project_requests) => {
            Ok(HttpResponse::Ok().json(ProjectRequestsResponse { project_requests }))
        }
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_project_request(
    db: web::Data<Arc<Database>>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match workflow(&db, &session).get(path.into_inner()).await {
        Ok(request) => Ok(HttpResponse::Ok().json(request)),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_status(
    db: web::Data<Arc<Database>>,
    session: SessionContext,
    path: web::Path<i64>,
    request: web::Json<UpdateStatusInput>,
) -> ActixResult<HttpResponse> {
    match workflow(&db, &session)
        .update_status(path.into_inner(), request.into_inner(), &session.user_id)
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(updated)),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn assign_project_request(
    db: web::Data<Arc<Database>>,
    session: SessionContext,
    path: web::Path<i64>,
    request: web::Json<AssignProjectRequestInput>,
) -> ActixResult<HttpResponse> {
    match workflow(&db, &session)
        .assign(path.into_inner(), &request.assignee_id)
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(updated)),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn convert_to_project(
    db: web::Data<Arc<Database>>,
    session: SessionContext,
    path: web::Path<i64>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    // An empty body asks for a generated project id; anything else must parse
    let requested = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        match serde_json::from_slice::<ConvertProjectRequestInput>(&body) {
            Ok(input) => input.project_id,
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ErrorResponse::new(format!("Invalid convert request: {}", e))));
            }
        }
    };
    let project_id = requested.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    match workflow(&db, &session)
        .convert_to_project(path.into_inner(), &project_id)
        .await
    {
        Ok(converted) => Ok(HttpResponse::Ok().json(converted)),
        Err(e) => Ok(error_response(e)),
    }
}
