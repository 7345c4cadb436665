use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use solarops_api::config::ImportConfig;
use solarops_api::helpers::session::{TENANT_ID_HEADER, USER_ID_HEADER};
use solarops_api::{handlers, Database};
use std::sync::Arc;

fn open_db(dir: &tempfile::TempDir) -> Arc<Database> {
    Arc::new(Database::new(&dir.path().join("api.db")).unwrap())
}

macro_rules! app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($db.clone()))
                .app_data(web::Data::new(ImportConfig::default()))
                .configure(handlers::configure),
        )
        .await
    };
}

fn request_body() -> Value {
    json!({
        "service_type": "installation",
        "client_name": "Ada Lovelace",
        "client_email": "ada@example.com",
        "client_phone": "5550100001",
        "address": "12 Analytical Way",
        "city": "London",
        "state": "LN",
        "zip_code": "N1 9GU",
        "country": "UK",
        "title": "Rooftop array",
        "description": "Twenty-five characters ok",
        "property_type": "residential",
        "estimated_budget": 15000.0
    })
}

#[actix_web::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(&dir);
    let app = app!(db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_requests_without_session_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(&dir);
    let app = app!(db);

    let req = test::TestRequest::get().uri("/api/leads").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_import_then_reimport_skips_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(&dir);
    let app = app!(db);

    let csv = "Name,Owner Email,Owner Phone\nAda,ada@example.com,555\nBob,bob@example.com,\nBad,nope,\n";

    let req = test::TestRequest::post()
        .uri("/api/leads/import?batch_size=1")
        .insert_header((USER_ID_HEADER, "user-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_payload(csv)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["result"]["imported"], json!(2));
    assert_eq!(body["result"]["invalid"], json!(1));
    assert_eq!(body["result"]["errors"][0]["row"], json!(4));

    let req = test::TestRequest::post()
        .uri("/api/leads/import")
        .insert_header((USER_ID_HEADER, "user-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_payload(csv)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["result"]["imported"], json!(0));
    assert_eq!(body["result"]["skipped"], json!(2));

    let req = test::TestRequest::get()
        .uri("/api/leads")
        .insert_header((USER_ID_HEADER, "user-2"))
        .insert_header((TENANT_ID_HEADER, "tenant-b"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["leads"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn test_import_without_valid_rows_is_unprocessable() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(&dir);
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/api/leads/import")
        .insert_header((USER_ID_HEADER, "user-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_payload("Name,Phone\nAda,555\n")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["result"]["errors"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_project_request_review_flow() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(&dir);
    let app = app!(db);

    let mut short = request_body();
    short["description"] = json!("Too short");
    let req = test::TestRequest::post()
        .uri("/api/project-requests")
        .insert_header((USER_ID_HEADER, "user-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_json(&short)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], json!("description"));

    let req = test::TestRequest::post()
        .uri("/api/project-requests")
        .insert_header((USER_ID_HEADER, "user-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_json(request_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], json!("PENDING"));
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/project-requests/{}/status", id))
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_json(json!({ "status": "APPROVED" }))
        .to_request();
    let approved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(approved["status"], json!("APPROVED"));
    assert_eq!(approved["reviewed_by"], json!("admin-1"));

    let req = test::TestRequest::put()
        .uri(&format!("/api/project-requests/{}/status", id))
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_json(json!({ "status": "PENDING" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri(&format!("/api/project-requests/{}/convert", id))
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_json(json!({ "project_id": "proj-42" }))
        .to_request();
    let converted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(converted["status"], json!("CONVERTED_TO_PROJECT"));
    assert_eq!(converted["converted_project_id"], json!("proj-42"));

    // Other tenants see nothing
    let req = test::TestRequest::get()
        .uri(&format!("/api/project-requests/{}", id))
        .insert_header((USER_ID_HEADER, "user-9"))
        .insert_header((TENANT_ID_HEADER, "tenant-b"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_convert_generates_project_id_and_requires_approval() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(&dir);
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/api/project-requests")
        .insert_header((USER_ID_HEADER, "user-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_json(request_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/project-requests/{}/convert", id))
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri(&format!("/api/project-requests/{}/assign", id))
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_json(json!({ "assignee_id": "admin-2" }))
        .to_request();
    let assigned: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(assigned["status"], json!("UNDER_REVIEW"));

    let req = test::TestRequest::put()
        .uri(&format!("/api/project-requests/{}/status", id))
        .insert_header((USER_ID_HEADER, "admin-2"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_json(json!({ "status": "APPROVED", "admin_notes": "site survey booked" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/project-requests/{}/convert", id))
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .to_request();
    let converted: Value = test::call_and_read_body_json(&app, req).await;
    let project_id = converted["converted_project_id"].as_str().unwrap();
    assert!(uuid_like(project_id));

    let req = test::TestRequest::get()
        .uri("/api/project-requests?status=CONVERTED_TO_PROJECT")
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed["project_requests"].as_array().unwrap().len(), 1);
    assert_eq!(listed["project_requests"][0]["admin_notes"], json!("site survey booked"));
}

#[actix_web::test]
async fn test_convert_with_malformed_body_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(&dir);
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/api/project-requests")
        .insert_header((USER_ID_HEADER, "user-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_json(request_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/project-requests/{}/status", id))
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .set_json(json!({ "status": "APPROVED" }))
        .to_request();
    test::call_service(&app, req).await;

    for payload in [r#"{"project_id": 42}"#, "{not json"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/project-requests/{}/convert", id))
            .insert_header((USER_ID_HEADER, "admin-1"))
            .insert_header((TENANT_ID_HEADER, "tenant-a"))
            .insert_header(("content-type", "application/json"))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/project-requests/{}", id))
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .to_request();
    let latest: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(latest["status"], json!("APPROVED"));
    assert_eq!(latest["converted_project_id"], Value::Null);
}

#[actix_web::test]
async fn test_oversized_list_limit_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(&dir);
    let app = app!(db);

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/project-requests")
            .insert_header((USER_ID_HEADER, "user-1"))
            .insert_header((TENANT_ID_HEADER, "tenant-a"))
            .set_json(request_body())
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/project-requests?limit={}", usize::MAX))
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed["project_requests"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/leads?limit={}", usize::MAX))
        .insert_header((USER_ID_HEADER, "admin-1"))
        .insert_header((TENANT_ID_HEADER, "tenant-a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

fn uuid_like(value: &str) -> bool {
    value.len() == 36 && value.chars().filter(|c| *c == '-').count() == 4
}
