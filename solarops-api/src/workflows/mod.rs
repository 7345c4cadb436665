pub mod project_requests;
