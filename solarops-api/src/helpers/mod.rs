pub mod database;
pub mod request_validator;
pub mod session;
