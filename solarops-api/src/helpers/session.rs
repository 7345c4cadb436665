use actix_web::{dev::Payload, error::ErrorUnauthorized, FromRequest, HttpRequest};
use std::future::{ready, Ready};

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const TENANT_ID_HEADER: &str = "X-Tenant-Id";

/// Identity of the caller, as established by the authenticating proxy in
/// front of this service. Only used to stamp ownership and scope queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: String,
    pub tenant_id: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            tenant_id: tenant_id.into(),
        }
    }

    fn from_headers(req: &HttpRequest) -> Option<Self> {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Some(Self {
            user_id: header(USER_ID_HEADER)?,
            tenant_id: header(TENANT_ID_HEADER)?,
        })
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(SessionContext::from_headers(req).ok_or_else(|| {
            tracing::debug!("Rejecting request without session headers: {}", req.path());
            ErrorUnauthorized("Missing authenticated session")
        }))
    }
}
