use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::i18n::{ErrorContext, SESSION_MESSAGE};
use serde::Serialize;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const LOGIN_PAGE: &str = "/login";

/// Error body every JSON endpoint returns: a localized `error`, the upstream
/// reason in `detail` when there is one, and `redirect` when the session is gone.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, error: error.into(), detail, redirect: None }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg, None)
    }

    /// No or unusable token: send the provider back to the login page.
    pub fn unauthorized(detail: Option<String>) -> Self {
        Self { redirect: Some(LOGIN_PAGE), ..Self::new(StatusCode::UNAUTHORIZED, SESSION_MESSAGE, detail) }
    }

    pub fn from_service(err: ServiceError, ctx: ErrorContext) -> Self {
        let upstream = err.status();
        // backend 5xx and transport failures are reported as a bad gateway
        let status = match StatusCode::from_u16(upstream) {
            Ok(s) if s.is_server_error() && !matches!(err, ServiceError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
            Ok(s) => s,
            Err(_) => StatusCode::BAD_GATEWAY,
        };
        if status.is_server_error() {
            error!(context = ?ctx, upstream, err = %err, "request_failed");
        } else {
            warn!(context = ?ctx, upstream, err = %err, "request_rejected");
        }
        let redirect = err.redirects_to_login(ctx).then_some(LOGIN_PAGE);
        Self { status, error: err.localized(ctx), detail: err.detail().map(str::to_string), redirect }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

/// Attach the screen context to a service result inside handlers.
pub trait WithContext<T> {
    fn ctx(self, ctx: ErrorContext) -> Result<T, JsonApiError>;
}

impl<T> WithContext<T> for Result<T, ServiceError> {
    fn ctx(self, ctx: ErrorContext) -> Result<T, JsonApiError> {
        self.map_err(|e| JsonApiError::from_service(e, ctx))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_401_redirects_outside_login() {
        let e = JsonApiError::from_service(ServiceError::Api { status: 401, detail: None }, ErrorContext::Staff);
        assert_eq!(e.status, StatusCode::UNAUTHORIZED);
        assert_eq!(e.redirect, Some(LOGIN_PAGE));

        let e = JsonApiError::from_service(ServiceError::Api { status: 401, detail: None }, ErrorContext::Login);
        assert_eq!(e.redirect, None);
        assert_eq!(e.error, "Email hoặc mật khẩu không chính xác.");
    }

    #[test]
    fn backend_500_becomes_bad_gateway_with_detail() {
        let err = ServiceError::Api { status: 500, detail: Some("NullReferenceException".into()) };
        let e = JsonApiError::from_service(err, ErrorContext::Service);
        assert_eq!(e.status, StatusCode::BAD_GATEWAY);
        assert_eq!(e.detail.as_deref(), Some("NullReferenceException"));
    }

    #[test]
    fn unavailable_stays_503() {
        let e = JsonApiError::from_service(ServiceError::Unavailable("off".into()), ErrorContext::Upload);
        assert_eq!(e.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(e.error, "off");
    }
}
