use common::i18n::{self, ErrorContext};
use models::errors::ModelError;
use thiserror::Error;

pub const DRAFT_GONE_MESSAGE: &str = "Phiên đăng ký đã hết hạn. Vui lòng bắt đầu lại.";
pub const UPLOAD_DISABLED_MESSAGE: &str = "Chức năng tải ảnh chưa được cấu hình.";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Form-level check failed before any request was sent; message is already localized.
    #[error("validation error: {0}")]
    Validation(String),
    /// The backend (or a third-party API) answered with a non-2xx status.
    #[error("upstream returned status {status}")]
    Api { status: u16, detail: Option<String> },
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("session error: {0}")]
    Session(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("gone: {0}")]
    Gone(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else {
            ServiceError::Network(e.to_string())
        }
    }
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    /// HTTP status the admin frontend should see for this failure.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::Api { status, .. } => *status,
            ServiceError::Network(_) | ServiceError::Decode(_) => 502,
            ServiceError::Session(_) => 401,
            ServiceError::NotFound(_) => 404,
            ServiceError::Gone(_) => 410,
            ServiceError::Unavailable(_) => 503,
        }
    }

    /// The fixed Vietnamese message for this failure on the given screen.
    pub fn localized(&self, ctx: ErrorContext) -> String {
        match self {
            ServiceError::Validation(msg) => msg.clone(),
            ServiceError::Api { status, .. } => ctx.message_for(*status),
            ServiceError::Network(_) => i18n::NETWORK_MESSAGE.to_string(),
            ServiceError::Decode(_) => i18n::DECODE_MESSAGE.to_string(),
            ServiceError::Session(_) => i18n::SESSION_MESSAGE.to_string(),
            ServiceError::NotFound(_) => ctx.message_for(404),
            ServiceError::Gone(msg) => msg.clone(),
            ServiceError::Unavailable(msg) => msg.clone(),
        }
    }

    pub fn redirects_to_login(&self, ctx: ErrorContext) -> bool {
        match self {
            ServiceError::Session(_) => true,
            ServiceError::Api { status, .. } => ctx.redirects_to_login(*status),
            _ => false,
        }
    }

    /// Upstream-provided explanation, if any. Logged and returned as secondary detail only.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ServiceError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_become_validation() {
        let e: ServiceError = ModelError::validation("Vui lòng nhập email.").into();
        assert_eq!(e.status(), 400);
        assert_eq!(e.localized(ErrorContext::Staff), "Vui lòng nhập email.");
    }

    #[test]
    fn api_errors_use_context() {
        let e = ServiceError::Api { status: 401, detail: None };
        assert_eq!(e.localized(ErrorContext::Login), "Email hoặc mật khẩu không chính xác.");
        assert!(!e.redirects_to_login(ErrorContext::Login));
        assert!(e.redirects_to_login(ErrorContext::Service));
    }

    #[test]
    fn transport_errors_map_to_bad_gateway() {
        assert_eq!(ServiceError::Network("x".into()).status(), 502);
        assert_eq!(ServiceError::Decode("x".into()).status(), 502);
    }
}
