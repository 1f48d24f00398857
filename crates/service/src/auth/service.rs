use models::auth::{LoginRequest, LoginResponse, RegisterRequest, ResendOtpRequest, VerifyOtpRequest};
use tracing::{info, instrument};

use crate::client::{decode, ApiClient};
use crate::errors::ServiceError;

pub const LOGIN_PATH: &str = "/api/Auth/login";
pub const REGISTER_PATH: &str = "/api/Auth/register";
pub const VERIFY_OTP_PATH: &str = "/api/Auth/verify-otp";
pub const RESEND_OTP_PATH: &str = "/api/Auth/resend-otp";

/// Auth calls; none of these carry a bearer token.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Examples
    /// ```no_run
    /// use service::{auth::AuthService, client::ApiClient};
    /// use models::auth::LoginRequest;
    /// let client = ApiClient::with_http(reqwest::Client::new(), "http://localhost:5000");
    /// let svc = AuthService::new(client);
    /// let req = LoginRequest { email: "owner@spa.vn".into(), password: "secret1".into() };
    /// let session = tokio_test::block_on(svc.login(&req)).unwrap();
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip_all, fields(email = %req.email))]
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ServiceError> {
        req.validate()?;
        let body = self.client.post(LOGIN_PATH, None, req).await?;
        let resp: LoginResponse = decode(body)?;
        if resp.token.trim().is_empty() {
            return Err(ServiceError::Decode("login response without token".into()));
        }
        info!(email = %req.email, "provider_logged_in");
        Ok(resp)
    }

    /// Submit the completed registration; the backend emails an OTP.
    #[instrument(skip_all, fields(email = %req.email))]
    pub async fn register(&self, req: &RegisterRequest) -> Result<(), ServiceError> {
        self.client.post(REGISTER_PATH, None, req).await?;
        info!(email = %req.email, "provider_registration_submitted");
        Ok(())
    }

    #[instrument(skip_all, fields(email = %req.email))]
    pub async fn verify_otp(&self, req: &VerifyOtpRequest) -> Result<(), ServiceError> {
        req.validate()?;
        self.client.post(VERIFY_OTP_PATH, None, req).await?;
        info!(email = %req.email, "provider_otp_verified");
        Ok(())
    }

    #[instrument(skip_all, fields(email = %req.email))]
    pub async fn resend_otp(&self, req: &ResendOtpRequest) -> Result<(), ServiceError> {
        self.client.post(RESEND_OTP_PATH, None, req).await?;
        Ok(())
    }
}
