//! Provider authentication and registration payloads (`/api/Auth/*`).

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::{is_valid_otp, require_email, require_password, require_phone, require_text};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_email(&self.email)?;
        require_text(&self.password, "mật khẩu")
    }
}

/// Provider identity as the backend returns it next to the token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    #[serde(default, alias = "userId", alias = "providerId")]
    pub id: Option<String>,
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "spaName")]
    pub business_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "jwtToken")]
    pub token: String,
    #[serde(default, alias = "user", alias = "provider")]
    pub profile: Option<ProviderProfile>,
}

/// First registration step: who is signing up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl AccountForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_text(&self.full_name, "họ tên")?;
        require_email(&self.email)?;
        require_phone(&self.phone)?;
        require_password(&self.password, &self.confirm_password)
    }
}

/// Second registration step: the spa itself. Province and district are chosen
/// separately through the cascading selects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessForm {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub address: String,
}

impl BusinessForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_text(&self.business_name, "tên spa")?;
        require_text(&self.address, "địa chỉ")
    }
}

/// Body for `POST /api/Auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
    pub business_name: String,
    pub province: String,
    pub district: String,
    pub address: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

impl VerifyOtpRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !is_valid_otp(self.otp.trim()) {
            return Err(ModelError::validation("Mã OTP phải gồm 6 chữ số."));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpRequest {
    pub email: String,
}
