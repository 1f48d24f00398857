//! Multi-step provider sign-up. Each call advances one server-side draft.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use common::i18n::ErrorContext;
use models::auth::{AccountForm, BusinessForm};
use serde::{Deserialize, Serialize};
use service::registration::{DraftView, RegistrationStep};
use uuid::Uuid;

use crate::errors::{JsonApiError, WithContext, LOGIN_PAGE};
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct CodeSelection {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct OtpInput {
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct RegistrationDone {
    pub step: RegistrationStep,
    pub message: &'static str,
    pub redirect: &'static str,
}

#[utoipa::path(post, path = "/auth/register", tag = "registration", request_body = crate::openapi::AccountFormDoc, responses((status = 201, description = "Draft created at the business step"), (status = 400, description = "Invalid account details")))]
pub async fn start(
    State(state): State<ServerState>,
    Json(account): Json<AccountForm>,
) -> Result<(StatusCode, Json<DraftView>), JsonApiError> {
    let draft = state.flow.start(account).await.ctx(ErrorContext::Register)?;
    Ok((StatusCode::CREATED, Json(draft.view())))
}

#[utoipa::path(get, path = "/auth/register/{draft}", tag = "registration", params(("draft" = Uuid, Path, description = "Draft id")), responses((status = 200, description = "Draft"), (status = 410, description = "Draft expired")))]
pub async fn get_draft(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<DraftView>, JsonApiError> {
    let draft = state.flow.get(id).await.ctx(ErrorContext::Register)?;
    Ok(Json(draft.view()))
}

#[utoipa::path(put, path = "/auth/register/{draft}/account", tag = "registration", params(("draft" = Uuid, Path, description = "Draft id")), request_body = crate::openapi::AccountFormDoc, responses((status = 200, description = "Account details replaced")))]
pub async fn edit_account(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(account): Json<AccountForm>,
) -> Result<Json<DraftView>, JsonApiError> {
    let draft = state.flow.submit_account(id, account).await.ctx(ErrorContext::Register)?;
    Ok(Json(draft.view()))
}

#[utoipa::path(post, path = "/auth/register/{draft}/back", tag = "registration", params(("draft" = Uuid, Path, description = "Draft id")), responses((status = 200, description = "Back at the account step")))]
pub async fn back(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<DraftView>, JsonApiError> {
    let draft = state.flow.back(id).await.ctx(ErrorContext::Register)?;
    Ok(Json(draft.view()))
}

#[utoipa::path(post, path = "/auth/register/{draft}/province", tag = "registration", params(("draft" = Uuid, Path, description = "Draft id")), request_body = crate::openapi::CodeSelectionDoc, responses((status = 200, description = "Province set, district cleared when it changed")))]
pub async fn select_province(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CodeSelection>,
) -> Result<Json<DraftView>, JsonApiError> {
    let draft = state.flow.select_province(id, &input.code).await.ctx(ErrorContext::Geo)?;
    Ok(Json(draft.view()))
}

#[utoipa::path(post, path = "/auth/register/{draft}/district", tag = "registration", params(("draft" = Uuid, Path, description = "Draft id")), request_body = crate::openapi::CodeSelectionDoc, responses((status = 200, description = "District set")))]
pub async fn select_district(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CodeSelection>,
) -> Result<Json<DraftView>, JsonApiError> {
    let draft = state.flow.select_district(id, &input.code).await.ctx(ErrorContext::Geo)?;
    Ok(Json(draft.view()))
}

#[utoipa::path(post, path = "/auth/register/{draft}/business", tag = "registration", params(("draft" = Uuid, Path, description = "Draft id")), request_body = crate::openapi::BusinessFormDoc, responses((status = 200, description = "Registration sent, OTP emailed"), (status = 409, description = "Email already registered")))]
pub async fn submit_business(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(business): Json<BusinessForm>,
) -> Result<Json<DraftView>, JsonApiError> {
    let draft = state.flow.submit_business(id, business).await.ctx(ErrorContext::Register)?;
    Ok(Json(draft.view()))
}

#[utoipa::path(post, path = "/auth/register/{draft}/verify-otp", tag = "registration", params(("draft" = Uuid, Path, description = "Draft id")), request_body = crate::openapi::OtpDoc, responses((status = 200, description = "Account verified"), (status = 400, description = "Wrong or expired code")))]
pub async fn verify_otp(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<OtpInput>,
) -> Result<Json<RegistrationDone>, JsonApiError> {
    let draft = state.flow.verify_otp(id, &input.otp).await.ctx(ErrorContext::VerifyOtp)?;
    Ok(Json(RegistrationDone {
        step: draft.step,
        message: "Xác thực thành công. Vui lòng đăng nhập.",
        redirect: LOGIN_PAGE,
    }))
}

#[utoipa::path(post, path = "/auth/register/{draft}/resend-otp", tag = "registration", params(("draft" = Uuid, Path, description = "Draft id")), responses((status = 200, description = "Code sent again")))]
pub async fn resend_otp(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<DraftView>, JsonApiError> {
    let draft = state.flow.resend_otp(id).await.ctx(ErrorContext::ResendOtp)?;
    Ok(Json(draft.view()))
}
