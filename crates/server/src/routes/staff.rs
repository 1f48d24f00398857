use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common::i18n::{Action, ErrorContext};
use common::types::Refetched;
use models::{Branch, Staff, StaffForm};
use serde::Serialize;
use service::services::{branches, staff};
use uuid::Uuid;

use crate::errors::{JsonApiError, WithContext};
use crate::routes::auth::{ServerState, Session};

const CTX: ErrorContext = ErrorContext::Staff;

/// Staff rows plus the branch select of the staff form.
#[derive(Serialize)]
pub struct StaffPage {
    pub staff: Vec<Staff>,
    pub branches: Vec<Branch>,
}

#[utoipa::path(get, path = "/admin/staff", tag = "staff", responses((status = 200, description = "Staff and branches"), (status = 401, description = "No session")))]
pub async fn page(State(state): State<ServerState>, Extension(s): Extension<Session>) -> Result<Json<StaffPage>, JsonApiError> {
    let (staff, branches) = tokio::try_join!(
        async { staff::list_staff(&state.client, &s.token).await.ctx(CTX) },
        async { branches::list_branches(&state.client, &s.token).await.ctx(ErrorContext::Branch) },
    )?;
    Ok(Json(StaffPage { staff, branches }))
}

#[utoipa::path(get, path = "/admin/staff/{id}", tag = "staff", params(("id" = Uuid, Path, description = "Staff id")), responses((status = 200, description = "Staff member"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Staff>, JsonApiError> {
    Ok(Json(staff::get_staff(&state.client, &s.token, id).await.ctx(CTX)?))
}

async fn refetch(state: &ServerState, s: &Session, action: Action) -> Result<Json<Refetched<Staff>>, JsonApiError> {
    let rows = staff::list_staff(&state.client, &s.token).await.ctx(CTX)?;
    Ok(Json(Refetched::new(CTX.success(action), rows)))
}

#[utoipa::path(post, path = "/admin/staff", tag = "staff", request_body = crate::openapi::StaffFormDoc, responses((status = 201, description = "Created; refetched list"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Json(form): Json<StaffForm>,
) -> Result<(StatusCode, Json<Refetched<Staff>>), JsonApiError> {
    staff::create_staff(&state.client, &s.token, &form).await.ctx(CTX)?;
    Ok((StatusCode::CREATED, refetch(&state, &s, Action::Created).await?))
}

#[utoipa::path(put, path = "/admin/staff/{id}", tag = "staff", params(("id" = Uuid, Path, description = "Staff id")), request_body = crate::openapi::StaffFormDoc, responses((status = 200, description = "Updated; refetched list"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(form): Json<StaffForm>,
) -> Result<Json<Refetched<Staff>>, JsonApiError> {
    staff::update_staff(&state.client, &s.token, id, &form).await.ctx(CTX)?;
    refetch(&state, &s, Action::Updated).await
}

#[utoipa::path(delete, path = "/admin/staff/{id}", tag = "staff", params(("id" = Uuid, Path, description = "Staff id")), responses((status = 200, description = "Deleted; refetched list"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Refetched<Staff>>, JsonApiError> {
    staff::delete_staff(&state.client, &s.token, id).await.ctx(CTX)?;
    refetch(&state, &s, Action::Deleted).await
}
