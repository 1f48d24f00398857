use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common::i18n::{Action, ErrorContext};
use common::types::Refetched;
use models::{Branch, BranchForm};
use service::services::branches;
use uuid::Uuid;

use crate::errors::{JsonApiError, WithContext};
use crate::routes::auth::{ServerState, Session};

const CTX: ErrorContext = ErrorContext::Branch;

#[utoipa::path(get, path = "/admin/branches", tag = "branches", responses((status = 200, description = "Branches"), (status = 401, description = "No session")))]
pub async fn page(State(state): State<ServerState>, Extension(s): Extension<Session>) -> Result<Json<Vec<Branch>>, JsonApiError> {
    Ok(Json(branches::list_branches(&state.client, &s.token).await.ctx(CTX)?))
}

#[utoipa::path(get, path = "/admin/branches/{id}", tag = "branches", params(("id" = Uuid, Path, description = "Branch id")), responses((status = 200, description = "Branch"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Branch>, JsonApiError> {
    Ok(Json(branches::get_branch(&state.client, &s.token, id).await.ctx(CTX)?))
}

async fn refetch(state: &ServerState, s: &Session, action: Action) -> Result<Json<Refetched<Branch>>, JsonApiError> {
    let rows = branches::list_branches(&state.client, &s.token).await.ctx(CTX)?;
    Ok(Json(Refetched::new(CTX.success(action), rows)))
}

#[utoipa::path(post, path = "/admin/branches", tag = "branches", request_body = crate::openapi::BranchFormDoc, responses((status = 201, description = "Created; refetched list"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Json(form): Json<BranchForm>,
) -> Result<(StatusCode, Json<Refetched<Branch>>), JsonApiError> {
    branches::create_branch(&state.client, &s.token, &form).await.ctx(CTX)?;
    Ok((StatusCode::CREATED, refetch(&state, &s, Action::Created).await?))
}

#[utoipa::path(put, path = "/admin/branches/{id}", tag = "branches", params(("id" = Uuid, Path, description = "Branch id")), request_body = crate::openapi::BranchFormDoc, responses((status = 200, description = "Updated; refetched list"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(form): Json<BranchForm>,
) -> Result<Json<Refetched<Branch>>, JsonApiError> {
    branches::update_branch(&state.client, &s.token, id, &form).await.ctx(CTX)?;
    refetch(&state, &s, Action::Updated).await
}

#[utoipa::path(delete, path = "/admin/branches/{id}", tag = "branches", params(("id" = Uuid, Path, description = "Branch id")), responses((status = 200, description = "Deleted; refetched list"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Refetched<Branch>>, JsonApiError> {
    branches::delete_branch(&state.client, &s.token, id).await.ctx(CTX)?;
    refetch(&state, &s, Action::Deleted).await
}
