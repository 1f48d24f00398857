use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common::i18n::{Action, ErrorContext};
use common::types::Refetched;
use models::{Branch, WorkingHour, WorkingHourForm};
use serde::{Deserialize, Serialize};
use service::services::{branches, working_hours};
use uuid::Uuid;

use crate::errors::{JsonApiError, WithContext};
use crate::routes::auth::{ServerState, Session};

const CTX: ErrorContext = ErrorContext::WorkingHour;

#[derive(Debug, Default, Deserialize)]
pub struct BranchFilter {
    pub branch_id: Option<Uuid>,
}

/// The weekly schedule of one branch (or all of them) plus the branch picker.
#[derive(Serialize)]
pub struct WorkingHoursPage {
    pub branch_id: Option<Uuid>,
    pub working_hours: Vec<WorkingHour>,
    pub branches: Vec<Branch>,
}

#[utoipa::path(get, path = "/admin/working-hours", tag = "working-hours", params(("branch_id" = Option<Uuid>, Query, description = "Only this branch")), responses((status = 200, description = "Working hours and branches"), (status = 401, description = "No session")))]
pub async fn page(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Query(filter): Query<BranchFilter>,
) -> Result<Json<WorkingHoursPage>, JsonApiError> {
    let (working_hours, branches) = tokio::try_join!(
        async { working_hours::list_working_hours(&state.client, &s.token, filter.branch_id).await.ctx(CTX) },
        async { branches::list_branches(&state.client, &s.token).await.ctx(ErrorContext::Branch) },
    )?;
    Ok(Json(WorkingHoursPage { branch_id: filter.branch_id, working_hours, branches }))
}

async fn refetch(
    state: &ServerState,
    s: &Session,
    branch_id: Option<Uuid>,
    action: Action,
) -> Result<Json<Refetched<WorkingHour>>, JsonApiError> {
    let rows = working_hours::list_working_hours(&state.client, &s.token, branch_id).await.ctx(CTX)?;
    Ok(Json(Refetched::new(CTX.success(action), rows)))
}

#[utoipa::path(post, path = "/admin/working-hours", tag = "working-hours", request_body = crate::openapi::WorkingHourFormDoc, responses((status = 201, description = "Created; refetched schedule of the branch"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Json(form): Json<WorkingHourForm>,
) -> Result<(StatusCode, Json<Refetched<WorkingHour>>), JsonApiError> {
    working_hours::create_working_hour(&state.client, &s.token, &form).await.ctx(CTX)?;
    let branch = Uuid::parse_str(form.branch_id.trim()).ok();
    Ok((StatusCode::CREATED, refetch(&state, &s, branch, Action::Created).await?))
}

#[utoipa::path(put, path = "/admin/working-hours/{id}", tag = "working-hours", params(("id" = Uuid, Path, description = "Working hour id")), request_body = crate::openapi::WorkingHourFormDoc, responses((status = 200, description = "Updated; refetched schedule of the branch"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(form): Json<WorkingHourForm>,
) -> Result<Json<Refetched<WorkingHour>>, JsonApiError> {
    working_hours::update_working_hour(&state.client, &s.token, id, &form).await.ctx(CTX)?;
    let branch = Uuid::parse_str(form.branch_id.trim()).ok();
    refetch(&state, &s, branch, Action::Updated).await
}

#[utoipa::path(delete, path = "/admin/working-hours/{id}", tag = "working-hours", params(("id" = Uuid, Path, description = "Working hour id"), ("branch_id" = Option<Uuid>, Query, description = "Branch to refetch")), responses((status = 200, description = "Deleted; refetched schedule"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
    Query(filter): Query<BranchFilter>,
) -> Result<Json<Refetched<WorkingHour>>, JsonApiError> {
    working_hours::delete_working_hour(&state.client, &s.token, id).await.ctx(CTX)?;
    refetch(&state, &s, filter.branch_id, Action::Deleted).await
}
