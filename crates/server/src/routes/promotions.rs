use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common::i18n::{Action, ErrorContext};
use common::types::Refetched;
use models::{Promotion, PromotionForm};
use service::services::promotions;
use uuid::Uuid;

use crate::errors::{JsonApiError, WithContext};
use crate::routes::auth::{ServerState, Session};

const CTX: ErrorContext = ErrorContext::Promotion;

#[utoipa::path(get, path = "/admin/promotions", tag = "promotions", responses((status = 200, description = "Promotions"), (status = 401, description = "No session")))]
pub async fn page(State(state): State<ServerState>, Extension(s): Extension<Session>) -> Result<Json<Vec<Promotion>>, JsonApiError> {
    Ok(Json(promotions::list_promotions(&state.client, &s.token).await.ctx(CTX)?))
}

#[utoipa::path(get, path = "/admin/promotions/{id}", tag = "promotions", params(("id" = Uuid, Path, description = "Promotion id")), responses((status = 200, description = "Promotion"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Promotion>, JsonApiError> {
    Ok(Json(promotions::get_promotion(&state.client, &s.token, id).await.ctx(CTX)?))
}

async fn refetch(state: &ServerState, s: &Session, action: Action) -> Result<Json<Refetched<Promotion>>, JsonApiError> {
    let rows = promotions::list_promotions(&state.client, &s.token).await.ctx(CTX)?;
    Ok(Json(Refetched::new(CTX.success(action), rows)))
}

#[utoipa::path(post, path = "/admin/promotions", tag = "promotions", request_body = crate::openapi::PromotionFormDoc, responses((status = 201, description = "Created; refetched list"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Json(form): Json<PromotionForm>,
) -> Result<(StatusCode, Json<Refetched<Promotion>>), JsonApiError> {
    promotions::create_promotion(&state.client, &s.token, &form).await.ctx(CTX)?;
    Ok((StatusCode::CREATED, refetch(&state, &s, Action::Created).await?))
}

#[utoipa::path(put, path = "/admin/promotions/{id}", tag = "promotions", params(("id" = Uuid, Path, description = "Promotion id")), request_body = crate::openapi::PromotionFormDoc, responses((status = 200, description = "Updated; refetched list"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(form): Json<PromotionForm>,
) -> Result<Json<Refetched<Promotion>>, JsonApiError> {
    promotions::update_promotion(&state.client, &s.token, id, &form).await.ctx(CTX)?;
    refetch(&state, &s, Action::Updated).await
}

#[utoipa::path(delete, path = "/admin/promotions/{id}", tag = "promotions", params(("id" = Uuid, Path, description = "Promotion id")), responses((status = 200, description = "Deleted; refetched list"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Refetched<Promotion>>, JsonApiError> {
    promotions::delete_promotion(&state.client, &s.token, id).await.ctx(CTX)?;
    refetch(&state, &s, Action::Deleted).await
}
