use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common::i18n::{Action, ErrorContext};
use common::types::Refetched;
use models::{FlashSale, FlashSaleForm, Service};
use serde::Serialize;
use service::services::{catalog, flash_sales};
use uuid::Uuid;

use crate::errors::{JsonApiError, WithContext};
use crate::routes::auth::{ServerState, Session};

const CTX: ErrorContext = ErrorContext::FlashSale;

/// Flash sales plus the service select they attach to.
#[derive(Serialize)]
pub struct FlashSalesPage {
    pub flash_sales: Vec<FlashSale>,
    pub services: Vec<Service>,
}

#[utoipa::path(get, path = "/admin/flash-sales", tag = "flash-sales", responses((status = 200, description = "Flash sales and services"), (status = 401, description = "No session")))]
pub async fn page(State(state): State<ServerState>, Extension(s): Extension<Session>) -> Result<Json<FlashSalesPage>, JsonApiError> {
    let (flash_sales, services) = tokio::try_join!(
        async { flash_sales::list_flash_sales(&state.client, &s.token).await.ctx(CTX) },
        async { catalog::list_services(&state.client, &s.token).await.ctx(ErrorContext::Service) },
    )?;
    Ok(Json(FlashSalesPage { flash_sales, services }))
}

#[utoipa::path(get, path = "/admin/flash-sales/{id}", tag = "flash-sales", params(("id" = Uuid, Path, description = "Flash sale id")), responses((status = 200, description = "Flash sale"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlashSale>, JsonApiError> {
    Ok(Json(flash_sales::get_flash_sale(&state.client, &s.token, id).await.ctx(CTX)?))
}

async fn refetch(state: &ServerState, s: &Session, action: Action) -> Result<Json<Refetched<FlashSale>>, JsonApiError> {
    let rows = flash_sales::list_flash_sales(&state.client, &s.token).await.ctx(CTX)?;
    Ok(Json(Refetched::new(CTX.success(action), rows)))
}

#[utoipa::path(post, path = "/admin/flash-sales", tag = "flash-sales", request_body = crate::openapi::FlashSaleFormDoc, responses((status = 201, description = "Created; refetched list"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Json(form): Json<FlashSaleForm>,
) -> Result<(StatusCode, Json<Refetched<FlashSale>>), JsonApiError> {
    flash_sales::create_flash_sale(&state.client, &s.token, &form).await.ctx(CTX)?;
    Ok((StatusCode::CREATED, refetch(&state, &s, Action::Created).await?))
}

#[utoipa::path(put, path = "/admin/flash-sales/{id}", tag = "flash-sales", params(("id" = Uuid, Path, description = "Flash sale id")), request_body = crate::openapi::FlashSaleFormDoc, responses((status = 200, description = "Updated; refetched list"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(form): Json<FlashSaleForm>,
) -> Result<Json<Refetched<FlashSale>>, JsonApiError> {
    flash_sales::update_flash_sale(&state.client, &s.token, id, &form).await.ctx(CTX)?;
    refetch(&state, &s, Action::Updated).await
}

#[utoipa::path(delete, path = "/admin/flash-sales/{id}", tag = "flash-sales", params(("id" = Uuid, Path, description = "Flash sale id")), responses((status = 200, description = "Deleted; refetched list"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Refetched<FlashSale>>, JsonApiError> {
    flash_sales::delete_flash_sale(&state.client, &s.token, id).await.ctx(CTX)?;
    refetch(&state, &s, Action::Deleted).await
}
