use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common::i18n::{Action, ErrorContext};
use common::types::Refetched;
use models::{Service, ServiceCategory, ServiceForm};
use serde::Serialize;
use service::services::catalog;
use uuid::Uuid;

use crate::errors::{JsonApiError, WithContext};
use crate::routes::auth::{ServerState, Session};

const CTX: ErrorContext = ErrorContext::Service;

/// Everything the services screen needs: the rows and the category select.
#[derive(Serialize)]
pub struct ServicesPage {
    pub services: Vec<Service>,
    pub categories: Vec<ServiceCategory>,
}

#[utoipa::path(get, path = "/admin/services", tag = "services", responses((status = 200, description = "Services and categories"), (status = 401, description = "No session")))]
pub async fn page(State(state): State<ServerState>, Extension(s): Extension<Session>) -> Result<Json<ServicesPage>, JsonApiError> {
    let (services, categories) = tokio::try_join!(
        async { catalog::list_services(&state.client, &s.token).await.ctx(CTX) },
        async { catalog::list_categories(&state.client, &s.token).await.ctx(ErrorContext::Category) },
    )?;
    Ok(Json(ServicesPage { services, categories }))
}

#[utoipa::path(get, path = "/admin/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Service"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Service>, JsonApiError> {
    Ok(Json(catalog::get_service(&state.client, &s.token, id).await.ctx(CTX)?))
}

async fn refetch(state: &ServerState, s: &Session, action: Action) -> Result<Json<Refetched<Service>>, JsonApiError> {
    let rows = catalog::list_services(&state.client, &s.token).await.ctx(CTX)?;
    Ok(Json(Refetched::new(CTX.success(action), rows)))
}

#[utoipa::path(post, path = "/admin/services", tag = "services", request_body = crate::openapi::ServiceFormDoc, responses((status = 201, description = "Created; refetched list"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Json(form): Json<ServiceForm>,
) -> Result<(StatusCode, Json<Refetched<Service>>), JsonApiError> {
    catalog::create_service(&state.client, &s.token, &form).await.ctx(CTX)?;
    Ok((StatusCode::CREATED, refetch(&state, &s, Action::Created).await?))
}

#[utoipa::path(put, path = "/admin/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), request_body = crate::openapi::ServiceFormDoc, responses((status = 200, description = "Updated; refetched list"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(form): Json<ServiceForm>,
) -> Result<Json<Refetched<Service>>, JsonApiError> {
    catalog::update_service(&state.client, &s.token, id, &form).await.ctx(CTX)?;
    refetch(&state, &s, Action::Updated).await
}

#[utoipa::path(delete, path = "/admin/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Deleted; refetched list"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Refetched<Service>>, JsonApiError> {
    catalog::delete_service(&state.client, &s.token, id).await.ctx(CTX)?;
    refetch(&state, &s, Action::Deleted).await
}
