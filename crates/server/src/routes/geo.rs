use axum::extract::{Path, State};
use axum::Json;
use common::i18n::ErrorContext;
use models::geo::{District, Province};

use crate::errors::{JsonApiError, WithContext};
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/geo/provinces", tag = "geo", responses((status = 200, description = "Provinces for the first select")))]
pub async fn provinces(State(state): State<ServerState>) -> Result<Json<Vec<Province>>, JsonApiError> {
    let rows = state.geo.provinces().await.ctx(ErrorContext::Geo)?;
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/geo/provinces/{code}/districts", tag = "geo", params(("code" = String, Path, description = "Province code")), responses((status = 200, description = "Districts of the province")))]
pub async fn districts(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<District>>, JsonApiError> {
    let rows = state.geo.districts(code.trim()).await.ctx(ErrorContext::Geo)?;
    Ok(Json(rows))
}
