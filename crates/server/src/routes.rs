pub mod appointments;
pub mod auth;
pub mod branches;
pub mod flash_sales;
pub mod geo;
pub mod promotions;
pub mod registration;
pub mod services;
pub mod staff;
pub mod uploads;
pub mod working_hours;

use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use auth::ServerState;

/// Multipart framing overhead allowed on top of the image size limit.
const MULTIPART_SLACK: usize = 64 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn metrics() -> impl IntoResponse {
    match service::observability::encode_metrics() {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body),
        Err(e) => {
            error!("encode metrics error: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, "text/plain")], "metrics encode error".to_string())
        }
    }
}

/// Build the full application router: public pages, sign-up, and the
/// session-protected admin screens.
pub fn build_router(state: ServerState, cors: CorsLayer, frontend_dir: &str, max_upload: usize) -> Router {
    let index = Path::new(frontend_dir).join("index.html");
    let static_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(index));

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/register", post(registration::start))
        .route("/auth/register/:draft", get(registration::get_draft))
        .route("/auth/register/:draft/account", put(registration::edit_account))
        .route("/auth/register/:draft/back", post(registration::back))
        .route("/auth/register/:draft/province", post(registration::select_province))
        .route("/auth/register/:draft/district", post(registration::select_district))
        .route("/auth/register/:draft/business", post(registration::submit_business))
        .route("/auth/register/:draft/verify-otp", post(registration::verify_otp))
        .route("/auth/register/:draft/resend-otp", post(registration::resend_otp))
        .route("/geo/provinces", get(geo::provinces))
        .route("/geo/provinces/:code/districts", get(geo::districts));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/admin/services", get(services::page).post(services::create))
        .route("/admin/services/:id", get(services::get_one).put(services::update).delete(services::delete))
        .route("/admin/staff", get(staff::page).post(staff::create))
        .route("/admin/staff/:id", get(staff::get_one).put(staff::update).delete(staff::delete))
        .route("/admin/branches", get(branches::page).post(branches::create))
        .route("/admin/branches/:id", get(branches::get_one).put(branches::update).delete(branches::delete))
        .route("/admin/promotions", get(promotions::page).post(promotions::create))
        .route("/admin/promotions/:id", get(promotions::get_one).put(promotions::update).delete(promotions::delete))
        .route("/admin/flash-sales", get(flash_sales::page).post(flash_sales::create))
        .route("/admin/flash-sales/:id", get(flash_sales::get_one).put(flash_sales::update).delete(flash_sales::delete))
        .route("/admin/working-hours", get(working_hours::page).post(working_hours::create))
        .route("/admin/working-hours/:id", put(working_hours::update).delete(working_hours::delete))
        .route("/admin/appointments", get(appointments::page))
        .route("/admin/appointments/:id", get(appointments::get_one))
        .route("/admin/appointments/:id/status", put(appointments::change_status))
        .route(
            "/admin/uploads/image",
            post(uploads::upload_image).layer(DefaultBodyLimit::max(max_upload + MULTIPART_SLACK)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_session));

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public)
        .merge(protected)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
