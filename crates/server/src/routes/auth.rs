use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use common::i18n::ErrorContext;
use configs::SessionConfig;
use models::auth::{LoginRequest, ProviderProfile};
use serde::Serialize;
use service::auth::{decode_claims, AuthService, ProviderSession};
use service::client::ApiClient;
use service::geo::GeoProvider;
use service::registration::{DraftStore, RegistrationFlow};
use service::upload::ImageUploader;

use crate::errors::{JsonApiError, WithContext};

#[derive(Clone)]
pub struct ServerState {
    pub client: ApiClient,
    pub auth: AuthService,
    pub flow: RegistrationFlow,
    pub geo: Arc<dyn GeoProvider>,
    pub uploader: ImageUploader,
    pub drafts: Arc<dyn DraftStore>,
    pub session: SessionConfig,
}

/// The logged-in provider, placed in request extensions by [`require_session`].
#[derive(Clone, Debug)]
pub struct Session {
    pub token: String,
    pub provider: ProviderSession,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub token: String,
    pub profile: Option<ProviderProfile>,
    pub provider: Option<ProviderSession>,
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequestDoc, responses((status = 200, description = "Logged in, auth cookie set"), (status = 400, description = "Bad Request"), (status = 401, description = "Wrong credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let resp = state.auth.login(&input).await.ctx(ErrorContext::Login)?;
    let provider = decode_claims(&resp.token).ok();

    let mut cookie = Cookie::new(state.session.cookie_name.clone(), resp.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(state.session.secure_cookie);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    Ok((jar, Json(LoginOutput { token: resp.token, profile: resp.profile, provider })))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut gone = Cookie::from(state.session.cookie_name.clone());
    gone.set_path("/");
    (jar.remove(gone), StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, description = "Current provider"), (status = 401, description = "No session")))]
pub async fn me(Extension(session): Extension<Session>) -> Json<ProviderSession> {
    Json(session.provider)
}

/// Reads `Authorization: Bearer <token>`, falling back to the auth cookie.
/// The token is decoded (not verified) so expired sessions fail here instead
/// of at the backend.
pub async fn require_session(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let authz = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());

    let token = match authz {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => {
                tracing::warn!(%path, "invalid Authorization format (expect Bearer)");
                return Err(JsonApiError::unauthorized(None));
            }
        },
        None => match jar.get(&state.session.cookie_name) {
            Some(c) if !c.value().is_empty() => c.value().to_string(),
            _ => {
                tracing::warn!(%path, "missing Authorization header and auth cookie");
                return Err(JsonApiError::unauthorized(None));
            }
        },
    };

    let provider = match decode_claims(&token) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(%path, err = %e, "session token rejected");
            return Err(JsonApiError::unauthorized(None));
        }
    };

    req.extensions_mut().insert(Session { token, provider });
    Ok(next.run(req).await)
}
