use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use service::auth::AuthService;
use service::client::ApiClient;
use service::geo::{CachedGeoProvider, GeoProvider, HttpGeoProvider};
use service::registration::{DraftStore, FlowOptions, InMemoryDraftStore, RegistrationFlow};
use service::upload::ImageUploader;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

const DRAFT_PURGE_EVERY: Duration = Duration::from_secs(300);

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the backend client, geo lookup, uploader and registration flow from config.
pub fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let client = ApiClient::new(&cfg.backend).map_err(|e| StartupError::Runtime(e.to_string()))?;
    let http = client.http().clone();

    cfg.geo.validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let geo: Arc<dyn GeoProvider> = Arc::new(CachedGeoProvider::new(
        HttpGeoProvider::new(http.clone(), cfg.geo.clone()),
        Duration::from_secs(cfg.geo.cache_ttl_secs),
    ));
    let auth = AuthService::new(client.clone());
    let drafts: Arc<dyn DraftStore> =
        Arc::new(InMemoryDraftStore::new(Duration::from_secs(cfg.registration.draft_ttl_secs)));
    let flow = RegistrationFlow::new(Arc::clone(&drafts), Arc::clone(&geo), auth.clone(), FlowOptions::default());
    let uploader = ImageUploader::new(http, cfg.upload.clone());

    Ok(ServerState { client, auth, flow, geo, uploader, drafts, session: cfg.session.clone() })
}

/// Abandoned sign-ups are dropped in the background; lookups already ignore them.
fn spawn_draft_purge(drafts: Arc<dyn DraftStore>) {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(DRAFT_PURGE_EVERY);
        loop {
            tick.tick().await;
            let removed = drafts.purge_expired(chrono::Utc::now()).await;
            if removed > 0 {
                debug!(removed, "registration_drafts_purged");
            }
        }
    });
}

pub fn build_app(state: ServerState, cfg: &AppConfig) -> Router {
    routes::build_router(state, build_cors(), &cfg.server.frontend_dir, cfg.upload.max_bytes)
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    common::env::ensure_env(&cfg.server.frontend_dir).await?;
    if !cfg.upload.enabled() {
        warn!("image upload endpoint not configured; uploads will answer 503");
    }

    let state = build_state(&cfg)?;
    spawn_draft_purge(Arc::clone(&state.drafts));
    let app = build_app(state, &cfg);

    let addr = bind_addr(&cfg)?;
    info!(%addr, backend = %cfg.backend.base_url, "starting spa admin server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
