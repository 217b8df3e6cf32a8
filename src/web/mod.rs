use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, EpisodeService, Mailer, Notifier, ProfileService, ProgramService,
    SeaOrmAuthService, SeaOrmEpisodeService, SeaOrmProfileService, SeaOrmProgramService, mailer,
};

mod assets;
pub mod auth;
pub mod csrf;
mod episodes;
mod error;
pub mod flash;
mod observability;
mod page;
mod profile;
mod programs;

pub use error::WebError;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    pub programs: Arc<dyn ProgramService>,

    pub episodes: Arc<dyn EpisodeService>,

    pub profiles: Arc<dyn ProfileService>,

    pub auth: Arc<dyn AuthService>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

/// Opens the database and wires the services, sending mail through the
/// configured transport.
pub async fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let mailer = mailer::from_config(&config.mailer)?;
    create_app_state_with_mailer(config, mailer, prometheus_handle).await
}

pub async fn create_app_state_with_mailer(
    config: Config,
    mailer: Arc<dyn Mailer>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::open(&config.general).await?;

    let notifier = Arc::new(Notifier::new(mailer, &config.mailer));

    Ok(Arc::new(AppState {
        programs: Arc::new(SeaOrmProgramService::new(store.clone(), notifier.clone())),
        episodes: Arc::new(SeaOrmEpisodeService::new(store.clone(), notifier)),
        profiles: Arc::new(SeaOrmProfileService::new(store.clone())),
        auth: Arc::new(SeaOrmAuthService::new(store.clone())),
        store,
        config: Arc::new(config),
        prometheus_handle,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.server.session_inactivity_minutes,
        )));

    Router::new()
        .route("/", get(|| async { Redirect::to("/program/") }))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .merge(program_routes())
        .merge(episode_routes())
        .route("/my-profile", get(profile::index))
        .route("/metrics", get(observability::get_metrics))
        .route("/static/{*path}", get(assets::serve_asset))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::identity_middleware,
        ))
        .layer(session_layer)
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state)
}

fn program_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/program", get(programs::index))
        .route("/program/", get(programs::index))
        .route(
            "/program/new",
            get(programs::new_form).post(programs::create),
        )
        .route(
            "/program/{slug}",
            get(programs::show).delete(programs::delete),
        )
        .route(
            "/program/{slug}/edit",
            get(programs::edit_form).post(programs::update),
        )
        .route("/program/{slug}/favorite", post(programs::toggle_favorite))
        .route("/program/{slug}/delete", post(programs::delete))
}

fn episode_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/episode", get(episodes::index))
        .route("/episode/", get(episodes::index))
        .route(
            "/episode/new",
            get(episodes::new_form).post(episodes::create),
        )
        .route(
            "/episode/{slug}",
            get(episodes::show)
                .post(episodes::comment)
                .delete(episodes::delete),
        )
        .route(
            "/episode/{slug}/edit",
            get(episodes::edit_form).post(episodes::update),
        )
        .route("/episode/{slug}/delete", post(episodes::delete))
}
