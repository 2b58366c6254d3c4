use axum::{
    Router,
    http::{Request, StatusCode},
    middleware,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, MovieService, SeaOrmAuthService, SeaOrmMovieService};

pub mod auth;
mod error;
pub mod flash;
mod movies;
pub mod pages;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub movie_service: Arc<dyn MovieService>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, store: Store) -> Self {
        Self {
            config: Arc::new(config),
            auth_service: Arc::new(SeaOrmAuthService::new(store.clone())),
            movie_service: Arc::new(SeaOrmMovieService::new(store.clone())),
            store,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn auth(&self) -> &dyn AuthService {
        self.auth_service.as_ref()
    }

    #[must_use]
    pub fn movies(&self) -> &dyn MovieService {
        self.movie_service.as_ref()
    }
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::from_config(&config).await?;
    Ok(Arc::new(AppState::new(config, store)))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )));

    let protected_routes = create_protected_router(state.clone());

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            user_id = tracing::field::Empty,
        )
    });

    Router::new()
        .merge(protected_routes)
        .route("/", get(movies::index).post(movies::create))
        .route("/login", get(auth::login_page).post(auth::login))
        .fallback(not_found)
        .layer(session_layer)
        .layer(trace_layer)
        .with_state(state)
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/logout", get(auth::logout))
        .route(
            "/settings",
            get(auth::settings_page).post(auth::update_settings),
        )
        .route(
            "/movie/edit/{id}",
            get(movies::edit_page).post(movies::update),
        )
        .route("/movie/delete/{id}", post(movies::delete))
        .route_layer(middleware::from_fn_with_state(state, auth::require_login))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(pages::error_page(StatusCode::NOT_FOUND)),
    )
}
