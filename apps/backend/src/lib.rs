pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::fs;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use quiz_core::{EngineError, FileWeightStore, WeightStore};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::decks::DeckLibrary;
use crate::services::sessions::SessionRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub decks: Arc<DeckLibrary>,
    pub store: Arc<dyn WeightStore>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Create the deck and weight directories if needed and wire up services.
    pub fn new(config: Config) -> Result<Self, EngineError> {
        fs::create_dir_all(&config.decks_dir)?;
        let store = FileWeightStore::new(&config.weights_dir)?;

        Ok(Self {
            decks: Arc::new(DeckLibrary::new(&config.decks_dir)),
            store: Arc::new(store),
            sessions: Arc::new(SessionRegistry::new(config.seed)),
            config: Arc::new(config),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/api/users/:user_id/import", post(routes::decks::import))
        .route("/api/users/:user_id/quiz", post(routes::quiz::next))
        .route("/api/users/:user_id/answer", post(routes::quiz::answer))
        .route("/api/users/:user_id/session", get(routes::quiz::session));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/decks", get(routes::decks::list))
        .merge(user_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = config.addr();

    tracing::info!(
        decks = %config.decks_dir.display(),
        weights = %config.weights_dir.display(),
        options = config.engine.options_per_quiz,
        "Loading configuration..."
    );
    let state = AppState::new(config)?;
    let app = build_router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
