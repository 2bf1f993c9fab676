//! Cronos Server - HTTP board service for day-ordered billing reminders.
//!
//! The server keeps one normalized [`Board`] in memory, applies moves and
//! edits through the cronos-engine planner, and writes each change set
//! to the store.

mod config;
mod error;
mod handlers;
mod routes;
mod storage;

use crate::config::Config;
use crate::storage::{persist_events, MemoryStore};
use axum::Router;
use cronos_engine::{is_normalized, Board};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<Mutex<Board>>,
    pub store: Arc<MemoryStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(board: Board, store: MemoryStore, config: Config) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

/// Build the application router with middleware.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Load the board from the store, repairing stored ranks if needed.
async fn load_board(store: &MemoryStore) -> Result<Board, storage::StorageError> {
    let events = store.list_events().await?;
    let board = Board::from_events(events.clone());

    if !is_normalized(&events) {
        let repaired: Vec<_> = board
            .iter()
            .filter(|e| !events.contains(e))
            .cloned()
            .collect();
        tracing::info!(count = repaired.len(), "Repairing stored event ranks");
        let failed = persist_events(store, &repaired).await;
        if !failed.is_empty() {
            tracing::warn!(count = failed.len(), "Some repaired events were not saved");
        }
    }

    Ok(board)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cronos_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Cronos Server on {}:{}", config.host, config.port);

    let store = MemoryStore::open(config.data_file.clone()).await?;
    if config.seed_templates {
        store.seed_templates().await?;
        store.flush().await?;
    }

    let board = load_board(&store).await?;
    tracing::info!(events = board.len(), "Board loaded");

    let addr = format!("{}:{}", config.host, config.port);
    let app = build_app(AppState::new(board, store, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
