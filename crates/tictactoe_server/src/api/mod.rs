//! REST API for tic-tac-toe games.
//!
//! | Method | Path             | Success                          |
//! |--------|------------------|----------------------------------|
//! | GET    | `/api/game`      | 200, all games newest first      |
//! | GET    | `/api/game/{id}` | 200, one game                    |
//! | POST   | `/api/game`      | 201, new game, `Location` header |
//! | PUT    | `/api/game/{id}` | 204, move accepted               |

mod error;
mod handlers;

pub use error::{ApiError, ErrorBody, ErrorDetail};

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use derive_getters::Getters;
use derive_new::new;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::ServerConfig;
use crate::db::GameRepository;
use crate::service::GameService;

/// Shared handler state.
#[derive(Debug, Clone, Getters, new)]
pub struct AppState {
    /// Game operations.
    service: GameService,
}

/// Builds the API router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/game",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route(
            "/api/game/{id}",
            get(handlers::get_game).put(handlers::update_game),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Migrates the store and serves the API until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the store cannot be migrated or the listener cannot
/// bind.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let repository = GameRepository::new(config.database_url().clone())?;

    let migrator = repository.clone();
    tokio::task::spawn_blocking(move || migrator.run_migrations())
        .await
        .context("Migration task panicked")??;

    let app = router(AppState::new(GameService::new(repository)));

    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Tic-tac-toe server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
