//! Route handlers for `/api/game`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::{debug, info, instrument};

use crate::api::{ApiError, AppState};
use crate::record::GameRecord;
use crate::service::{GameService, ServiceError, UpdateRequest};

/// `GET /api/game`
#[instrument(skip_all)]
pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<GameRecord>>, ApiError> {
    let games = blocking(&state, |service| service.list_games()).await?;
    debug!(count = games.len(), "Listing games");
    Ok(Json(games))
}

/// `GET /api/game/{id}`
#[instrument(skip_all)]
pub async fn get_game(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<GameRecord>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let game = blocking(&state, move |service| service.get_game(id)).await?;
    Ok(Json(game))
}

/// `POST /api/game`
///
/// Responds 201 with the new game and a `Location` header.
#[instrument(skip_all)]
pub async fn create_game(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let game = blocking(&state, |service| service.create_game()).await?;
    let location = format!("/api/game/{}", game.id());
    info!(game_id = game.id(), %location, "Game created");
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(game)))
}

/// `PUT /api/game/{id}`
///
/// Accepts either a move (`{"cell", "player", "version"?}`) or a full board.
/// Responds 204 on success.
#[instrument(skip_all)]
pub async fn update_game(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    if id <= 0 {
        return Err(ApiError::bad_request(format!("Invalid game id: {id}")));
    }
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    debug!(game_id = id, ?request, "Update requested");

    let game = blocking(&state, move |service| service.update_game(id, request)).await?;
    info!(game_id = id, version = game.version(), outcome = %game.outcome(), "Game updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Runs a service call on the blocking pool.
async fn blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&GameService) -> Result<T, ServiceError> + Send + 'static,
{
    let service = state.service().clone();
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| ApiError::internal(format!("Blocking task failed: {e}")))?
        .map_err(ApiError::from)
}
