//! HTTP client for the game API.

use derive_more::{Display, Error};
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

use crate::api::ErrorBody;
use crate::record::GameRecord;
use crate::service::{MoveRequest, UpdateRequest};

/// Failure talking to the game server.
#[derive(Debug, Clone, Display, Error)]
pub enum ClientError {
    /// The request never got a response.
    #[display("Request failed: {message}")]
    Transport {
        /// Underlying failure.
        message: String,
    },

    /// The game does not exist.
    #[display("Game {id} not found")]
    NotFound {
        /// Requested id.
        id: i32,
    },

    /// Someone else moved first.
    #[display("Game changed on the server: {message}")]
    Conflict {
        /// Server message.
        message: String,
    },

    /// The server rejected the move or request.
    #[display("Rejected: {message}")]
    Rejected {
        /// Server message.
        message: String,
    },

    /// Any other failure status.
    #[display("Server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server message.
        message: String,
    },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Client for `/api/game`.
#[derive(Debug, Clone)]
pub struct GameClient {
    base_url: String,
    client: reqwest::Client,
}

impl GameClient {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists all games, newest first.
    #[instrument(skip(self))]
    pub async fn list_games(&self) -> Result<Vec<GameRecord>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/game", self.base_url))
            .send()
            .await?;
        let response = check(response, None).await?;
        Ok(response.json().await?)
    }

    /// Starts a new game.
    #[instrument(skip(self))]
    pub async fn create_game(&self) -> Result<GameRecord, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/game", self.base_url))
            .send()
            .await?;
        let game: GameRecord = check(response, None).await?.json().await?;
        info!(game_id = game.id(), "Created game");
        Ok(game)
    }

    /// Fetches one game.
    #[instrument(skip(self))]
    pub async fn get_game(&self, id: i32) -> Result<GameRecord, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/game/{}", self.base_url, id))
            .send()
            .await?;
        Ok(check(response, Some(id)).await?.json().await?)
    }

    /// Submits one move.
    #[instrument(skip(self))]
    pub async fn submit_move(&self, id: i32, request: MoveRequest) -> Result<(), ClientError> {
        let response = self
            .client
            .put(format!("{}/api/game/{}", self.base_url, id))
            .json(&UpdateRequest::Move(request))
            .send()
            .await?;
        check(response, Some(id)).await?;
        debug!(game_id = id, "Move submitted");
        Ok(())
    }
}

/// Passes success responses through; maps failures to [`ClientError`].
async fn check(
    response: reqwest::Response,
    id: Option<i32>,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error.message)
        .unwrap_or(text);
    warn!(status = %status, %message, "Server returned error");

    Err(match status {
        StatusCode::NOT_FOUND => match id {
            Some(id) => ClientError::NotFound { id },
            None => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        },
        StatusCode::CONFLICT => ClientError::Conflict { message },
        StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => {
            ClientError::Rejected { message }
        }
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    })
}
