//! Game business logic layer.

use chrono::{NaiveDateTime, Utc};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tictactoe_engine::{
    Board, BoardError, Move, MoveError, Outcome, Player, apply_move, detect_outcome, diff_move,
    new_game,
};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GameChanges, GameRepository, NewGameRow};
use crate::record::GameRecord;

/// A single move against a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row-major cell index (0-8).
    pub cell: usize,
    /// Mark being placed.
    pub player: Player,
    /// Version the client last saw. When present, a mismatch is a conflict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

/// A full-board update, as sent by older clients.
///
/// Only the single-cell delta against the stored board is used; `next_player`
/// and `outcome` are recomputed on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardUpdate {
    /// The board after the move.
    pub board: Board,
    /// Client's idea of who moves next.
    #[serde(default)]
    pub next_player: Option<Player>,
    /// Client's idea of the outcome.
    #[serde(default)]
    pub outcome: Outcome,
    /// Version the client last saw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

/// Body of `PUT /api/game/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateRequest {
    /// Preferred form: one move.
    Move(MoveRequest),
    /// Legacy form: the whole board.
    Board(BoardUpdate),
}

/// Failure of a game operation.
#[derive(Debug, Clone, Display, Error)]
pub enum ServiceError {
    /// The engine rejected the move.
    #[display("Invalid move: {_0}")]
    InvalidMove(MoveError),

    /// A full-board update was not exactly one new mark.
    #[display("Invalid board update: {_0}")]
    InvalidUpdate(BoardError),

    /// No game has this id.
    #[display("Game {id} not found")]
    NotFound {
        /// Requested id.
        id: i32,
    },

    /// The game changed since the client's version.
    #[display("Game {id} was modified concurrently (based on version {expected})")]
    Conflict {
        /// Game id.
        id: i32,
        /// Version the write was based on.
        expected: i32,
    },

    /// Storage failure, including corrupt records.
    #[display("{_0}")]
    Database(DbError),
}

impl From<MoveError> for ServiceError {
    fn from(err: MoveError) -> Self {
        Self::InvalidMove(err)
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        Self::Database(err)
    }
}

/// Service layer for game operations.
///
/// Wraps [`GameRepository`]; every accepted move goes through
/// [`apply_move`] with the persisted state and is written with a version
/// check.
#[derive(Debug, Clone)]
pub struct GameService {
    repository: GameRepository,
}

impl GameService {
    /// Creates a new game service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!(db_path = %repository.db_path(), "Creating GameService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Starts a new game: empty board, X to move, version 0.
    #[instrument(skip(self))]
    pub fn create_game(&self) -> Result<GameRecord, ServiceError> {
        let row = NewGameRow::from_state(&new_game(), now())?;
        let record = GameRecord::try_from(self.repository.create_game(row)?)?;
        info!(game_id = record.id(), "New game started");
        Ok(record)
    }

    /// Returns one game.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: i32) -> Result<GameRecord, ServiceError> {
        let row = self
            .repository
            .get_game(id)?
            .ok_or(ServiceError::NotFound { id })?;
        Ok(GameRecord::try_from(row)?)
    }

    /// Returns all games, newest first.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameRecord>, ServiceError> {
        let records = self
            .repository
            .list_games()?
            .into_iter()
            .map(GameRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = records.len(), "Games listed");
        Ok(records)
    }

    /// Dispatches an update body to the matching operation.
    #[instrument(skip(self, request))]
    pub fn update_game(&self, id: i32, request: UpdateRequest) -> Result<GameRecord, ServiceError> {
        match request {
            UpdateRequest::Move(mv) => self.submit_move(id, mv),
            UpdateRequest::Board(update) => self.apply_board_update(id, update),
        }
    }

    /// Validates and stores one move.
    #[instrument(skip(self), fields(cell = request.cell, player = %request.player))]
    pub fn submit_move(&self, id: i32, request: MoveRequest) -> Result<GameRecord, ServiceError> {
        let record = self.get_game(id)?;
        check_version(&record, request.version)?;
        self.commit_move(record, request.cell, request.player)
    }

    /// Reduces a full-board update to its single move and stores it.
    #[instrument(skip(self, update))]
    pub fn apply_board_update(
        &self,
        id: i32,
        update: BoardUpdate,
    ) -> Result<GameRecord, ServiceError> {
        let record = self.get_game(id)?;
        check_version(&record, update.version)?;

        let Move { player, cell } =
            diff_move(record.board(), &update.board).map_err(ServiceError::InvalidUpdate)?;
        debug!(game_id = id, cell, %player, "Board update reduced to move");

        if update
            .next_player
            .is_some_and(|next| next != player.opponent())
        {
            warn!(game_id = id, claimed = ?update.next_player, "Ignoring client next player");
        }
        let derived = detect_outcome(&update.board);
        if update.outcome != derived {
            warn!(game_id = id, claimed = %update.outcome, %derived, "Ignoring client outcome");
        }

        self.commit_move(record, cell, player)
    }

    fn commit_move(
        &self,
        record: GameRecord,
        cell: usize,
        player: Player,
    ) -> Result<GameRecord, ServiceError> {
        let id = *record.id();
        let version = *record.version();

        let state = record.state().map_err(DbError::from)?;
        let next = apply_move(&state, cell, player)?;

        let changes = GameChanges::from_state(&next, version + 1, now())?;
        match self.repository.update_game(id, version, changes)? {
            Some(row) => {
                let updated = GameRecord::try_from(row)?;
                info!(
                    game_id = id,
                    cell,
                    %player,
                    outcome = %updated.outcome(),
                    version = updated.version(),
                    "Move accepted"
                );
                Ok(updated)
            }
            None => {
                warn!(game_id = id, version, "Lost update race");
                Err(ServiceError::Conflict {
                    id,
                    expected: version,
                })
            }
        }
    }
}

fn check_version(record: &GameRecord, claimed: Option<i32>) -> Result<(), ServiceError> {
    match claimed {
        Some(expected) if expected != *record.version() => {
            debug!(game_id = record.id(), expected, actual = record.version(), "Stale version");
            Err(ServiceError::Conflict {
                id: *record.id(),
                expected,
            })
        }
        _ => Ok(()),
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
