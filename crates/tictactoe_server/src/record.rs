//! The game record exchanged over the API.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tictactoe_engine::wire::decode_board;
use tictactoe_engine::{Board, BoardError, GameState, Outcome, Player};
use tracing::{instrument, warn};

use crate::db::{DbError, DbErrorKind, GameRow};

/// One persisted game, decoded and validated.
///
/// JSON shape:
///
/// ```json
/// {
///   "id": 1,
///   "board": ["X", null, null, null, "O", null, null, null, null],
///   "nextPlayer": "X",
///   "outcome": null,
///   "version": 2,
///   "createdAt": "2025-01-01T12:00:00",
///   "updatedAt": "2025-01-01T12:00:05"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Store-assigned id.
    id: i32,
    /// Current board.
    board: Board,
    /// Player to move.
    next_player: Player,
    /// Derived from the board.
    outcome: Outcome,
    /// Incremented on every accepted move.
    version: i32,
    /// When the game was created.
    created_at: NaiveDateTime,
    /// When the last move was accepted.
    updated_at: NaiveDateTime,
}

impl GameRecord {
    /// Rebuilds the engine state for this record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the board could not have come from legal
    /// play.
    pub fn state(&self) -> Result<GameState, BoardError> {
        GameState::restore(self.board, self.next_player)
    }
}

impl TryFrom<GameRow> for GameRecord {
    type Error = DbError;

    #[instrument(skip(row), fields(game_id = row.id()))]
    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        let board = decode_board(row.board())?;
        let next_player = Player::from_str(row.next_player()).map_err(|_| {
            DbError::new(
                DbErrorKind::CorruptRecord,
                format!("Invalid next player: '{}'", row.next_player()),
            )
        })?;
        let stored = Outcome::from_wire(row.outcome().as_deref())?;

        let state = GameState::restore(board, next_player)?;
        if state.outcome() != stored {
            warn!(stored = %stored, derived = %state.outcome(), "Stored outcome disagrees with board");
            return Err(DbError::new(
                DbErrorKind::CorruptRecord,
                format!(
                    "Stored outcome '{}' does not match board ('{}')",
                    stored,
                    state.outcome()
                ),
            ));
        }

        Ok(Self {
            id: *row.id(),
            board,
            next_player,
            outcome: stored,
            version: *row.version(),
            created_at: *row.created_at(),
            updated_at: *row.updated_at(),
        })
    }
}
