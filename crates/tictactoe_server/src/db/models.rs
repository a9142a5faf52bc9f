//! Database models for persisted games.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tictactoe_engine::wire::encode_board;
use tictactoe_engine::GameState;
use tracing::instrument;

use crate::db::{DbError, schema};

/// Game row as stored.
///
/// Text columns hold the wire forms: `board` is a JSON array, `next_player`
/// is `"X"`/`"O"`, `outcome` is `NULL`/`"X"`/`"O"`/`"Draw"`.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    /// Primary key.
    id: i32,
    /// Board as JSON text.
    board: String,
    /// `"X"` or `"O"`.
    next_player: String,
    /// `NULL`, `"X"`, `"O"` or `"Draw"`.
    outcome: Option<String>,
    /// Optimistic concurrency counter.
    version: i32,
    /// Creation time (UTC).
    created_at: NaiveDateTime,
    /// Last update time (UTC).
    updated_at: NaiveDateTime,
}

/// Insertable game row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    board: String,
    next_player: String,
    outcome: Option<String>,
    version: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl NewGameRow {
    /// Encodes a fresh game state created at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the board cannot be encoded.
    #[instrument(skip(state))]
    pub fn from_state(state: &GameState, now: NaiveDateTime) -> Result<Self, DbError> {
        Ok(Self::new(
            encode_board(state.board())?,
            state.next_player().to_string(),
            state.outcome().to_wire().map(str::to_string),
            0,
            now,
            now,
        ))
    }
}

/// Full replacement of a game's mutable columns after one accepted move.
#[derive(Debug, Clone, AsChangeset, new, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(treat_none_as_null = true)]
pub struct GameChanges {
    board: String,
    next_player: String,
    outcome: Option<String>,
    version: i32,
    updated_at: NaiveDateTime,
}

impl GameChanges {
    /// Encodes the state after a move, bumping the version.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the board cannot be encoded.
    #[instrument(skip(state))]
    pub fn from_state(
        state: &GameState,
        version: i32,
        now: NaiveDateTime,
    ) -> Result<Self, DbError> {
        Ok(Self::new(
            encode_board(state.board())?,
            state.next_player().to_string(),
            state.outcome().to_wire().map(str::to_string),
            version,
            now,
        ))
    }
}
