//! Database error types.

use derive_more::{Display, Error};
use tictactoe_engine::BoardError;
use tracing::instrument;

/// What part of the store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// Opening or configuring a connection.
    #[display("Connection")]
    Connection,
    /// Running a query.
    #[display("Query")]
    Query,
    /// Applying schema migrations.
    #[display("Migration")]
    Migration,
    /// A stored row does not decode to a valid game.
    #[display("Corrupt record")]
    CorruptRecord,
}

/// Database error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{kind} error: {message} at {file}:{line}")]
pub struct DbError {
    /// Failure category.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new database error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Wraps a migration harness failure.
    #[track_caller]
    pub fn migration(err: impl std::fmt::Display) -> Self {
        Self::new(DbErrorKind::Migration, err.to_string())
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, err.to_string())
    }
}

impl From<BoardError> for DbError {
    #[track_caller]
    fn from(err: BoardError) -> Self {
        Self::new(DbErrorKind::CorruptRecord, err.to_string())
    }
}
