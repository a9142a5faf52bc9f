//! Database repository for persisted games.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbErrorKind, GameChanges, GameRow, NewGameRow, schema};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds SQLite waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Database repository for game records.
///
/// Opens a fresh connection per operation, so clones are cheap and can be
/// moved into blocking tasks.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// The file is created on first connection if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new(
                DbErrorKind::Connection,
                "Database path must not be empty",
            ));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))?;
        Ok(conn)
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(DbError::migration)?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Inserts a new game and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, game))]
    pub fn create_game(&self, game: NewGameRow) -> Result<GameRow, DbError> {
        debug!("Creating game");
        let mut conn = self.connection()?;

        let row = diesel::insert_into(schema::games::table)
            .values(&game)
            .returning(GameRow::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = row.id(), "Game created");
        Ok(row)
    }

    /// Gets a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: i32) -> Result<Option<GameRow>, DbError> {
        debug!(game_id = id, "Looking up game");
        let mut conn = self.connection()?;

        let row = schema::games::table
            .find(id)
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()?;

        if row.is_none() {
            debug!(game_id = id, "Game not found");
        }
        Ok(row)
    }

    /// Lists all games, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameRow>, DbError> {
        debug!("Listing games");
        let mut conn = self.connection()?;

        let rows = schema::games::table
            .order((schema::games::created_at.desc(), schema::games::id.desc()))
            .select(GameRow::as_select())
            .load(&mut conn)?;

        info!(count = rows.len(), "Games loaded");
        Ok(rows)
    }

    /// Replaces a game's mutable columns if its version still matches.
    ///
    /// Returns `None` when no row has both `id` and `expected_version`, i.e.
    /// the game does not exist or another writer got there first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, changes), fields(new_version = changes.version()))]
    pub fn update_game(
        &self,
        id: i32,
        expected_version: i32,
        changes: GameChanges,
    ) -> Result<Option<GameRow>, DbError> {
        debug!(game_id = id, expected_version, "Updating game");
        let mut conn = self.connection()?;

        let target = schema::games::table
            .filter(schema::games::id.eq(id))
            .filter(schema::games::version.eq(expected_version));

        let row = diesel::update(target)
            .set(&changes)
            .returning(GameRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        match &row {
            Some(row) => info!(game_id = id, version = row.version(), "Game updated"),
            None => debug!(game_id = id, expected_version, "No row matched version"),
        }
        Ok(row)
    }
}
