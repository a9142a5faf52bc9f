//! Tic-tac-toe REST service.
//!
//! Games live in SQLite and are served over HTTP; every move is validated
//! by [`tictactoe_engine`] against the persisted state before it is stored.
//!
//! # Architecture
//!
//! - **db**: diesel repository over the `games` table
//! - **service**: move validation and versioned writes
//! - **api**: axum routes under `/api/game`
//! - **tui**: ratatui client for the API
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_server::{GameRepository, GameService, MoveRequest};
//! use tictactoe_engine::Player;
//!
//! # fn example() -> anyhow::Result<()> {
//! let repository = GameRepository::new("tictactoe.db".to_string())?;
//! repository.run_migrations()?;
//!
//! let service = GameService::new(repository);
//! let game = service.create_game()?;
//! let game = service.submit_move(
//!     *game.id(),
//!     MoveRequest { cell: 4, player: Player::X, version: None },
//! )?;
//! assert_eq!(game.board().count(Player::X), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod config;
mod db;
mod record;
mod service;
mod tui;

// Crate-level exports - HTTP API
pub use api::{ApiError, AppState, ErrorBody, ErrorDetail, router, serve};

// Crate-level exports - Configuration
pub use config::{ConfigError, ENV_DATABASE_URL, ENV_HOST, ENV_PORT, ServerConfig};

// Crate-level exports - Persistence
pub use db::{DbError, DbErrorKind, GameChanges, GameRepository, GameRow, MIGRATIONS, NewGameRow};
pub use record::GameRecord;

// Crate-level exports - Service
pub use service::{BoardUpdate, GameService, MoveRequest, ServiceError, UpdateRequest};

// Crate-level exports - Terminal client
pub use tui::{App, ClientError, GameClient, run_tui};
