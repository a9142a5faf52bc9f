//! Database persistence layer for game records.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{GameChanges, GameRow, NewGameRow};
pub use repository::{GameRepository, MIGRATIONS};
