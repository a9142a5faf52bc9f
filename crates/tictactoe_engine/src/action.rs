//! Move types for tic-tac-toe.
//!
//! A move is a player's intent to mark a cell. It is validated against a
//! [`GameState`](crate::GameState) before anything changes.

use crate::Player;
use serde::{Deserialize, Serialize};

/// A player placing their mark on a cell (0-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Row-major cell index.
    pub cell: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, cell: usize) -> Self {
        Self { player, cell }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.cell)
    }
}

/// A move the rules do not allow.
///
/// Rejection happens before any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game already has a winner or is drawn.
    #[display("Game is already over")]
    GameOver,

    /// The cell index is not on the board.
    #[display("Cell {cell} is out of range (must be 0-8)")]
    OutOfRange {
        /// Requested cell.
        cell: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell {cell} is already occupied")]
    CellOccupied {
        /// Requested cell.
        cell: usize,
    },

    /// The mover is not the player whose turn it is.
    #[display("It's not {got}'s turn, {expected} to move")]
    WrongPlayer {
        /// Player whose turn it is.
        expected: Player,
        /// Player who tried to move.
        got: Player,
    },
}
