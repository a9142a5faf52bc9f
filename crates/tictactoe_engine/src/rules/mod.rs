//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from board storage
//! so the server and the client evaluate positions the same way.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, has_line, winning_line};

use crate::{Board, Outcome};
use tracing::instrument;

/// Computes the outcome of a board.
///
/// Lines are checked in [`LINES`] order and the first match wins; otherwise a
/// full board is a draw.
#[instrument(skip(board))]
pub fn detect_outcome(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::Win(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
