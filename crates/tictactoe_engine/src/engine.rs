//! Move validation and state transitions.
//!
//! Every function here is a pure function of its arguments.

use crate::rules;
use crate::{Board, BoardError, CELLS, GameState, Move, MoveError, Player, Square};
use tracing::{debug, instrument};

/// Starts a new game: empty board, X to move.
#[instrument]
pub fn new_game() -> GameState {
    GameState::new()
}

/// Validates and applies one move, returning the next state.
///
/// The input state is left untouched, so a rejected move changes nothing.
///
/// # Errors
///
/// Returns [`MoveError`] when the game is over, the cell is off the board or
/// occupied, or `player` is not the player to move (checked in that order).
#[instrument(skip(state), fields(next_player = %state.next_player(), outcome = %state.outcome()))]
pub fn apply_move(state: &GameState, cell: usize, player: Player) -> Result<GameState, MoveError> {
    if state.outcome().is_over() {
        return Err(MoveError::GameOver);
    }
    if cell >= CELLS {
        return Err(MoveError::OutOfRange { cell });
    }
    if !state.board().is_empty(cell) {
        return Err(MoveError::CellOccupied { cell });
    }
    if player != state.next_player() {
        return Err(MoveError::WrongPlayer {
            expected: state.next_player(),
            got: player,
        });
    }

    let board = state.board().with_mark(cell, player);
    let outcome = rules::detect_outcome(&board);
    debug!(cell, %player, %outcome, "Move applied");

    Ok(GameState::from_parts(board, player.opponent(), outcome))
}

/// Lists the empty cells in ascending order, or nothing once the game is over.
#[instrument(skip(state))]
pub fn legal_moves(state: &GameState) -> Vec<usize> {
    if state.outcome().is_over() {
        return Vec::new();
    }
    (0..CELLS).filter(|&cell| state.board().is_empty(cell)).collect()
}

/// Recovers the single move that turns `before` into `after`.
///
/// Only the delta is returned; whether the move is legal in context is left
/// to [`apply_move`].
///
/// # Errors
///
/// Returns [`BoardError::Overwritten`] if any marked cell changed and
/// [`BoardError::NotSingleMove`] unless exactly one empty cell was marked.
#[instrument(skip(before, after))]
pub fn diff_move(before: &Board, after: &Board) -> Result<Move, BoardError> {
    let mut added = Vec::new();
    for (cell, (old, new)) in before.squares().iter().zip(after.squares()).enumerate() {
        match (old, new) {
            (Square::Empty, Square::Occupied(player)) => added.push(Move::new(*player, cell)),
            (old, new) if old != new => return Err(BoardError::Overwritten { cell }),
            _ => {}
        }
    }

    match added.as_slice() {
        [single] => Ok(*single),
        _ => Err(BoardError::NotSingleMove { added: added.len() }),
    }
}
