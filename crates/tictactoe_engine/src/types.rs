//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::rules;
use crate::BoardError;

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

impl From<Option<Player>> for Square {
    fn from(cell: Option<Player>) -> Self {
        cell.map_or(Square::Empty, Square::Occupied)
    }
}

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// 3x3 tic-tac-toe board.
///
/// Serializes as a 9-element array where empty cells are `null` and marks
/// are `"X"` / `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[Option<Player>; 9]", into = "[Option<Player>; 9]")]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; CELLS],
        }
    }

    /// Builds a board from row-major cells.
    pub fn from_cells(cells: [Option<Player>; CELLS]) -> Self {
        Self {
            squares: cells.map(Square::from),
        }
    }

    /// Gets the square at the given cell (0-8).
    pub fn get(&self, cell: usize) -> Option<Square> {
        self.squares.get(cell).copied()
    }

    /// Checks if a cell is on the board and empty.
    pub fn is_empty(&self, cell: usize) -> bool {
        matches!(self.get(cell), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; CELLS] {
        &self.squares
    }

    /// Returns the cells as marks, `None` for empty.
    pub fn cells(&self) -> [Option<Player>; CELLS] {
        self.squares.map(Square::player)
    }

    /// Counts the marks a player has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Returns a copy of the board with `cell` occupied by `player`.
    ///
    /// Callers validate the cell first; see [`crate::apply_move`].
    pub(crate) fn with_mark(mut self, cell: usize, player: Player) -> Self {
        self.squares[cell] = Square::Occupied(player);
        self
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let cell = row * 3 + col;
                let symbol = match self.squares[cell] {
                    Square::Empty => (cell + 1).to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl From<[Option<Player>; CELLS]> for Board {
    fn from(cells: [Option<Player>; CELLS]) -> Self {
        Self::from_cells(cells)
    }
}

impl From<Board> for [Option<Player>; CELLS] {
    fn from(board: Board) -> Self {
        board.cells()
    }
}

/// Result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub enum Outcome {
    /// Game is ongoing.
    #[default]
    InProgress,
    /// Game ended with three in a row for the player.
    Win(Player),
    /// Board is full with no winner.
    Draw,
}

impl Outcome {
    /// Returns true once no further moves are accepted.
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(*player),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Complete game state.
///
/// Only [`GameState::new`], [`GameState::restore`] and
/// [`apply_move`](crate::apply_move) build one, so the invariants always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    board: Board,
    next_player: Player,
    outcome: Outcome,
}

impl GameState {
    /// Creates a new game: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            next_player: Player::X,
            outcome: Outcome::InProgress,
        }
    }

    /// Rebuilds a state from persisted parts.
    ///
    /// The outcome is derived from the board rather than taken on trust.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the mark counts are impossible under strict
    /// alternation, if `next_player` disagrees with the counts, if both
    /// players have a line, or if a move was made after the game was won.
    #[instrument(skip(board, next_player), fields(board = %board.display(), next_player = %next_player))]
    pub fn restore(board: Board, next_player: Player) -> Result<Self, BoardError> {
        let x = board.count(Player::X);
        let o = board.count(Player::O);

        let expected = match x.checked_sub(o) {
            Some(0) => Player::X,
            Some(1) => Player::O,
            _ => return Err(BoardError::CountMismatch { x, o }),
        };
        if next_player != expected {
            return Err(BoardError::TurnMismatch {
                expected,
                got: next_player,
            });
        }

        if rules::has_line(&board, Player::X) && rules::has_line(&board, Player::O) {
            return Err(BoardError::BothWin);
        }

        let outcome = rules::detect_outcome(&board);
        if let Outcome::Win(winner) = outcome {
            // The winner must have made the last move.
            if winner == next_player {
                return Err(BoardError::PlayedAfterWin { winner });
            }
        }

        Ok(Self {
            board,
            next_player,
            outcome,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn next_player(&self) -> Player {
        self.next_player
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub(crate) fn from_parts(board: Board, next_player: Player, outcome: Outcome) -> Self {
        Self {
            board,
            next_player,
            outcome,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
