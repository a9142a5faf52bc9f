//! Errors for boards that cannot come from legal play.

use crate::Player;

/// A board, or board transition, that violates the alternation rules or
/// cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// X must lead O by zero or one marks.
    #[display("Impossible mark counts: {x} X vs {o} O")]
    CountMismatch {
        /// Number of X marks.
        x: usize,
        /// Number of O marks.
        o: usize,
    },

    /// The stored next player disagrees with the mark counts.
    #[display("Expected {expected} to move, found {got}")]
    TurnMismatch {
        /// Player implied by the counts.
        expected: Player,
        /// Player that was recorded.
        got: Player,
    },

    /// Both players have three in a row.
    #[display("Both players have a winning line")]
    BothWin,

    /// A move was made after the game was already won.
    #[display("Player {winner} has a line but did not make the last move")]
    PlayedAfterWin {
        /// Owner of the line.
        winner: Player,
    },

    /// The new board is not the old board plus exactly one mark.
    #[display("Expected exactly one new mark, found {added}")]
    NotSingleMove {
        /// Number of cells that went from empty to marked.
        added: usize,
    },

    /// A marked cell was cleared or changed.
    #[display("Cell {cell} was already marked and cannot change")]
    Overwritten {
        /// The altered cell.
        cell: usize,
    },

    /// The board text is not a 9-element array of `null`, `"X"` or `"O"`.
    #[display("Malformed board: {message}")]
    Malformed {
        /// Parser message.
        message: String,
    },

    /// The outcome text is not `null`, `"X"`, `"O"` or `"Draw"`.
    #[display("Unknown outcome: '{value}'")]
    BadOutcome {
        /// The rejected value.
        value: String,
    },
}
