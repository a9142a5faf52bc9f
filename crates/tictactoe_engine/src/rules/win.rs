//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Square};
use tracing::instrument;

/// The 8 winning lines in check order.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first fully-matched line and its mark.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<([usize; 3], Player)> {
    let squares = board.squares();
    LINES.into_iter().find_map(|[a, b, c]| match squares[a] {
        Square::Occupied(player) if squares[b] == squares[a] && squares[c] == squares[a] => {
            Some(([a, b, c], player))
        }
        _ => None,
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` for the first line of three found,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(_, player)| player)
}

/// Checks whether `player` has any line of three.
pub fn has_line(board: &Board, player: Player) -> bool {
    let mark = Square::Occupied(player);
    let squares = board.squares();
    LINES
        .iter()
        .any(|line| line.iter().all(|&cell| squares[cell] == mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Player> = Some(Player::X);
    const O: Option<Player> = Some(Player::O);
    const E: Option<Player> = None;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::from_cells([X, X, X, O, O, E, E, E, E]);
        assert_eq!(check_winner(&board), Some(Player::X));
        assert_eq!(winning_line(&board), Some(([0, 1, 2], Player::X)));
    }

    #[test]
    fn test_winner_column() {
        let board = Board::from_cells([X, O, X, E, O, X, E, O, E]);
        assert_eq!(winning_line(&board), Some(([1, 4, 7], Player::O)));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::from_cells([X, X, O, E, O, E, O, E, X]);
        assert_eq!(winning_line(&board), Some(([2, 4, 6], Player::O)));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::from_cells([X, X, E, E, O, E, E, E, E]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_first_line_in_order_wins() {
        // Row and column both complete; rows are checked first.
        let board = Board::from_cells([X, X, X, X, O, O, X, O, O]);
        assert_eq!(winning_line(&board), Some(([0, 1, 2], Player::X)));
    }

    #[test]
    fn test_has_line() {
        let board = Board::from_cells([O, X, X, O, X, E, O, E, E]);
        assert!(has_line(&board, Player::O));
        assert!(!has_line(&board, Player::X));
    }
}
