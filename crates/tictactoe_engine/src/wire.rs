//! Text encodings used at the storage and transport boundary.
//!
//! - Board: JSON array of 9 cells, `null` / `"X"` / `"O"`.
//! - Outcome: `null` (in progress), `"X"` / `"O"` (winner), `"Draw"`
//!   (`"Ничья"` is also read).

use crate::{Board, BoardError, Outcome, Player};
use std::str::FromStr;
use tracing::instrument;

/// Wire value for a drawn game.
pub const DRAW: &str = "Draw";

/// Draw value sent by older clients. Accepted on input, never written.
pub const LEGACY_DRAW: &str = "Ничья";

/// Serializes a board to its JSON text form.
///
/// # Errors
///
/// Returns [`BoardError::Malformed`] if serialization fails.
#[instrument(skip(board))]
pub fn encode_board(board: &Board) -> Result<String, BoardError> {
    serde_json::to_string(board).map_err(|e| BoardError::Malformed {
        message: e.to_string(),
    })
}

/// Parses a board from its JSON text form.
///
/// # Errors
///
/// Returns [`BoardError::Malformed`] unless the text is a 9-element array of
/// `null`, `"X"` or `"O"`.
#[instrument(skip(text))]
pub fn decode_board(text: &str) -> Result<Board, BoardError> {
    serde_json::from_str(text).map_err(|e| BoardError::Malformed {
        message: e.to_string(),
    })
}

impl Outcome {
    /// Returns the wire value: `None`, `"X"`, `"O"` or [`DRAW`].
    pub fn to_wire(&self) -> Option<&'static str> {
        match self {
            Outcome::InProgress => None,
            Outcome::Win(Player::X) => Some("X"),
            Outcome::Win(Player::O) => Some("O"),
            Outcome::Draw => Some(DRAW),
        }
    }

    /// Parses a wire value.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BadOutcome`] for any other string.
    pub fn from_wire(value: Option<&str>) -> Result<Self, BoardError> {
        match value {
            None => Ok(Outcome::InProgress),
            Some(DRAW | LEGACY_DRAW) => Ok(Outcome::Draw),
            Some(other) => Player::from_str(other)
                .map(Outcome::Win)
                .map_err(|_| BoardError::BadOutcome {
                    value: other.to_string(),
                }),
        }
    }
}

impl TryFrom<Option<String>> for Outcome {
    type Error = BoardError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        Outcome::from_wire(value.as_deref())
    }
}

impl From<Outcome> for Option<String> {
    fn from(outcome: Outcome) -> Self {
        outcome.to_wire().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_json() {
        let text = encode_board(&Board::new()).expect("encode");
        assert_eq!(text, "[null,null,null,null,null,null,null,null,null]");
    }

    #[test]
    fn test_board_json_round_trip() {
        let board = Board::from_cells([
            Some(Player::X),
            None,
            Some(Player::O),
            None,
            Some(Player::X),
            None,
            None,
            None,
            None,
        ]);
        let text = encode_board(&board).expect("encode");
        assert_eq!(text, r#"["X",null,"O",null,"X",null,null,null,null]"#);
        assert_eq!(decode_board(&text), Ok(board));
    }

    #[test]
    fn test_decode_rejects_short_array() {
        assert!(matches!(
            decode_board("[null,null]"),
            Err(BoardError::Malformed { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_mark() {
        assert!(matches!(
            decode_board(r#"["Z",null,null,null,null,null,null,null,null]"#),
            Err(BoardError::Malformed { .. })
        ));
    }

    #[test]
    fn test_outcome_wire_values() {
        assert_eq!(Outcome::InProgress.to_wire(), None);
        assert_eq!(Outcome::Win(Player::O).to_wire(), Some("O"));
        assert_eq!(Outcome::Draw.to_wire(), Some("Draw"));
        assert_eq!(Outcome::from_wire(Some("X")), Ok(Outcome::Win(Player::X)));
        assert_eq!(Outcome::from_wire(None), Ok(Outcome::InProgress));
    }

    #[test]
    fn test_outcome_rejects_unknown() {
        assert_eq!(
            Outcome::from_wire(Some("Tie")),
            Err(BoardError::BadOutcome {
                value: "Tie".to_string()
            })
        );
    }

    #[test]
    fn test_legacy_draw_read_but_not_written() {
        let outcome = Outcome::from_wire(Some(LEGACY_DRAW)).expect("legacy draw");
        assert_eq!(outcome, Outcome::Draw);
        assert_eq!(outcome.to_wire(), Some(DRAW));
    }

    #[test]
    fn test_outcome_json() {
        assert_eq!(serde_json::to_string(&Outcome::Draw).expect("encode"), r#""Draw""#);
        assert_eq!(serde_json::to_string(&Outcome::InProgress).expect("encode"), "null");
        let parsed: Outcome = serde_json::from_str(r#""O""#).expect("decode");
        assert_eq!(parsed, Outcome::Win(Player::O));
    }
}
