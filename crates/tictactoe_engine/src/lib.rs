//! Pure tic-tac-toe game logic.
//!
//! The engine holds no state: every operation is a function of its explicit
//! inputs, so the same rules run on the server (authoritative) and in clients
//! (pre-checks and display).
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Outcome, Player, apply_move, new_game};
//!
//! let mut state = new_game();
//! for (cell, player) in [(0, Player::X), (4, Player::O), (1, Player::X), (5, Player::O), (2, Player::X)] {
//!     state = apply_move(&state, cell, player)?;
//! }
//! assert_eq!(state.outcome(), Outcome::Win(Player::X));
//! # Ok::<(), tictactoe_engine::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
mod error;
pub mod rules;
mod types;
pub mod wire;

pub use action::{Move, MoveError};
pub use engine::{apply_move, diff_move, legal_moves, new_game};
pub use error::BoardError;
pub use rules::{detect_outcome, winning_line};
pub use types::{Board, CELLS, GameState, Outcome, Player, Square};
