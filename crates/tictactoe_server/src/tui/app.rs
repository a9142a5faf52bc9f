//! Application state and logic.

use crossterm::event::KeyCode;
use tictactoe_engine::{Outcome, Player, apply_move};
use tracing::debug;

use super::input::move_cursor;
use crate::record::GameRecord;
use crate::service::MoveRequest;

/// Main application state.
#[derive(Debug, Clone)]
pub struct App {
    game: Option<GameRecord>,
    cursor: usize,
    mark: Option<Player>,
    message: Option<String>,
}

impl App {
    /// Creates an app. With `mark` set, only that player's moves are sent.
    pub fn new(mark: Option<Player>) -> Self {
        Self {
            game: None,
            cursor: 4,
            mark,
            message: None,
        }
    }

    /// Current game, if loaded.
    pub fn game(&self) -> Option<&GameRecord> {
        self.game.as_ref()
    }

    /// Cursor cell.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Mark this client plays, if fixed.
    pub fn mark(&self) -> Option<Player> {
        self.mark
    }

    /// Replaces the displayed game.
    pub fn set_game(&mut self, game: GameRecord) {
        if self.game.as_ref().is_some_and(|g| g.version() != game.version()) {
            debug!(game_id = game.id(), version = game.version(), "Game advanced");
        }
        self.game = Some(game);
    }

    /// Shows a one-off message in the status bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Clears the one-off message.
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Moves the cursor with an arrow key.
    pub fn handle_arrow(&mut self, key: KeyCode) {
        self.cursor = move_cursor(self.cursor, key);
    }

    /// Puts the cursor on `cell`.
    pub fn set_cursor(&mut self, cell: usize) {
        self.cursor = cell;
    }

    /// Validates a move at `cell` locally and builds the request for it.
    ///
    /// The server re-validates; this only avoids a round trip for moves that
    /// are certain to fail.
    pub fn prepare_move(&self, cell: usize) -> Result<MoveRequest, String> {
        let game = self.game.as_ref().ok_or("No game loaded")?;
        let state = game
            .state()
            .map_err(|e| format!("Game cannot be played: {e}"))?;

        let player = state.next_player();
        if let Some(mark) = self.mark
            && mark != player
            && !state.outcome().is_over()
        {
            return Err(format!("Waiting for {player} to move"));
        }

        apply_move(&state, cell, player).map_err(|e| e.to_string())?;
        Ok(MoveRequest {
            cell,
            player,
            version: Some(*game.version()),
        })
    }

    /// Status bar text.
    pub fn status_text(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        let Some(game) = &self.game else {
            return "Connecting...".to_string();
        };

        match game.outcome() {
            Outcome::Win(player) => format!("Player {player} wins! Press 'n' for a new game."),
            Outcome::Draw => "Draw! Press 'n' for a new game.".to_string(),
            Outcome::InProgress => match self.mark {
                Some(mark) if mark != *game.next_player() => {
                    format!("You are {mark}. Waiting for {}...", game.next_player())
                }
                Some(mark) => format!("You are {mark}. Your move."),
                None => format!("Player {} to move", game.next_player()),
            },
        }
    }
}
