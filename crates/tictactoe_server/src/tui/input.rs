//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use tictactoe_engine::CELLS;

const SIDE: usize = 3;

/// Moves the cursor (a cell index) with the arrow keys, stopping at edges.
pub fn move_cursor(cursor: usize, key: KeyCode) -> usize {
    let (row, col) = (cursor / SIDE, cursor % SIDE);

    match key {
        KeyCode::Left if col > 0 => cursor - 1,
        KeyCode::Right if col < SIDE - 1 => cursor + 1,
        KeyCode::Up if row > 0 => cursor - SIDE,
        KeyCode::Down if row < SIDE - 1 => cursor + SIDE,
        _ => cursor,
    }
}

/// Maps keys `1`-`9` to cells 0-8, numbered like a phone keypad.
pub fn digit_cell(c: char) -> Option<usize> {
    let digit = c.to_digit(10)? as usize;
    (1..=CELLS).contains(&digit).then(|| digit - 1)
}
