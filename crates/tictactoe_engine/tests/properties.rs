//! Property-based tests for the tic-tac-toe engine.

use proptest::prelude::*;
use tictactoe_engine::rules::{LINES, check_winner, has_line};
use tictactoe_engine::wire::{decode_board, encode_board};
use tictactoe_engine::{
    Board, GameState, Move, MoveError, Outcome, Player, apply_move, detect_outcome, diff_move,
    legal_moves, new_game,
};

// =============================================================================
// Strategies
// =============================================================================

fn arb_player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::X), Just(Player::O)]
}

fn arb_cell() -> impl Strategy<Value = Option<Player>> {
    prop_oneof![Just(None), Just(Some(Player::X)), Just(Some(Player::O))]
}

/// Any 9-cell board, reachable or not.
fn arb_board() -> impl Strategy<Value = Board> {
    proptest::array::uniform9(arb_cell()).prop_map(Board::from_cells)
}

/// Plays the chosen legal moves from the start, stopping when the game ends.
fn play_choices(choices: Vec<usize>) -> (GameState, usize) {
    let mut state = new_game();
    let mut made = 0;
    for choice in choices {
        let moves = legal_moves(&state);
        if moves.is_empty() {
            break;
        }
        let cell = moves[choice % moves.len()];
        state = apply_move(&state, cell, state.next_player()).expect("Legal move");
        made += 1;
    }
    (state, made)
}

/// A state reached by legal play from the start, with the number of moves made.
fn arb_played_state() -> impl Strategy<Value = (GameState, usize)> {
    proptest::collection::vec(0usize..64, 0..9).prop_map(play_choices)
}

/// A finished game: nine choices always end in a win or a full board.
fn arb_finished_state() -> impl Strategy<Value = GameState> {
    proptest::collection::vec(0usize..64, 9).prop_map(|choices| play_choices(choices).0)
}

/// Every full board on which neither mark has a line.
fn lineless_full_boards() -> Vec<Board> {
    (0u32..512)
        .map(|bits| {
            let mut cells = [None; 9];
            for (cell, slot) in cells.iter_mut().enumerate() {
                *slot = Some(if bits & (1 << cell) == 0 { Player::X } else { Player::O });
            }
            Board::from_cells(cells)
        })
        .filter(|board| check_winner(board).is_none())
        .collect()
}

// =============================================================================
// Outcome detection
// =============================================================================

proptest! {
    #[test]
    fn prop_single_mark_lines_win(
        board in arb_board(),
        line in 0usize..8,
        mark in arb_player(),
    ) {
        let mut cells = board.cells();
        for cell in LINES[line] {
            cells[cell] = Some(mark);
        }
        let board = Board::from_cells(cells);
        prop_assume!(!has_line(&board, mark.opponent()));

        prop_assert_eq!(detect_outcome(&board), Outcome::Win(mark));
    }

    #[test]
    fn prop_full_board_without_line_is_draw(
        board in proptest::sample::select(lineless_full_boards()),
    ) {
        prop_assert_eq!(detect_outcome(&board), Outcome::Draw);
    }

    #[test]
    fn prop_open_board_without_line_in_progress(board in arb_board(), empty in 0usize..9) {
        let mut cells = board.cells();
        cells[empty] = None;
        let board = Board::from_cells(cells);
        prop_assume!(check_winner(&board).is_none());

        prop_assert_eq!(detect_outcome(&board), Outcome::InProgress);
    }
}

// =============================================================================
// Move application
// =============================================================================

proptest! {
    #[test]
    fn prop_alternation_invariant((state, made) in arb_played_state()) {
        let x = state.board().count(Player::X);
        let o = state.board().count(Player::O);
        prop_assert_eq!(x + o, made);
        prop_assert_eq!(x - o, made % 2);
    }

    #[test]
    fn prop_no_board_has_two_winners((state, _) in arb_played_state()) {
        prop_assert!(!(has_line(state.board(), Player::X) && has_line(state.board(), Player::O)));
    }

    #[test]
    fn prop_finished_game_rejects_everything(
        state in arb_finished_state(),
        cell in 0usize..16,
        player in arb_player(),
    ) {
        prop_assert!(state.outcome().is_over());
        prop_assert_eq!(apply_move(&state, cell, player), Err(MoveError::GameOver));
    }

    #[test]
    fn prop_occupied_cell_rejected((state, _) in arb_played_state(), choice in 0usize..9) {
        prop_assume!(!state.outcome().is_over());
        let occupied: Vec<usize> = (0..9).filter(|&cell| !state.board().is_empty(cell)).collect();
        prop_assume!(!occupied.is_empty());

        let cell = occupied[choice % occupied.len()];
        let before = state;
        prop_assert_eq!(
            apply_move(&state, cell, state.next_player()),
            Err(MoveError::CellOccupied { cell })
        );
        prop_assert_eq!(state, before);
    }

    #[test]
    fn prop_wrong_player_rejected((state, _) in arb_played_state(), choice in 0usize..9) {
        let moves = legal_moves(&state);
        prop_assume!(!moves.is_empty());

        let cell = moves[choice % moves.len()];
        let wrong = state.next_player().opponent();
        prop_assert_eq!(
            apply_move(&state, cell, wrong),
            Err(MoveError::WrongPlayer { expected: state.next_player(), got: wrong })
        );
    }

    #[test]
    fn prop_restore_accepts_reachable_states((state, _) in arb_played_state()) {
        let restored = GameState::restore(*state.board(), state.next_player());
        prop_assert_eq!(restored, Ok(state));
    }

    #[test]
    fn prop_diff_recovers_move((state, _) in arb_played_state(), choice in 0usize..9) {
        let moves = legal_moves(&state);
        prop_assume!(!moves.is_empty());

        let cell = moves[choice % moves.len()];
        let player = state.next_player();
        let next = apply_move(&state, cell, player).expect("Legal move");
        prop_assert_eq!(diff_move(state.board(), next.board()), Ok(Move::new(player, cell)));
    }

    #[test]
    fn prop_board_text_round_trip(board in arb_board()) {
        let text = encode_board(&board).expect("Encode");
        prop_assert_eq!(decode_board(&text), Ok(board));
    }
}
