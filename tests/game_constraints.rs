//! Rule-level properties of the Ultimate Tic-Tac-Toe engine, checked over
//! full random playouts

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use uttt::{Action, Cell, GameState, MetaCell, Player};

/// Walk a full random game, checking the move-constraint invariants at
/// every step
fn check_random_playout(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::new();
    let mut steps = 0;

    loop {
        let legal = state.legal_moves();

        // Non-empty unless the game is over
        assert_eq!(legal.is_empty(), state.is_terminal());
        if legal.is_empty() {
            break;
        }

        // Every legal move targets an empty cell in an open sub-board
        for action in &legal {
            let (row, col) = action.board_coords();
            assert_eq!(state.cells[row][col], Cell::Empty);
            assert_eq!(state.meta[action.sub_row][action.sub_col], MetaCell::Empty);
        }

        // When the active sub-board is open, all moves land inside it
        if let Some((sub_row, sub_col)) = state.active_sub_board() {
            if state.meta[sub_row][sub_col] == MetaCell::Empty {
                assert!(
                    legal
                        .iter()
                        .all(|a| a.sub_row == sub_row && a.sub_col == sub_col)
                );
            }
        }

        let action = *legal.choose(&mut rng).unwrap();
        let next = state.make_move(action).unwrap();

        // The move constrains the opponent to (row % 3, col % 3)
        let (row, col) = action.board_coords();
        assert_eq!(next.active_sub_board(), Some((row % 3, col % 3)));

        // Only the affected meta entry may have changed
        for sub_row in 0..3 {
            for sub_col in 0..3 {
                if (sub_row, sub_col) != (action.sub_row, action.sub_col) {
                    assert_eq!(next.meta[sub_row][sub_col], state.meta[sub_row][sub_col]);
                }
            }
        }

        state = next;
        steps += 1;
        assert!(steps <= 81, "game exceeded the board size");
    }

    // Terminal states carry a winner or have every sub-board resolved
    assert!(state.global_winner().is_some() || state.is_draw());
}

#[test]
fn random_playouts_respect_all_constraints() {
    for seed in 0..50 {
        check_random_playout(seed);
    }
}

#[test]
fn games_alternate_players() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut state = GameState::new();
    let mut expected = Player::X;

    loop {
        let legal = state.legal_moves();
        if legal.is_empty() {
            break;
        }
        assert_eq!(state.to_move, expected);
        state = state.make_move(*legal.choose(&mut rng).unwrap()).unwrap();
        expected = expected.opponent();
    }
}

#[test]
fn state_keys_are_unique_along_a_game() {
    let mut rng = StdRng::seed_from_u64(123);
    let mut state = GameState::new();
    let mut seen = std::collections::HashSet::new();

    loop {
        assert!(seen.insert(state.state_key()), "state key collision");
        let legal = state.legal_moves();
        if legal.is_empty() {
            break;
        }
        state = state.make_move(*legal.choose(&mut rng).unwrap()).unwrap();
    }
}

#[test]
fn make_move_never_overwrites() {
    let state = GameState::new().make_move(Action::new(0, 2, 1, 1)).unwrap();
    assert!(state.make_move(Action::new(0, 2, 1, 1)).is_err());
    // The failed call left the original untouched
    assert_eq!(state.cells[1][7], Cell::X);
}
