//! Property tests for board and session invariants.

use proptest::prelude::*;

use blockfall::core::{
    canonical_shape, fall_interval_ms, level_for_lines, rotate_shape, Board, GameSession,
    SessionConfig, Tetromino, SIGNAL_CAPACITY,
};
use blockfall::types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn board_from(cells: &[Option<u8>]) -> Board {
    let mut board = Board::new();
    for (i, cell) in cells.iter().enumerate() {
        let x = (i % BOARD_WIDTH as usize) as i8;
        let y = (i / BOARD_WIDTH as usize) as i8;
        board.set(x, y, cell.map(|k| PieceKind::from_index(k as usize)));
    }
    board
}

fn any_cells() -> impl Strategy<Value = Vec<Option<u8>>> {
    prop::collection::vec(prop::option::of(0u8..7), 200)
}

fn any_kind() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(PieceKind::from_index)
}

fn any_action() -> impl Strategy<Value = GameAction> {
    prop_oneof![
        Just(GameAction::MoveLeft),
        Just(GameAction::MoveRight),
        Just(GameAction::SoftDrop),
        Just(GameAction::Rotate),
        Just(GameAction::TogglePause),
    ]
}

fn filled(board: &Board) -> usize {
    board.cells().iter().filter(|c| c.is_some()).count()
}

proptest! {
    #[test]
    fn clearing_without_full_rows_changes_nothing(
        mut cells in any_cells(),
        gaps in prop::collection::vec(0usize..10, 20),
    ) {
        for (y, gap) in gaps.iter().enumerate() {
            cells[y * BOARD_WIDTH as usize + gap] = None;
        }
        let mut board = board_from(&cells);
        let before = board.clone();

        prop_assert_eq!(board.clear_full_rows(), 0);
        prop_assert_eq!(board, before);
    }

    #[test]
    fn clearing_removes_exactly_the_full_rows(cells in any_cells(), full in prop::collection::vec(any::<bool>(), 20)) {
        let mut board = board_from(&cells);
        for (y, is_full) in full.iter().enumerate() {
            if *is_full {
                for x in 0..BOARD_WIDTH as i8 {
                    board.set(x, y as i8, Some(PieceKind::I));
                }
            }
        }
        let full_rows = (0..BOARD_HEIGHT as usize).filter(|&y| board.is_row_full(y)).count();
        let before = filled(&board);

        let cleared = board.clear_full_rows();

        prop_assert_eq!(cleared, full_rows);
        prop_assert_eq!(filled(&board), before - cleared * BOARD_WIDTH as usize);
        prop_assert_eq!(board.cells().len(), 200);
        prop_assert!((0..BOARD_HEIGHT as usize).all(|y| !board.is_row_full(y)));
    }

    #[test]
    fn four_rotations_are_identity(kind in any_kind(), turns in 0usize..12) {
        let start = canonical_shape(kind);
        let mut shape = start;
        for _ in 0..turns * 4 {
            shape = rotate_shape(&shape);
        }
        prop_assert_eq!(shape, start);
    }

    #[test]
    fn positions_outside_walls_or_floor_are_invalid(
        kind in any_kind(),
        x in -4i8..14,
        y in -2i8..24,
    ) {
        let board = Board::new();
        let piece = Tetromino { x, y, ..Tetromino::spawn(kind, 0) };
        let outside = piece
            .cells()
            .iter()
            .any(|&(cx, cy)| cx < 0 || cx >= BOARD_WIDTH as i8 || cy >= BOARD_HEIGHT as i8);
        prop_assert_eq!(board.is_valid_position(&piece, 0, 0), !outside);
    }

    #[test]
    fn session_invariants_hold_over_random_play(
        seed in any::<u32>(),
        actions in prop::collection::vec((any_action(), 0u64..1500), 1..200),
    ) {
        let config = SessionConfig { seed, ..SessionConfig::default() };
        let mut game = GameSession::new(config, 0);
        let mut now = 0u64;
        let mut last_score = 0;

        for (action, wait) in actions {
            now += wait;
            game.apply_action(action, now);
            game.tick(now);

            if !game.is_game_over() {
                prop_assert!(game.board().is_valid_position(game.current(), 0, 0));
            }
            prop_assert!(game.score() >= last_score);
            last_score = game.score();
            prop_assert_eq!(game.level(), level_for_lines(game.lines()));
            prop_assert_eq!(game.fall_interval_ms(), fall_interval_ms(game.level()));
            prop_assert!(game.pending_signals().len() <= SIGNAL_CAPACITY);
        }
    }
}
