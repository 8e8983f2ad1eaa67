//! Property tests for the engine and its collision predicate
//!
//! - `check_collision` agrees with a brute-force cell scan on random boards.
//! - Over random action sequences: score and lines never decrease, level follows
//!   lines, the board only holds valid codes, and the active piece never overlaps.
//! - A second hold before the next lock changes nothing.
//! - Locking adds exactly the in-board shape cells before clearing.

use proptest::prelude::*;

use blocktris::core::{Board, EngineConfig, GameEngine, PersistedSnapshot, Shape};
use blocktris::types::{GameAction, GamePhase, PieceKind, Position};

const ACTIONS: [GameAction; 7] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::MoveDown,
    GameAction::Rotate,
    GameAction::HardDrop,
    GameAction::Hold,
    GameAction::Pause,
];

fn brute_force_collides(board: &Board, shape: &Shape, pos: Position) -> bool {
    for row in 0..shape.size() {
        for col in 0..shape.size() {
            if shape.get(row, col) == 0 {
                continue;
            }
            let x = pos.x as i32 + col as i32;
            let y = pos.y as i32 + row as i32;
            if !(0..10).contains(&x) || y >= 20 {
                return true;
            }
            if y >= 0 && board.get(x as i8, y as i8) != Some(0) {
                return true;
            }
        }
    }
    false
}

fn board_strategy() -> impl Strategy<Value = Board> {
    prop::collection::vec(prop::sample::select(vec![0u8, 0, 0, 1, 4, 7]), 200).prop_map(
        |cells| {
            let mut board = Board::new();
            for (i, code) in cells.into_iter().enumerate() {
                board.set((i % 10) as i8, (i / 10) as i8, code);
            }
            board
        },
    )
}

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn assert_engine_consistent(engine: &GameEngine) {
    assert_eq!(engine.level(), engine.lines_cleared() / 10 + 1);
    assert!(engine.board().cells().iter().all(|&c| c <= 7));
    if engine.phase() == GamePhase::Running {
        let active = engine.active().expect("running game has an active piece");
        assert!(!engine.check_collision(&active.shape, active.position));
    }
}

proptest! {
    #[test]
    fn collision_matches_brute_force(
        board in board_strategy(),
        kind in kind_strategy(),
        turns in 0usize..4,
        x in -4i8..12,
        y in -4i8..22,
    ) {
        let mut shape = Shape::spawn(kind);
        for _ in 0..turns {
            shape = shape.rotated_cw();
        }

        let mut storage = blocktris::core::MemoryStorage::new();
        PersistedSnapshot::new(&board, 0, 0, PieceKind::O, None, true)
            .store(&mut storage)
            .unwrap();
        let mut engine = GameEngine::new(EngineConfig::seeded(1), storage);
        prop_assert!(engine.load_snapshot());

        let pos = Position::new(x, y);
        prop_assert_eq!(
            engine.check_collision(&shape, pos),
            brute_force_collides(&board, &shape, pos)
        );
    }

    #[test]
    fn random_play_respects_invariants(
        seed in any::<u32>(),
        actions in prop::collection::vec(0usize..ACTIONS.len(), 1..300),
    ) {
        let mut engine = GameEngine::in_memory(EngineConfig::seeded(seed));
        engine.reset();

        for idx in actions {
            if engine.is_game_over() {
                break;
            }
            let before_score = engine.score();
            let before_lines = engine.lines_cleared();

            engine.apply_action(ACTIONS[idx]);

            prop_assert!(engine.score() >= before_score);
            prop_assert!(engine.lines_cleared() >= before_lines);
            assert_engine_consistent(&engine);

            if let Some(event) = engine.take_last_event() {
                prop_assert_eq!(event.game_over, engine.is_game_over());
                prop_assert_eq!(
                    engine.score() - before_score,
                    event.line_clear_score + event.drop_score
                );
            }
        }
    }

    #[test]
    fn second_hold_is_a_noop(seed in any::<u32>(), drops in 0usize..5) {
        let mut engine = GameEngine::in_memory(EngineConfig::seeded(seed));
        engine.reset();
        for _ in 0..drops {
            engine.hard_drop();
        }
        prop_assume!(engine.phase() == GamePhase::Running);

        engine.hold_piece();
        let after_first = engine.snapshot();
        prop_assert!(!engine.hold_piece());
        prop_assert_eq!(engine.snapshot(), after_first);
    }

    #[test]
    fn lock_adds_in_board_cells(
        kind in kind_strategy(),
        turns in 0usize..4,
        x in -3i8..10,
        y in -3i8..20,
    ) {
        let mut shape = Shape::spawn(kind);
        for _ in 0..turns {
            shape = shape.rotated_cw();
        }
        let mut board = Board::new();
        let in_board = shape
            .cells()
            .filter(|&(dx, dy)| board.get(x + dx, y + dy).is_some())
            .count();

        prop_assert_eq!(board.lock_shape(&shape, x, y, kind.code()), in_board);
        prop_assert_eq!(board.filled_count(), in_board);
    }
}
