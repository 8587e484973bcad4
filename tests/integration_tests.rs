//! Integration tests for the game engine

use power_tetris::core::{
    definition, EngineConfig, GameEngine, ItemError, RandomSource, SequenceSource, SimpleRng,
};
use power_tetris::types::{Command, ItemKind, PieceKind};

fn index_of(kind: PieceKind) -> u32 {
    PieceKind::ALL.iter().position(|&k| k == kind).unwrap() as u32
}

/// Every piece draw yields `kind`
fn engine_of(kind: PieceKind) -> GameEngine<SequenceSource> {
    GameEngine::new(SequenceSource::new(vec![index_of(kind)]))
}

fn fill_row_except(engine: &mut GameEngine<SequenceSource>, y: i32, gaps: &[i32]) {
    for x in 0..engine.playfield().width() as i32 {
        if !gaps.contains(&x) {
            engine.set_cell(x, y, 5);
        }
    }
}

#[test]
fn test_o_piece_falls_to_floor() {
    let mut engine = engine_of(PieceKind::O);
    let active = engine.active().unwrap();
    assert_eq!((active.x, active.y), (4, 0));

    for expected_y in 1..=18 {
        assert!(engine.move_down());
        assert_eq!(engine.active().unwrap().y, expected_y);
    }

    assert!(!engine.move_down());
    assert_eq!(engine.playfield().filled_count(), 4);
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(engine.playfield().get(x, y), Some(PieceKind::O.color()));
    }
    let next = engine.active().unwrap();
    assert_eq!((next.x, next.y, next.rotation), (4, 0, 0));
    assert!(!engine.is_game_over());
}

#[test]
fn test_lookahead_is_promoted() {
    // Draws: I (current), T (next), then S
    let mut engine = GameEngine::new(SequenceSource::new(vec![0, 2, 3]));
    assert_eq!(engine.active().unwrap().kind, PieceKind::I);
    assert_eq!(engine.next_piece(), PieceKind::T);

    engine.hard_drop();
    assert_eq!(engine.active().unwrap().kind, PieceKind::T);
    assert_eq!(engine.next_piece(), PieceKind::S);
    assert_eq!(engine.next_piece_shape().size(), 3);
}

#[test]
fn test_blocked_rotation_is_rejected() {
    let mut engine = engine_of(PieceKind::T);
    engine.move_down();
    // T at (4,1): rotation 1 needs (5,3)
    engine.set_cell(5, 3, 1);
    assert!(!engine.rotate());
    assert_eq!(engine.active().unwrap().rotation, 0);

    let mut o = engine_of(PieceKind::O);
    assert!(o.rotate());
    assert_eq!(o.active().unwrap().rotation, 0);
}

#[test]
fn test_hard_drop_locks_within_height() {
    let mut rng_engine = GameEngine::new(SimpleRng::new(7));
    for _ in 0..30 {
        if rng_engine.is_game_over() {
            break;
        }
        let locked = rng_engine.pieces_locked();
        assert!(rng_engine.hard_drop());
        assert_eq!(rng_engine.pieces_locked(), locked + 1);
    }
}

#[test]
fn test_scoring_table() {
    // Vertical I fills up to four rows at column 9
    for (lines, expected) in [(1, 40), (2, 100), (3, 300), (4, 1200)] {
        let mut engine = engine_of(PieceKind::I);
        for y in 20 - lines..20 {
            fill_row_except(&mut engine, y, &[9]);
        }
        assert!(engine.rotate());
        while engine.move_right() {}
        assert_eq!(engine.active().unwrap().x, 7);
        engine.hard_drop();
        assert_eq!(engine.lines(), lines as u32);
        assert_eq!(engine.score(), expected);
    }
}

#[test]
fn test_score_scales_with_level_and_multiplier() {
    let mut engine = engine_of(PieceKind::O);
    // Ten double clears reach level 3
    for _ in 0..10 {
        fill_row_except(&mut engine, 18, &[4, 5]);
        fill_row_except(&mut engine, 19, &[4, 5]);
        engine.hard_drop();
    }
    assert_eq!(engine.lines(), 20);
    assert_eq!(engine.level(), 3);
    let before = engine.score();

    engine.add_item(definition(ItemKind::MultiClear));
    assert!(engine.use_item(0, 0));
    fill_row_except(&mut engine, 19, &[4, 5]);
    engine.hard_drop();
    assert_eq!(engine.score() - before, 40 * 3 * 2);
}

#[test]
fn test_use_item_out_of_range() {
    let mut engine = engine_of(PieceKind::T);
    engine.add_item(definition(ItemKind::Bomb));
    assert_eq!(
        engine.try_use_item(3, 0),
        Err(ItemError::IndexOutOfRange { index: 3, len: 1 })
    );
    assert!(!engine.use_item(1, 0));
    assert_eq!(engine.inventory().len(), 1);
}

#[test]
fn test_use_item_removes_exactly_one() {
    let mut engine = engine_of(PieceKind::T);
    for kind in [ItemKind::Bomb, ItemKind::SlowMotion, ItemKind::LineBomb] {
        engine.add_item(definition(kind));
    }
    assert_eq!(engine.try_use_item(1, 500), Ok(ItemKind::SlowMotion));
    let kinds: Vec<ItemKind> = engine.inventory().iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![ItemKind::Bomb, ItemKind::LineBomb]);
    assert_eq!(engine.active_effects().len(), 1);
    assert_eq!(engine.active_effects()[0].start_ms, 500);
}

#[test]
fn test_rainbow_piece_is_rejected_and_consumed() {
    let mut engine = engine_of(PieceKind::T);
    engine.add_item(definition(ItemKind::RainbowPiece));
    engine.add_item(definition(ItemKind::Bomb));
    assert!(!engine.use_item(0, 0));
    let kinds: Vec<ItemKind> = engine.inventory().iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![ItemKind::Bomb]);

    engine.add_item(definition(ItemKind::RainbowPiece));
    assert_eq!(
        engine.try_use_item(1, 0),
        Err(ItemError::UnsupportedInstant(ItemKind::RainbowPiece))
    );
    assert_eq!(engine.inventory().len(), 1);
    assert_eq!(engine.playfield().filled_count(), 0);
}

#[test]
fn test_use_item_rejected_when_paused() {
    let mut engine = engine_of(PieceKind::T);
    engine.add_item(definition(ItemKind::Freeze));
    engine.pause();
    assert_eq!(engine.try_use_item(0, 0), Err(ItemError::NotPlayable));
    assert_eq!(engine.inventory().len(), 1);
    engine.resume();
    assert!(engine.use_item(0, 0));
}

#[test]
fn test_instant_items_mutate_board() {
    let mut engine = engine_of(PieceKind::T);
    fill_row_except(&mut engine, 19, &[0]);
    engine.set_cell(3, 18, 2);
    engine.add_item(definition(ItemKind::ClearLine));
    assert!(engine.use_item(0, 0));
    assert_eq!(engine.playfield().get(3, 19), Some(2));
    assert_eq!(engine.playfield().filled_count(), 1);

    // Line bomb removes row 15 and shifts row 14 down
    fill_row_except(&mut engine, 15, &[]);
    engine.set_cell(7, 14, 4);
    engine.add_item(definition(ItemKind::LineBomb));
    assert!(engine.use_item(0, 0));
    assert_eq!(engine.playfield().get(7, 15), Some(4));
    assert_eq!(engine.playfield().filled_count(), 2);

    // Bomb clears the 3x3 around (5, 10)
    for y in 8..13 {
        fill_row_except(&mut engine, y, &[]);
    }
    engine.add_item(definition(ItemKind::Bomb));
    assert!(engine.use_item(0, 0));
    for y in 9..=11 {
        for x in 4..=6 {
            assert_eq!(engine.playfield().get(x, y), Some(0), "({}, {})", x, y);
        }
    }
    assert_eq!(engine.playfield().get(3, 10), Some(5));
    assert_eq!(engine.playfield().get(5, 8), Some(5));
}

#[test]
fn test_game_over_is_terminal() {
    let mut engine = engine_of(PieceKind::I);
    // Stack vertical I pieces in column 6 until they reach the top
    let mut drops = 0;
    while !engine.is_game_over() {
        assert!(engine.rotate());
        engine.hard_drop();
        drops += 1;
        assert!(drops <= 10);
    }
    assert_eq!(drops, 5);

    let locked = engine.pieces_locked();
    assert!(!engine.move_left());
    assert!(!engine.move_down());
    assert!(!engine.tick());
    assert!(!engine.hard_drop());
    assert!(!engine.pause());
    assert_eq!(engine.pieces_locked(), locked);

    assert!(engine.apply(Command::Restart, 0));
    assert!(!engine.is_game_over());
    assert_eq!(engine.playfield().filled_count(), 0);
    assert!(engine.move_left());
}

#[test]
fn test_custom_board_size() {
    let config = EngineConfig {
        width: 6,
        height: 8,
        item_spawn_interval: 0,
        seed: None,
    };
    let mut engine = GameEngine::with_config(config, SequenceSource::new(vec![1])).unwrap();
    assert_eq!(engine.active().unwrap().x, 2);
    assert_eq!(engine.board_state().len(), 8);
    assert_eq!(engine.board_state()[0].len(), 6);

    for _ in 0..20 {
        engine.hard_drop();
    }
    assert!(engine.inventory().is_empty());

    let bad = EngineConfig {
        width: 2,
        ..EngineConfig::default()
    };
    assert!(GameEngine::with_config(bad, SimpleRng::default()).is_err());
}

#[test]
fn test_boxed_random_source() {
    let rng: Box<dyn RandomSource> = Box::new(SequenceSource::new(vec![6]));
    let engine = GameEngine::new(rng);
    assert_eq!(engine.active().unwrap().kind, PieceKind::L);
}

#[test]
fn test_commands_dispatch() {
    let mut engine = engine_of(PieceKind::T);
    let cmds = ["moveLeft", "moveLeft", "rotate", "softDrop"];
    for name in cmds {
        let cmd = Command::from_str(name).unwrap();
        assert!(engine.apply(cmd, 0), "{}", name);
    }
    let active = engine.active().unwrap();
    assert_eq!((active.x, active.y, active.rotation), (2, 1, 1));

    assert!(engine.apply(Command::Pause, 0));
    assert!(!engine.apply(Command::MoveRight, 0));
    assert!(engine.apply(Command::Resume, 0));
    assert!(!engine.apply(Command::UseItem(0), 0));
}
