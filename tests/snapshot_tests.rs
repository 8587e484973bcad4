//! Snapshot export tests

use power_tetris::core::{definition, GameEngine, SequenceSource};
use power_tetris::types::{ItemKind, PieceKind};

fn o_engine() -> GameEngine<SequenceSource> {
    GameEngine::new(SequenceSource::new(vec![1]))
}

#[test]
fn test_snapshot_overlays_active_piece() {
    let mut engine = o_engine();
    engine.move_down();
    let snap = engine.snapshot(0);

    assert_eq!((snap.width, snap.height), (10, 20));
    assert_eq!(snap.board.len(), 200);
    assert_eq!(snap.cell(4, 1), PieceKind::O.color());
    assert_eq!(snap.cell(5, 2), PieceKind::O.color());
    assert_eq!(snap.cell(4, 0), 0);
    assert_eq!(snap.to_grid(), engine.board_state());
    // The playfield itself is untouched
    assert_eq!(engine.playfield().filled_count(), 0);
}

#[test]
fn test_snapshot_hud_fields() {
    let mut engine = o_engine();
    engine.add_item(definition(ItemKind::Freeze));
    engine.add_item(definition(ItemKind::Bomb));
    assert!(engine.use_item(0, 1_000));

    let snap = engine.snapshot(3_000);
    assert!(snap.frozen);
    assert!(snap.playable());
    assert_eq!(snap.next, PieceKind::O);
    assert_eq!(snap.effects.len(), 1);
    assert_eq!(snap.effects[0].name, "Freeze");
    assert_eq!(snap.effects[0].remaining_ms, 6_000);
    assert_eq!(snap.inventory.len(), 1);
    assert_eq!(snap.inventory[0].kind, ItemKind::Bomb);
    assert_eq!(snap.fall_interval_ms, 800);
    assert_eq!(snap.ghost_y, None);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut engine = o_engine();
    engine.add_item(definition(ItemKind::MultiClear));
    engine.use_item(0, 0);

    let json = serde_json::to_value(engine.snapshot(5_000)).unwrap();
    assert_eq!(json["width"], 10);
    assert_eq!(json["score_multiplier"], 2);
    assert_eq!(json["next"], "O");
    assert_eq!(json["active"]["kind"], "O");
    assert_eq!(json["effects"][0]["remaining_ms"], 15_000);
    assert_eq!(json["effects"][0]["rarity"], "epic");
    assert_eq!(json["board"].as_array().unwrap().len(), 200);
}
