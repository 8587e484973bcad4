//! GameView rendering tests against full engine snapshots

use power_tetris::core::{definition, EngineConfig, GameEngine, SequenceSource};
use power_tetris::term::{FrameBuffer, GameView, Viewport};
use power_tetris::types::ItemKind;

fn screen_text(fb: &FrameBuffer) -> Vec<String> {
    (0..fb.height()).map(|y| fb.row_text(y)).collect()
}

#[test]
fn test_render_into_reuses_buffer() {
    let mut engine = GameEngine::new(SequenceSource::new(vec![2]));
    let view = GameView::default();
    let mut fb = FrameBuffer::new(1, 1);

    view.render_into(&engine.snapshot(0), Viewport::new(70, 26), &mut fb);
    assert_eq!((fb.width(), fb.height()), (70, 26));
    let first = fb.clone();

    engine.move_left();
    view.render_into(&engine.snapshot(0), Viewport::new(70, 26), &mut fb);
    assert_ne!(fb, first);
}

#[test]
fn test_hud_shows_session_counters() {
    let mut engine = GameEngine::new(SequenceSource::new(vec![1]));
    engine.hard_drop();
    engine.add_item(definition(ItemKind::LineBomb));

    let fb = GameView::default()
        .top_left()
        .render(&engine.snapshot(0), Viewport::new(60, 24));
    let text = screen_text(&fb);
    assert!(text.iter().any(|r| r.contains("PIECES 1")));
    assert!(text.iter().any(|r| r.contains("SCORE  0")));
    assert!(text.iter().any(|r| r.contains("1 Line Bomb")));
}

#[test]
fn test_game_over_banner_on_small_board() {
    let config = EngineConfig {
        width: 6,
        height: 6,
        item_spawn_interval: 0,
        seed: None,
    };
    let mut engine = GameEngine::with_config(config, SequenceSource::new(vec![1])).unwrap();
    while !engine.is_game_over() {
        engine.hard_drop();
    }

    let fb = GameView::new(1)
        .top_left()
        .render(&engine.snapshot(0), Viewport::new(40, 10));
    assert!(fb.row_text(4).contains("GAME OVER"));
}
