//! Terminal runner (default binary).
//!
//! Reads `POWER_TETRIS_*` configuration from the environment, then runs the
//! game on a crossterm terminal until `q` or Ctrl-C. Logging goes through
//! `env_logger` (`RUST_LOG`, default `warn`).

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use power_tetris::core::{EngineConfig, GameEngine, RandSource, RandomSource, SimpleRng};
use power_tetris::engine::TickDriver;
use power_tetris::input::{map_key, should_quit};
use power_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Upper bound on the input poll so effect countdowns keep refreshing
const MAX_FRAME: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = EngineConfig::from_env().context("invalid POWER_TETRIS_* configuration")?;
    let rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => Box::new(SimpleRng::new(seed)),
        None => Box::new(RandSource::from_entropy()),
    };
    info!(
        "starting {}x{} game, item every {} locks",
        config.width, config.height, config.item_spawn_interval
    );
    let mut engine = GameEngine::with_config(config, rng).context("create engine")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, engine: &mut GameEngine<Box<dyn RandomSource>>) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let view = GameView::default();
    let mut frame = FrameBuffer::new(0, 0);
    let mut driver = TickDriver::new();
    driver.reset(now_ms());

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&engine.snapshot(now_ms()), Viewport::new(w, h), &mut frame);
        term.draw(&frame)?;

        let wait = Duration::from_millis(driver.time_until_fall(engine, now_ms())).min(MAX_FRAME);
        if event::poll(wait).context("poll terminal events")? {
            match event::read().context("read terminal event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = map_key(key, engine.is_paused()) {
                        driver.handle(engine, command, now_ms());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        driver.update(engine, now_ms());
    }
}
