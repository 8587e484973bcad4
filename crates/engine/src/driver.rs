use log::debug;

use crate::core::{GameEngine, RandomSource};
use crate::types::Command;

/// What a driver update did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Gravity fired this update
    pub ticked: bool,
    /// The piece moved down (false when gravity locked it or freeze held it)
    pub moved: bool,
}

/// Gravity scheduler.
///
/// Call [`TickDriver::update`] as often as convenient with a monotonic
/// timestamp; gravity fires once the engine's fall interval has elapsed since
/// the last fire. The schedule restarts whenever the game is not playable, so
/// resuming from pause never drops a piece immediately.
#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    last_fall_ms: Option<u64>,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the gravity schedule from `now_ms`
    pub fn reset(&mut self, now_ms: u64) {
        self.last_fall_ms = Some(now_ms);
    }

    /// Expire effects, then tick if a fall interval has elapsed.
    pub fn update<R: RandomSource>(&mut self, engine: &mut GameEngine<R>, now_ms: u64) -> TickOutcome {
        engine.advance_effects(now_ms);

        if !engine.is_playable() {
            self.last_fall_ms = Some(now_ms);
            return TickOutcome::default();
        }

        let last = *self.last_fall_ms.get_or_insert(now_ms);
        if now_ms.saturating_sub(last) < engine.fall_interval_ms() {
            return TickOutcome::default();
        }

        self.last_fall_ms = Some(now_ms);
        TickOutcome {
            ticked: true,
            moved: engine.tick(),
        }
    }

    /// Milliseconds until gravity is next due (0 when overdue)
    pub fn time_until_fall<R: RandomSource>(&self, engine: &GameEngine<R>, now_ms: u64) -> u64 {
        match self.last_fall_ms {
            Some(last) => (last + engine.fall_interval_ms()).saturating_sub(now_ms),
            None => engine.fall_interval_ms(),
        }
    }

    /// Apply a player command, keeping the schedule consistent with it.
    pub fn handle<R: RandomSource>(
        &mut self,
        engine: &mut GameEngine<R>,
        command: Command,
        now_ms: u64,
    ) -> bool {
        let accepted = apply_command(engine, command, now_ms);
        if accepted {
            match command {
                // A fresh piece or a resumed game gets a full interval
                Command::Restart | Command::Resume | Command::HardDrop => self.reset(now_ms),
                _ => {}
            }
        }
        accepted
    }
}

/// Dispatch a command to the engine at `now_ms`
pub fn apply_command<R: RandomSource>(
    engine: &mut GameEngine<R>,
    command: Command,
    now_ms: u64,
) -> bool {
    let accepted = engine.apply(command, now_ms);
    if !accepted {
        debug!("command {:?} rejected", command);
    }
    accepted
}
