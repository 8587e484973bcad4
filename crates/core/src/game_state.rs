//! Game state module - the game engine
//!
//! Ties the catalog, playfield, effect registry and scoring together. It owns
//! the current and lookahead pieces, applies player commands, locks pieces,
//! scores line clears, tracks the item inventory and active effects, and
//! answers render queries.
//!
//! A piece spawns in the constructor, so an active piece exists from then on
//! except after the lock that ends the game. Once the game is over every
//! movement, tick and item command is a rejected no-op until [`GameEngine::restart`].

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, EngineConfig};
use crate::items::{self, random_item, ActiveEffect, EffectModifiers, ItemDefinition};
use crate::pieces::{random_kind, rotation_count, rotation_shape, Mask};
use crate::playfield::Playfield;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{calculate_score, fall_interval_ms, level_for_lines};
use crate::snapshot::{EffectSnapshot, GameSnapshot};
use crate::types::{Cell, Command, ItemKind, PieceKind};

/// Rows from the bottom targeted by the line bomb
const LINE_BOMB_OFFSET: usize = 5;

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    pub rotation: usize,
}

impl ActivePiece {
    /// Spawn anchor: horizontally centered, top row, rotation 0
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        Self {
            kind,
            x: board_width as i32 / 2 - 1,
            y: 0,
            rotation: 0,
        }
    }

    pub fn mask(&self) -> &'static Mask {
        rotation_shape(self.kind, self.rotation)
    }

    pub fn is_valid(&self, playfield: &Playfield) -> bool {
        playfield.is_valid_position(self.mask(), self.x, self.y)
    }
}

/// Why an item could not be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("game is paused or over")]
    NotPlayable,
    #[error("inventory index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("instant item {0:?} has no effect")]
    UnsupportedInstant(ItemKind),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine<R = SimpleRng> {
    config: EngineConfig,
    playfield: Playfield,
    active: Option<ActivePiece>,
    next: PieceKind,
    rng: R,
    score: u32,
    level: u32,
    lines: u32,
    pieces_locked: u32,
    paused: bool,
    game_over: bool,
    effects: Vec<ActiveEffect>,
    inventory: Vec<ItemDefinition>,
    modifiers: EffectModifiers,
    /// Locks since the last automatically acquired item
    item_cadence: u32,
}

impl<R: RandomSource> GameEngine<R> {
    /// New game on the default 10x20 board
    pub fn new(rng: R) -> Self {
        Self::build(EngineConfig::default(), rng)
    }

    pub fn with_config(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: EngineConfig, mut rng: R) -> Self {
        let next = random_kind(&mut rng);
        let mut engine = Self {
            playfield: Playfield::new(config.width, config.height),
            config,
            active: None,
            next,
            rng,
            score: 0,
            level: 1,
            lines: 0,
            pieces_locked: 0,
            paused: false,
            game_over: false,
            effects: Vec::new(),
            inventory: Vec::new(),
            modifiers: EffectModifiers::default(),
            item_cadence: 0,
        };
        engine.spawn_piece();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Write one locked cell, for setting up positions.
    ///
    /// Returns false if out of bounds or `cell` is not a valid color id.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        self.playfield.set(x, y, cell)
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn next_piece_shape(&self) -> &'static Mask {
        rotation_shape(self.next, 0)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    pub fn inventory(&self) -> &[ItemDefinition] {
        &self.inventory
    }

    pub fn modifiers(&self) -> EffectModifiers {
        self.modifiers
    }

    pub fn score_multiplier(&self) -> u32 {
        self.modifiers.score_multiplier
    }

    pub fn is_frozen(&self) -> bool {
        self.modifiers.is_frozen()
    }

    pub fn is_ghost_enabled(&self) -> bool {
        self.modifiers.ghost_preview
    }

    /// Interval at which the driver should call [`GameEngine::tick`]
    pub fn fall_interval_ms(&self) -> u64 {
        fall_interval_ms(self.level, self.modifiers.fall_speed_multiplier)
    }

    /// Promote the lookahead piece and draw a new one.
    ///
    /// Sets game over and returns false if the spawn position collides.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.next;
        self.next = random_kind(&mut self.rng);
        let piece = ActivePiece::spawn(kind, self.playfield.width());
        self.active = Some(piece);

        if !piece.is_valid(&self.playfield) {
            info!("spawn of {} blocked, game over at score {}", kind.as_str(), self.score);
            self.game_over = true;
            return false;
        }
        true
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if !self.is_playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = ActivePiece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        };
        if moved.is_valid(&self.playfield) {
            self.active = Some(moved);
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row; if blocked, lock the piece and return false.
    pub fn move_down(&mut self) -> bool {
        if !self.is_playable() || self.active.is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// Gravity step. Does nothing while a freeze effect is active.
    pub fn tick(&mut self) -> bool {
        if self.modifiers.is_frozen() {
            return false;
        }
        self.move_down()
    }

    /// Step to the next rotation state in place; no wall kicks.
    pub fn rotate(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = ActivePiece {
            rotation: (active.rotation + 1) % rotation_count(active.kind),
            ..active
        };
        if rotated.is_valid(&self.playfield) {
            self.active = Some(rotated);
            return true;
        }
        false
    }

    /// Move down until the piece locks. Returns false if nothing was dropped.
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_playable() || self.active.is_none() {
            return false;
        }
        while self.move_down() {}
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.game_over || self.paused {
            return false;
        }
        self.paused = true;
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        true
    }

    /// Reset the board and session, then spawn a fresh piece.
    pub fn restart(&mut self) {
        info!("restart after {} lines, score {}", self.lines, self.score);
        self.playfield.reset();
        self.active = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.pieces_locked = 0;
        self.paused = false;
        self.game_over = false;
        self.effects.clear();
        self.inventory.clear();
        self.modifiers = EffectModifiers::default();
        self.item_cadence = 0;
        self.spawn_piece();
    }

    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.playfield
            .place(active.mask(), active.x, active.y, active.kind.color());
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let cleared = self.playfield.clear_full_lines();
        if cleared > 0 {
            let gained = calculate_score(cleared, self.level, self.modifiers.score_multiplier);
            self.score = self.score.saturating_add(gained);
            self.lines += cleared as u32;
            debug!(
                "cleared {} lines at level {} for {} points",
                cleared, self.level, gained
            );
        }
        self.level = level_for_lines(self.lines);

        self.item_cadence += 1;
        if self.config.item_spawn_interval > 0 && self.item_cadence >= self.config.item_spawn_interval
        {
            self.item_cadence = 0;
            self.acquire_item();
        }

        if self.playfield.is_top_row_occupied() {
            info!("stack reached the top, game over at score {}", self.score);
            self.game_over = true;
        } else {
            self.spawn_piece();
        }
    }

    /// Landing row of the active piece at its current column and rotation
    pub fn ghost_y(&self) -> Option<i32> {
        let active = self.active?;
        let mask = active.mask();
        let mut y = active.y;
        while self.playfield.is_valid_position(mask, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Drop expired effects and recompute the derived modifiers
    pub fn advance_effects(&mut self, now_ms: u64) -> EffectModifiers {
        self.modifiers = items::advance_effects(&mut self.effects, now_ms);
        self.modifiers
    }

    /// Draw a random item into the inventory
    pub fn acquire_item(&mut self) -> ItemDefinition {
        let item = random_item(&mut self.rng);
        debug!("acquired {} ({})", item.name, item.rarity.display_name());
        self.inventory.push(item);
        item
    }

    /// Append a specific item to the inventory
    pub fn add_item(&mut self, item: ItemDefinition) {
        self.inventory.push(item);
    }

    pub fn use_item(&mut self, index: usize, now_ms: u64) -> bool {
        self.try_use_item(index, now_ms).is_ok()
    }

    /// Use the inventory item at `index`.
    ///
    /// Instant items mutate the playfield immediately; timed items start an
    /// active effect at `now_ms`. A valid index always consumes the item;
    /// `NotPlayable` and `IndexOutOfRange` leave the inventory untouched.
    pub fn try_use_item(&mut self, index: usize, now_ms: u64) -> Result<ItemKind, ItemError> {
        if !self.is_playable() {
            return Err(ItemError::NotPlayable);
        }
        let item = *self
            .inventory
            .get(index)
            .ok_or(ItemError::IndexOutOfRange {
                index,
                len: self.inventory.len(),
            })?;

        // A valid index consumes the item, even if its kind has no effect
        self.inventory.remove(index);

        let height = self.playfield.height();
        match item.kind {
            ItemKind::ClearLine => {
                if let Some(row) = height.checked_sub(1) {
                    self.playfield.clear_row(row);
                }
            }
            ItemKind::LineBomb => {
                if let Some(row) = height.checked_sub(LINE_BOMB_OFFSET) {
                    self.playfield.clear_row(row);
                }
            }
            ItemKind::Bomb => {
                let cx = self.playfield.width() as i32 / 2;
                let cy = height as i32 / 2;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        self.playfield.clear_cell(cx + dx, cy + dy);
                    }
                }
            }
            _ if !item.is_instant() => {
                self.effects.push(ActiveEffect::new(item, now_ms));
                self.advance_effects(now_ms);
            }
            other => {
                debug!("discarded {} with no effect", item.name);
                return Err(ItemError::UnsupportedInstant(other));
            }
        }

        debug!("used {} at {}ms", item.name, now_ms);
        Ok(item.kind)
    }

    /// Apply a player command
    pub fn apply(&mut self, command: Command, now_ms: u64) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => self.move_down(),
            Command::HardDrop => self.hard_drop(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Restart => {
                self.restart();
                true
            }
            Command::UseItem(index) => self.use_item(index, now_ms),
        }
    }

    /// Locked cells with the active piece overlaid in its color
    pub fn board_state(&self) -> Vec<Vec<Cell>> {
        let mut grid: Vec<Vec<Cell>> = self.playfield.rows().map(<[Cell]>::to_vec).collect();
        if let Some(active) = self.active {
            for &(dx, dy) in active.mask().cells().iter() {
                let (x, y) = (active.x + dx, active.y + dy);
                if x >= 0 && y >= 0 {
                    if let Some(cell) = grid.get_mut(y as usize).and_then(|r| r.get_mut(x as usize)) {
                        *cell = active.kind.color();
                    }
                }
            }
        }
        grid
    }

    pub fn snapshot(&self, now_ms: u64) -> GameSnapshot {
        GameSnapshot {
            width: self.playfield.width(),
            height: self.playfield.height(),
            board: self.board_state().concat(),
            active: self.active,
            ghost_y: if self.modifiers.ghost_preview {
                self.ghost_y()
            } else {
                None
            },
            next: self.next,
            score: self.score,
            level: self.level,
            lines: self.lines,
            pieces_locked: self.pieces_locked,
            paused: self.paused,
            game_over: self.game_over,
            fall_interval_ms: self.fall_interval_ms(),
            frozen: self.is_frozen(),
            score_multiplier: self.modifiers.score_multiplier,
            effects: self
                .effects
                .iter()
                .map(|e| EffectSnapshot::from_effect(e, now_ms))
                .collect(),
            inventory: self.inventory.clone(),
        }
    }
}

impl Default for GameEngine<SimpleRng> {
    fn default() -> Self {
        Self::new(SimpleRng::default())
    }
}
