//! Read-only render view of the engine.
//!
//! A [`GameSnapshot`] carries the board with the active piece overlaid, the
//! ghost row while ghost preview is active, and the HUD lists of effects and
//! inventory. Everything here serializes with serde.

use serde::Serialize;

use crate::game_state::ActivePiece;
use crate::items::{ActiveEffect, ItemDefinition};
use crate::types::{Cell, ItemKind, PieceKind, Rarity, EMPTY_CELL};

/// HUD view of one active effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectSnapshot {
    pub kind: ItemKind,
    pub name: &'static str,
    pub rarity: Rarity,
    pub duration_ms: u64,
    pub remaining_ms: u64,
}

impl EffectSnapshot {
    pub fn from_effect(effect: &ActiveEffect, now_ms: u64) -> Self {
        Self {
            kind: effect.item.kind,
            name: effect.item.name,
            rarity: effect.item.rarity,
            duration_ms: effect.item.duration_ms,
            remaining_ms: effect.remaining_ms(now_ms),
        }
    }
}

/// Read-only, render-ready copy of the engine state
///
/// `board` already has the active piece overlaid in its color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major cells (y * width + x)
    pub board: Vec<Cell>,
    pub active: Option<ActivePiece>,
    /// Landing row of the active piece, present only while ghost preview is on
    pub ghost_y: Option<i32>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub paused: bool,
    pub game_over: bool,
    pub fall_interval_ms: u64,
    pub frozen: bool,
    pub score_multiplier: u32,
    pub effects: Vec<EffectSnapshot>,
    pub inventory: Vec<ItemDefinition>,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return EMPTY_CELL;
        }
        self.board[y * self.width + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.board.chunks(self.width.max(1))
    }

    pub fn to_grid(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}
