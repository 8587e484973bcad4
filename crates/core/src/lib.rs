//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and the item
//! system. It has **no dependencies** on terminals or wall clocks:
//!
//! - **Deterministic**: every random draw goes through an injected [`RandomSource`]
//! - **Clock-free**: effect timing uses caller-supplied millisecond timestamps
//! - **Portable**: can run in any environment (terminal, headless, benches)
//!
//! # Module Structure
//!
//! - [`playfield`]: width x height grid with collision checks and line clearing
//! - [`pieces`]: tetromino rotation tables (no wall kicks)
//! - [`items`]: item catalog, rarity-weighted selection, active effects
//! - [`game_state`]: the engine: active piece, scoring, inventory, commands
//! - [`scoring`]: line clear points, levels, fall speed
//! - [`rng`]: injectable random sources
//! - [`config`]: engine configuration and environment overrides
//! - [`snapshot`]: serializable render view of the engine
//!
//! # Game Rules
//!
//! - Pieces spawn horizontally centered on row 0 and rotate in place
//! - A piece that cannot move down locks; full rows are cleared and scored
//!   `[0, 40, 100, 300, 1200][lines] * level * score_multiplier`
//! - Level is `lines / 10 + 1`; the fall interval is
//!   `max(100, 800 - (level - 1) * 50)` ms scaled by the fall-speed multiplier
//! - Every 50 locks (configurable) an item is drawn into the inventory
//! - The game ends when a locked piece reaches row 0 or a spawn collides
//!
//! # Example
//!
//! ```
//! use power_tetris_core::{GameEngine, SequenceSource};
//! use power_tetris_core::types::PieceKind;
//!
//! // A script of [1] draws only O pieces
//! let mut engine = GameEngine::new(SequenceSource::new(vec![1]));
//! assert_eq!(engine.active().map(|p| p.kind), Some(PieceKind::O));
//!
//! engine.move_left();
//! engine.hard_drop();
//! assert_eq!(engine.pieces_locked(), 1);
//! ```

pub mod config;
pub mod game_state;
pub mod items;
pub mod pieces;
pub mod playfield;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use power_tetris_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use game_state::{ActivePiece, GameEngine, ItemError};
pub use items::{catalog, definition, random_item, ActiveEffect, EffectModifiers, ItemDefinition};
pub use pieces::{rotation_count, rotation_shape, Mask};
pub use playfield::Playfield;
pub use rng::{RandSource, RandomSource, SequenceSource, SimpleRng};
pub use scoring::{calculate_score, fall_interval_ms, level_for_lines};
pub use snapshot::{EffectSnapshot, GameSnapshot};
