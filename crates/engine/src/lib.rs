//! Driver glue between a clock, player commands and the game engine.
//!
//! The core engine never reads the time. This crate owns the schedule: it
//! feeds monotonic millisecond timestamps into effect expiry and invokes
//! gravity at the engine's current fall interval.

pub mod driver;

pub use power_tetris_core as core;
pub use power_tetris_types as types;

pub use driver::{apply_command, TickDriver, TickOutcome};
