//! Terminal input module.
//!
//! Maps `crossterm` key events onto the engine's [`Command`](crate::types::Command)
//! set. The mapping is stateless apart from the pause flag the caller passes
//! in, which decides whether `p` pauses or resumes.

pub mod map;

pub use power_tetris_types as types;

pub use map::{map_key, should_quit};
