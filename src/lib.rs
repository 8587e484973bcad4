//! Power Tetris (workspace facade crate).
//!
//! Re-exports the implementation crates under `crates/` as
//! `power_tetris::{core,engine,input,term,types}`.

pub use power_tetris_core as core;
pub use power_tetris_engine as engine;
pub use power_tetris_input as input;
pub use power_tetris_term as term;
pub use power_tetris_types as types;
