//! Terminal rendering for the game.
//!
//! [`GameView`] turns a [`GameSnapshot`](crate::core::GameSnapshot) into a
//! styled [`FrameBuffer`]; [`TerminalRenderer`] writes framebuffers to the
//! terminal through crossterm. Only the renderer does I/O.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use power_tetris_core as core;
pub use power_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{piece_rgb, rarity_rgb, GameView, Viewport};
pub use renderer::{encode_diff, encode_full, TerminalRenderer};
