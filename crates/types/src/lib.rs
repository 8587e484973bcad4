//! Core types module - shared data structures and constants
//!
//! Plain data used by every other crate: piece kinds, item kinds and rarity
//! tiers, the player command set, and the board/timing/scoring constants.
//! Nothing here holds state or performs I/O.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn anchor**: (`width / 2 - 1`, 0)
//!
//! # Fall Interval by Level
//!
//! `max(100, 800 - (level - 1) * 50)` milliseconds per row, scaled by the
//! active slow-motion multiplier:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 800ms |
//! | 2 | 750ms |
//! | 5 | 600ms |
//! | 15+ | 100ms (floor) |
//!
//! # Examples
//!
//! ```
//! use power_tetris_types::{PieceKind, Rarity, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::I.color(), 1);
//! assert_eq!(Rarity::Common.weight(), 50);
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Fall interval at level 1
pub const BASE_FALL_INTERVAL_MS: u64 = 800;

/// Interval reduction per level above 1
pub const FALL_INTERVAL_STEP_MS: u64 = 50;

/// Floor of the fall interval
pub const MIN_FALL_INTERVAL_MS: u64 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Piece locks between automatically acquired items
pub const ITEM_SPAWN_INTERVAL: u32 = 50;

/// Fall speed multiplier while a slow-motion effect is active
pub const SLOW_MOTION_MULTIPLIER: f64 = 0.5;

/// Score multiplier while a multi-clear effect is active
pub const MULTI_CLEAR_SCORE_MULTIPLIER: u32 = 2;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines, multiplied by the current level:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// A cell on the playfield
///
/// `0` is empty, `1..=7` is the color id of the piece that locked there.
pub type Cell = u8;

/// The empty cell value
pub const EMPTY_CELL: Cell = 0;

/// Highest valid color id
pub const MAX_COLOR: Cell = 7;

/// The seven piece kinds
///
/// Each kind carries a fixed color id:
/// I=1, O=2, T=3, S=4, Z=5, J=6, L=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Color id written into the playfield when this piece locks
    pub fn color(self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::color`]
    pub fn from_color(color: Cell) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.color() == color)
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use power_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rarity tiers for items
///
/// Tiers are sampled by weight out of [`TOTAL_RARITY_WEIGHT`], in the
/// enumeration order of [`Rarity::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Sum of all tier weights
pub const TOTAL_RARITY_WEIGHT: u32 = 100;

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Selection weight out of [`TOTAL_RARITY_WEIGHT`]
    pub fn weight(self) -> u32 {
        match self {
            Rarity::Common => 50,
            Rarity::Uncommon => 30,
            Rarity::Rare => 15,
            Rarity::Epic => 4,
            Rarity::Legendary => 1,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Item kinds
///
/// Instant kinds mutate the playfield when used; timed kinds become an
/// active effect for their duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    /// Remove the bottom row
    ClearLine,
    /// Halve the fall speed
    SlowMotion,
    /// Show where the active piece will land
    GhostPiece,
    /// Clear a 3x3 block around the board center
    Bomb,
    /// Remove a fixed row near the bottom
    LineBomb,
    /// Stop gravity
    Freeze,
    /// Double line clear score
    MultiClear,
    /// Wildcard piece; not supported by the engine
    RainbowPiece,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::ClearLine => "clearLine",
            ItemKind::SlowMotion => "slowMotion",
            ItemKind::GhostPiece => "ghostPiece",
            ItemKind::Bomb => "bomb",
            ItemKind::LineBomb => "lineBomb",
            ItemKind::Freeze => "freeze",
            ItemKind::MultiClear => "multiClear",
            ItemKind::RainbowPiece => "rainbowPiece",
        }
    }
}

/// Discrete player commands
///
/// This is the full command set an input mapper can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece to its next rotation state
    Rotate,
    /// Move piece one row down, locking it if blocked
    SoftDrop,
    /// Drop piece until it locks
    HardDrop,
    Pause,
    Resume,
    /// Reset the session and spawn a new piece
    Restart,
    /// Use the inventory item at the given index
    UseItem(usize),
}

impl Command {
    /// Parse a command name (case-insensitive)
    ///
    /// `useItem` takes its index after a colon, e.g. `useItem:2`.
    ///
    /// ```
    /// use power_tetris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("useitem:3"), Some(Command::UseItem(3)));
    /// assert_eq!(Command::from_str("useItem:x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if let Some(index) = lower.strip_prefix("useitem:") {
            return index.parse().ok().map(Command::UseItem);
        }
        match lower.as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }
}
