//! Engine configuration
//!
//! Defaults match the classic 10x20 board with an item every 50 locks.
//! `from_env` overrides individual fields:
//!
//! - `POWER_TETRIS_WIDTH` / `POWER_TETRIS_HEIGHT`: board size (4..=64)
//! - `POWER_TETRIS_ITEM_INTERVAL`: locks between items, 0 disables
//! - `POWER_TETRIS_SEED`: fixed RNG seed

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, ITEM_SPAWN_INTERVAL};

pub const MIN_BOARD_DIM: usize = 4;
pub const MAX_BOARD_DIM: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error("board {width}x{height} is smaller than {min}x{min}")]
    BoardTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("board {width}x{height} is larger than {max}x{max}")]
    BoardTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    /// Locks between automatically acquired items; 0 disables
    pub item_spawn_interval: u32,
    pub seed: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            item_spawn_interval: ITEM_SPAWN_INTERVAL,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `POWER_TETRIS_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            width: parse_var(&lookup, "POWER_TETRIS_WIDTH")?.unwrap_or(defaults.width),
            height: parse_var(&lookup, "POWER_TETRIS_HEIGHT")?.unwrap_or(defaults.height),
            item_spawn_interval: parse_var(&lookup, "POWER_TETRIS_ITEM_INTERVAL")?
                .unwrap_or(defaults.item_spawn_interval),
            seed: parse_var(&lookup, "POWER_TETRIS_SEED")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_BOARD_DIM || self.height < MIN_BOARD_DIM {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_BOARD_DIM,
            });
        }
        if self.width > MAX_BOARD_DIM || self.height > MAX_BOARD_DIM {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_BOARD_DIM,
            });
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { var, value: raw })
}
