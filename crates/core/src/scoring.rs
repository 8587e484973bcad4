//! Scoring module - line clear points, leveling and the fall-speed curve
//!
//! Levels start at 1. Line clear points are the classic table multiplied by
//! the level the clear happened on and by the active score multiplier.

use crate::types::{
    BASE_FALL_INTERVAL_MS, FALL_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
    MIN_FALL_INTERVAL_MS,
};

/// Points for clearing `lines` rows at `level` (0 for anything but 1-4)
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Line clear points with a score multiplier applied
pub fn calculate_score(lines: usize, level: u32, multiplier: u32) -> u32 {
    line_clear_score(lines, level).saturating_mul(multiplier)
}

/// Level for a running line total: `floor(total / 10) + 1`
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Unscaled fall interval: `max(100, 800 - (level - 1) * 50)` ms
pub fn base_interval_ms(level: u32) -> u64 {
    let steps = level.saturating_sub(1) as u64;
    BASE_FALL_INTERVAL_MS
        .saturating_sub(steps.saturating_mul(FALL_INTERVAL_STEP_MS))
        .max(MIN_FALL_INTERVAL_MS)
}

/// Fall interval scaled by the fall-speed multiplier
pub fn fall_interval_ms(level: u32, multiplier: f64) -> u64 {
    (base_interval_ms(level) as f64 * multiplier) as u64
}
