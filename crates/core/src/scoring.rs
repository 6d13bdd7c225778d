//! Scoring module - line clear points, levels and fall speed
//!
//! - A clear of N rows scores `LINE_SCORES[N] * level` (unmapped N scores 0).
//! - Level is `lines / 10 + 1`.
//! - Fall interval is `max(100, round(1000 * 0.9^(level - 1)))` ms.

use crate::types::{BASE_FALL_MS, FALL_DECAY, LINES_PER_LEVEL, LINE_SCORES, MIN_FALL_MS};

/// Points for clearing `lines` rows at once on `level`.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Level reached after `total_lines` cleared lines (levels start at 1).
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Fall interval in milliseconds for a level.
pub fn fall_interval_ms(level: u32) -> u32 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let interval = (BASE_FALL_MS as f64 * FALL_DECAY.powi(exponent)).round() as u32;
    interval.max(MIN_FALL_MS)
}
