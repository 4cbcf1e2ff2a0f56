//! Scoring module - line-clear points, level progression and fall pacing
//!
//! Rules:
//! - A lock that clears `n` rows scores `LINE_POINTS[n] * level`.
//! - Level is `lines / 10 + 1` and never decreases.
//! - The fall interval shrinks by 100ms per level, floored at 100ms.

use crate::types::{
    FALL_INTERVAL_STEP_MS, INITIAL_FALL_INTERVAL_MS, LINES_PER_LEVEL, LINE_POINTS,
    MIN_FALL_INTERVAL_MS,
};

/// Points for clearing `lines` rows at `level`.
///
/// A single lock clears at most 4 rows; larger counts are not scored.
pub fn line_points(lines: u32, level: u32) -> u32 {
    match LINE_POINTS.get(lines as usize) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Level for a running total of cleared lines (1-based)
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Fall interval for a level (in milliseconds)
pub fn fall_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(FALL_INTERVAL_STEP_MS);
    INITIAL_FALL_INTERVAL_MS
        .saturating_sub(reduction)
        .max(MIN_FALL_INTERVAL_MS)
}

/// Result of applying one lock's cleared-row count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearOutcome {
    /// Points awarded for this clear
    pub points: u32,
    /// New fall interval, set only when the level went up
    pub level_up: Option<u32>,
}

/// Score, line total, level and the fall interval derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    lines: u32,
    level: u32,
    fall_interval_ms: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            fall_interval_ms: INITIAL_FALL_INTERVAL_MS,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Fold a lock's cleared-row count into the totals.
    ///
    /// Points use the level in effect before this clear.
    pub fn apply_clear(&mut self, cleared: u32) -> ClearOutcome {
        let points = line_points(cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared);

        let new_level = level_for_lines(self.lines);
        let level_up = if new_level > self.level {
            self.level = new_level;
            self.fall_interval_ms = fall_interval_ms(new_level);
            Some(self.fall_interval_ms)
        } else {
            None
        };

        ClearOutcome { points, level_up }
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}
