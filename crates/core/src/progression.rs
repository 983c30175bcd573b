//! Progression module - level and gravity speed
//!
//! Levels start at 1. Each cleared line bumps the cumulative count; once that
//! count exceeds `level * 5` the level rises by one and the gravity interval
//! becomes `1000 * 0.9^level` milliseconds. The comparison is against the
//! cumulative count, which is never reset, not against lines since the last level.

use tracing::info;

use crate::types::{BASE_DROP_MS, LEVEL_SPEEDUP, LINES_PER_LEVEL};

/// Gravity interval for a level
pub fn drop_interval_ms(level: u32) -> f64 {
    BASE_DROP_MS * LEVEL_SPEEDUP.powi(level as i32)
}

/// Level, cumulative line count and the current gravity interval
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    level: u32,
    lines_cleared: u32,
    drop_interval_ms: f64,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            level: 1,
            lines_cleared: 0,
            drop_interval_ms: BASE_DROP_MS,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.drop_interval_ms
    }

    /// Count one cleared line. Returns true if the level went up.
    pub fn record_line(&mut self) -> bool {
        self.lines_cleared += 1;

        if self.lines_cleared > self.level * LINES_PER_LEVEL {
            self.level += 1;
            self.drop_interval_ms = drop_interval_ms(self.level);
            info!(
                level = self.level,
                lines = self.lines_cleared,
                interval_ms = self.drop_interval_ms,
                "level up"
            );
            return true;
        }

        false
    }

    /// Count `n` cleared lines, one at a time
    pub fn record_lines(&mut self, n: usize) {
        for _ in 0..n {
            self.record_line();
        }
    }

    /// Back to level 1 and base speed. The line count is cumulative and survives.
    pub fn reset(&mut self) {
        self.level = 1;
        self.drop_interval_ms = BASE_DROP_MS;
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}
