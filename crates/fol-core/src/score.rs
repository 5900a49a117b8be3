//! Score arithmetic: per-round bonus and periodic decay

use std::time::Duration;

/// Score credited at the start of each round
pub const DEFAULT_ROUND_BONUS: u32 = 200;

/// Points removed on every decay tick
pub const DEFAULT_DECAY_STEP: u32 = 10;

/// Interval between decay ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// How a score decays while a round is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayConfig {
    pub step: u32,
    pub interval: Duration,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_DECAY_STEP,
            interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl DecayConfig {
    /// Score after one tick, clamped at zero
    pub fn apply(&self, score: u32) -> u32 {
        score.saturating_sub(self.step)
    }
}
