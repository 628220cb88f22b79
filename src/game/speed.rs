//! Score-driven tick interval.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::grid::ConfigError;

/// Step function parameters mapping score to tick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedSettings {
    /// Interval at score 0, in milliseconds
    pub speed_init: u64,
    /// Points needed for each speed-up step
    pub speed_step_every: u32,
    /// Milliseconds shaved off per step
    pub speed_decrease: u64,
    /// Fastest allowed interval, in milliseconds
    pub speed_min: u64,
}

impl Default for SpeedSettings {
    fn default() -> Self {
        Self {
            speed_init: 120,
            speed_step_every: 5,
            speed_decrease: 10,
            speed_min: 40,
        }
    }
}

impl SpeedSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speed_step_every == 0 {
            return Err(ConfigError::ZeroSpeedStep);
        }
        if self.speed_min > self.speed_init {
            return Err(ConfigError::SpeedRange {
                init: self.speed_init,
                min: self.speed_min,
            });
        }
        Ok(())
    }

    /// Tick interval in milliseconds for a given score
    ///
    /// `max(speed_min, speed_init - floor(score / speed_step_every) * speed_decrease)`
    pub fn interval_ms(&self, score: u32) -> u64 {
        let steps = u64::from(score / self.speed_step_every.max(1));
        self.speed_init
            .saturating_sub(steps.saturating_mul(self.speed_decrease))
            .max(self.speed_min)
    }

    pub fn interval(&self, score: u32) -> Duration {
        Duration::from_millis(self.interval_ms(score))
    }
}
