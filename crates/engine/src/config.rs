//! Engine timing configuration
//!
//! Defaults are the classic frame counts; hosts may tune them per game mode.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::FRAME_DURATION;
use crate::types::{
    DAS_INITIAL_DELAY, DAS_REPEAT_RATE, LOCK_DELAY_FRAMES, MAX_LOCK_DELAY_RESETS, SOFT_DROP_SPEED,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frames a direction is held before auto-repeat starts
    pub das_initial_delay: u32,
    /// Frames between auto-repeat shifts once charged
    pub das_repeat_rate: u32,
    /// Grounded frames before a forced lock
    pub lock_delay_frames: u32,
    /// Grounded moves/rotations before a forced lock
    pub max_lock_delay_resets: u32,
    /// Frames per row while soft dropping
    pub soft_drop_speed: u32,
    /// Length of one frame in nanoseconds
    pub frame_nanos: u64,
}

impl EngineConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_nanos(self.frame_nanos)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            das_initial_delay: DAS_INITIAL_DELAY,
            das_repeat_rate: DAS_REPEAT_RATE,
            lock_delay_frames: LOCK_DELAY_FRAMES,
            max_lock_delay_resets: MAX_LOCK_DELAY_RESETS,
            soft_drop_speed: SOFT_DROP_SPEED,
            frame_nanos: FRAME_DURATION.as_nanos() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.das_initial_delay, 16);
        assert_eq!(config.das_repeat_rate, 6);
        assert_eq!(config.lock_delay_frames, 30);
        assert_eq!(config.max_lock_delay_resets, 15);
        assert_eq!(config.soft_drop_speed, 2);
        assert_eq!(config.frame_duration(), FRAME_DURATION);
        assert_eq!(config.frame_nanos, 16_666_666);
    }
}
