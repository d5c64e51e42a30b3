//! Fixed-rate frame clock
//!
//! Converts host wall-clock time into whole engine frames. The clock never
//! reads time itself; hosts feed it elapsed durations, which keeps replays and
//! tests deterministic.

use std::time::Duration;

use crate::types::FRAMES_PER_SECOND;

/// One frame at the nominal 60 Hz rate
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAMES_PER_SECOND as u64);

/// Upper bound on frames released by one [`FrameClock::advance`] call
pub const MAX_CATCH_UP_FRAMES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameClock {
    running: bool,
    frame: Duration,
    accumulator: Duration,
}

impl FrameClock {
    pub fn new(frame: Duration) -> Self {
        Self {
            running: false,
            frame,
            accumulator: Duration::ZERO,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulator = Duration::ZERO;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Number of frames due after `elapsed` more time
    ///
    /// A stopped clock releases nothing. Backlog beyond [`MAX_CATCH_UP_FRAMES`] is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running || self.frame.is_zero() {
            return 0;
        }

        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.frame && due < MAX_CATCH_UP_FRAMES {
            self.accumulator -= self.frame;
            due += 1;
        }
        if self.accumulator >= self.frame {
            self.accumulator = Duration::ZERO;
        }
        due
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FRAME_DURATION)
    }
}
