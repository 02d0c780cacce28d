// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Clock abstraction for the scheduler.
//!
//! The scheduler never reads wall time directly; it asks a [`Clock`]
//! for elapsed time since an origin. [`WallClock`] backs real playback,
//! [`ManualClock`] lets tests step time by hand.

use std::time::{Duration, Instant};

/// Monotonic time source, measured from a fixed origin
pub trait Clock {
    /// Elapsed time since the clock's origin
    fn now(&self) -> Duration;
}

/// Real clock backed by [`Instant`]
#[derive(Debug, Clone)]
pub struct WallClock {
    /// Origin captured at construction
    origin: Instant,
}

impl WallClock {
    /// Create a clock starting at zero
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-stepped clock for tests
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    /// Current elapsed time
    now: Duration,
}

impl ManualClock {
    /// Create a clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Jump to an absolute elapsed time
    pub fn set(&mut self, to: Duration) {
        self.now = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_moves_forward() {
        let clock = WallClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_manual_clock_advances() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(250));
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(500));

        clock.set(Duration::from_secs(2));
        assert_eq!(clock.now(), Duration::from_secs(2));
    }
}
