// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tempo, clocks, and event flattening.
//!
//! This module converts the beat-segment tree into wall-time trigger
//! events and provides the clock abstraction the scheduler runs
//! against.

pub mod clock;
pub mod flatten;

pub use clock::{Clock, ManualClock, WallClock};
pub use flatten::{flatten, total_duration, FlatEvent};

use std::time::Duration;

/// Minimum tempo in BPM
pub const MIN_BPM: f64 = 20.0;
/// Maximum tempo in BPM
pub const MAX_BPM: f64 = 300.0;
/// Default tempo in BPM
pub const DEFAULT_BPM: f64 = 60.0;

/// Tempo in beats per minute, clamped to the supported range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    /// BPM value, always within [MIN_BPM, MAX_BPM]
    bpm: f64,
}

impl Tempo {
    /// Create a tempo, clamping into the supported range
    pub fn new(bpm: f64) -> Self {
        Self {
            bpm: bpm.clamp(MIN_BPM, MAX_BPM),
        }
    }

    /// Get the BPM
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Set the BPM, clamping into the supported range
    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
    }

    /// Seconds for one whole beat at this tempo
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm
    }

    /// One whole beat as a duration
    pub fn beat_duration(&self) -> Duration {
        Duration::from_secs_f64(self.seconds_per_beat())
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::new(DEFAULT_BPM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tempo() {
        let tempo = Tempo::default();
        assert_eq!(tempo.bpm(), 60.0);
        assert_eq!(tempo.seconds_per_beat(), 1.0);
    }

    #[test]
    fn test_seconds_per_beat() {
        assert_eq!(Tempo::new(120.0).seconds_per_beat(), 0.5);
        assert_eq!(Tempo::new(240.0).seconds_per_beat(), 0.25);
    }

    #[test]
    fn test_tempo_clamps() {
        assert_eq!(Tempo::new(10.0).bpm(), MIN_BPM);
        assert_eq!(Tempo::new(1000.0).bpm(), MAX_BPM);

        let mut tempo = Tempo::default();
        tempo.set_bpm(0.0);
        assert_eq!(tempo.bpm(), MIN_BPM);
    }

    #[test]
    fn test_beat_duration() {
        assert_eq!(Tempo::new(120.0).beat_duration(), Duration::from_millis(500));
    }
}
