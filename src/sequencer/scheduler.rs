// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Looping playback scheduler.
//!
//! The scheduler walks a flattened event list with a single armed
//! deadline. Each poll fires every event whose deadline has passed and
//! advances the deadline by the fired event's duration, so timing is
//! logical: a late poll catches up without accumulating drift. The
//! cursor wraps at the end of the list and loops until stopped.

use std::time::Duration;

use crate::timing::FlatEvent;

use super::TransportState;

/// State machine that steps through flattened events on a deadline
#[derive(Debug, Clone, Default)]
pub struct PlaybackScheduler {
    /// Current transport state
    state: TransportState,
    /// Flattened events in playback order
    events: Vec<FlatEvent>,
    /// Index of the most recently fired event
    cursor: usize,
    /// When the next advance fires; None exactly when stopped
    deadline: Option<Duration>,
}

impl PlaybackScheduler {
    /// Create a stopped scheduler with no events
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the event list, resetting to stopped at the start
    pub fn set_events(&mut self, events: Vec<FlatEvent>) {
        self.events = events;
        self.stop();
    }

    /// The flattened event list
    pub fn events(&self) -> &[FlatEvent] {
        &self.events
    }

    /// Current transport state
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Check whether playback is running
    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    /// Index of the most recently fired event
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Begin playback at `now`.
    ///
    /// Fires event zero immediately, returning its index, and arms the
    /// deadline for the advance. Starting with no events is a no-op
    /// and returns None.
    pub fn start(&mut self, now: Duration) -> Option<usize> {
        if self.events.is_empty() {
            return None;
        }
        self.state = TransportState::Playing;
        self.cursor = 0;
        self.deadline = Some(now + self.events[0].duration);
        Some(0)
    }

    /// Fire every event due by `now`, returning their indices in order.
    ///
    /// Each advance moves the cursor one step (wrapping) and pushes the
    /// deadline forward by the fired event's duration.
    pub fn poll(&mut self, now: Duration) -> Vec<usize> {
        let mut fired = Vec::new();
        if self.state != TransportState::Playing || self.events.is_empty() {
            return fired;
        }

        while let Some(deadline) = self.deadline {
            if now < deadline {
                break;
            }
            self.cursor = (self.cursor + 1) % self.events.len();
            fired.push(self.cursor);
            self.deadline = Some(deadline + self.events[self.cursor].duration);
        }

        fired
    }

    /// Stop playback, cancelling the armed deadline
    pub fn stop(&mut self) {
        self.state = TransportState::Stopped;
        self.deadline = None;
        self.cursor = 0;
    }

    /// Time remaining until the next advance; None when stopped
    pub fn time_until_next(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_sub(now))
    }
}
