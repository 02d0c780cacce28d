// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sequencer core: transport state, the playback scheduler, and the
//! engine facade.
//!
//! The scheduler is a pure state machine over flattened events; the
//! engine wraps it together with the pattern tree, instrument
//! registry, mutation operations, and the delayed-restart protocol.

pub mod engine;
pub mod scheduler;

pub use engine::Sequencer;
pub use scheduler::PlaybackScheduler;

use thiserror::Error;

use crate::instrument::InstrumentError;
use crate::pattern::{PatternError, SegmentAddr};

/// Playback transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    /// Not playing; no timer armed
    Stopped,
    /// Looping through flattened events
    Playing,
}

impl Default for TransportState {
    fn default() -> Self {
        TransportState::Stopped
    }
}

/// Errors from engine operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Pattern text did not parse
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// Instrument, parameter, or preset lookup failed
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
    /// Catalog has no pattern under this name
    #[error("unknown pattern '{0}'")]
    UnknownPattern(String),
    /// Segment address does not resolve in the repeat set
    #[error("segment address {0} out of range")]
    SegmentOutOfRange(SegmentAddr),
}
