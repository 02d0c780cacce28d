// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! SUBBEAT - a rhythm-pattern sequencer engine.
//!
//! A textual pattern of fractional beat durations ("1/4, 1/8, 1/8,
//! 1/4") parses into a tree of beat segments with round-robin
//! instrument assignment, expands into four independent repeats,
//! flattens into timed trigger events, and plays through a looping
//! scheduler. Live mutations (subdivision, reassignment, parameter
//! edits, randomization) apply between plays via a stop, edit,
//! delayed-restart protocol; triggering is fire-and-forget through
//! the instrument registry's voices.

pub mod catalog;
pub mod config;
pub mod instrument;
pub mod pattern;
pub mod sequencer;
pub mod timing;

pub use catalog::{time_signature_label, PatternCatalog, PatternEntry};
pub use config::SequencerConfig;
pub use instrument::{
    InstrumentError, InstrumentKind, InstrumentRegistry, LogVoice, NullVoice, ParamSchema,
    ParamSpec, TimbrePreset, Voice,
};
pub use pattern::{BeatSegment, Fraction, PatternError, RepeatSet, SegmentAddr, REPEAT_COUNT};
pub use sequencer::{EngineError, PlaybackScheduler, Sequencer, TransportState};
pub use timing::{Clock, FlatEvent, ManualClock, Tempo, WallClock};
