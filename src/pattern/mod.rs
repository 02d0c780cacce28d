// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pattern parsing and the beat-segment tree.
//!
//! A pattern is a comma-separated list of fractional beat durations
//! ("1/4, 1/8, 1/8, 1/4"). Parsing produces one [`BeatSegment`] per
//! token with instruments assigned round-robin; the segments are then
//! cloned into a [`RepeatSet`] for playback and mutation.

pub mod fraction;
pub mod parse;
pub mod randomize;
pub mod repeat;
pub mod segment;

pub use fraction::Fraction;
pub use parse::parse_pattern;
pub use randomize::{humanized_params, randomize_segment_params, randomize_structure};
pub use repeat::{RepeatSet, SegmentAddr, REPEAT_COUNT};
pub use segment::BeatSegment;

use thiserror::Error;

/// Errors from pattern parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern contained no tokens
    #[error("empty pattern")]
    Empty,
    /// A token was not a positive fraction or number
    #[error("invalid pattern token '{0}'")]
    InvalidToken(String),
}
