// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The repeat set: deep clones of a parsed pattern.
//!
//! Playback runs the pattern [`REPEAT_COUNT`] times per loop, and each
//! repeat owns an independent copy of every segment so mutations in one
//! repeat never leak into another.

use std::fmt;

use super::BeatSegment;

/// Number of pattern repeats per playback loop
pub const REPEAT_COUNT: usize = 4;

/// Address of one segment inside a repeat set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentAddr {
    /// Repeat index
    pub repeat: usize,
    /// Slot index within the repeat
    pub slot: usize,
    /// Child index for subdivided slots, None for the slot itself
    pub child: Option<usize>,
}

impl SegmentAddr {
    /// Address a slot segment
    pub fn slot(repeat: usize, slot: usize) -> Self {
        Self {
            repeat,
            slot,
            child: None,
        }
    }

    /// Address a child of a subdivided slot
    pub fn child(repeat: usize, slot: usize, child: usize) -> Self {
        Self {
            repeat,
            slot,
            child: Some(child),
        }
    }
}

impl fmt::Display for SegmentAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.child {
            Some(child) => write!(f, "r{}.s{}.c{}", self.repeat, self.slot, child),
            None => write!(f, "r{}.s{}", self.repeat, self.slot),
        }
    }
}

/// REPEAT_COUNT independent copies of a parsed pattern
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepeatSet {
    /// One segment list per repeat
    repeats: Vec<Vec<BeatSegment>>,
}

impl RepeatSet {
    /// Build a repeat set from a parsed slot list
    pub fn from_slots(slots: Vec<BeatSegment>) -> Self {
        Self::with_repeats(slots, REPEAT_COUNT)
    }

    /// Build a repeat set with an explicit repeat count
    pub fn with_repeats(slots: Vec<BeatSegment>, count: usize) -> Self {
        Self {
            repeats: vec![slots; count.max(1)],
        }
    }

    /// Number of repeats
    pub fn repeat_count(&self) -> usize {
        self.repeats.len()
    }

    /// Number of slots per repeat
    pub fn slot_count(&self) -> usize {
        self.repeats.first().map(Vec::len).unwrap_or(0)
    }

    /// Check whether the set holds any segments
    pub fn is_empty(&self) -> bool {
        self.slot_count() == 0
    }

    /// All repeats in order
    pub fn repeats(&self) -> &[Vec<BeatSegment>] {
        &self.repeats
    }

    /// Mutable access to all repeats
    pub fn repeats_mut(&mut self) -> &mut [Vec<BeatSegment>] {
        &mut self.repeats
    }

    /// Look up a segment by address
    pub fn segment(&self, addr: SegmentAddr) -> Option<&BeatSegment> {
        let slot = self.repeats.get(addr.repeat)?.get(addr.slot)?;
        match addr.child {
            Some(child) => slot.children().get(child),
            None => Some(slot),
        }
    }

    /// Look up a segment mutably by address
    pub fn segment_mut(&mut self, addr: SegmentAddr) -> Option<&mut BeatSegment> {
        let slot = self.repeats.get_mut(addr.repeat)?.get_mut(addr.slot)?;
        match addr.child {
            Some(child) => slot.children_mut().get_mut(child),
            None => Some(slot),
        }
    }
}
