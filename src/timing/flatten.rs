// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Flattening the repeat set into timed trigger events.
//!
//! Flattening walks every repeat in order; an unsubdivided slot
//! becomes one event, a subdivided slot becomes one event per child.
//! Parameter maps are snapshots, so later edits to the tree do not
//! reach already-flattened events.

use std::collections::HashMap;
use std::time::Duration;

use crate::instrument::InstrumentKind;
use crate::pattern::{RepeatSet, SegmentAddr};

use super::Tempo;

/// One scheduled trigger
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEvent {
    /// Time until the next event fires
    pub duration: Duration,
    /// Instrument to trigger
    pub instrument: InstrumentKind,
    /// Parameter snapshot taken at flatten time
    pub params: HashMap<String, f64>,
    /// Segment this event came from
    pub addr: SegmentAddr,
}

/// Flatten a repeat set into playback order at the given tempo
pub fn flatten(set: &RepeatSet, tempo: Tempo) -> Vec<FlatEvent> {
    let seconds_per_beat = tempo.seconds_per_beat();
    let mut events = Vec::new();

    for (repeat_index, repeat) in set.repeats().iter().enumerate() {
        for (slot_index, slot) in repeat.iter().enumerate() {
            if slot.is_subdivided() {
                for (child_index, child) in slot.children().iter().enumerate() {
                    events.push(FlatEvent {
                        duration: Duration::from_secs_f64(
                            child.fraction().value() * seconds_per_beat,
                        ),
                        instrument: child.instrument(),
                        params: child.params().clone(),
                        addr: SegmentAddr::child(repeat_index, slot_index, child_index),
                    });
                }
            } else {
                events.push(FlatEvent {
                    duration: Duration::from_secs_f64(
                        slot.fraction().value() * seconds_per_beat,
                    ),
                    instrument: slot.instrument(),
                    params: slot.params().clone(),
                    addr: SegmentAddr::slot(repeat_index, slot_index),
                });
            }
        }
    }

    events
}

/// Total play time of a flattened event list
pub fn total_duration(events: &[FlatEvent]) -> Duration {
    events.iter().map(|e| e.duration).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{parse_pattern, RepeatSet, REPEAT_COUNT};

    fn set_from(pattern: &str) -> RepeatSet {
        RepeatSet::from_slots(parse_pattern(pattern, &InstrumentKind::ALL).unwrap())
    }

    #[test]
    fn test_four_quarters_at_120() {
        let set = set_from("1/4, 1/4, 1/4, 1/4");
        let events = flatten(&set, Tempo::new(120.0));

        assert_eq!(events.len(), 16);
        for event in &events {
            assert_eq!(event.duration, Duration::from_millis(125));
        }
        assert_eq!(total_duration(&events), Duration::from_secs(2));
    }

    #[test]
    fn test_repeat_major_order() {
        let set = set_from("1/4, 1/8");
        let events = flatten(&set, Tempo::default());

        assert_eq!(events.len(), 2 * REPEAT_COUNT);
        assert_eq!(events[0].addr, SegmentAddr::slot(0, 0));
        assert_eq!(events[1].addr, SegmentAddr::slot(0, 1));
        assert_eq!(events[2].addr, SegmentAddr::slot(1, 0));
        assert_eq!(events[7].addr, SegmentAddr::slot(3, 1));
    }

    #[test]
    fn test_subdivided_slot_emits_children_only() {
        let mut set = set_from("1/4, 1/4");
        set.segment_mut(SegmentAddr::slot(0, 0)).unwrap().subdivide();

        let events = flatten(&set, Tempo::new(120.0));

        // First slot of repeat zero became two eighth events
        assert_eq!(events.len(), 9);
        assert_eq!(events[0].addr, SegmentAddr::child(0, 0, 0));
        assert_eq!(events[0].duration, Duration::from_micros(62_500));
        assert_eq!(events[1].addr, SegmentAddr::child(0, 0, 1));
        assert_eq!(events[2].addr, SegmentAddr::slot(0, 1));

        // Subdividing never changes the total play time
        assert_eq!(total_duration(&events), Duration::from_secs(1));
    }

    #[test]
    fn test_params_are_snapshots() {
        let mut set = set_from("1/4");
        let events = flatten(&set, Tempo::default());

        set.segment_mut(SegmentAddr::slot(0, 0))
            .unwrap()
            .set_param("volume", 0.0);

        assert_eq!(events[0].params["volume"], 0.8);
    }

    #[test]
    fn test_instruments_carried_through() {
        let set = set_from("1/4, 1/4, 1/4");
        let events = flatten(&set, Tempo::default());

        assert_eq!(events[0].instrument, InstrumentKind::Kick);
        assert_eq!(events[1].instrument, InstrumentKind::Bass);
        assert_eq!(events[2].instrument, InstrumentKind::Snare);
        // Rotation restarts nowhere: repeat one replays the same slots
        assert_eq!(events[3].instrument, InstrumentKind::Kick);
    }
}
