// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for SUBBEAT
//!
//! These tests verify that multiple components work together correctly
//! through the public API, driving the engine against a manual clock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use subbeat::pattern::{parse_pattern, randomize_structure, RepeatSet, SegmentAddr};
use subbeat::timing::{flatten, total_duration};
use subbeat::{
    InstrumentKind, ManualClock, PatternCatalog, Sequencer, SequencerConfig, Tempo, Voice,
    REPEAT_COUNT,
};

/// Voice that records every trigger it receives
#[derive(Clone, Default)]
struct CaptureVoice {
    hits: Arc<Mutex<Vec<InstrumentKind>>>,
}

impl Voice for CaptureVoice {
    fn trigger(&self, kind: InstrumentKind, _params: &HashMap<String, f64>) {
        self.hits.lock().unwrap().push(kind);
    }
}

impl CaptureVoice {
    fn count(&self) -> usize {
        self.hits.lock().unwrap().len()
    }
}

fn engine() -> (Sequencer<ManualClock>, CaptureVoice) {
    let mut seq = Sequencer::with_clock(SequencerConfig::default(), ManualClock::new());
    seq.seed_rng(99);
    let voice = CaptureVoice::default();
    for kind in InstrumentKind::ALL {
        seq.registry_mut().set_voice(kind, Box::new(voice.clone()));
    }
    (seq, voice)
}

fn advance(seq: &mut Sequencer<ManualClock>, millis: u64) {
    seq.clock_mut().advance(Duration::from_millis(millis));
}

/// Pattern "1/4, 1/4, 1/4, 1/4" at 120 BPM: sixteen events of 0.125 s,
/// 0.5 s per repeat, 2.0 s for the full four-repeat loop
#[test]
fn test_four_quarters_at_120_end_to_end() {
    let slots = parse_pattern("1/4, 1/4, 1/4, 1/4", &[]).unwrap();
    let set = RepeatSet::from_slots(slots);
    let events = flatten(&set, Tempo::new(120.0));

    assert_eq!(events.len(), 16);
    for event in &events {
        assert_eq!(event.duration, Duration::from_millis(125));
    }
    assert_eq!(total_duration(&events), Duration::from_secs(2));
}

/// Flattened duration equals the parsed fraction sum at 60 BPM with
/// one repeat
#[test]
fn test_parse_round_trip_duration() {
    for pattern in ["1/4, 1/8, 1/8", "3/8, 1/4", "1.5, 1/2", "1/16"] {
        let slots = parse_pattern(pattern, &[]).unwrap();
        let expected: f64 = slots.iter().map(|s| s.fraction().value()).sum();

        let set = RepeatSet::with_repeats(slots, 1);
        let events = flatten(&set, Tempo::new(60.0));

        let total = total_duration(&events).as_secs_f64();
        assert!(
            (total - expected).abs() < 1e-9,
            "'{}' played {} s, expected {}",
            pattern,
            total,
            expected
        );
    }
}

/// Durations 0.1, 0.2, 0.3 s: by t = 0.61 s exactly four triggers
/// have fired, at cursors 0, 1, 2, 0
#[test]
fn test_scheduler_trace_through_engine() {
    // 1/10, 1/5, 3/10 of a beat at 60 BPM and one repeat give event
    // durations of exactly 0.1, 0.2, 0.3 s
    let config = SequencerConfig {
        repeat_count: 1,
        ..Default::default()
    };
    let mut seq = Sequencer::with_clock(config, ManualClock::new());
    let voice = CaptureVoice::default();
    for kind in InstrumentKind::ALL {
        seq.registry_mut().set_voice(kind, Box::new(voice.clone()));
    }
    seq.load_pattern("1/10, 1/5, 3/10").unwrap();
    assert_eq!(seq.events().len(), 3);
    assert_eq!(seq.events()[0].duration, Duration::from_millis(100));
    assert_eq!(seq.events()[1].duration, Duration::from_millis(200));
    assert_eq!(seq.events()[2].duration, Duration::from_millis(300));

    seq.start();
    assert_eq!(seq.cursor(), 0);

    advance(&mut seq, 610);
    let fired = seq.poll();

    assert_eq!(fired, vec![1, 2, 0]);
    assert_eq!(voice.count(), 4);
    assert_eq!(seq.cursor(), 0);
}

/// stop() immediately after start() leaves exactly one trigger, even
/// after waiting past the first event's duration
#[test]
fn test_stop_cancels_pending_advance() {
    let (mut seq, voice) = engine();
    seq.load_pattern("1/4, 1/4").unwrap();

    seq.start();
    seq.stop();

    advance(&mut seq, 10_000);
    assert!(seq.poll().is_empty());
    assert_eq!(voice.count(), 1);
    assert!(!seq.is_playing());
}

/// A mutation during playback stops, pauses 300 ms, then restarts the
/// new structure from the top
#[test]
fn test_restart_protocol_timing() {
    let (mut seq, voice) = engine();
    seq.load_pattern("1/4, 1/4").unwrap();
    seq.start();

    advance(&mut seq, 250);
    seq.poll();
    assert_eq!(voice.count(), 2);

    seq.toggle_subdivision(SegmentAddr::slot(0, 1)).unwrap();
    assert!(seq.is_playing());

    // Silence through the pause window
    advance(&mut seq, 299);
    assert!(seq.poll().is_empty());
    assert_eq!(voice.count(), 2);

    // Restart fires from cursor 0 of the re-flattened sequence
    advance(&mut seq, 1);
    assert_eq!(seq.poll(), vec![0]);
    assert_eq!(seq.events().len(), 9);

    // The new structure keeps playing normally afterwards
    advance(&mut seq, 250);
    assert_eq!(seq.poll(), vec![1]);
}

/// Flatten output stays in 1:1 correspondence with the visual slots
#[test]
fn test_flatten_visual_correspondence() {
    let (mut seq, _voice) = engine();
    seq.load_pattern("1/4, 1/8, 1/8").unwrap();

    seq.toggle_subdivision(SegmentAddr::slot(1, 0)).unwrap();
    seq.toggle_subdivision(SegmentAddr::slot(3, 2)).unwrap();

    let mut expected = 0;
    for repeat in seq.repeat_set().repeats() {
        for slot in repeat {
            expected += if slot.is_subdivided() {
                slot.children().len()
            } else {
                1
            };
        }
    }
    assert_eq!(seq.events().len(), expected);
    assert_eq!(expected, 3 * REPEAT_COUNT + 2);
}

/// Over 10,000 trials the subdivision toggle rate sits near 33%
#[test]
fn test_randomize_structure_rate() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(2024);
    let trials = 10_000;
    let mut toggled = 0;

    for _ in 0..trials {
        let slots = parse_pattern("1/4", &[InstrumentKind::Kick]).unwrap();
        let mut set = RepeatSet::with_repeats(slots, 1);
        randomize_structure(&mut set, &InstrumentKind::ALL, &mut rng);
        if set.segment(SegmentAddr::slot(0, 0)).unwrap().is_subdivided() {
            toggled += 1;
        }
    }

    let rate = toggled as f64 / trials as f64;
    assert!(
        (rate - 0.33).abs() < 0.02,
        "toggle rate {} too far from 0.33",
        rate
    );
}

/// Catalog selection feeds the engine and the totals match the labels
#[test]
fn test_catalog_selection_and_labels() {
    let (mut seq, _voice) = engine();

    seq.select_pattern("Compound Nine").unwrap();
    assert_eq!(seq.events().len(), 9 * REPEAT_COUNT);

    let entry = seq.catalog().get("Compound Nine").unwrap();
    assert_eq!(entry.total_beats, 4.5);
    assert_eq!(subbeat::time_signature_label(entry.total_beats), "9/8");
}

/// Config YAML round-trips through a real file
#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subbeat.yaml");

    let config = SequencerConfig {
        tempo: 96.0,
        restart_delay_ms: 200,
        humanize: vec![InstrumentKind::Snare],
        ..Default::default()
    };
    config.save(&path).unwrap();

    let loaded = SequencerConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

/// Catalog YAML round-trips through a real file
#[test]
fn test_catalog_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patterns.yaml");

    let catalog = PatternCatalog::builtin();
    catalog.save(&path).unwrap();

    let loaded = PatternCatalog::load(&path).unwrap();
    assert_eq!(loaded, catalog);
    assert!(loaded.get("Take Five").is_some());
}

/// Reset during playback follows the restart protocol and discards
/// every structural edit
#[test]
fn test_reset_during_playback() {
    let (mut seq, _voice) = engine();
    seq.load_pattern("1/4, 1/4").unwrap();
    seq.toggle_subdivision(SegmentAddr::slot(0, 0)).unwrap();
    seq.toggle_subdivision(SegmentAddr::slot(1, 0)).unwrap();
    assert_eq!(seq.events().len(), 10);

    seq.start();
    seq.reset_to_original();

    assert_eq!(seq.events().len(), 8);
    assert!(seq.is_playing());

    advance(&mut seq, 300);
    assert_eq!(seq.poll(), vec![0]);
}
