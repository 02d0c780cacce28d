// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The sequencer facade.
//!
//! [`Sequencer`] owns the pattern tree, scheduler, instrument
//! registry, catalog, and RNG, and exposes the whole control surface:
//! pattern selection, transport, tempo, and every mutation. Mutations
//! issued while playing follow the restart protocol: stop, apply,
//! re-flatten, then restart from the top after a short pause so the
//! new structure never takes effect mid-stride.

use std::collections::HashSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::catalog::PatternCatalog;
use crate::config::SequencerConfig;
use crate::instrument::{presets, InstrumentError, InstrumentKind, InstrumentRegistry};
use crate::pattern::{
    humanized_params, parse_pattern, randomize_segment_params, randomize_structure, BeatSegment,
    RepeatSet, SegmentAddr,
};
use crate::timing::{flatten, Clock, FlatEvent, Tempo, WallClock};

use super::{EngineError, PlaybackScheduler, TransportState};

/// The rhythm sequencer engine
pub struct Sequencer<C: Clock = WallClock> {
    /// Engine settings
    config: SequencerConfig,
    /// Instrument schemas and voices
    registry: InstrumentRegistry,
    /// Named pattern bank
    catalog: PatternCatalog,
    /// Time source for the scheduler and restart deadline
    clock: C,
    /// The pattern as parsed, kept for reset
    original: Vec<BeatSegment>,
    /// Live repeat set the mutations edit
    set: RepeatSet,
    /// Playback state machine
    scheduler: PlaybackScheduler,
    /// Current tempo
    tempo: Tempo,
    /// Kinds with trigger-time humanize enabled
    humanize: HashSet<InstrumentKind>,
    /// Deadline of a pending post-edit restart
    restart_at: Option<Duration>,
    /// RNG for randomize and humanize draws
    rng: StdRng,
}

impl Sequencer<WallClock> {
    /// Engine with default config, built-in catalog, and a wall clock
    pub fn new() -> Self {
        Self::with_config(SequencerConfig::default())
    }

    /// Engine with the given config and a wall clock
    pub fn with_config(config: SequencerConfig) -> Self {
        Self::with_clock(config, WallClock::new())
    }
}

impl Default for Sequencer<WallClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Sequencer<C> {
    /// Engine with the given config and clock
    pub fn with_clock(config: SequencerConfig, clock: C) -> Self {
        let tempo = Tempo::new(config.tempo);
        let humanize = config.humanize.iter().copied().collect();
        Self {
            registry: InstrumentRegistry::with_defaults(),
            catalog: PatternCatalog::builtin(),
            clock,
            original: Vec::new(),
            set: RepeatSet::default(),
            scheduler: PlaybackScheduler::new(),
            tempo,
            humanize,
            restart_at: None,
            rng: StdRng::from_entropy(),
            config,
        }
    }

    /// Reseed the RNG (tests and reproducible randomization)
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// The instrument registry
    pub fn registry(&self) -> &InstrumentRegistry {
        &self.registry
    }

    /// Mutable registry access, for installing voices
    pub fn registry_mut(&mut self) -> &mut InstrumentRegistry {
        &mut self.registry
    }

    /// The pattern catalog
    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// The engine settings
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// The clock, mutable so tests can step a manual clock
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The live repeat set
    pub fn repeat_set(&self) -> &RepeatSet {
        &self.set
    }

    /// Look up a live segment by address
    pub fn segment(&self, addr: SegmentAddr) -> Option<&BeatSegment> {
        self.set.segment(addr)
    }

    /// The flattened event list in playback order
    pub fn events(&self) -> &[FlatEvent] {
        self.scheduler.events()
    }

    /// Index of the most recently fired event
    pub fn cursor(&self) -> usize {
        self.scheduler.cursor()
    }

    /// Current tempo
    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Transport state; a pending restart counts as playing
    pub fn transport(&self) -> TransportState {
        if self.is_playing() {
            TransportState::Playing
        } else {
            TransportState::Stopped
        }
    }

    /// Check whether playback is running or about to restart
    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing() || self.restart_at.is_some()
    }

    /// Parse a pattern string and install it, replacing any previous
    /// pattern and stopping playback
    pub fn load_pattern(&mut self, text: &str) -> Result<(), EngineError> {
        let slots = parse_pattern(text, &self.config.instrument_order)?;
        info!(pattern = text, slots = slots.len(), "pattern loaded");
        self.original = slots.clone();
        self.set = RepeatSet::with_repeats(slots, self.config.repeat_count);
        self.restart_at = None;
        self.reflatten();
        Ok(())
    }

    /// Load a pattern from the catalog by name
    pub fn select_pattern(&mut self, name: &str) -> Result<(), EngineError> {
        let entry = self
            .catalog
            .get(name)
            .ok_or_else(|| EngineError::UnknownPattern(name.to_string()))?;
        let pattern = entry.pattern.clone();
        self.load_pattern(&pattern)
    }

    /// Start playback from the top. Fires event zero immediately; a
    /// no-op when there is nothing to play.
    pub fn start(&mut self) {
        self.restart_at = None;
        let now = self.clock.now();
        if let Some(index) = self.scheduler.start(now) {
            info!(events = self.scheduler.events().len(), "transport started");
            self.fire(index);
        }
    }

    /// Stop playback, cancelling the pending advance and any pending
    /// post-edit restart
    pub fn stop(&mut self) {
        if self.is_playing() {
            info!("transport stopped");
        }
        self.restart_at = None;
        self.scheduler.stop();
    }

    /// Set the tempo, clamped; takes effect through the restart
    /// protocol when playing
    pub fn set_tempo(&mut self, bpm: f64) {
        let resume = self.begin_edit();
        self.tempo.set_bpm(bpm);
        info!(bpm = self.tempo.bpm(), "tempo set");
        self.finish_edit(resume);
    }

    /// Toggle the addressed slot between whole and subdivided.
    /// Children cannot be toggled, only whole slots.
    pub fn toggle_subdivision(&mut self, addr: SegmentAddr) -> Result<(), EngineError> {
        let resume = self.begin_edit();
        let result = self.apply_toggle(addr);
        self.finish_edit(resume);
        result
    }

    /// Reassign the addressed segment's instrument, reseeding its
    /// parameters. A whole subdivided slot carries its children along.
    pub fn reassign_instrument(
        &mut self,
        addr: SegmentAddr,
        kind: InstrumentKind,
    ) -> Result<(), EngineError> {
        let resume = self.begin_edit();
        let result = self.apply_reassign(addr, kind);
        self.finish_edit(resume);
        result
    }

    /// Reassign by instrument name; unknown names leave the segment
    /// untouched
    pub fn reassign_instrument_by_name(
        &mut self,
        addr: SegmentAddr,
        name: &str,
    ) -> Result<(), EngineError> {
        let kind: InstrumentKind = name.parse().map_err(EngineError::Instrument)?;
        self.reassign_instrument(addr, kind)
    }

    /// Set one parameter on the addressed segment. Unknown names are
    /// rejected; out-of-range values are clamped silently.
    pub fn set_parameter(
        &mut self,
        addr: SegmentAddr,
        name: &str,
        value: f64,
    ) -> Result<(), EngineError> {
        let resume = self.begin_edit();
        let result = self.apply_set_parameter(addr, name, value);
        self.finish_edit(resume);
        result
    }

    /// Run the random structure cascade over every slot of every
    /// repeat
    pub fn randomize_structure(&mut self) {
        let resume = self.begin_edit();
        let kinds = self.registry.order().to_vec();
        randomize_structure(&mut self.set, &kinds, &mut self.rng);
        debug!("structure randomized");
        self.finish_edit(resume);
    }

    /// Redraw every parameter of the addressed segment uniformly in
    /// its schema ranges
    pub fn randomize_parameters(&mut self, addr: SegmentAddr) -> Result<(), EngineError> {
        let resume = self.begin_edit();
        let result = match self.set.segment_mut(addr) {
            Some(segment) => {
                randomize_segment_params(segment, &mut self.rng);
                Ok(())
            }
            None => Err(EngineError::SegmentOutOfRange(addr)),
        };
        self.finish_edit(resume);
        result
    }

    /// Apply a named built-in preset to every segment of that kind,
    /// children included, in all repeats
    pub fn apply_preset(&mut self, kind: InstrumentKind, name: &str) -> Result<(), EngineError> {
        let resume = self.begin_edit();
        let result = self.apply_preset_inner(kind, name);
        self.finish_edit(resume);
        result
    }

    /// Apply a uniformly random built-in preset to each kind
    pub fn randomize_presets(&mut self) {
        let resume = self.begin_edit();
        for kind in self.registry.order().to_vec() {
            let bank = presets::builtin(kind);
            if bank.is_empty() {
                continue;
            }
            let preset = &bank[self.rng.gen_range(0..bank.len())];
            debug!(instrument = %kind, preset = %preset.name, "random preset");
            apply_preset_to_set(&mut self.set, kind, preset);
        }
        self.finish_edit(resume);
    }

    /// Enable or disable trigger-time humanize for a kind
    pub fn set_humanize(&mut self, kind: InstrumentKind, enabled: bool) {
        if enabled {
            self.humanize.insert(kind);
        } else {
            self.humanize.remove(&kind);
        }
    }

    /// Check whether humanize is enabled for a kind
    pub fn humanize_enabled(&self, kind: InstrumentKind) -> bool {
        self.humanize.contains(&kind)
    }

    /// Restore the repeat set to fresh clones of the original parse,
    /// discarding every live edit
    pub fn reset_to_original(&mut self) {
        let resume = self.begin_edit();
        info!("pattern reset to original");
        self.set = RepeatSet::with_repeats(self.original.clone(), self.config.repeat_count);
        self.finish_edit(resume);
    }

    /// One-shot pad trigger with schema defaults, independent of the
    /// transport; never touches the cursor or the armed deadline
    pub fn trigger_pad(&mut self, kind: InstrumentKind) {
        let Some(schema) = self.registry.schema(kind) else {
            return;
        };
        let params = schema.defaults();
        debug!(instrument = %kind, "pad trigger");
        if self.humanize.contains(&kind) {
            let params = humanized_params(&params, schema, self.config.humanize_amount, &mut self.rng);
            self.registry.trigger(kind, &params);
        } else {
            self.registry.trigger(kind, &params);
        }
    }

    /// Drive the engine: resolve a due pending restart, then fire
    /// every event whose deadline has passed. Returns the indices
    /// fired by this call.
    pub fn poll(&mut self) -> Vec<usize> {
        let now = self.clock.now();
        let mut fired = Vec::new();

        if let Some(at) = self.restart_at {
            if now >= at {
                self.restart_at = None;
                if let Some(index) = self.scheduler.start(now) {
                    debug!("restarted after edit");
                    fired.push(index);
                }
            }
        }

        fired.extend(self.scheduler.poll(now));
        for &index in &fired {
            self.fire(index);
        }
        fired
    }

    /// Time until the engine next needs a poll; None when idle
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        match self.restart_at {
            Some(at) => Some(at.saturating_sub(now)),
            None => self.scheduler.time_until_next(now),
        }
    }

    /// Capture playback state and halt before an edit
    fn begin_edit(&mut self) -> bool {
        let resume = self.is_playing();
        self.scheduler.stop();
        self.restart_at = None;
        resume
    }

    /// Re-flatten after an edit and, when playback was running,
    /// schedule the delayed restart
    fn finish_edit(&mut self, resume: bool) {
        self.reflatten();
        if resume {
            let delay = Duration::from_millis(self.config.restart_delay_ms);
            self.restart_at = Some(self.clock.now() + delay);
            debug!(delay_ms = self.config.restart_delay_ms, "restart scheduled");
        }
    }

    /// Rebuild the scheduler's event list from the live tree
    fn reflatten(&mut self) {
        self.scheduler.set_events(flatten(&self.set, self.tempo));
    }

    fn apply_toggle(&mut self, addr: SegmentAddr) -> Result<(), EngineError> {
        if addr.child.is_some() {
            return Err(EngineError::SegmentOutOfRange(addr));
        }
        let segment = self
            .set
            .segment_mut(addr)
            .ok_or(EngineError::SegmentOutOfRange(addr))?;
        segment.toggle_subdivision();
        debug!(addr = %addr, subdivided = segment.is_subdivided(), "subdivision toggled");
        Ok(())
    }

    fn apply_reassign(&mut self, addr: SegmentAddr, kind: InstrumentKind) -> Result<(), EngineError> {
        let segment = self
            .set
            .segment_mut(addr)
            .ok_or(EngineError::SegmentOutOfRange(addr))?;
        segment.set_instrument(kind);
        if addr.child.is_none() {
            for child in segment.children_mut() {
                child.set_instrument(kind);
            }
        }
        debug!(addr = %addr, instrument = %kind, "instrument reassigned");
        Ok(())
    }

    fn apply_set_parameter(
        &mut self,
        addr: SegmentAddr,
        name: &str,
        value: f64,
    ) -> Result<(), EngineError> {
        let segment = self
            .set
            .segment_mut(addr)
            .ok_or(EngineError::SegmentOutOfRange(addr))?;
        let instrument = segment.instrument();
        let schema = self
            .registry
            .schema(instrument)
            .ok_or_else(|| {
                EngineError::Instrument(InstrumentError::UnknownInstrument(instrument.to_string()))
            })?;
        let spec = schema.get(name).ok_or_else(|| {
            EngineError::Instrument(InstrumentError::UnknownParameter {
                instrument,
                name: name.to_string(),
            })
        })?;
        let clamped = spec.clamp(value);
        if clamped != value {
            debug!(addr = %addr, param = name, value, clamped, "parameter clamped");
        }
        segment.set_param(name, clamped);
        Ok(())
    }

    fn apply_preset_inner(&mut self, kind: InstrumentKind, name: &str) -> Result<(), EngineError> {
        let preset = presets::find(kind, name).ok_or_else(|| {
            EngineError::Instrument(InstrumentError::UnknownPreset {
                instrument: kind,
                name: name.to_string(),
            })
        })?;
        info!(instrument = %kind, preset = name, "preset applied");
        apply_preset_to_set(&mut self.set, kind, &preset);
        Ok(())
    }

    /// Trigger one flattened event through its voice, humanized when
    /// the kind's toggle is on
    fn fire(&mut self, index: usize) {
        let Some(event) = self.scheduler.events().get(index) else {
            return;
        };
        let kind = event.instrument;
        if self.humanize.contains(&kind) {
            if let Some(schema) = self.registry.schema(kind) {
                let params =
                    humanized_params(&event.params, schema, self.config.humanize_amount, &mut self.rng);
                self.registry.trigger(kind, &params);
                return;
            }
        }
        self.registry.trigger(kind, &event.params);
    }
}

/// Overwrite a preset's parameters on every matching segment
fn apply_preset_to_set(set: &mut RepeatSet, kind: InstrumentKind, preset: &presets::TimbrePreset) {
    for repeat in set.repeats_mut() {
        for slot in repeat.iter_mut() {
            apply_preset_to_segment(slot, kind, preset);
            for child in slot.children_mut() {
                apply_preset_to_segment(child, kind, preset);
            }
        }
    }
}

fn apply_preset_to_segment(
    segment: &mut BeatSegment,
    kind: InstrumentKind,
    preset: &presets::TimbrePreset,
) {
    if segment.instrument() != kind {
        return;
    }
    for (name, value) in &preset.params {
        segment.set_param(name.clone(), *value);
    }
}
