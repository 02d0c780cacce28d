// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Built-in timbre presets for each instrument kind.
//!
//! A preset is a named set of parameter values inside the schema
//! ranges. Applying one overwrites the named parameters on every
//! segment of that kind; parameters a preset does not name keep
//! their current values.

use super::InstrumentKind;

/// A named parameter assignment for one instrument kind
#[derive(Debug, Clone, PartialEq)]
pub struct TimbrePreset {
    /// Preset name
    pub name: String,
    /// Parameter values in declaration order
    pub params: Vec<(String, f64)>,
}

impl TimbrePreset {
    /// Create an empty preset
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Builder: add a parameter value
    pub fn param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.push((name.into(), value));
        self
    }

    /// Look up a parameter value by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

/// Built-in presets for a kind
pub fn builtin(kind: InstrumentKind) -> Vec<TimbrePreset> {
    match kind {
        InstrumentKind::Kick => kick_presets(),
        InstrumentKind::Bass => bass_presets(),
        InstrumentKind::Snare => snare_presets(),
        InstrumentKind::HiHat => hihat_presets(),
        InstrumentKind::Clap => clap_presets(),
    }
}

/// Find a built-in preset by name
pub fn find(kind: InstrumentKind, name: &str) -> Option<TimbrePreset> {
    builtin(kind).into_iter().find(|p| p.name == name)
}

/// Kick presets
pub fn kick_presets() -> Vec<TimbrePreset> {
    vec![
        TimbrePreset::new("Standard")
            .param("initial_freq", 100.0)
            .param("freq_decay", 0.5)
            .param("duration", 0.3)
            .param("volume", 0.8),
        TimbrePreset::new("Deep")
            .param("initial_freq", 60.0)
            .param("freq_decay", 1.2)
            .param("duration", 0.6)
            .param("volume", 0.9),
        TimbrePreset::new("Punchy")
            .param("initial_freq", 160.0)
            .param("freq_decay", 0.25)
            .param("duration", 0.15)
            .param("volume", 0.8),
        TimbrePreset::new("Boomy")
            .param("initial_freq", 80.0)
            .param("freq_decay", 1.8)
            .param("duration", 0.9)
            .param("volume", 0.85),
    ]
}

/// Bass presets
pub fn bass_presets() -> Vec<TimbrePreset> {
    vec![
        TimbrePreset::new("Standard")
            .param("initial_freq", 238.0)
            .param("freq_decay", 200.0)
            .param("duration", 500.0)
            .param("click_level", 11.0)
            .param("click_duration", 37.0)
            .param("volume", 0.7),
        TimbrePreset::new("Sub")
            .param("initial_freq", 60.0)
            .param("freq_decay", 400.0)
            .param("duration", 900.0)
            .param("click_level", 4.0)
            .param("click_duration", 15.0)
            .param("volume", 0.8),
        TimbrePreset::new("Knock")
            .param("initial_freq", 320.0)
            .param("freq_decay", 90.0)
            .param("duration", 250.0)
            .param("click_level", 40.0)
            .param("click_duration", 60.0)
            .param("volume", 0.7),
    ]
}

/// Snare presets
pub fn snare_presets() -> Vec<TimbrePreset> {
    vec![
        TimbrePreset::new("Standard")
            .param("initial_freq", 238.0)
            .param("freq_decay", 200.0)
            .param("duration", 500.0)
            .param("noise_level", 0.5)
            .param("noise_duration", 0.3)
            .param("tone_level", 0.3)
            .param("tone_duration", 0.2)
            .param("volume", 0.7),
        TimbrePreset::new("Crisp")
            .param("initial_freq", 300.0)
            .param("freq_decay", 120.0)
            .param("duration", 250.0)
            .param("noise_level", 0.8)
            .param("noise_duration", 0.15)
            .param("tone_level", 0.15)
            .param("tone_duration", 0.1)
            .param("volume", 0.7),
        TimbrePreset::new("Fat")
            .param("initial_freq", 180.0)
            .param("freq_decay", 320.0)
            .param("duration", 700.0)
            .param("noise_level", 0.6)
            .param("noise_duration", 0.5)
            .param("tone_level", 0.5)
            .param("tone_duration", 0.35)
            .param("volume", 0.75),
    ]
}

/// Hi-hat presets
pub fn hihat_presets() -> Vec<TimbrePreset> {
    vec![
        TimbrePreset::new("Closed")
            .param("noise_level", 11.0)
            .param("noise_duration", 37.0)
            .param("volume", 0.7),
        TimbrePreset::new("Open")
            .param("noise_level", 25.0)
            .param("noise_duration", 90.0)
            .param("volume", 0.6),
        TimbrePreset::new("Soft")
            .param("noise_level", 6.0)
            .param("noise_duration", 25.0)
            .param("volume", 0.4),
    ]
}

/// Clap presets
pub fn clap_presets() -> Vec<TimbrePreset> {
    vec![
        TimbrePreset::new("Standard")
            .param("spacing", 0.01)
            .param("decay", 0.06)
            .param("reverb_decay", 0.5)
            .param("filter_freq", 3000.0)
            .param("filter_q", 0.1)
            .param("volume", 0.7),
        TimbrePreset::new("Tight")
            .param("spacing", 0.006)
            .param("decay", 0.03)
            .param("reverb_decay", 0.25)
            .param("filter_freq", 4500.0)
            .param("filter_q", 0.2)
            .param("volume", 0.7),
        TimbrePreset::new("Roomy")
            .param("spacing", 0.02)
            .param("decay", 0.12)
            .param("reverb_decay", 0.9)
            .param("filter_freq", 2000.0)
            .param("filter_q", 0.1)
            .param("volume", 0.75),
    ]
}
