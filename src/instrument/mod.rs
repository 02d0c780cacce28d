// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Instrument registry, parameter schemas, and trigger voices.
//!
//! Each instrument kind declares a schema of named parameters with
//! ranges, defaults, and display labels. Triggering goes through the
//! [`Voice`] trait and is fire-and-forget: the engine never waits on
//! or hears back from a voice.

pub mod presets;

pub use presets::TimbrePreset;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from instrument, parameter, and preset lookups
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstrumentError {
    /// Name does not match any instrument kind
    #[error("unknown instrument '{0}'")]
    UnknownInstrument(String),
    /// Parameter name is not in the instrument's schema
    #[error("unknown parameter '{name}' for {instrument}")]
    UnknownParameter {
        /// Instrument whose schema was consulted
        instrument: InstrumentKind,
        /// The unmatched parameter name
        name: String,
    },
    /// Preset name is not in the instrument's bank
    #[error("unknown preset '{name}' for {instrument}")]
    UnknownPreset {
        /// Instrument whose bank was consulted
        instrument: InstrumentKind,
        /// The unmatched preset name
        name: String,
    },
}

/// The built-in percussion instrument kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// Pitched kick drum
    Kick,
    /// Synth bass hit
    Bass,
    /// Noise-plus-tone snare
    Snare,
    /// Filtered-noise hi-hat
    HiHat,
    /// Layered hand clap
    Clap,
}

impl InstrumentKind {
    /// All kinds, in the default round-robin assignment order
    pub const ALL: [InstrumentKind; 5] = [
        InstrumentKind::Kick,
        InstrumentKind::Bass,
        InstrumentKind::Snare,
        InstrumentKind::HiHat,
        InstrumentKind::Clap,
    ];

    /// Lowercase name used in patterns, config, and logs
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentKind::Kick => "kick",
            InstrumentKind::Bass => "bass",
            InstrumentKind::Snare => "snare",
            InstrumentKind::HiHat => "hihat",
            InstrumentKind::Clap => "clap",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InstrumentKind {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kick" => Ok(InstrumentKind::Kick),
            "bass" => Ok(InstrumentKind::Bass),
            "snare" => Ok(InstrumentKind::Snare),
            "hihat" => Ok(InstrumentKind::HiHat),
            "clap" => Ok(InstrumentKind::Clap),
            other => Err(InstrumentError::UnknownInstrument(other.to_string())),
        }
    }
}

/// Schema entry for a single sound parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Parameter name
    pub name: String,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Default value
    pub default: f64,
    /// Display label
    pub label: String,
}

impl ParamSpec {
    /// Create a new spec with the label defaulting to the name
    pub fn new(name: impl Into<String>, min: f64, max: f64, default: f64) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            min,
            max,
            default,
        }
    }

    /// Set the display label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Clamp a value into this parameter's range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Width of the parameter range
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Ordered parameter schema for one instrument kind
#[derive(Debug, Clone, Default)]
pub struct ParamSchema {
    /// Specs by parameter name
    specs: HashMap<String, ParamSpec>,
    /// Declaration order for iteration
    order: Vec<String>,
}

impl ParamSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self {
            specs: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Builder: add a spec
    pub fn with_spec(mut self, spec: ParamSpec) -> Self {
        self.register(spec);
        self
    }

    /// Add a spec, keeping declaration order
    pub fn register(&mut self, spec: ParamSpec) {
        let name = spec.name.clone();
        self.specs.insert(name.clone(), spec);
        if !self.order.contains(&name) {
            self.order.push(name);
        }
    }

    /// Get a spec by name
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.get(name)
    }

    /// Check whether a parameter exists
    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Iterate over specs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ParamSpec> {
        self.order.iter().filter_map(|name| self.specs.get(name))
    }

    /// Parameter names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Fresh map of every parameter at its default value
    pub fn defaults(&self) -> HashMap<String, f64> {
        self.specs
            .iter()
            .map(|(name, spec)| (name.clone(), spec.default))
            .collect()
    }

    /// Clamp a value into a named parameter's range
    pub fn clamp(&self, name: &str, value: f64) -> Option<f64> {
        self.specs.get(name).map(|spec| spec.clamp(value))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Build the kick drum schema
pub fn kick_schema() -> ParamSchema {
    ParamSchema::new()
        .with_spec(ParamSpec::new("initial_freq", 50.0, 200.0, 100.0).label("Initial Frequency"))
        .with_spec(ParamSpec::new("freq_decay", 0.1, 2.0, 0.5).label("Frequency Decay"))
        .with_spec(ParamSpec::new("duration", 0.1, 1.0, 0.3).label("Duration"))
        .with_spec(ParamSpec::new("volume", 0.0, 1.0, 0.8).label("Volume"))
}

/// Build the bass schema
pub fn bass_schema() -> ParamSchema {
    ParamSchema::new()
        .with_spec(ParamSpec::new("initial_freq", 50.0, 500.0, 238.0).label("Frequency"))
        .with_spec(ParamSpec::new("freq_decay", 50.0, 500.0, 200.0).label("Decay"))
        .with_spec(ParamSpec::new("duration", 100.0, 1000.0, 500.0).label("Duration"))
        .with_spec(ParamSpec::new("click_level", 0.0, 100.0, 11.0).label("Click Level"))
        .with_spec(ParamSpec::new("click_duration", 10.0, 100.0, 37.0).label("Click Duration"))
        .with_spec(ParamSpec::new("volume", 0.0, 1.0, 0.7).label("Volume"))
}

/// Build the snare schema
pub fn snare_schema() -> ParamSchema {
    ParamSchema::new()
        .with_spec(ParamSpec::new("initial_freq", 50.0, 500.0, 238.0).label("Frequency"))
        .with_spec(ParamSpec::new("freq_decay", 50.0, 500.0, 200.0).label("Decay"))
        .with_spec(ParamSpec::new("duration", 100.0, 1000.0, 500.0).label("Duration"))
        .with_spec(ParamSpec::new("noise_level", 0.0, 1.0, 0.5).label("Noise Level"))
        .with_spec(ParamSpec::new("noise_duration", 0.1, 1.0, 0.3).label("Noise Duration"))
        .with_spec(ParamSpec::new("tone_level", 0.0, 1.0, 0.3).label("Tone Level"))
        .with_spec(ParamSpec::new("tone_duration", 0.1, 1.0, 0.2).label("Tone Duration"))
        .with_spec(ParamSpec::new("volume", 0.0, 1.0, 0.7).label("Volume"))
}

/// Build the hi-hat schema
pub fn hihat_schema() -> ParamSchema {
    ParamSchema::new()
        .with_spec(ParamSpec::new("noise_level", 0.0, 100.0, 11.0).label("Noise Level"))
        .with_spec(ParamSpec::new("noise_duration", 10.0, 100.0, 37.0).label("Noise Duration"))
        .with_spec(ParamSpec::new("volume", 0.0, 1.0, 0.7).label("Volume"))
}

/// Build the clap schema
pub fn clap_schema() -> ParamSchema {
    ParamSchema::new()
        .with_spec(ParamSpec::new("spacing", 0.005, 0.06, 0.01).label("Spacing"))
        .with_spec(ParamSpec::new("decay", 0.02, 0.2, 0.06).label("Decay"))
        .with_spec(ParamSpec::new("reverb_decay", 0.2, 1.0, 0.5).label("Reverb Decay"))
        .with_spec(ParamSpec::new("filter_freq", 500.0, 8000.0, 3000.0).label("Filter Frequency"))
        .with_spec(ParamSpec::new("filter_q", 0.05, 1.0, 0.1).label("Filter Q"))
        .with_spec(ParamSpec::new("volume", 0.0, 1.0, 0.7).label("Volume"))
}

/// Build the schema for a kind
pub fn schema_for(kind: InstrumentKind) -> ParamSchema {
    match kind {
        InstrumentKind::Kick => kick_schema(),
        InstrumentKind::Bass => bass_schema(),
        InstrumentKind::Snare => snare_schema(),
        InstrumentKind::HiHat => hihat_schema(),
        InstrumentKind::Clap => clap_schema(),
    }
}

/// Fire-and-forget trigger sink
pub trait Voice: Send {
    /// Fire one hit of `kind` with the given parameter values
    fn trigger(&self, kind: InstrumentKind, params: &HashMap<String, f64>);
}

/// Voice that logs each trigger at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogVoice;

impl Voice for LogVoice {
    fn trigger(&self, kind: InstrumentKind, params: &HashMap<String, f64>) {
        let volume = params.get("volume").copied().unwrap_or(0.0);
        debug!(instrument = %kind, volume, "trigger");
    }
}

/// Voice that discards every trigger
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVoice;

impl Voice for NullVoice {
    fn trigger(&self, _kind: InstrumentKind, _params: &HashMap<String, f64>) {}
}

/// Registry of instrument schemas and voices
pub struct InstrumentRegistry {
    /// Schemas by kind
    schemas: HashMap<InstrumentKind, ParamSchema>,
    /// Voices by kind
    voices: HashMap<InstrumentKind, Box<dyn Voice>>,
    /// Kind order for round-robin assignment and listing
    order: Vec<InstrumentKind>,
}

impl InstrumentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
            voices: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registry with every built-in kind, schema, and a logging voice
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in InstrumentKind::ALL {
            registry.register(kind, schema_for(kind), Box::new(LogVoice));
        }
        registry
    }

    /// Register a kind with its schema and voice
    pub fn register(&mut self, kind: InstrumentKind, schema: ParamSchema, voice: Box<dyn Voice>) {
        self.schemas.insert(kind, schema);
        self.voices.insert(kind, voice);
        if !self.order.contains(&kind) {
            self.order.push(kind);
        }
    }

    /// Replace the voice for a kind
    pub fn set_voice(&mut self, kind: InstrumentKind, voice: Box<dyn Voice>) {
        self.voices.insert(kind, voice);
    }

    /// Get the schema for a kind
    pub fn schema(&self, kind: InstrumentKind) -> Option<&ParamSchema> {
        self.schemas.get(&kind)
    }

    /// Kinds in registration order
    pub fn order(&self) -> &[InstrumentKind] {
        &self.order
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Fire a kind's voice with the given parameters
    pub fn trigger(&self, kind: InstrumentKind, params: &HashMap<String, f64>) {
        if let Some(voice) = self.voices.get(&kind) {
            voice.trigger(kind, params);
        }
    }
}

impl Default for InstrumentRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for InstrumentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstrumentRegistry")
            .field("order", &self.order)
            .finish()
    }
}
