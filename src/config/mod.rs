// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the sequencer engine.
//!
//! Settings load from a YAML file; every field has a default so a
//! partial file (or none at all) still yields a working engine.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::instrument::InstrumentKind;
use crate::pattern::REPEAT_COUNT;
use crate::timing::DEFAULT_BPM;

/// Environment variable overriding the config path
pub const CONFIG_PATH_VAR: &str = "SUBBEAT_CONFIG";

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SequencerConfig {
    /// Tempo in BPM
    #[serde(default = "default_tempo")]
    pub tempo: f64,
    /// Pattern repeats per playback loop
    #[serde(default = "default_repeat_count")]
    pub repeat_count: usize,
    /// Pause between a mutation and the playback restart
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
    /// Humanize jitter as a fraction of each parameter's range
    #[serde(default = "default_humanize_amount")]
    pub humanize_amount: f64,
    /// Round-robin instrument assignment order
    #[serde(default = "default_instrument_order")]
    pub instrument_order: Vec<InstrumentKind>,
    /// Kinds with humanize enabled at startup
    #[serde(default)]
    pub humanize: Vec<InstrumentKind>,
}

fn default_tempo() -> f64 {
    DEFAULT_BPM
}
fn default_repeat_count() -> usize {
    REPEAT_COUNT
}
fn default_restart_delay_ms() -> u64 {
    300
}
fn default_humanize_amount() -> f64 {
    0.05
}
fn default_instrument_order() -> Vec<InstrumentKind> {
    InstrumentKind::ALL.to_vec()
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            tempo: default_tempo(),
            repeat_count: default_repeat_count(),
            restart_delay_ms: default_restart_delay_ms(),
            humanize_amount: default_humanize_amount(),
            instrument_order: default_instrument_order(),
            humanize: Vec::new(),
        }
    }
}

impl SequencerConfig {
    /// Load a configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save the configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Load from the default path, falling back to defaults when the
    /// file does not exist
    pub fn load_default() -> Result<Self> {
        let path = default_config_path();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// The config path: `$SUBBEAT_CONFIG` or `subbeat.yaml` in the
/// working directory
pub fn default_config_path() -> PathBuf {
    match env::var(CONFIG_PATH_VAR) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from("subbeat.yaml"),
    }
}
