// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named pattern catalog.
//!
//! A catalog maps pattern names to their duration strings and total
//! beat counts. The total counts the whole four-repeat loop and only
//! drives the time-signature labels; timing math never reads it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One catalogued pattern
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatternEntry {
    /// Pattern name
    pub name: String,
    /// Comma-separated duration string
    pub pattern: String,
    /// Beats across the full repeat loop; keys the display label
    pub total_beats: f64,
}

impl PatternEntry {
    /// Create an entry
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, total_beats: f64) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            total_beats,
        }
    }
}

/// Ordered collection of named patterns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct PatternCatalog {
    /// Entries in catalog order
    entries: Vec<PatternEntry>,
}

impl PatternCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in pattern bank
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.add(PatternEntry::new("March", "1/4, 1/4", 2.0));
        catalog.add(PatternEntry::new("Skip Step", "1/8, 1/8, 1/4", 2.0));
        catalog.add(PatternEntry::new("Waltz", "1/4, 1/4, 1/4", 3.0));
        catalog.add(PatternEntry::new("Rolling Waltz", "1/8, 1/8, 1/4, 1/8, 1/8", 3.0));
        catalog.add(PatternEntry::new("Four on the Floor", "1/4, 1/4, 1/4, 1/4", 4.0));
        catalog.add(PatternEntry::new("Backbeat", "1/8, 1/8, 1/4, 1/4, 1/8, 1/8", 4.0));
        catalog.add(PatternEntry::new("Dotted Drive", "3/8, 3/8, 1/4", 4.0));
        catalog.add(PatternEntry::new(
            "Compound Nine",
            "1/8, 1/8, 1/8, 1/8, 1/8, 1/8, 1/8, 1/8, 1/8",
            4.5,
        ));
        catalog.add(PatternEntry::new("Take Five", "1/4, 1/4, 1/4, 1/4, 1/4", 5.0));
        catalog.add(PatternEntry::new("Odd Five", "3/8, 3/8, 1/4, 1/4", 5.0));
        catalog.add(PatternEntry::new(
            "Seven Stride",
            "1/4, 1/4, 1/4, 1/8, 1/8, 1/4, 1/4, 1/4",
            7.0,
        ));
        catalog
    }

    /// Add an entry, replacing any existing entry with the same name
    pub fn add(&mut self, entry: PatternEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == entry.name) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&PatternEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by total beats, ascending, names sorted within
    /// each group
    pub fn grouped(&self) -> Vec<(f64, Vec<&PatternEntry>)> {
        let mut totals: Vec<f64> = self.entries.iter().map(|e| e.total_beats).collect();
        totals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        totals.dedup();

        totals
            .into_iter()
            .map(|total| {
                let mut group: Vec<&PatternEntry> = self
                    .entries
                    .iter()
                    .filter(|e| e.total_beats == total)
                    .collect();
                group.sort_by(|a, b| a.name.cmp(&b.name));
                (total, group)
            })
            .collect()
    }

    /// Load a catalog from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read catalog file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a catalog from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML catalog")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize catalog to YAML")
    }

    /// Save the catalog to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write catalog file: {:?}", path.as_ref()))
    }
}

/// Display label for a total beat count
pub fn time_signature_label(total_beats: f64) -> String {
    if total_beats == 2.0 {
        "2/4".to_string()
    } else if total_beats == 3.0 {
        "3/4".to_string()
    } else if total_beats == 4.0 {
        "4/4".to_string()
    } else if total_beats == 4.5 {
        "9/8".to_string()
    } else if total_beats == 5.0 {
        "5/4".to_string()
    } else if total_beats == 7.0 {
        "7/4".to_string()
    } else {
        format!("{} beats", total_beats)
    }
}
