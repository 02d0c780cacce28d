// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The beat-segment tree.
//!
//! A segment holds one fractional duration, the instrument that fires
//! when it plays, and its sound parameters. A segment may be subdivided
//! into children that replace it during flattening; subdividing never
//! changes the total duration.

use std::collections::HashMap;

use crate::instrument::{schema_for, InstrumentKind};

use super::Fraction;

/// One node of a rhythm pattern
#[derive(Debug, Clone, PartialEq)]
pub struct BeatSegment {
    /// Instrument fired when this segment triggers
    instrument: InstrumentKind,
    /// Duration as a fraction of a beat
    fraction: Fraction,
    /// Whether children replace this segment during playback
    subdivided: bool,
    /// Child segments, non-empty exactly when subdivided
    children: Vec<BeatSegment>,
    /// Sound parameter values, seeded from the instrument schema
    params: HashMap<String, f64>,
}

impl BeatSegment {
    /// Create an unsubdivided segment with schema-default parameters
    pub fn new(instrument: InstrumentKind, fraction: Fraction) -> Self {
        Self {
            instrument,
            fraction,
            subdivided: false,
            children: Vec::new(),
            params: schema_for(instrument).defaults(),
        }
    }

    /// Get the instrument
    pub fn instrument(&self) -> InstrumentKind {
        self.instrument
    }

    /// Get the duration fraction
    pub fn fraction(&self) -> Fraction {
        self.fraction
    }

    /// Check whether this segment is subdivided
    pub fn is_subdivided(&self) -> bool {
        self.subdivided
    }

    /// Child segments (empty unless subdivided)
    pub fn children(&self) -> &[BeatSegment] {
        &self.children
    }

    /// Mutable child segments
    pub fn children_mut(&mut self) -> &mut [BeatSegment] {
        &mut self.children
    }

    /// Sound parameter values
    pub fn params(&self) -> &HashMap<String, f64> {
        &self.params
    }

    /// Get one parameter value
    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }

    /// Set one parameter value. Validation and clamping happen at the
    /// engine, against the instrument schema.
    pub fn set_param(&mut self, name: impl Into<String>, value: f64) {
        self.params.insert(name.into(), value);
    }

    /// Reassign the instrument, reseeding parameters to the new
    /// kind's schema defaults. Children are not touched.
    pub fn set_instrument(&mut self, instrument: InstrumentKind) {
        self.instrument = instrument;
        self.params = schema_for(instrument).defaults();
    }

    /// Split into equal children that sum to this segment's duration.
    ///
    /// A numerator above one yields one child of `1/denominator` per
    /// numerator unit; a unit fraction splits in half, two children of
    /// `1/(2 * denominator)`. No-op when already subdivided, or when
    /// halving would overflow the denominator.
    pub fn subdivide(&mut self) {
        if self.subdivided {
            return;
        }

        let numerator = self.fraction.numerator();
        let denominator = self.fraction.denominator();
        let (count, child_fraction) = if numerator > 1 {
            (numerator, Fraction::new(1, denominator))
        } else {
            match denominator.checked_mul(2) {
                Some(doubled) => (2, Fraction::new(1, doubled)),
                None => return,
            }
        };

        self.children = (0..count)
            .map(|_| BeatSegment::new(self.instrument, child_fraction))
            .collect();
        self.subdivided = true;
    }

    /// Drop children and play as a single segment again
    pub fn unsubdivide(&mut self) {
        self.children.clear();
        self.subdivided = false;
    }

    /// Subdivide if whole, unsubdivide if split
    pub fn toggle_subdivision(&mut self) {
        if self.subdivided {
            self.unsubdivide();
        } else {
            self.subdivide();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter(kind: InstrumentKind) -> BeatSegment {
        BeatSegment::new(kind, Fraction::new(1, 4))
    }

    #[test]
    fn test_new_seeds_schema_defaults() {
        let segment = quarter(InstrumentKind::Kick);
        assert_eq!(segment.param("initial_freq"), Some(100.0));
        assert_eq!(segment.param("volume"), Some(0.8));
        assert!(!segment.is_subdivided());
        assert!(segment.children().is_empty());
    }

    #[test]
    fn test_subdivide_unit_fraction_halves() {
        let mut segment = quarter(InstrumentKind::Snare);
        segment.subdivide();

        assert!(segment.is_subdivided());
        assert_eq!(segment.children().len(), 2);
        for child in segment.children() {
            assert_eq!(child.fraction(), Fraction::new(1, 8));
            assert_eq!(child.instrument(), InstrumentKind::Snare);
        }
    }

    #[test]
    fn test_subdivide_compound_fraction_splits_by_numerator() {
        let mut segment = BeatSegment::new(InstrumentKind::Bass, Fraction::new(3, 8));
        segment.subdivide();

        assert_eq!(segment.children().len(), 3);
        for child in segment.children() {
            assert_eq!(child.fraction(), Fraction::new(1, 8));
        }
    }

    #[test]
    fn test_children_sum_to_parent_duration() {
        for fraction in [Fraction::new(1, 4), Fraction::new(3, 8), Fraction::new(3, 16)] {
            let mut segment = BeatSegment::new(InstrumentKind::Kick, fraction);
            segment.subdivide();

            let sum: f64 = segment.children().iter().map(|c| c.fraction().value()).sum();
            assert!((sum - fraction.value()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_subdivide_is_idempotent() {
        let mut segment = quarter(InstrumentKind::HiHat);
        segment.subdivide();
        segment.children_mut()[0].set_param("volume", 0.25);

        segment.subdivide();
        assert_eq!(segment.children().len(), 2);
        assert_eq!(segment.children()[0].param("volume"), Some(0.25));
    }

    #[test]
    fn test_subdivide_skips_on_denominator_overflow() {
        let mut segment = BeatSegment::new(InstrumentKind::Kick, Fraction::new(1, u32::MAX));
        segment.toggle_subdivision();

        assert!(!segment.is_subdivided());
        assert!(segment.children().is_empty());
        assert_eq!(segment.fraction(), Fraction::new(1, u32::MAX));
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut segment = quarter(InstrumentKind::Clap);
        segment.toggle_subdivision();
        assert!(segment.is_subdivided());

        segment.toggle_subdivision();
        assert!(!segment.is_subdivided());
        assert!(segment.children().is_empty());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = quarter(InstrumentKind::Kick);
        original.subdivide();

        let mut copy = original.clone();
        copy.children_mut()[0].set_param("volume", 0.1);
        copy.children_mut()[1].set_instrument(InstrumentKind::Clap);

        assert_eq!(original.children()[0].param("volume"), Some(0.8));
        assert_eq!(original.children()[1].instrument(), InstrumentKind::Kick);
    }

    #[test]
    fn test_set_instrument_reseeds_params() {
        let mut segment = quarter(InstrumentKind::Kick);
        segment.set_param("volume", 0.2);

        segment.set_instrument(InstrumentKind::HiHat);
        assert_eq!(segment.param("noise_level"), Some(11.0));
        assert_eq!(segment.param("volume"), Some(0.7));
        assert_eq!(segment.param("initial_freq"), None);
    }
}
