// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Randomized structure and parameter mutations.
//!
//! Structure randomization runs a Bernoulli cascade over every slot of
//! every repeat: a toggle coin, then a reassignment coin for the
//! affected segments, then a parameter coin only for segments whose
//! instrument actually changed. Parameter draws are uniform inside the
//! schema ranges, so randomized values never need clamping.

use std::collections::HashMap;

use rand::Rng;

use crate::instrument::{schema_for, InstrumentKind, ParamSchema};

use super::{BeatSegment, RepeatSet};

/// Chance that a slot's subdivision is toggled
pub const TOGGLE_PROBABILITY: f64 = 0.33;
/// Chance that an affected segment is reassigned to a random kind
pub const REASSIGN_PROBABILITY: f64 = 0.22;
/// Chance that a reassigned segment's parameters are redrawn
pub const PARAM_PROBABILITY: f64 = 0.22;

/// Run the structure cascade over every slot of every repeat.
///
/// Each slot flips its subdivision with [`TOGGLE_PROBABILITY`]. A slot
/// that just became subdivided cascades into each child; a slot left
/// unsubdivided cascades on itself. Slots that were already subdivided
/// and whose coin did not fire keep their children untouched.
pub fn randomize_structure(set: &mut RepeatSet, kinds: &[InstrumentKind], rng: &mut impl Rng) {
    for repeat in set.repeats_mut() {
        for slot in repeat.iter_mut() {
            let toggled = rng.gen::<f64>() < TOGGLE_PROBABILITY;
            if toggled {
                slot.toggle_subdivision();
            }

            if slot.is_subdivided() {
                if toggled {
                    for child in slot.children_mut() {
                        cascade(child, kinds, rng);
                    }
                }
            } else {
                cascade(slot, kinds, rng);
            }
        }
    }
}

/// Reassignment coin for one segment. The parameter coin only runs
/// after a reassignment to a different kind; a draw matching the
/// current kind changes nothing at all.
fn cascade(segment: &mut BeatSegment, kinds: &[InstrumentKind], rng: &mut impl Rng) {
    if rng.gen::<f64>() < REASSIGN_PROBABILITY && !kinds.is_empty() {
        let pick = kinds[rng.gen_range(0..kinds.len())];
        if pick != segment.instrument() {
            segment.set_instrument(pick);
            if rng.gen::<f64>() < PARAM_PROBABILITY {
                randomize_segment_params(segment, rng);
            }
        }
    }
}

/// Redraw every parameter of a segment uniformly in its schema range
pub fn randomize_segment_params(segment: &mut BeatSegment, rng: &mut impl Rng) {
    let schema = schema_for(segment.instrument());
    for spec in schema.iter() {
        segment.set_param(spec.name.clone(), rng.gen_range(spec.min..=spec.max));
    }
}

/// Copy a parameter map with each schema value jittered by a uniform
/// draw in plus or minus `amount` of its range, clamped back into
/// range. Parameters outside the schema pass through untouched; the
/// input map is never modified.
pub fn humanized_params(
    params: &HashMap<String, f64>,
    schema: &ParamSchema,
    amount: f64,
    rng: &mut impl Rng,
) -> HashMap<String, f64> {
    let mut out = params.clone();
    for spec in schema.iter() {
        if let Some(value) = params.get(&spec.name) {
            let jitter = rng.gen_range(-1.0..=1.0) * amount * spec.range();
            out.insert(spec.name.clone(), spec.clamp(value + jitter));
        }
    }
    out
}
