// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pattern text parsing.
//!
//! Splits a comma-separated duration list into beat segments and
//! assigns instruments round-robin. Parsing fails fast: the first
//! malformed token aborts the whole parse and nothing is returned.

use crate::instrument::InstrumentKind;

use super::{BeatSegment, Fraction, PatternError};

/// Parse a pattern string into one segment per duration token.
///
/// Tokens are `N/D` fractions or bare positive numbers; empty tokens
/// (a trailing comma, doubled commas) are ignored. Instruments come
/// from `order` in rotation; an empty order falls back to the built-in
/// kind list.
pub fn parse_pattern(text: &str, order: &[InstrumentKind]) -> Result<Vec<BeatSegment>, PatternError> {
    let order = if order.is_empty() {
        &InstrumentKind::ALL[..]
    } else {
        order
    };

    let mut segments = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let fraction: Fraction = token.parse()?;
        let instrument = order[segments.len() % order.len()];
        segments.push(BeatSegment::new(instrument, fraction));
    }

    if segments.is_empty() {
        return Err(PatternError::Empty);
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assigns_round_robin() {
        let segments = parse_pattern("1/4, 1/8, 1/8, 1/4", &InstrumentKind::ALL).unwrap();

        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].instrument(), InstrumentKind::Kick);
        assert_eq!(segments[1].instrument(), InstrumentKind::Bass);
        assert_eq!(segments[2].instrument(), InstrumentKind::Snare);
        assert_eq!(segments[3].instrument(), InstrumentKind::HiHat);
        assert_eq!(segments[0].fraction(), Fraction::new(1, 4));
        assert_eq!(segments[1].fraction(), Fraction::new(1, 8));
    }

    #[test]
    fn test_parse_wraps_past_order_length() {
        let segments =
            parse_pattern("1/8, 1/8, 1/8, 1/8, 1/8, 1/8", &InstrumentKind::ALL).unwrap();

        assert_eq!(segments[4].instrument(), InstrumentKind::Clap);
        assert_eq!(segments[5].instrument(), InstrumentKind::Kick);
    }

    #[test]
    fn test_parse_custom_order() {
        let order = [InstrumentKind::HiHat, InstrumentKind::Clap];
        let segments = parse_pattern("1/4, 1/4, 1/4", &order).unwrap();

        assert_eq!(segments[0].instrument(), InstrumentKind::HiHat);
        assert_eq!(segments[1].instrument(), InstrumentKind::Clap);
        assert_eq!(segments[2].instrument(), InstrumentKind::HiHat);
    }

    #[test]
    fn test_parse_ignores_empty_tokens() {
        let segments = parse_pattern("1/4, , 1/8,", &InstrumentKind::ALL).unwrap();

        assert_eq!(segments.len(), 2);
        // Instrument rotation counts kept tokens only
        assert_eq!(segments[1].instrument(), InstrumentKind::Bass);
    }

    #[test]
    fn test_parse_fails_fast_on_bad_token() {
        let err = parse_pattern("1/4, nope, 1/8", &InstrumentKind::ALL).unwrap_err();
        assert_eq!(err, PatternError::InvalidToken("nope".to_string()));
    }

    #[test]
    fn test_parse_rejects_zero_durations() {
        assert!(parse_pattern("1/4, 0/4", &InstrumentKind::ALL).is_err());
        assert!(parse_pattern("1/0", &InstrumentKind::ALL).is_err());
    }

    #[test]
    fn test_parse_empty_pattern() {
        assert_eq!(
            parse_pattern("", &InstrumentKind::ALL).unwrap_err(),
            PatternError::Empty
        );
        assert_eq!(
            parse_pattern("  ,  , ", &InstrumentKind::ALL).unwrap_err(),
            PatternError::Empty
        );
    }

    #[test]
    fn test_parse_single_token() {
        let segments = parse_pattern("3/8", &InstrumentKind::ALL).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].fraction(), Fraction::new(3, 8));
    }

    #[test]
    fn test_parse_decimal_tokens() {
        let segments = parse_pattern("1.5, 0.25", &InstrumentKind::ALL).unwrap();
        assert_eq!(segments[0].fraction(), Fraction::new(3, 2));
        assert_eq!(segments[1].fraction(), Fraction::new(1, 4));
    }
}
