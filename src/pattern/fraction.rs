// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Exact fractional beat durations.
//!
//! Durations are stored as reduced positive fractions so that
//! subdivision and flattening stay exact; floating point only enters
//! when a duration is converted to seconds.

use std::fmt;
use std::str::FromStr;

use super::PatternError;

/// A reduced fraction of a beat, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    /// Numerator, never zero
    numerator: u32,
    /// Denominator, never zero
    denominator: u32,
}

impl Fraction {
    /// Create a reduced fraction. Zero parts are bumped to one;
    /// rejecting zeroes is the parser's job.
    pub fn new(numerator: u32, denominator: u32) -> Self {
        let numerator = numerator.max(1);
        let denominator = denominator.max(1);
        let divisor = gcd(numerator, denominator);
        Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        }
    }

    /// Get the numerator
    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Get the denominator
    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Value as a float (numerator / denominator)
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for Fraction {
    type Err = PatternError;

    /// Parse a pattern token: `N/D` with positive integers, or a bare
    /// positive number. Decimals convert to exact fractions
    /// ("1.5" parses as 3/2).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || PatternError::InvalidToken(token.to_string());

        if let Some((num_text, den_text)) = split_fraction(token) {
            let numerator: u32 = num_text.trim().parse().map_err(|_| invalid())?;
            let denominator: u32 = den_text.trim().parse().map_err(|_| invalid())?;
            if numerator == 0 || denominator == 0 {
                return Err(invalid());
            }
            Ok(Fraction::new(numerator, denominator))
        } else {
            parse_decimal(token).ok_or_else(invalid)
        }
    }
}

/// Split `N/D` into its two halves; None for any other shape
fn split_fraction(token: &str) -> Option<(&str, &str)> {
    let mut parts = token.split('/');
    let num = parts.next()?;
    let den = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((num, den))
}

/// Convert a bare positive number ("2", "1.5", "0.25") to an exact
/// reduced fraction. Zero and malformed input return None.
fn parse_decimal(token: &str) -> Option<Fraction> {
    if token.is_empty() {
        return None;
    }

    let (whole_text, frac_text) = match token.split_once('.') {
        Some((w, f)) => (w, f),
        None => (token, ""),
    };
    if whole_text.is_empty() && frac_text.is_empty() {
        return None;
    }
    if !whole_text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !frac_text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // Ten fractional digits would overflow the scale below
    if frac_text.len() > 9 {
        return None;
    }

    let whole: u64 = if whole_text.is_empty() {
        0
    } else {
        whole_text.parse().ok()?
    };
    let frac: u64 = if frac_text.is_empty() {
        0
    } else {
        frac_text.parse().ok()?
    };

    let scale = 10u64.pow(frac_text.len() as u32);
    let numerator = whole.checked_mul(scale)?.checked_add(frac)?;
    if numerator == 0 {
        return None;
    }

    let divisor = gcd64(numerator, scale);
    let numerator = numerator / divisor;
    let denominator = scale / divisor;
    if numerator > u32::MAX as u64 || denominator > u32::MAX as u64 {
        return None;
    }

    Some(Fraction::new(numerator as u32, denominator as u32))
}

/// Greatest common divisor (Euclid)
fn gcd(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.max(1)
}

fn gcd64(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reduces() {
        let f = Fraction::new(2, 4);
        assert_eq!(f.numerator(), 1);
        assert_eq!(f.denominator(), 2);
        assert_eq!(Fraction::new(6, 8), Fraction::new(3, 4));
    }

    #[test]
    fn test_value() {
        assert_eq!(Fraction::new(1, 4).value(), 0.25);
        assert_eq!(Fraction::new(3, 2).value(), 1.5);
    }

    #[test]
    fn test_parse_fraction_tokens() {
        assert_eq!("1/4".parse::<Fraction>().unwrap(), Fraction::new(1, 4));
        assert_eq!(" 3/16 ".parse::<Fraction>().unwrap(), Fraction::new(3, 16));
        assert_eq!("2/4".parse::<Fraction>().unwrap(), Fraction::new(1, 2));
    }

    #[test]
    fn test_parse_bare_numbers() {
        assert_eq!("2".parse::<Fraction>().unwrap(), Fraction::new(2, 1));
        assert_eq!("1.5".parse::<Fraction>().unwrap(), Fraction::new(3, 2));
        assert_eq!("0.25".parse::<Fraction>().unwrap(), Fraction::new(1, 4));
        assert_eq!(".5".parse::<Fraction>().unwrap(), Fraction::new(1, 2));
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        for bad in ["", "abc", "1/0", "0/4", "0", "0.0", "-1/4", "1/4/4", "1//4", "1.2.3", "."] {
            assert!(
                bad.parse::<Fraction>().is_err(),
                "token '{}' should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Fraction::new(1, 4).to_string(), "1/4");
        assert_eq!(Fraction::new(3, 1).to_string(), "3");
        assert_eq!(Fraction::new(2, 4).to_string(), "1/2");
    }
}
