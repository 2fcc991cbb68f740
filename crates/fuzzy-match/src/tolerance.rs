//! Numeric closeness criteria

use std::fmt;

use crate::error::{MatchError, MatchResult};

/// Significant digits used when no tolerance is given
pub const DEFAULT_PLACES: i32 = 15;

/// Margin, in orders of magnitude, by which the error must undercut the
/// requested number of significant digits
const PLACES_MARGIN: f64 = -0.3;

/// How close two numbers must be to match
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Equal after rounding to this many decimal places; negative values
    /// count to the left of the units place
    Digits(i32),
    /// Equal to this many significant digits
    Places(i32),
    /// Absolute difference no larger than this
    Delta(f64),
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Places(DEFAULT_PLACES)
    }
}

impl Tolerance {
    /// Pick the single active mode; more than one is a caller error
    pub fn resolve(
        digits: Option<i32>,
        places: Option<i32>,
        delta: Option<f64>,
    ) -> MatchResult<Self> {
        let modes: Vec<&'static str> = [
            digits.map(|_| "digits"),
            places.map(|_| "places"),
            delta.map(|_| "delta"),
        ]
        .into_iter()
        .flatten()
        .collect();

        if modes.len() > 1 {
            return Err(MatchError::Configuration { modes });
        }

        Ok(match (digits, places, delta) {
            (Some(d), _, _) => Tolerance::Digits(d),
            (_, _, Some(d)) => Tolerance::Delta(d),
            (_, Some(p), _) => Tolerance::Places(p),
            _ => Tolerance::default(),
        })
    }

    /// Whether `test` is within tolerance of `expected`
    pub fn accepts(&self, test: f64, expected: f64) -> bool {
        if test == expected {
            return true;
        }
        match *self {
            Tolerance::Digits(digits) => rounded_difference(test, expected, digits) == Some(0.0),
            Tolerance::Delta(delta) => (test - expected).abs() <= delta,
            Tolerance::Places(places) => {
                significance(test, expected, places).is_some_and(|diff| diff < PLACES_MARGIN)
            }
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tolerance::Digits(digits) => write!(f, "{} decimal places", digits),
            Tolerance::Places(places) => write!(f, "{} places", places),
            Tolerance::Delta(delta) => write!(f, "{} delta", delta),
        }
    }
}

/// `|test - expected| * 10^digits`, rounded half-to-even
fn rounded_difference(test: f64, expected: f64, digits: i32) -> Option<f64> {
    let scaled = (test - expected).abs() * 10f64.powi(digits);
    scaled.is_finite().then(|| scaled.round_ties_even())
}

/// Orders of magnitude by which the error exceeds the requested precision;
/// `None` when it can not be computed (zero or non-finite operands)
fn significance(test: f64, expected: f64, places: i32) -> Option<f64> {
    let magnitude = test.abs();
    let error = (test - expected).abs();
    if !(magnitude > 0.0 && magnitude.is_finite() && error > 0.0 && error.is_finite()) {
        return None;
    }
    let factor = magnitude.log10().ceil();
    let diff = error.log10() - factor + f64::from(places);
    diff.is_finite().then_some(diff)
}
