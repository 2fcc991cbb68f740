//! Per-comparison options

use crate::error::MatchResult;
use crate::tolerance::Tolerance;

/// Longest rendering of an operand in a failure message
pub const DEFAULT_MESSAGE_LIMIT: usize = 10_000;

/// Options for one comparison
///
/// At most one of `digits`, `places` and `delta` may be set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOptions {
    /// Decimal places that must agree
    pub digits: Option<i32>,
    /// Significant digits that must agree (default 15)
    pub places: Option<i32>,
    /// Largest allowed absolute difference
    pub delta: Option<f64>,
    /// Prefix for leaf failure messages
    pub msg: Option<String>,
    /// Longest rendering of an operand in failure messages
    pub message_limit: Option<usize>,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn digits(mut self, digits: i32) -> Self {
        self.digits = Some(digits);
        self
    }

    pub fn places(mut self, places: i32) -> Self {
        self.places = Some(places);
        self
    }

    pub fn delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    pub fn message_limit(mut self, limit: usize) -> Self {
        self.message_limit = Some(limit);
        self
    }

    /// The single active tolerance mode
    pub fn tolerance(&self) -> MatchResult<Tolerance> {
        Tolerance::resolve(self.digits, self.places, self.delta)
    }

    pub fn limit(&self) -> usize {
        self.message_limit.unwrap_or(DEFAULT_MESSAGE_LIMIT)
    }
}
