//! Leaf comparison: equality, dates and numeric tolerance

use fuzzy_value::{epoch_seconds, render, render_number, Value};

use crate::error::{MatchError, MatchResult};
use crate::matcher::Matcher;

impl Matcher {
    /// Compare two values that the structural rules did not settle
    pub(crate) fn compare_value(&self, test: &Value, expected: &Value) -> MatchResult<()> {
        if test.loosely_equals(expected) {
            return Ok(());
        }

        if let Value::Date(date) = expected {
            let Some(observed) = epoch_of(test) else {
                return Err(self.not_equal(test, expected));
            };
            return self.compare_numbers(observed, epoch_seconds(date));
        }

        if let Some(elements) = test.elements() {
            if elements.len() == 1 {
                return self.compare(&elements[0], expected);
            }
        }

        let Some(wanted) = expected.as_number() else {
            return Err(self.not_equal(test, expected));
        };
        let Some(observed) = epoch_of(test) else {
            return Err(self.not_equal(test, expected));
        };
        self.compare_numbers(observed, wanted)
    }

    pub(crate) fn compare_numbers(&self, test: f64, expected: f64) -> MatchResult<()> {
        if self.tolerance.accepts(test, expected) {
            return Ok(());
        }
        Err(MatchError::mismatch(format!(
            "{}: ({} != {} within {})",
            self.msg.as_deref().unwrap_or(""),
            render_number(test),
            render_number(expected),
            self.tolerance
        )))
    }

    fn not_equal(&self, test: &Value, expected: &Value) -> MatchError {
        MatchError::mismatch(format!(
            "{} != {}",
            render(test, self.limit),
            render(expected, self.limit)
        ))
    }
}

/// Numbers as they are, dates and date-like text as Unix seconds
fn epoch_of(value: &Value) -> Option<f64> {
    value
        .as_number()
        .or_else(|| value.as_date().map(|date| epoch_seconds(&date)))
}
