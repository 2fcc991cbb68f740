//! Fuzzy assertions bound to per-test-case defaults

use fuzzy_match::{MatchOptions, MatchResult, Value};

use crate::config::FuzzyConfig;
use crate::raises::describe;

/// Assertion helper carrying the defaults of one test case
#[derive(Debug, Clone, Default)]
pub struct FuzzyTestCase {
    config: FuzzyConfig,
}

impl FuzzyTestCase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FuzzyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FuzzyConfig {
        &self.config
    }

    pub fn default_places(&self) -> i32 {
        self.config.default_places
    }

    pub fn set_default_places(&mut self, places: i32) {
        self.config.default_places = places;
    }

    /// Options with the test case defaults filled in
    ///
    /// `digits` and `delta` are left alone; otherwise `places` defaults to
    /// [`default_places`](Self::default_places).
    pub fn resolve_options(&self, options: &MatchOptions) -> MatchOptions {
        let mut resolved = options.clone();
        if resolved.digits.is_none() && resolved.delta.is_none() && resolved.places.is_none() {
            resolved.places = Some(self.config.default_places);
        }
        if resolved.message_limit.is_none() {
            resolved.message_limit = Some(self.config.message_limit);
        }
        resolved
    }

    pub fn almost_equal(
        &self,
        test: &Value,
        expected: &Value,
        options: &MatchOptions,
    ) -> MatchResult<()> {
        fuzzy_match::assert_almost_equal(test, expected, &self.resolve_options(options))
    }

    /// Like [`almost_equal`](Self::almost_equal), except that a null
    /// `expected` requires `test` to be missing
    pub fn equal(&self, test: &Value, expected: &Value, options: &MatchOptions) -> MatchResult<()> {
        if expected.is_null() {
            return self.almost_equal(test, &Value::Sequence(Vec::new()), options);
        }
        self.almost_equal(test, expected, options)
    }

    #[track_caller]
    pub fn assert_almost_equal(&self, test: &Value, expected: &Value, options: &MatchOptions) {
        if let Err(err) = self.almost_equal(test, expected, options) {
            panic!("{}", describe(&err));
        }
    }

    #[track_caller]
    pub fn assert_equal(&self, test: &Value, expected: &Value) {
        if let Err(err) = self.equal(test, expected, &MatchOptions::default()) {
            panic!("{}", describe(&err));
        }
    }
}

/// Assert that `test` matches the pattern `expected`
///
/// Both sides are converted with `Value::from`. Tolerance options may follow
/// as builder calls on [`MatchOptions`].
///
/// ```ignore
/// assert_fuzzy!(json!({"a": 1.0001, "b": 2}), json!({"a": 1}), places = 3);
/// ```
#[macro_export]
macro_rules! assert_fuzzy {
    ($test:expr, $expected:expr $(, $option:ident = $setting:expr)* $(,)?) => {{
        let test = $crate::Value::from($test);
        let expected = $crate::Value::from($expected);
        let options = $crate::MatchOptions::new()$(.$option($setting))*;
        if let Err(err) = $crate::assert_almost_equal(&test, &expected, &options) {
            panic!("{}", err.report());
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raises::check_panics;

    #[test]
    fn test_default_places_applies_without_tolerance() {
        let mut case = FuzzyTestCase::new();
        case.set_default_places(3);
        assert!(case
            .almost_equal(&Value::from(1.0001), &Value::from(1.0), &MatchOptions::new())
            .is_ok());

        // an explicit tolerance wins over the default
        let err = case.almost_equal(
            &Value::from(1.0001),
            &Value::from(1.0),
            &MatchOptions::new().delta(0.00001),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_digits_is_not_combined_with_default_places() {
        let case = FuzzyTestCase::new();
        let resolved = case.resolve_options(&MatchOptions::new().digits(2));
        assert_eq!(resolved.places, None);
        assert!(resolved.tolerance().is_ok());
    }

    #[test]
    fn test_equal_null_means_missing() {
        let case = FuzzyTestCase::new();
        let options = MatchOptions::new();
        assert!(case.equal(&Value::Null, &Value::Null, &options).is_ok());
        assert!(case.equal(&Value::from(""), &Value::Null, &options).is_ok());
        assert!(case.equal(&Value::from(1), &Value::Null, &options).is_err());
        // almost_equal treats null as "anything"
        assert!(case.almost_equal(&Value::from(1), &Value::Null, &options).is_ok());
    }

    #[test]
    fn test_message_limit_from_config() {
        let case = FuzzyTestCase::with_config(FuzzyConfig {
            default_places: 15,
            message_limit: 5,
        });
        let err = case
            .almost_equal(&Value::from("abcdefgh"), &Value::from(1), &MatchOptions::new())
            .unwrap_err();
        assert!(err.to_string().starts_with("\"abcd..."), "{}", err);
    }

    #[test]
    fn test_assert_equal_panics_with_report() {
        let case = FuzzyTestCase::new();
        assert!(check_panics("does not match expected", || {
            case.assert_equal(&Value::from(1), &Value::from(2))
        })
        .is_ok());
    }

    #[test]
    fn test_assert_fuzzy_macro() {
        assert_fuzzy!(1.0001, 1, places = 3);
        assert_fuzzy!("x", vec!["x"]);
        assert!(check_panics("within 0.01 delta", || assert_fuzzy!(5.1, 5, delta = 0.01)).is_ok());
    }
}
