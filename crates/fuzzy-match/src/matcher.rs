//! Recursive fuzzy comparison of an observed value against a pattern
//!
//! Rules are tried in a fixed order. The fast-path rules decide on their
//! own. The structural rules are attempted one after another: the first
//! success wins, and when all of them fail the first recorded failure
//! becomes the cause of the reported mismatch.

use fuzzy_value::{quote, render, Kind, Shape, Value};
use tracing::{debug, trace};

use crate::error::{MatchError, MatchResult};
use crate::options::MatchOptions;
use crate::tolerance::Tolerance;

/// Compare with default options (15 significant digits)
pub fn compare(test: &Value, expected: &Value) -> MatchResult<()> {
    assert_almost_equal(test, expected, &MatchOptions::default())
}

/// Check that `test` satisfies the pattern `expected`
///
/// Structure is compared by:
/// - keys of a mapping pattern must exist in `test`; extra keys are ignored
/// - a predicate pattern is called with `test`
/// - a set pattern ignores order
/// - a singleton sequence matches its only element, and the reverse
/// - an empty sequence pattern requires `test` to be missing
///
/// Numbers are compared by `digits`, `places` or `delta`, see [`Tolerance`].
pub fn assert_almost_equal(
    test: &Value,
    expected: &Value,
    options: &MatchOptions,
) -> MatchResult<()> {
    Matcher::new(options)?.compare(test, expected)
}

/// A value paired with its classification
pub(crate) struct Operand<'a> {
    pub(crate) value: &'a Value,
    pub(crate) shape: Shape,
}

impl<'a> Operand<'a> {
    fn new(value: &'a Value) -> Self {
        Self {
            value,
            shape: value.shape(),
        }
    }
}

type Apply = fn(&Matcher, &Operand<'_>, &Operand<'_>) -> Option<MatchResult<()>>;

/// A structural rule; `None` from `apply` means the rule does not apply
struct Rule {
    name: &'static str,
    /// Pattern kinds the rule is tried for; empty means every kind
    patterns: &'static [Kind],
    /// A failure ends the comparison instead of falling through
    decisive: bool,
    apply: Apply,
}

impl Rule {
    fn accepts(&self, expected: &Shape) -> bool {
        self.patterns.is_empty() || self.patterns.contains(&expected.kind)
    }
}

const STRUCTURAL_RULES: &[Rule] = &[
    Rule {
        name: "singleton test",
        patterns: &[],
        decisive: false,
        apply: Matcher::unwrap_singleton_test,
    },
    Rule {
        name: "set",
        patterns: &[Kind::Set],
        decisive: true,
        apply: Matcher::compare_set,
    },
    Rule {
        name: "mapping",
        patterns: &[Kind::Mapping],
        decisive: false,
        apply: Matcher::compare_mappings,
    },
    Rule {
        name: "record",
        patterns: &[Kind::Mapping],
        decisive: false,
        apply: Matcher::compare_record,
    },
    Rule {
        name: "predicate",
        patterns: &[Kind::Callable],
        decisive: false,
        apply: Matcher::call_predicate,
    },
    Rule {
        name: "sequence",
        patterns: &[Kind::Sequence, Kind::Set, Kind::Record],
        decisive: false,
        apply: Matcher::compare_sequences,
    },
    Rule {
        name: "value",
        patterns: &[],
        decisive: false,
        apply: Matcher::compare_leaf,
    },
];

/// Comparison settings shared by every level of one recursive comparison
#[derive(Debug, Clone)]
pub struct Matcher {
    pub(crate) tolerance: Tolerance,
    pub(crate) msg: Option<String>,
    pub(crate) limit: usize,
}

impl Matcher {
    pub fn new(options: &MatchOptions) -> MatchResult<Self> {
        Ok(Self {
            tolerance: options.tolerance()?,
            msg: options.msg.clone(),
            limit: options.limit(),
        })
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn compare(&self, test: &Value, expected: &Value) -> MatchResult<()> {
        let test = Operand::new(test);
        let expected = Operand::new(expected);
        trace!(
            test_kind = %test.shape.kind,
            expected_kind = %expected.shape.kind,
            "Comparing"
        );

        if let Some(decided) = self.fast_path(&test, &expected) {
            return decided.map_err(|cause| self.mismatch(test.value, expected.value, Some(cause)));
        }

        let mut first_cause = None;
        for rule in STRUCTURAL_RULES.iter().filter(|rule| rule.accepts(&expected.shape)) {
            let Some(result) = (rule.apply)(self, &test, &expected) else {
                continue;
            };
            match result {
                Ok(()) => {
                    trace!(rule = rule.name, "Matched");
                    return Ok(());
                }
                Err(err) if rule.decisive => return Err(err),
                Err(err) => {
                    trace!(rule = rule.name, error = %err, "Rule failed");
                    first_cause.get_or_insert(err);
                }
            }
        }

        Err(self.mismatch(test.value, expected.value, first_cause))
    }

    fn fast_path(&self, test: &Operand<'_>, expected: &Operand<'_>) -> Option<MatchResult<()>> {
        if std::ptr::eq(test.value, expected.value) {
            return Some(Ok(()));
        }
        if expected.shape.kind == Kind::Null {
            return Some(Ok(()));
        }
        if expected.shape.missing && test.shape.missing {
            return Some(Ok(()));
        }

        match (expected.shape.kind, expected.value) {
            (Kind::Absent, _) => Some(self.require_missing(test)),
            (Kind::Scalar, Value::Text(_)) => Some(self.compare_value(test.value, expected.value)),
            (Kind::Sequence, Value::Sequence(items)) => match items.as_slice() {
                [] => Some(self.require_missing(test)),
                [only] => Some(self.compare(test.value, only)),
                _ => None,
            },
            _ => None,
        }
    }

    fn require_missing(&self, test: &Operand<'_>) -> MatchResult<()> {
        if test.shape.missing {
            return Ok(());
        }
        Err(MatchError::mismatch(format!(
            "{} is expected to not exist",
            render(test.value, self.limit)
        )))
    }

    /// `[[a, b]]` observed against a container pattern compares `[a, b]`
    fn unwrap_singleton_test(
        &self,
        test: &Operand<'_>,
        expected: &Operand<'_>,
    ) -> Option<MatchResult<()>> {
        let Value::Sequence(items) = test.value else {
            return None;
        };
        if items.len() != 1 || !expected.shape.many || !items[0].shape().many {
            return None;
        }
        Some(self.compare(&items[0], expected.value))
    }

    /// Unordered matching; each pattern element claims its own observed
    /// element, and earlier claims are moved when a later pattern needs them
    fn compare_set(&self, test: &Operand<'_>, expected: &Operand<'_>) -> Option<MatchResult<()>> {
        let Value::Set(patterns) = expected.value else {
            return None;
        };
        if !test.shape.many {
            return None;
        }
        let elements = test.value.elements()?;

        let mut distinct: Vec<&Value> = Vec::new();
        for element in elements.iter() {
            if !distinct.contains(&element) {
                distinct.push(element);
            }
        }

        if distinct.len() != patterns.len() {
            return Some(Err(MatchError::mismatch(format!(
                "Sets do not match, element count different:\n{}\nexpecting {}",
                render(test.value, self.limit),
                render(expected.value, self.limit)
            ))));
        }

        let candidates: Vec<Vec<usize>> = patterns
            .iter()
            .map(|pattern| {
                (0..distinct.len())
                    .filter(|&i| self.compare(distinct[i], pattern).is_ok())
                    .collect()
            })
            .collect();

        let mut owner: Vec<Option<usize>> = vec![None; distinct.len()];
        for (p, pattern) in patterns.iter().enumerate() {
            let mut visited = vec![false; distinct.len()];
            if !claim(p, &candidates, &mut owner, &mut visited) {
                return Some(Err(MatchError::mismatch(format!(
                    "Sets do not match. {} not found in {}",
                    render(pattern, self.limit),
                    render(test.value, self.limit)
                ))));
            }
        }
        Some(Ok(()))
    }

    /// Every pattern key must match; keys only in `test` are ignored
    fn compare_mappings(
        &self,
        test: &Operand<'_>,
        expected: &Operand<'_>,
    ) -> Option<MatchResult<()>> {
        let Value::Mapping(patterns) = expected.value else {
            return None;
        };
        if !test.shape.data {
            return None;
        }

        for (key, pattern) in patterns {
            let observed = test.value.get(key);
            if let Err(cause) = self.for_key(key).compare(&observed, pattern) {
                return Some(Err(self.key_mismatch(key, &observed, pattern, cause)));
            }
        }
        Some(Ok(()))
    }

    /// Mapping pattern read against the attributes of a non-mapping value
    fn compare_record(
        &self,
        test: &Operand<'_>,
        expected: &Operand<'_>,
    ) -> Option<MatchResult<()>> {
        let Value::Mapping(patterns) = expected.value else {
            return None;
        };
        if test.shape.data {
            return None;
        }

        let unwrapped;
        let subject = if test.shape.many {
            let elements = test.value.elements()?;
            if elements.len() != 1 {
                return Some(Err(MatchError::mismatch("Expecting data, not a list")));
            }
            unwrapped = elements[0].clone();
            &unwrapped
        } else {
            test.value
        };

        for (key, pattern) in patterns {
            let observed = subject.attribute(key);
            if let Err(cause) = self.compare(&observed, pattern) {
                return Some(Err(self.key_mismatch(key, &observed, pattern, cause)));
            }
        }
        Some(Ok(()))
    }

    fn call_predicate(
        &self,
        test: &Operand<'_>,
        expected: &Operand<'_>,
    ) -> Option<MatchResult<()>> {
        let Value::Predicate(predicate) = expected.value else {
            return None;
        };
        Some(
            predicate
                .call(test.value)
                .map_err(|source| MatchError::Predicate {
                    name: predicate.name().to_string(),
                    test: render(test.value, self.limit),
                    source,
                }),
        )
    }

    /// Element-wise, in order; the shorter side is padded with nulls
    fn compare_sequences(
        &self,
        test: &Operand<'_>,
        expected: &Operand<'_>,
    ) -> Option<MatchResult<()>> {
        if !(test.shape.many && expected.shape.many) {
            return None;
        }
        let observed = test.value.elements()?;
        let patterns = expected.value.elements()?;

        let null = Value::Null;
        for i in 0..observed.len().max(patterns.len()) {
            let t = observed.get(i).unwrap_or(&null);
            let e = patterns.get(i).unwrap_or(&null);
            if let Err(err) = self.compare(t, e) {
                return Some(Err(err));
            }
        }
        Some(Ok(()))
    }

    fn compare_leaf(&self, test: &Operand<'_>, expected: &Operand<'_>) -> Option<MatchResult<()>> {
        Some(self.compare_value(test.value, expected.value))
    }

    /// Same settings, with the key recorded in the message prefix
    fn for_key(&self, key: &str) -> Matcher {
        Matcher {
            msg: Some(format!(
                "{}key {}: ",
                self.msg.as_deref().unwrap_or(""),
                quote(key)
            )),
            ..self.clone()
        }
    }

    fn key_mismatch(
        &self,
        key: &str,
        observed: &Value,
        pattern: &Value,
        cause: MatchError,
    ) -> MatchError {
        MatchError::mismatch_caused_by(
            format!(
                "key {key}={} does not match expected {key}={}",
                render(observed, self.limit),
                render(pattern, self.limit)
            ),
            Some(cause),
        )
    }

    fn mismatch(&self, test: &Value, expected: &Value, cause: Option<MatchError>) -> MatchError {
        let message = format!(
            "{} does not match expected {}",
            render(test, self.limit),
            render(expected, self.limit)
        );
        debug!(%message, "Mismatch");
        MatchError::mismatch_caused_by(message, cause)
    }
}

/// Find an element for pattern `p`, moving earlier claims along
/// augmenting paths when every candidate is taken
fn claim(
    p: usize,
    candidates: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &i in &candidates[p] {
        if visited[i] {
            continue;
        }
        visited[i] = true;
        let free = match owner[i] {
            None => true,
            Some(q) => claim(q, candidates, owner, visited),
        };
        if free {
            owner[i] = Some(p);
            return true;
        }
    }
    false
}
