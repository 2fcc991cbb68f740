//! Assertions that a block fails with an expected problem

use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use fuzzy_value::BoxError;
use tracing::trace;

use crate::error::{PanicError, RaisesError, RaisesResult};

type KindCheck = fn(&(dyn Error + 'static)) -> bool;

/// Description of an acceptable error
#[derive(Clone)]
pub enum Problem {
    /// Any error at all
    Any,
    /// An error of this type, anywhere in the cause chain
    Kind { name: &'static str, check: KindCheck },
    /// Text found in the message of the error or one of its causes
    Fragment(String),
    /// Any one of the alternatives
    AnyOf(Vec<Problem>),
}

impl Problem {
    /// Error of type `E`
    pub fn kind<E: Error + 'static>() -> Self {
        Problem::Kind {
            name: std::any::type_name::<E>(),
            check: is_kind::<E>,
        }
    }

    pub fn fragment(text: impl Into<String>) -> Self {
        Problem::Fragment(text.into())
    }

    /// `Ok` when `err` is acceptable, otherwise the reason it is not
    pub fn matches(&self, err: &(dyn Error + 'static)) -> Result<(), String> {
        match self {
            Problem::Any => Ok(()),
            Problem::Kind { name, check } => {
                if chain(err).any(|e| check(e)) {
                    Ok(())
                } else {
                    Err(format!("expecting {name}, got {err}"))
                }
            }
            Problem::Fragment(text) => {
                if chain(err).any(|e| e.to_string().contains(text.as_str())) {
                    Ok(())
                } else {
                    Err(format!("{text:?} not found in {:?}", describe(err)))
                }
            }
            Problem::AnyOf(alternatives) => {
                let mut first_reason = None;
                for alternative in alternatives {
                    match alternative.matches(err) {
                        Ok(()) => return Ok(()),
                        Err(reason) => {
                            first_reason.get_or_insert(reason);
                        }
                    }
                }
                Err(first_reason.unwrap_or_else(|| "no alternatives given".to_string()))
            }
        }
    }
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Any => write!(f, "an error"),
            Problem::Kind { name, .. } => write!(f, "{name}"),
            Problem::Fragment(text) => write!(f, "{text:?}"),
            Problem::AnyOf(alternatives) => {
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Problem {
    fn from(text: &str) -> Self {
        Problem::Fragment(text.to_string())
    }
}

impl From<String> for Problem {
    fn from(text: String) -> Self {
        Problem::Fragment(text)
    }
}

impl<P: Into<Problem>> From<Vec<P>> for Problem {
    fn from(alternatives: Vec<P>) -> Self {
        Problem::AnyOf(alternatives.into_iter().map(Into::into).collect())
    }
}

impl<P: Into<Problem>, const N: usize> From<[P; N]> for Problem {
    fn from(alternatives: [P; N]) -> Self {
        Problem::AnyOf(alternatives.into_iter().map(Into::into).collect())
    }
}

/// Run `f` and check that it fails with `problem`
pub fn check_raises<T, E, F>(problem: impl Into<Problem>, f: F) -> RaisesResult<()>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxError>,
{
    match f() {
        Ok(_) => Err(RaisesError::NotRaised),
        Err(err) => check_error(problem.into(), err.into()),
    }
}

/// Run `f` and check that it panics with `problem`; the panic message is
/// the error text
pub fn check_panics<R, F>(problem: impl Into<Problem>, f: F) -> RaisesResult<()>
where
    F: FnOnce() -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => Err(RaisesError::NotRaised),
        Err(payload) => check_error(
            problem.into(),
            Box::new(PanicError::from_payload(payload.as_ref())),
        ),
    }
}

/// Panicking form of [`check_raises`]
#[track_caller]
pub fn assert_raises<T, E, F>(problem: impl Into<Problem>, f: F)
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxError>,
{
    if let Err(err) = check_raises(problem, f) {
        panic!("{}", describe(&err));
    }
}

/// Panicking form of [`check_panics`]
#[track_caller]
pub fn assert_panics<R, F>(problem: impl Into<Problem>, f: F)
where
    F: FnOnce() -> R,
{
    if let Err(err) = check_panics(problem, f) {
        panic!("{}", describe(&err));
    }
}

fn check_error(problem: Problem, err: BoxError) -> RaisesResult<()> {
    match problem.matches(err.as_ref()) {
        Ok(()) => {
            trace!(%problem, error = %err, "Raised as expected");
            Ok(())
        }
        Err(reason) => Err(RaisesError::Unmatched {
            problem: problem.to_string(),
            reason,
            source: err,
        }),
    }
}

fn is_kind<E: Error + 'static>(err: &(dyn Error + 'static)) -> bool {
    err.is::<E>()
}

/// `err` followed by its causes
pub(crate) fn chain<'a>(
    err: &'a (dyn Error + 'static),
) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(Some(err), |&e| e.source())
}

/// Message of `err` followed by its causes
pub(crate) fn describe(err: &(dyn Error + 'static)) -> String {
    chain(err)
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\ncaused by: ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkipTest;

    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer {
        #[source]
        inner: SkipTest,
    }

    fn failing(message: &'static str) -> Result<(), BoxError> {
        Err(message.into())
    }

    #[test]
    fn test_fragment_searches_causes() {
        let result = check_raises("not today", || -> Result<(), Outer> {
            Err(Outer {
                inner: SkipTest::new("not today"),
            })
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_kind_searches_causes() {
        let outer = || -> Result<(), Outer> {
            Err(Outer {
                inner: SkipTest::new("later"),
            })
        };
        assert!(check_raises(Problem::kind::<SkipTest>(), outer).is_ok());
        assert!(check_raises(Problem::kind::<Outer>(), outer).is_ok());
        assert!(check_raises(Problem::kind::<PanicError>(), outer).is_err());
    }

    #[test]
    fn test_not_raised() {
        let err = check_raises(Problem::Any, || Ok::<_, BoxError>(1)).unwrap_err();
        assert!(matches!(err, RaisesError::NotRaised));
        assert_eq!(err.to_string(), "Expecting an error");
    }

    #[test]
    fn test_any_of_reports_first_reason() {
        let err = check_raises(["example2", "example3"], || failing("example1")).unwrap_err();
        let RaisesError::Unmatched { problem, reason, .. } = err else {
            panic!("expected an unmatched problem");
        };
        assert_eq!(problem, "\"example2\" or \"example3\"");
        assert!(reason.starts_with("\"example2\" not found"), "{}", reason);
    }

    #[test]
    fn test_check_panics() {
        assert!(check_panics("boom", || panic!("boom")).is_ok());
        assert!(check_panics("boom", || panic!("bang")).is_err());
        assert!(matches!(
            check_panics(Problem::Any, || 1),
            Err(RaisesError::NotRaised)
        ));
    }

    #[test]
    fn test_chain_walks_every_cause() {
        let err = Outer {
            inner: SkipTest::new("later"),
        };
        let kinds: Vec<bool> = chain(&err).map(|e| e.is::<SkipTest>()).collect();
        assert_eq!(kinds, vec![false, true]);
    }

    #[test]
    fn test_describe_joins_chain() {
        let err = Outer {
            inner: SkipTest::new("later"),
        };
        assert_eq!(describe(&err), "outer failure\ncaused by: skipped: later");
    }
}
