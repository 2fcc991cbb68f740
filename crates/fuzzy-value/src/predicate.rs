//! Callable patterns

use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, ValueError};
use crate::value::Value;

type CheckFn = dyn Fn(&Value) -> Result<(), BoxError> + Send + Sync;

/// A pattern that judges the observed value itself
///
/// The matcher calls the predicate with the observed value; an error
/// returned by the predicate becomes the cause of the mismatch.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    check: Arc<CheckFn>,
}

impl Predicate {
    pub fn new<F, E>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            name: name.into(),
            check: Arc::new(move |value| check(value).map_err(Into::into)),
        }
    }

    /// Predicate from a yes/no test
    pub fn from_bool<F>(name: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let rejected = name.clone();
        Self::new(name, move |value| {
            if test(value) {
                Ok(())
            } else {
                Err(ValueError::PredicateRejected {
                    name: rejected.clone(),
                })
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, value: &Value) -> Result<(), BoxError> {
        (self.check)(value)
    }

    pub fn ptr_eq(&self, other: &Predicate) -> bool {
        Arc::ptr_eq(&self.check, &other.check)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bool() {
        let positive = Predicate::from_bool("positive", |v| v.as_number().is_some_and(|n| n > 0.0));
        assert!(positive.call(&Value::from(3)).is_ok());

        let err = positive.call(&Value::from(-3)).unwrap_err();
        assert_eq!(err.to_string(), "predicate positive returned false");
    }

    #[test]
    fn test_error_passes_through() {
        let never = Predicate::new("never", |_| Err::<(), _>("nope"));
        assert_eq!(never.call(&Value::Null).unwrap_err().to_string(), "nope");
    }
}
