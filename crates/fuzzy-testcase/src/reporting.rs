//! Logging of failed tests

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::{dispatcher, warn, Dispatch};

use fuzzy_value::BoxError;

use crate::error::{PanicError, SkipTest};
use crate::raises::chain;

/// Runs test bodies and logs the ones that fail
///
/// Failures are logged at `warn` as `"<name> failed"` and then handed back
/// unchanged. Skipped tests are not logged. Events go to the reporter's own
/// dispatch when it has one, otherwise to the current default.
#[derive(Clone, Default)]
pub struct ErrorReporter {
    dispatch: Option<Dispatch>,
}

impl fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("scoped", &self.dispatch.is_some())
            .finish()
    }
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    /// Run `f`, logging an error result or a panic
    ///
    /// A panic is logged and then resumed, so callers see it as if the
    /// reporter were not there.
    pub fn run<T, E, F>(&self, test_name: &str, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: fmt::Display + 'static,
    {
        self.in_scope(|| match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                if !is_skip(&err) {
                    warn!(test_name, error = %err, "{} failed", test_name);
                }
                Err(err)
            }
            Err(payload) => {
                let panic = PanicError::from_payload(payload.as_ref());
                warn!(test_name, error = %panic, "{} failed", test_name);
                panic::resume_unwind(payload)
            }
        })
    }

    fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.dispatch {
            Some(dispatch) => dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

fn is_skip<E: 'static>(err: &E) -> bool {
    let err = err as &dyn Any;
    if err.is::<SkipTest>() {
        return true;
    }
    let inner: &(dyn Error + 'static) = if let Some(err) = err.downcast_ref::<anyhow::Error>() {
        &**err
    } else if let Some(err) = err.downcast_ref::<BoxError>() {
        &**err
    } else if let Some(err) = err.downcast_ref::<Box<dyn Error>>() {
        &**err
    } else {
        return false;
    };
    chain(inner).any(|e| e.is::<SkipTest>())
}
