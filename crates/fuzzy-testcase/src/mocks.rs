//! Replaceable function slots for tests
//!
//! A [`Mockable`] wraps a function. Tests swap in another implementation
//! through a guard, and the original comes back when the guard drops.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::{MockError, MockResult};

type Func<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;

/// A named function that tests may replace
pub struct Mockable<A, R> {
    name: String,
    mockable: bool,
    current: RwLock<Func<A, R>>,
}

impl<A: 'static, R: 'static> Mockable<A, R> {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let f: Func<A, R> = Arc::new(f);
        Self {
            name: name.into(),
            mockable: true,
            current: RwLock::new(f),
        }
    }

    /// A slot that refuses mocks
    pub fn fixed<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            mockable: false,
            ..Self::new(name, f)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: A) -> R {
        let f = Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner));
        f(args)
    }

    /// Replace the function until the guard drops
    pub fn mock_with<F>(&self, f: F) -> MockResult<MockGuard<'_, A, R>>
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        if !self.mockable {
            return Err(MockError::NotMockable {
                name: self.name.clone(),
            });
        }
        debug!(name = %self.name, "Installing mock");
        let f: Func<A, R> = Arc::new(f);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *current, f);
        Ok(MockGuard {
            slot: self,
            previous: Some(previous),
        })
    }

    /// Replace the function with one returning `value`
    pub fn mock_value(&self, value: R) -> MockResult<MockGuard<'_, A, R>>
    where
        R: Clone + Send + Sync,
    {
        self.mock_with(move |_| value.clone())
    }

    /// Run `body` with the function returning `value`
    pub fn with_mock_value<T>(&self, value: R, body: impl FnOnce() -> T) -> MockResult<T>
    where
        R: Clone + Send + Sync,
    {
        let _guard = self.mock_value(value)?;
        Ok(body())
    }
}

impl<A, R> std::fmt::Debug for Mockable<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mockable")
            .field("name", &self.name)
            .field("mockable", &self.mockable)
            .finish()
    }
}

/// Restores the replaced function on drop
#[must_use = "the mock is removed when the guard is dropped"]
pub struct MockGuard<'a, A, R> {
    slot: &'a Mockable<A, R>,
    previous: Option<Func<A, R>>,
}

impl<A, R> std::fmt::Debug for MockGuard<'_, A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGuard")
            .field("name", &self.slot.name)
            .finish()
    }
}

impl<A, R> Drop for MockGuard<'_, A, R> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let mut current = self
                .slot
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *current = previous;
            debug!(name = %self.slot.name, "Restored mocked function");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double() -> Mockable<i32, i32> {
        Mockable::new("double", |x| x * 2)
    }

    #[test]
    fn test_call_through() {
        assert_eq!(double().call(4), 8);
    }

    #[test]
    fn test_guard_restores() {
        let slot = double();
        {
            let _guard = slot.mock_value(1).unwrap();
            assert_eq!(slot.call(4), 1);
        }
        assert_eq!(slot.call(4), 8);
    }

    #[test]
    fn test_nested_mocks_unwind_in_order() {
        let slot = double();
        let outer = slot.mock_with(|x| x + 100).unwrap();
        {
            let _inner = slot.mock_value(0).unwrap();
            assert_eq!(slot.call(1), 0);
        }
        assert_eq!(slot.call(1), 101);
        drop(outer);
        assert_eq!(slot.call(1), 2);
    }

    #[test]
    fn test_with_mock_value() {
        let slot = Mockable::new("greeting", |name: &'static str| format!("hello {name}"));
        let seen = slot
            .with_mock_value("mocked".to_string(), || slot.call("world"))
            .unwrap();
        assert_eq!(seen, "mocked");
        assert_eq!(slot.call("world"), "hello world");
    }

    #[test]
    fn test_fixed_refuses_mocks() {
        let slot = Mockable::fixed("now", |_: ()| 7);
        let err = slot.mock_value(0).unwrap_err();
        assert_eq!(err.to_string(), "now is not mockable");
        assert_eq!(slot.call(()), 7);
    }
}
