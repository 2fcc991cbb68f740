//! Error types for the test-case helpers

use std::any::Any;
use std::path::PathBuf;

use fuzzy_value::BoxError;
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for raise assertions
pub type RaisesResult<T> = Result<T, RaisesError>;

/// Result type for mock installation
pub type MockResult<T> = Result<T, MockError>;

/// Errors that can occur while loading [`FuzzyConfig`](crate::FuzzyConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML
    #[error("failed to parse YAML in {}: {source}", path.display())]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Failures of [`check_raises`](crate::check_raises) and
/// [`check_panics`](crate::check_panics)
#[derive(Debug, Error)]
pub enum RaisesError {
    /// The block finished without an error
    #[error("Expecting an error")]
    NotRaised,

    /// The block failed, but not with the expected problem
    #[error("{problem} is not raised: {reason}")]
    Unmatched {
        problem: String,
        reason: String,
        #[source]
        source: BoxError,
    },
}

/// Errors installing a mock
#[derive(Debug, Error)]
pub enum MockError {
    /// The slot was declared fixed
    #[error("{name} is not mockable")]
    NotMockable { name: String },
}

/// Marks a test as skipped; the error reporter does not log it
#[derive(Debug, Error)]
#[error("skipped: {reason}")]
pub struct SkipTest {
    pub reason: String,
}

impl SkipTest {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A caught panic, as an error
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PanicError {
    pub message: String,
}

impl PanicError {
    /// Text of a panic payload; payloads that are not strings get a placeholder
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panic with a non-text payload".to_string()
        };
        Self { message }
    }
}
