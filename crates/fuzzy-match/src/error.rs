//! Error types for fuzzy matching

use fuzzy_value::BoxError;
use thiserror::Error;

/// Result type for match operations
pub type MatchResult<T> = Result<T, MatchError>;

/// Errors produced by the matcher
#[derive(Debug, Error)]
pub enum MatchError {
    /// The observed value does not satisfy the pattern
    #[error("{message}")]
    Mismatch {
        message: String,
        #[source]
        cause: Option<Box<MatchError>>,
    },

    /// More than one tolerance mode was requested
    #[error("specify only one of digits, places or delta (got {})", modes.join(", "))]
    Configuration { modes: Vec<&'static str> },

    /// A predicate pattern rejected the observed value
    #[error("predicate {name} rejected {test}")]
    Predicate {
        name: String,
        test: String,
        #[source]
        source: BoxError,
    },
}

impl MatchError {
    pub fn mismatch(message: impl Into<String>) -> Self {
        MatchError::Mismatch {
            message: message.into(),
            cause: None,
        }
    }

    pub fn mismatch_caused_by(message: impl Into<String>, cause: Option<MatchError>) -> Self {
        MatchError::Mismatch {
            message: message.into(),
            cause: cause.map(Box::new),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, MatchError::Configuration { .. })
    }

    /// The deepest cause in the chain
    pub fn root_cause(&self) -> &MatchError {
        match self {
            MatchError::Mismatch {
                cause: Some(cause), ..
            } => cause.root_cause(),
            _ => self,
        }
    }

    /// Message of this error followed by all of its causes
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            report.push_str("\ncaused by: ");
            report.push_str(&cause.to_string());
            source = cause.source();
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_walks_causes() {
        let err = MatchError::mismatch_caused_by(
            "outer",
            Some(MatchError::mismatch_caused_by(
                "middle",
                Some(MatchError::mismatch("inner")),
            )),
        );
        assert_eq!(err.report(), "outer\ncaused by: middle\ncaused by: inner");
        assert_eq!(err.root_cause().to_string(), "inner");
    }

    #[test]
    fn test_configuration_message() {
        let err = MatchError::Configuration {
            modes: vec!["places", "delta"],
        };
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "specify only one of digits, places or delta (got places, delta)"
        );
    }
}
