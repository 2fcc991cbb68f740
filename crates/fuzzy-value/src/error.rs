//! Error types for building values

use thiserror::Error;

/// Boxed error returned by predicates
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for value operations
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors that can occur while building or converting values
#[derive(Debug, Error)]
pub enum ValueError {
    /// Failed to serialize a struct into a record
    #[error("failed to serialize {type_name}: {source}")]
    Serialize {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record must serialize to a JSON object
    #[error("{type_name} does not serialize to an object")]
    NotAnObject { type_name: String },

    /// Text could not be read as a date
    #[error("can not parse {text:?} as a date")]
    UnparseableDate { text: String },

    /// Table row width does not match the column count
    #[error("row has {actual} cells, table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    /// A boolean predicate returned false
    #[error("predicate {name} returned false")]
    PredicateRejected { name: String },
}
